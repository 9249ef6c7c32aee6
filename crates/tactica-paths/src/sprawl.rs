//! The generic incremental search.
//!
//! A [`Sprawl`] spreads outward from an origin cell and yields cells in
//! non-decreasing value order, one per [`Iterator::next`] call. All edge
//! costs come from an injected [`StepRule`]; the search itself knows
//! nothing about terrain.
//!
//! ```
//! use tactica_core::{GridWorld, Terrain, Tile};
//! use tactica_paths::{GridDistance, Sprawl};
//!
//! let world = GridWorld::filled(5, 5, Tile::new(Terrain::Grassland));
//! let target = world.at(4, 2);
//! let mut sprawl = Sprawl::new(&world, world.at(0, 2), 0, GridDistance);
//! while let Some(loc) = sprawl.next() {
//!     if loc == target {
//!         break;
//!     }
//! }
//! assert_eq!(sprawl.path(target).map(|p| p.len()), Some(4));
//! ```

use std::iter::FusedIterator;

use tactica_core::{Location, Neighbor, WorldView};

use crate::queue::{AddressQueue, QueueDistance};
use crate::traits::{Step, StepRule};

/// How the search treats cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    /// Every reachable cell is expanded.
    Spread,
    /// `target` is only ever entered from a neighbour, yielded once, and
    /// never expanded.
    Approach { target: Location, iterated: bool },
}

/// Lazy single-source search over a [`WorldView`].
///
/// The search owns its queue and predecessor table. Advancing it needs
/// `&mut self`, so a second iteration of the same instance can't be
/// started while one is in progress; query methods take `&self` and can
/// be called between steps.
pub struct Sprawl<'w, W: WorldView + ?Sized, R> {
    pub(crate) world: &'w W,
    pub(crate) rule: R,
    origin: Location,
    start_value: u32,
    mode: Mode,
    pub(crate) queue: AddressQueue,
    backtrace: Vec<Location>,
    current: Option<Location>,
    current_value: u32,
    exhausted: bool,
    nbuf: Vec<Neighbor>,
}

impl<'w, W: WorldView + ?Sized, R: StepRule> Sprawl<'w, W, R> {
    /// Create a search from `origin`, valued `start_value`, ready to iterate.
    pub fn new(world: &'w W, origin: Location, start_value: u32, rule: R) -> Self {
        let size = world.size();
        assert!(
            origin.index() < size,
            "origin {origin} outside map of {size} cells"
        );
        let mut sprawl = Self {
            world,
            rule,
            origin,
            start_value,
            mode: Mode::Spread,
            queue: AddressQueue::new(size),
            backtrace: vec![origin; size],
            current: None,
            current_value: start_value,
            exhausted: false,
            nbuf: Vec::with_capacity(8),
        };
        sprawl.restart();
        sprawl
    }

    /// Turn this into a search that approaches `target` (builder).
    ///
    /// The target is yielded as soon as any neighbour of it is reached,
    /// without ever being expanded or entered through [`StepRule::step`],
    /// so it may be impassable. A target at the origin makes the search
    /// yield just the origin. Restarts the search.
    pub fn with_approach(mut self, target: Location) -> Self {
        self.mode = Mode::Approach {
            target,
            iterated: false,
        };
        self.restart();
        self
    }

    /// Clear all progress and re-seed the origin.
    ///
    /// Buffers are kept, so this is the cheap way to iterate again.
    pub fn restart(&mut self) {
        self.queue.clear();
        self.current = None;
        self.current_value = self.start_value;
        self.exhausted = false;
        if let Mode::Approach { target, iterated } = &mut self.mode {
            *iterated = false;
            if *target != self.origin {
                self.queue.disallow(*target);
            }
        }
        self.queue.offer(self.origin, self.start_value);
        log::debug!(
            "sprawl from {} seeded with value {:#x}",
            self.origin,
            self.start_value
        );
    }

    /// Swap the strategy and start value, then restart from the same origin.
    pub fn restart_with(&mut self, rule: R, start_value: u32) {
        self.rule = rule;
        self.start_value = start_value;
        self.restart();
    }

    /// Advance to the next cell, or `None` once everything reachable was
    /// yielded.
    fn advance(&mut self) -> Option<Location> {
        if self.exhausted {
            return None;
        }

        // The approach target is never expanded, even when it is the origin.
        let mut approached = false;
        if let Some(cur) = self.current {
            if self.approach_target() != Some(cur) {
                approached = self.expand(cur);
            }
        }

        if approached {
            if let Mode::Approach { target, iterated } = &mut self.mode {
                *iterated = true;
                let target = *target;
                self.current = Some(target);
                log::trace!("sprawl from {} approached {}", self.origin, target);
                return Some(target);
            }
        }

        match self.queue.take_closest() {
            Some((loc, value)) => {
                self.current = Some(loc);
                self.current_value = value;
                log::trace!("sprawl from {} reached {} at {:#x}", self.origin, loc, value);
                Some(loc)
            }
            None => {
                self.current = None;
                self.exhausted = true;
                log::debug!("sprawl from {} exhausted", self.origin);
                None
            }
        }
    }

    /// Offer every neighbour of `cur`. Returns whether the pending approach
    /// target is among them.
    fn expand(&mut self, cur: Location) -> bool {
        let pending = match self.mode {
            Mode::Approach {
                target,
                iterated: false,
            } if target != self.origin => Some(target),
            _ => None,
        };

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.world.neighbors(cur, &mut nbuf);

        let mut approached = false;
        for n in nbuf.iter() {
            let next = n.location;
            if Some(next) == pending {
                self.backtrace[next.index()] = cur;
                approached = true;
                continue;
            }
            if self.queue.distance(next) != QueueDistance::Unknown {
                continue;
            }
            match self
                .rule
                .step(self.world, cur, next, n.distance, self.current_value)
            {
                Step::Ok(value) => {
                    if self.queue.offer(next, value) {
                        self.backtrace[next.index()] = cur;
                    }
                }
                Step::ForbiddenStep => {}
                Step::ForbiddenLocation => {
                    log::trace!("sprawl from {} disallows {}", self.origin, next);
                    self.queue.disallow(next);
                }
            }
        }

        self.nbuf = nbuf;
        approached
    }
}

impl<'w, W: WorldView + ?Sized, R> Sprawl<'w, W, R> {
    /// The cell the search started from.
    #[inline]
    pub fn origin(&self) -> Location {
        self.origin
    }

    /// The value the origin was seeded with.
    #[inline]
    pub fn start_value(&self) -> u32 {
        self.start_value
    }

    /// The last cell yielded, if the search is running.
    #[inline]
    pub fn current(&self) -> Option<Location> {
        self.current
    }

    /// The approach target, if this is an approach search.
    pub fn approach_target(&self) -> Option<Location> {
        match self.mode {
            Mode::Approach { target, .. } => Some(target),
            Mode::Spread => None,
        }
    }

    #[inline]
    pub fn rule(&self) -> &R {
        &self.rule
    }

    #[inline]
    pub fn world(&self) -> &'w W {
        self.world
    }

    /// Whether `loc` is the approach target and distinct from the origin.
    #[inline]
    pub(crate) fn is_approach_target(&self, loc: Location) -> bool {
        matches!(self.mode, Mode::Approach { target, .. } if target == loc && target != self.origin)
    }

    /// Whether `loc` has been given a value so far.
    ///
    /// This holds for every yielded cell, and also for cells offered but
    /// not yet yielded. The approach target counts once it was yielded.
    pub fn was_reached(&self, loc: Location) -> bool {
        if self.is_approach_target(loc) {
            return matches!(self.mode, Mode::Approach { iterated: true, .. });
        }
        matches!(self.queue.distance(loc), QueueDistance::Value(_))
    }

    /// Raw strategy value of a reached cell.
    ///
    /// The approach target has no value of its own; its value is that of
    /// the cell it was approached from.
    pub fn value_of(&self, loc: Location) -> Option<u32> {
        if !self.was_reached(loc) {
            return None;
        }
        self.queue.distance(self.settled(loc)).value()
    }

    /// The cell `loc` was most cheaply reached from, if it was reached and
    /// is not the origin.
    pub fn predecessor(&self, loc: Location) -> Option<Location> {
        if loc == self.origin || !self.was_reached(loc) {
            return None;
        }
        Some(self.backtrace[loc.index()])
    }

    /// The last cell a unit actually enters on its way to `loc`: the
    /// approach target's predecessor, or `loc` itself.
    #[inline]
    pub(crate) fn settled(&self, loc: Location) -> Location {
        if self.is_approach_target(loc) {
            self.backtrace[loc.index()]
        } else {
            loc
        }
    }

    #[inline]
    pub(crate) fn backtrace(&self, loc: Location) -> Location {
        self.backtrace[loc.index()]
    }

    /// Cells to move through from the origin to `loc`, excluding the
    /// origin, or `None` if `loc` wasn't reached yet.
    ///
    /// The path ends with `loc`, except for the approach target, which is
    /// never entered: its path ends at the neighbour it was approached from.
    pub fn path(&self, loc: Location) -> Option<Vec<Location>> {
        if !self.was_reached(loc) {
            return None;
        }
        let mut path = Vec::new();
        let mut id = self.settled(loc);
        while id != self.origin {
            assert!(
                path.len() < self.backtrace.len(),
                "broken predecessor chain at {id} in sprawl from {}",
                self.origin
            );
            path.push(id);
            id = self.backtrace[id.index()];
        }
        path.reverse();
        Some(path)
    }
}

impl<W: WorldView + ?Sized, R: StepRule> Iterator for Sprawl<'_, W, R> {
    type Item = Location;

    #[inline]
    fn next(&mut self) -> Option<Location> {
        self.advance()
    }
}

impl<W: WorldView + ?Sized, R: StepRule> FusedIterator for Sprawl<'_, W, R> {}
