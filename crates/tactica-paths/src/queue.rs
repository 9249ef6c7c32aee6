//! Monotone integer priority queue indexed by cell address.
//!
//! [`AddressQueue`] is a radix heap: keys only grow between successive
//! [`take_closest`](AddressQueue::take_closest) calls, so entries can be
//! bucketed by the highest bit in which they differ from the last taken
//! key. Push is O(1) and pop is O(log C) amortised, where C is the key
//! range.
//!
//! Per-address state lives in flat arrays stamped with a generation
//! counter, so [`clear`](AddressQueue::clear) is O(1) apart from the
//! buckets, matching the cache-reuse strategy of the search types.

use tactica_core::Location;

/// Number of radix buckets: one for "equal to last" plus one per key bit.
const BUCKETS: usize = u32::BITS as usize + 1;

/// Current best knowledge about one address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueueDistance {
    /// Never offered since the last clear.
    Unknown,
    /// Permanently excluded since the last clear.
    Disallowed,
    /// Best value offered so far (whether or not it was taken yet).
    Value(u32),
}

impl QueueDistance {
    /// The value, if the address was offered and not disallowed.
    #[inline]
    pub fn value(self) -> Option<u32> {
        match self {
            QueueDistance::Value(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Slot {
    Unknown,
    Open(u32),
    Closed(u32),
    Disallowed,
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    addr: u32,
    value: u32,
    /// Bucketing key; equals `value` unless that was below the last taken key.
    key: u32,
}

/// Decrease-key priority queue over the dense addresses `0..capacity`.
#[derive(Debug, Clone)]
pub struct AddressQueue {
    slots: Vec<Slot>,
    stamps: Vec<u32>,
    generation: u32,
    buckets: Vec<Vec<Entry>>,
    last: u32,
    open: usize,
}

impl AddressQueue {
    /// Create an empty queue for addresses below `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Unknown; capacity],
            stamps: vec![0; capacity],
            generation: 1,
            buckets: (0..BUCKETS).map(|_| Vec::new()).collect(),
            last: 0,
            open: 0,
        }
    }

    /// Number of addressable slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of offered addresses not yet taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.open
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open == 0
    }

    /// Reset to empty, forgetting every offer and disallow.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stamp counter wrapped: stale stamps could alias, wipe them.
            self.stamps.iter_mut().for_each(|s| *s = 0);
            self.generation = 1;
        }
        for b in self.buckets.iter_mut() {
            b.clear();
        }
        self.last = 0;
        self.open = 0;
    }

    /// Resize for a map of a different size. Clears the queue.
    pub fn resize(&mut self, capacity: usize) {
        if capacity != self.slots.len() {
            self.slots.clear();
            self.slots.resize(capacity, Slot::Unknown);
            self.stamps.clear();
            self.stamps.resize(capacity, 0);
        }
        self.clear();
    }

    #[inline]
    fn slot(&self, idx: usize) -> Slot {
        if self.stamps[idx] == self.generation {
            self.slots[idx]
        } else {
            Slot::Unknown
        }
    }

    #[inline]
    fn set_slot(&mut self, idx: usize, slot: Slot) {
        self.stamps[idx] = self.generation;
        self.slots[idx] = slot;
    }

    #[inline]
    fn bucket_of(&self, key: u32) -> usize {
        if key == self.last {
            0
        } else {
            (u32::BITS - (key ^ self.last).leading_zeros()) as usize
        }
    }

    /// Record `value` for `loc` if it is new or strictly better.
    ///
    /// Returns `true` if the offer was recorded. Offers for disallowed or
    /// already taken addresses are ignored.
    ///
    /// A value below the last taken key is queued as if it were equal to
    /// that key, so it is taken next but keeps its own value.
    pub fn offer(&mut self, loc: Location, value: u32) -> bool {
        let idx = loc.index();
        match self.slot(idx) {
            Slot::Disallowed | Slot::Closed(_) => return false,
            Slot::Open(best) if value >= best => return false,
            Slot::Open(_) => {}
            Slot::Unknown => self.open += 1,
        }
        self.set_slot(idx, Slot::Open(value));
        let key = value.max(self.last);
        let b = self.bucket_of(key);
        self.buckets[b].push(Entry {
            addr: loc.0,
            value,
            key,
        });
        true
    }

    /// Best known value for `loc`.
    pub fn distance(&self, loc: Location) -> QueueDistance {
        match self.slot(loc.index()) {
            Slot::Unknown => QueueDistance::Unknown,
            Slot::Disallowed => QueueDistance::Disallowed,
            Slot::Open(v) | Slot::Closed(v) => QueueDistance::Value(v),
        }
    }

    /// Exclude `loc` until the next clear. Any pending offer is dropped.
    pub fn disallow(&mut self, loc: Location) {
        let idx = loc.index();
        if let Slot::Open(_) = self.slot(idx) {
            self.open -= 1;
        }
        self.set_slot(idx, Slot::Disallowed);
    }

    #[inline]
    fn is_live(&self, e: &Entry) -> bool {
        self.slot(e.addr as usize) == Slot::Open(e.value)
    }

    /// Remove and return the address with the lowest value.
    ///
    /// Equal keys come out in a fixed order for a fixed offer sequence.
    pub fn take_closest(&mut self) -> Option<(Location, u32)> {
        loop {
            if self.buckets[0].is_empty() && !self.refill() {
                return None;
            }
            let Some(e) = self.buckets[0].pop() else {
                continue;
            };
            if !self.is_live(&e) {
                continue;
            }
            self.set_slot(e.addr as usize, Slot::Closed(e.value));
            self.open -= 1;
            return Some((Location(e.addr), e.value));
        }
    }

    /// Move the smallest non-empty bucket's live entries down so that
    /// bucket 0 holds the new minimum key. Returns `false` when nothing
    /// live is left.
    fn refill(&mut self) -> bool {
        for i in 1..BUCKETS {
            if self.buckets[i].is_empty() {
                continue;
            }
            let mut entries = std::mem::take(&mut self.buckets[i]);
            entries.retain(|e| self.is_live(e));
            let Some(min) = entries.iter().map(|e| e.key).min() else {
                self.buckets[i] = entries;
                continue;
            };
            self.last = min;
            for e in entries.drain(..) {
                let b = self.bucket_of(e.key);
                debug_assert!(b < i, "radix bucket did not shrink");
                self.buckets[b].push(e);
            }
            // Keep the allocation around for later refills.
            self.buckets[i] = entries;
            return true;
        }
        false
    }
}
