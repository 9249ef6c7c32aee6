//! Unit movement: the [`Travel`] strategy and movement-search constructors.
//!
//! Values are packed [`TravelValue`]s. Every domain shares the same turn
//! accounting: a step whose cost still fits into the current turn's
//! movement is spent within it, otherwise the unit waits for the next turn
//! and the step is the first thing it does there.
//!
//! Land units additionally follow terrain, road, zone-of-control and treaty
//! rules, lose a full turn climbing mountains, and pay for hostile-terrain
//! damage with extra recovery turns.

use std::ops::{BitOr, BitOrAssign};

use tactica_core::{
    Domain, Location, MAX_SPEED, MovementKind, MovementRules, Nation, Terrain, UnitFeatures,
    UnitKind, UnitProfile, WorldView,
};

use crate::distance::TravelDistance;
use crate::error::TravelError;
use crate::sprawl::Sprawl;
use crate::traits::{Step, StepRule};
use crate::value::TravelValue;

// ---------------------------------------------------------------------------
// TravelOptions
// ---------------------------------------------------------------------------

/// Bitmask of movement privileges and restrictions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelOptions(pub u32);

impl TravelOptions {
    pub const NONE: Self = Self(0x000);
    /// Foreign units do not block.
    pub const IGNORE_BLOCKING: Self = Self(0x001);
    pub const IGNORE_ZOC: Self = Self(0x002);
    pub const IGNORE_TREATY: Self = Self(0x004);
    /// All of the above: plan as if no other nation existed.
    pub const EMPTY_PLANET: Self = Self(0x007);
    pub const ZERO_COST_RAILROAD: Self = Self(0x010);
    /// No hostile-terrain damage.
    pub const TERRAIN_RESISTANT: Self = Self(0x020);
    /// Only roads, railroads, rivers and canals can be used.
    pub const OVERWEIGHT: Self = Self(0x040);
    /// Every step counts as along a road.
    pub const ALPINE: Self = Self(0x080);
    /// Ships may enter open ocean.
    pub const NAVIGATION: Self = Self(0x100);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Options implied by a unit's model and kind.
    pub fn for_unit(unit: &UnitProfile) -> Self {
        let mut options = Self::NONE;
        let commando = unit.kind == UnitKind::SpecialCommando;
        if unit.domain != Domain::Land || commando {
            options |= Self::IGNORE_ZOC;
        }
        if commando {
            options |= Self::IGNORE_TREATY;
        }
        if unit.domain != Domain::Land || unit.has_feature(UnitFeatures::TERRAIN_RESISTANT) {
            options |= Self::TERRAIN_RESISTANT;
        }
        if unit.has_feature(UnitFeatures::OVERWEIGHT) {
            options |= Self::OVERWEIGHT;
        }
        if unit.has_feature(UnitFeatures::ALPINE) {
            options |= Self::ALPINE;
        }
        if unit.has_feature(UnitFeatures::NAVIGATION) {
            options |= Self::NAVIGATION;
        }
        options
    }
}

impl BitOr for TravelOptions {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TravelOptions {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// ---------------------------------------------------------------------------
// Travel
// ---------------------------------------------------------------------------

/// Movement simulation of one (possibly hypothetical) unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Travel {
    domain: Domain,
    speed: u32,
    options: TravelOptions,
    difficult_move_cost: u32,
    railroad_move_cost: u32,
    rules: MovementRules,
}

impl Travel {
    /// Configure movement for a unit of `nation` in `domain` with `speed`
    /// movement points per turn.
    ///
    /// Units of other nations always plan on an empty planet, since the
    /// map's occupancy and treaty flags describe our own view.
    pub fn new(
        rules: MovementRules,
        nation: &Nation,
        domain: Domain,
        speed: u32,
        mut options: TravelOptions,
    ) -> Result<Self, TravelError> {
        if speed == 0 || speed > MAX_SPEED {
            return Err(TravelError::SpeedOutOfRange(speed));
        }
        if !nation.is_us {
            options |= TravelOptions::EMPTY_PLANET;
        }
        if nation.zero_cost_railroad {
            options |= TravelOptions::ZERO_COST_RAILROAD;
        }
        if nation.terrain_resistance {
            options |= TravelOptions::TERRAIN_RESISTANT;
        }
        let difficult_move_cost = rules.difficult_move_cost(speed);
        let railroad_move_cost =
            rules.railroad_move_cost(speed, options.contains(TravelOptions::ZERO_COST_RAILROAD));

        // Every step cost must fit the packed movement field.
        let widest = [
            rules.base_move_cost,
            rules.road_move_cost,
            rules.overweight_road_move_cost,
            difficult_move_cost,
            railroad_move_cost,
        ]
        .into_iter()
        .map(|cost| Self::diagonal(cost, 3))
        .max()
        .unwrap_or(0);
        if widest > MAX_SPEED {
            return Err(TravelError::StepCostOutOfRange(widest));
        }

        Ok(Self {
            domain,
            speed,
            options,
            difficult_move_cost,
            railroad_move_cost,
            rules,
        })
    }

    /// Configure movement for an existing unit.
    pub fn for_unit(rules: MovementRules, unit: &UnitProfile) -> Result<Self, TravelError> {
        Self::new(
            rules,
            &unit.nation,
            unit.domain,
            unit.speed(),
            TravelOptions::for_unit(unit),
        )
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    #[inline]
    pub fn options(&self) -> TravelOptions {
        self.options
    }

    #[inline]
    pub fn railroad_move_cost(&self) -> u32 {
        self.railroad_move_cost
    }

    #[inline]
    fn has(&self, option: TravelOptions) -> bool {
        self.options.contains(option)
    }

    /// Value at the start of a search for a unit with `movement_left`.
    pub fn start_value(&self, movement_left: u32) -> Result<TravelValue, TravelError> {
        if movement_left > self.speed {
            return Err(TravelError::MovementLeftOutOfRange {
                movement_left,
                speed: self.speed,
            });
        }
        Ok(TravelValue::new(0, self.speed - movement_left, false))
    }

    /// Spend `cost` within this turn if it fits, else in the next one.
    #[inline]
    fn spend(&self, from: TravelValue, cost: u32) -> TravelValue {
        let spent = from.movement();
        if spent + cost <= self.speed && spent < self.speed {
            from.within_turn(cost)
        } else {
            from.later_turn(1, cost, true)
        }
    }

    /// Damage taken spending `movement` points on terrain hurting
    /// `per_turn` a turn, rounded up.
    #[inline]
    fn hostile_damage(&self, per_turn: u32, movement: i64) -> i64 {
        // Integer division truncates toward zero, so zero movement still
        // counts one point.
        (per_turn as i64 * movement - 1) / self.speed as i64 + 1
    }

    /// Whole turns needed to heal `damage` outside a city, healing 8 a
    /// turn, rounded to nearest.
    #[inline]
    fn recovery_turns(damage: i64) -> u32 {
        ((damage + 4) >> 3).max(0) as u32
    }

    #[inline]
    fn diagonal(cost: u32, distance: u32) -> u32 {
        if distance == 3 { cost.saturating_add(cost >> 1) } else { cost }
    }

    fn land_step<W: WorldView + ?Sized>(
        &self,
        world: &W,
        from: Location,
        to: Location,
        distance: u32,
        from_value: TravelValue,
    ) -> Step {
        let from_tile = world.tile(from);
        let to_tile = world.tile(to);

        if !to_tile.is_discovered() {
            return Step::ForbiddenLocation;
        }
        if to_tile.has_foreign_unit() && !self.has(TravelOptions::IGNORE_BLOCKING) {
            return Step::ForbiddenLocation;
        }
        if to_tile.is_water() {
            return Step::ForbiddenLocation;
        }

        if to_tile.is_disallowed_territory()
            && !self.has(TravelOptions::IGNORE_TREATY)
            && (!from_tile.is_disallowed_territory() || world.territory(from) != world.territory(to))
        {
            return Step::ForbiddenStep;
        }

        if !self.has(TravelOptions::IGNORE_ZOC)
            && !from_tile.has_any_city()
            && !to_tile.has_own_city()
            && from_tile.is_in_foreign_zoc()
            && to_tile.is_in_foreign_zoc()
            && !to_tile.has_own_zoc_unit()
        {
            return Step::ForbiddenStep;
        }

        let spent = from_value.movement();
        let terrain_damage = if self.has(TravelOptions::TERRAIN_RESISTANT) {
            0
        } else {
            from_tile.one_turn_hostile_damage(&self.rules)
        };

        let mut cost = if from_tile.has_railroad() && to_tile.has_railroad() {
            self.railroad_move_cost
        } else if self.has(TravelOptions::ALPINE)
            || (from_tile.has_road() && to_tile.has_road())
            || (from_tile.has_river() && to_tile.has_river())
            || (from_tile.has_canal() && to_tile.has_canal())
        {
            if self.has(TravelOptions::OVERWEIGHT) {
                self.rules.overweight_road_move_cost
            } else {
                self.rules.road_move_cost
            }
        } else {
            if self.has(TravelOptions::OVERWEIGHT) {
                return Step::ForbiddenStep;
            }
            match to_tile.movement_kind() {
                MovementKind::Plain => self.rules.base_move_cost,
                MovementKind::Difficult => self.difficult_move_cost,
                MovementKind::Mountains => {
                    return Step::Ok(self.mountain_step(from_value, terrain_damage).0);
                }
            }
        };
        cost = Self::diagonal(cost, distance);

        // Movement points spent on hostile terrain, moving or waiting.
        let mut damage_movement = if terrain_damage != 0 { cost } else { 0 };
        let mut to_value = from_value;
        if spent + cost <= self.speed && spent < self.speed {
            to_value = to_value.within_turn(cost);
        } else {
            to_value = to_value.later_turn(1, cost, true);
            if terrain_damage != 0 {
                damage_movement += self.speed - spent.min(self.speed);
            }
        }
        if damage_movement > 0 {
            let damage = self.hostile_damage(terrain_damage, damage_movement as i64);
            to_value = to_value.plus_turns(Self::recovery_turns(damage));
        }
        Step::Ok(to_value.0)
    }

    /// Entering mountains uses up a whole turn, unless nothing was moved
    /// yet in the current one.
    fn mountain_step(&self, from_value: TravelValue, terrain_damage: u32) -> TravelValue {
        let spent = from_value.movement();
        if spent == 0 {
            return from_value.later_turn(1, self.speed, false);
        }
        let mut to_value = from_value.later_turn(2, self.speed, true);
        if terrain_damage != 0 && spent < self.speed {
            let wait = self.hostile_damage(terrain_damage, (self.speed - spent) as i64);
            to_value = to_value.plus_turns(Self::recovery_turns(wait));
        }
        to_value
    }
}

impl StepRule for Travel {
    fn step<W: WorldView + ?Sized>(
        &self,
        world: &W,
        from: Location,
        to: Location,
        distance: u32,
        from_value: u32,
    ) -> Step {
        let from_value = TravelValue(from_value);
        match self.domain {
            Domain::Land => self.land_step(world, from, to, distance, from_value),
            Domain::Sea => {
                let to_tile = world.tile(to);
                if !to_tile.has_canal() && !to_tile.is_water() {
                    return Step::ForbiddenLocation;
                }
                if to_tile.terrain == Terrain::Ocean && !self.has(TravelOptions::NAVIGATION) {
                    return Step::ForbiddenLocation;
                }
                let cost = Self::diagonal(self.rules.base_move_cost, distance);
                Step::Ok(self.spend(from_value, cost).0)
            }
            Domain::Air => {
                let cost = Self::diagonal(self.rules.base_move_cost, distance);
                Step::Ok(self.spend(from_value, cost).0)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Movement searches
// ---------------------------------------------------------------------------

impl<'w, W: WorldView + ?Sized> Sprawl<'w, W, Travel> {
    /// Movement search for a hypothetical unit of `nation`.
    pub fn travel_with(
        world: &'w W,
        nation: &Nation,
        origin: Location,
        domain: Domain,
        speed: u32,
        movement_left: u32,
        options: TravelOptions,
    ) -> Result<Self, TravelError> {
        let travel = Travel::new(*world.rules(), nation, domain, speed, options)?;
        let start = travel.start_value(movement_left)?;
        log::debug!(
            "travel search from {origin}: {domain:?} speed {speed}, options {:#x}",
            travel.options.0
        );
        Ok(Sprawl::new(world, origin, start.0, travel))
    }

    /// Movement search for one of our units from where it stands now.
    pub fn travel(world: &'w W, unit: &UnitProfile) -> Result<Self, TravelError> {
        Self::travel_from(world, unit, unit.location, unit.movement_left)
    }

    /// Movement search continuing a planned move: `unit` will be at `start`
    /// with `movement_left` points to spend this turn.
    pub fn travel_from(
        world: &'w W,
        unit: &UnitProfile,
        start: Location,
        movement_left: u32,
    ) -> Result<Self, TravelError> {
        let travel = Travel::for_unit(*world.rules(), unit)?;
        let start_value = travel.start_value(movement_left)?;
        log::debug!(
            "travel search from {start}: {:?} speed {}, options {:#x}",
            travel.domain,
            travel.speed,
            travel.options.0
        );
        Ok(Sprawl::new(world, start, start_value.0, travel))
    }

    /// Movement search that ends next to `target`, which need not be
    /// enterable (an enemy unit or city, say).
    pub fn approach(
        world: &'w W,
        unit: &UnitProfile,
        target: Location,
    ) -> Result<Self, TravelError> {
        Ok(Self::travel(world, unit)?.with_approach(target))
    }

    /// Movement search for a foreign unit, assumed to start its turn with
    /// full movement.
    pub fn travel_foreign(world: &'w W, unit: &UnitProfile) -> Result<Self, TravelError> {
        Self::travel_from(world, unit, unit.location, unit.speed())
    }

    /// Turns and movement left on arrival at `loc`, or
    /// [`TravelDistance::INVALID`] if it wasn't reached yet.
    ///
    /// Arriving next to the approach target counts as arriving at it.
    pub fn distance(&self, loc: Location) -> TravelDistance {
        match self.value_of(loc) {
            Some(raw) => {
                let v = TravelValue(raw);
                TravelDistance::new(
                    v.turns() as i32,
                    self.rule.speed as i32 - v.movement() as i32,
                    v.is_new_turn(),
                )
            }
            None => TravelDistance::INVALID,
        }
    }

    /// Hostile-terrain damage taken leaving the origin toward `loc`, up to
    /// the first sheltered cell on the way.
    pub fn hostile_damage_to(&self, loc: Location) -> u32 {
        self.damage_to_next_non_hostile(self.origin(), loc)
    }

    /// Hostile-terrain damage taken travelling from `from` toward `to`
    /// along the found path, until the first intermediate cell that does
    /// not hurt, or `to` if there is none.
    ///
    /// `from` should lie on the path to `to`; otherwise the walk stops at
    /// the origin. Zero for terrain-resistant units and unreached cells.
    pub fn damage_to_next_non_hostile(&self, from: Location, to: Location) -> u32 {
        if self.rule.has(TravelOptions::TERRAIN_RESISTANT) || !self.was_reached(to) {
            return 0;
        }
        let rules = &self.rule.rules;
        let speed = self.rule.speed;
        let hurt = |loc: Location| self.world.tile(loc).one_turn_hostile_damage(rules);
        let value = |loc: Location| {
            TravelValue(
                self.queue
                    .distance(loc)
                    .value()
                    .unwrap_or_else(|| panic!("{loc} on a found path has no value")),
            )
        };

        let mut loc = self.settled(to);
        let mut damage: i64 = 0;
        let mut dest_damage = hurt(loc);
        let mut dest_value = value(loc);
        while loc != from && loc != self.origin() {
            loc = self.backtrace(loc);
            let src_damage = hurt(loc);
            let src_value = value(loc);
            if loc != from && src_damage == 0 {
                damage = 0;
            } else if dest_value.is_new_turn() {
                // The unit waits out the rest of the turn at the source.
                if src_damage > 0 && src_value.movement() < speed {
                    damage += self
                        .rule
                        .hostile_damage(src_damage, (speed - src_value.movement()) as i64);
                }
                if dest_damage > 0 {
                    damage += self
                        .rule
                        .hostile_damage(dest_damage, dest_value.movement() as i64);
                }
            } else if dest_damage > 0 {
                let moved = dest_value.movement() as i64 - src_value.movement() as i64;
                damage += self.rule.hostile_damage(dest_damage, moved);
            }
            dest_damage = src_damage;
            dest_value = src_value;
        }
        damage.max(0) as u32
    }
}
