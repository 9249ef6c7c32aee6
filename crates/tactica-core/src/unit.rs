//! Unit and nation profiles used to parameterise movement searches.

use std::ops::BitOr;

use crate::geom::Location;

/// Full health of a unit.
pub const MAX_HEALTH: u32 = 100;

/// Identifier of a nation, as recorded in map territory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NationId(pub u8);

/// A nation with the wonder effects that influence movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nation {
    pub id: NationId,
    /// Whether this is the nation whose view of the map we hold.
    pub is_us: bool,
    /// Railroad movement costs nothing.
    pub zero_cost_railroad: bool,
    /// Units take no hostile-terrain damage.
    pub terrain_resistance: bool,
    /// Ships get extra movement.
    pub sea_speed_bonus: bool,
}

impl Nation {
    /// Our own nation without any movement wonders.
    pub const fn us(id: NationId) -> Self {
        Self {
            id,
            is_us: true,
            zero_cost_railroad: false,
            terrain_resistance: false,
            sea_speed_bonus: false,
        }
    }

    /// A foreign nation without any movement wonders.
    pub const fn foreign(id: NationId) -> Self {
        Self {
            is_us: false,
            ..Self::us(id)
        }
    }
}

/// Movement domain of a unit model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    #[default]
    Land,
    Sea,
    Air,
}

/// Unit kinds with special movement privileges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    #[default]
    Standard,
    /// Ignores zone of control and treaty borders.
    SpecialCommando,
}

/// Bitmask of model features relevant to movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitFeatures(pub u32);

impl UnitFeatures {
    pub const NONE: Self = Self(0);
    pub const TERRAIN_RESISTANT: Self = Self(1 << 0);
    /// Restricted to roads, railroads, rivers and canals.
    pub const OVERWEIGHT: Self = Self(1 << 1);
    /// Treats every step as if along a road.
    pub const ALPINE: Self = Self(1 << 2);
    /// Ships may enter open ocean.
    pub const NAVIGATION: Self = Self(1 << 3);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for UnitFeatures {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Everything a movement search needs to know about one unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitProfile {
    pub nation: Nation,
    pub location: Location,
    pub domain: Domain,
    pub kind: UnitKind,
    pub features: UnitFeatures,
    /// Movement points per turn of the unit's model.
    pub model_speed: u32,
    pub health: u32,
    pub movement_left: u32,
}

impl UnitProfile {
    /// A healthy standard unit with full movement.
    pub const fn new(nation: Nation, location: Location, domain: Domain, model_speed: u32) -> Self {
        Self {
            nation,
            location,
            domain,
            kind: UnitKind::Standard,
            features: UnitFeatures::NONE,
            model_speed,
            health: MAX_HEALTH,
            movement_left: model_speed,
        }
    }

    /// Movement points per turn, considering damage and wonders.
    ///
    /// Only ships are slowed by damage; they never drop below 250.
    pub fn speed(&self) -> u32 {
        if self.domain != Domain::Sea {
            return self.model_speed;
        }
        let mut speed = self.model_speed as i64;
        if self.nation.sea_speed_bonus {
            speed += 200;
        }
        if self.health < MAX_HEALTH {
            speed = ((speed - 250) * self.health as i64 / 5000) * 50 + 250;
        }
        speed.max(0) as u32
    }

    #[inline]
    pub fn has_feature(&self, feature: UnitFeatures) -> bool {
        self.features.contains(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damaged_ship_is_slower() {
        let mut ship = UnitProfile::new(Nation::us(NationId(1)), Location(0), Domain::Sea, 450);
        assert_eq!(ship.speed(), 450);
        ship.health = 50;
        // ((450 - 250) * 50 / 5000) * 50 + 250
        assert_eq!(ship.speed(), 350);
        ship.health = 10;
        assert_eq!(ship.speed(), 250);
    }

    #[test]
    fn sea_bonus_applies_before_damage() {
        let mut nation = Nation::us(NationId(1));
        nation.sea_speed_bonus = true;
        let mut ship = UnitProfile::new(nation, Location(0), Domain::Sea, 350);
        assert_eq!(ship.speed(), 550);
        ship.health = 50;
        assert_eq!(ship.speed(), 400);
    }

    #[test]
    fn land_speed_ignores_health() {
        let mut unit = UnitProfile::new(Nation::us(NationId(1)), Location(0), Domain::Land, 150);
        unit.health = 1;
        assert_eq!(unit.speed(), 150);
    }
}
