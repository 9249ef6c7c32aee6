//! Per-cell attributes: [`Terrain`], [`TileFlags`], and the [`Tile`] record
//! a movement search reads for every cell it considers.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::rules::MovementRules;

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Base terrain of a cell. `Unknown` marks a cell never discovered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Unknown,
    Ocean,
    Shore,
    Grassland,
    Desert,
    Prairie,
    Tundra,
    Arctic,
    Swamp,
    Forest,
    Hills,
    Mountains,
}

/// Movement classification of a terrain for land units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MovementKind {
    Plain,
    Difficult,
    Mountains,
}

impl Terrain {
    /// Ocean or shore.
    #[inline]
    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::Ocean | Terrain::Shore)
    }

    /// Movement classification. Undiscovered cells count as plain.
    pub const fn movement_kind(self) -> MovementKind {
        match self {
            Terrain::Arctic | Terrain::Swamp | Terrain::Forest | Terrain::Hills => {
                MovementKind::Difficult
            }
            Terrain::Mountains => MovementKind::Mountains,
            _ => MovementKind::Plain,
        }
    }
}

// ---------------------------------------------------------------------------
// TileFlags
// ---------------------------------------------------------------------------

/// Bitmask of cell improvements and occupancy, as seen by our nation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileFlags(pub u32);

impl TileFlags {
    pub const NONE: Self = Self(0);
    /// Basic special resource; on desert this is an oasis.
    pub const RESOURCE: Self = Self(1 << 0);
    pub const RIVER: Self = Self(1 << 1);
    pub const ROAD: Self = Self(1 << 2);
    pub const RAILROAD: Self = Self(1 << 3);
    pub const CANAL: Self = Self(1 << 4);
    /// Military base improvement.
    pub const BASE: Self = Self(1 << 5);
    /// Any unit present.
    pub const UNIT: Self = Self(1 << 6);
    /// Combined with `UNIT`: the units are ours.
    pub const OWN_UNIT: Self = Self(1 << 7);
    /// Any city present.
    pub const CITY: Self = Self(1 << 8);
    /// Combined with `CITY`: the city is ours.
    pub const OWN_CITY: Self = Self(1 << 9);
    /// One of our units here projects zone of control.
    pub const OWN_ZOC_UNIT: Self = Self(1 << 10);
    /// Inside the zone of control of a foreign unit.
    pub const FOREIGN_ZOC: Self = Self(1 << 11);
    /// Territory of a nation we have peace with but no alliance.
    pub const BLOCKED_BY_TREATY: Self = Self(1 << 12);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether this mask shares any bit with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TileFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TileFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TileFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// Snapshot of one cell's attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: Terrain,
    pub flags: TileFlags,
}

impl Tile {
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            flags: TileFlags::NONE,
        }
    }

    /// Set flags (builder).
    #[inline]
    pub const fn with(mut self, flags: TileFlags) -> Self {
        self.flags = TileFlags(self.flags.0 | flags.0);
        self
    }

    #[inline]
    pub const fn is_discovered(self) -> bool {
        !matches!(self.terrain, Terrain::Unknown)
    }

    #[inline]
    pub const fn is_water(self) -> bool {
        self.terrain.is_water()
    }

    #[inline]
    pub const fn movement_kind(self) -> MovementKind {
        self.terrain.movement_kind()
    }

    /// Roads are also provided by railroads and cities.
    #[inline]
    pub const fn has_road(self) -> bool {
        self.flags
            .intersects(TileFlags(TileFlags::ROAD.0 | TileFlags::RAILROAD.0 | TileFlags::CITY.0))
    }

    /// Cities count as railroad without requiring the technology.
    #[inline]
    pub const fn has_railroad(self) -> bool {
        self.flags
            .intersects(TileFlags(TileFlags::RAILROAD.0 | TileFlags::CITY.0))
    }

    #[inline]
    pub const fn has_river(self) -> bool {
        self.flags.contains(TileFlags::RIVER)
    }

    /// Cities do not count as canals here even though ships may enter them.
    #[inline]
    pub const fn has_canal(self) -> bool {
        self.flags.contains(TileFlags::CANAL)
    }

    #[inline]
    pub const fn has_any_unit(self) -> bool {
        self.flags.contains(TileFlags::UNIT)
    }

    #[inline]
    pub const fn has_own_unit(self) -> bool {
        self.flags
            .contains(TileFlags(TileFlags::UNIT.0 | TileFlags::OWN_UNIT.0))
    }

    #[inline]
    pub const fn has_foreign_unit(self) -> bool {
        self.has_any_unit() && !self.flags.contains(TileFlags::OWN_UNIT)
    }

    #[inline]
    pub const fn has_any_city(self) -> bool {
        self.flags.contains(TileFlags::CITY)
    }

    #[inline]
    pub const fn has_own_city(self) -> bool {
        self.flags
            .contains(TileFlags(TileFlags::CITY.0 | TileFlags::OWN_CITY.0))
    }

    #[inline]
    pub const fn has_foreign_city(self) -> bool {
        self.has_any_city() && !self.flags.contains(TileFlags::OWN_CITY)
    }

    #[inline]
    pub const fn has_own_zoc_unit(self) -> bool {
        self.flags.contains(TileFlags::OWN_ZOC_UNIT)
    }

    #[inline]
    pub const fn is_in_foreign_zoc(self) -> bool {
        self.flags.contains(TileFlags::FOREIGN_ZOC)
    }

    #[inline]
    pub const fn is_disallowed_territory(self) -> bool {
        self.flags.contains(TileFlags::BLOCKED_BY_TREATY)
    }

    /// Damage a unit without hostile-terrain resistance takes when staying
    /// here for a full turn.
    ///
    /// Cities, rivers, canals and military bases shelter from it entirely.
    pub fn one_turn_hostile_damage(self, rules: &MovementRules) -> u32 {
        let shelter = TileFlags::CITY | TileFlags::RIVER | TileFlags::CANAL | TileFlags::BASE;
        if self.flags.intersects(shelter) {
            return 0;
        }
        match self.terrain {
            Terrain::Desert if !self.flags.contains(TileFlags::RESOURCE) => {
                rules.damage_per_turn_in_desert
            }
            Terrain::Arctic => rules.damage_per_turn_in_arctic,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_flags() {
        let foreign = Tile::new(Terrain::Grassland).with(TileFlags::UNIT);
        assert!(foreign.has_foreign_unit());
        assert!(!foreign.has_own_unit());

        let own = Tile::new(Terrain::Grassland).with(TileFlags::UNIT | TileFlags::OWN_UNIT);
        assert!(own.has_own_unit());
        assert!(!own.has_foreign_unit());

        let city = Tile::new(Terrain::Prairie).with(TileFlags::CITY);
        assert!(city.has_foreign_city());
        assert!(city.has_road());
        assert!(city.has_railroad());
        assert!(!city.has_canal());
    }

    #[test]
    fn hostile_damage() {
        let rules = MovementRules::default();
        assert_eq!(Tile::new(Terrain::Desert).one_turn_hostile_damage(&rules), 20);
        assert_eq!(Tile::new(Terrain::Arctic).one_turn_hostile_damage(&rules), 20);
        assert_eq!(Tile::new(Terrain::Grassland).one_turn_hostile_damage(&rules), 0);

        let oasis = Tile::new(Terrain::Desert).with(TileFlags::RESOURCE);
        assert_eq!(oasis.one_turn_hostile_damage(&rules), 0);
        let river = Tile::new(Terrain::Arctic).with(TileFlags::RIVER);
        assert_eq!(river.one_turn_hostile_damage(&rules), 0);
        let base = Tile::new(Terrain::Desert).with(TileFlags::BASE);
        assert_eq!(base.one_turn_hostile_damage(&rules), 0);
    }

    #[test]
    fn movement_kinds() {
        assert_eq!(Terrain::Hills.movement_kind(), MovementKind::Difficult);
        assert_eq!(Terrain::Mountains.movement_kind(), MovementKind::Mountains);
        assert_eq!(Terrain::Unknown.movement_kind(), MovementKind::Plain);
        assert!(!Tile::default().is_discovered());
        assert!(Tile::new(Terrain::Shore).is_water());
    }
}
