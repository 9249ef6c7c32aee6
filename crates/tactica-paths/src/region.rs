//! Region flood-fill.

use tactica_core::{Location, Terrain, WorldView};

use crate::queue::QueueDistance;
use crate::sprawl::Sprawl;
use crate::traits::{Step, StepRule};

/// Category of cells a [`Region`] search stays within.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainGroup {
    /// Discovered land.
    #[default]
    AllLand,
    /// Discovered shore and ocean.
    AllWater,
    /// Shore only.
    Shore,
}

impl TerrainGroup {
    /// Whether a cell of `terrain` belongs to the group.
    pub fn contains(self, terrain: Terrain) -> bool {
        let discovered = terrain != Terrain::Unknown;
        match self {
            TerrainGroup::AllLand => discovered && !terrain.is_water(),
            TerrainGroup::AllWater => discovered && terrain.is_water(),
            TerrainGroup::Shore => terrain == Terrain::Shore,
        }
    }
}

/// Grid-distance search confined to one [`TerrainGroup`].
///
/// The origin itself need not belong to the group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub group: TerrainGroup,
}

impl StepRule for Region {
    #[inline]
    fn step<W: WorldView + ?Sized>(
        &self,
        world: &W,
        _from: Location,
        to: Location,
        distance: u32,
        from_value: u32,
    ) -> Step {
        if self.group.contains(world.tile(to).terrain) {
            Step::Ok(from_value + distance)
        } else {
            Step::ForbiddenLocation
        }
    }
}

impl<'w, W: WorldView + ?Sized> Sprawl<'w, W, Region> {
    /// Flood-fill the `group` region around `origin`.
    pub fn region(world: &'w W, origin: Location, group: TerrainGroup) -> Self {
        log::debug!("region search from {origin}: {group:?}");
        Sprawl::new(world, origin, 0, Region { group })
    }

    /// Accumulated step distance to `loc`, or `None` if it wasn't reached
    /// yet.
    pub fn distance(&self, loc: Location) -> Option<u32> {
        match self.queue.distance(loc) {
            QueueDistance::Value(d) => Some(d),
            QueueDistance::Unknown | QueueDistance::Disallowed => None,
        }
    }
}
