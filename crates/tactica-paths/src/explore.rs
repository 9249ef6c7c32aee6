//! Island exploration order.

use tactica_core::{Domain, Location, Nation, WorldView};

use crate::sprawl::Sprawl;
use crate::travel::{Travel, TravelOptions};

/// Speed of the generic slow land unit exploration is simulated with.
const EXPLORER_SPEED: u32 = 150;

impl<'w, W: WorldView + ?Sized> Sprawl<'w, W, Travel> {
    /// Visit the discovered land connected to `origin`, easiest to reach
    /// first.
    ///
    /// Yields the same cells as a land [`Region`](crate::Region) search,
    /// ordered by the travel effort of a slow land unit with full movement
    /// on an otherwise empty planet. Undiscovered cells end the island.
    pub fn explore(world: &'w W, nation: &Nation, origin: Location) -> Self {
        match Self::travel_with(
            world,
            nation,
            origin,
            Domain::Land,
            EXPLORER_SPEED,
            EXPLORER_SPEED,
            TravelOptions::EMPTY_PLANET,
        ) {
            Ok(sprawl) => sprawl,
            Err(err) => unreachable!("explorer configuration rejected: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::TerrainGroup;
    use crate::TravelDistance;
    use tactica_core::{GridWorld, NationId, Terrain, Tile, TileFlags};

    fn island() -> GridWorld {
        // ~ ~ ~ ~ ~
        // ~ g f g ~
        // ~ g M g ?
        // ~ ~ ~ ~ ~
        let mut world = GridWorld::filled(5, 4, Tile::new(Terrain::Ocean));
        for (x, y) in [(1, 1), (3, 1), (1, 2), (3, 2)] {
            world.set_tile(world.at(x, y), Tile::new(Terrain::Grassland));
        }
        world.set_tile(world.at(2, 1), Tile::new(Terrain::Forest));
        world.set_tile(world.at(2, 2), Tile::new(Terrain::Mountains));
        world.set_tile(world.at(4, 2), Tile::default());
        world
    }

    #[test]
    fn covers_the_same_cells_as_a_land_region() {
        let world = island();
        let origin = world.at(1, 1);
        let mut explored: Vec<Location> =
            Sprawl::explore(&world, &Nation::us(NationId(1)), origin).collect();
        let mut region: Vec<Location> =
            Sprawl::region(&world, origin, TerrainGroup::AllLand).collect();
        assert_eq!(explored.len(), 6);
        explored.sort();
        region.sort();
        assert_eq!(explored, region);
    }

    #[test]
    fn easier_cells_come_first() {
        let world = island();
        let origin = world.at(1, 1);
        let mut sprawl = Sprawl::explore(&world, &Nation::us(NationId(1)), origin);
        let order: Vec<Location> = sprawl.by_ref().collect();
        assert_eq!(order[0], origin);
        let mut first_turn = order[1..3].to_vec();
        first_turn.sort();
        assert_eq!(first_turn, vec![world.at(2, 1), world.at(1, 2)]);
        // The mountain uses up the whole first turn.
        assert_eq!(sprawl.distance(world.at(2, 2)), TravelDistance::new(1, 0, false));
        assert_eq!(sprawl.distance(world.at(1, 2)), TravelDistance::new(0, 50, false));
        assert_eq!(sprawl.distance(world.at(2, 1)), TravelDistance::new(0, 50, false));
    }

    #[test]
    fn ignores_foreign_units_and_borders() {
        let mut world = island();
        world.set_tile(
            world.at(2, 1),
            Tile::new(Terrain::Forest).with(TileFlags::UNIT | TileFlags::FOREIGN_ZOC),
        );
        world.set_tile(
            world.at(1, 2),
            Tile::new(Terrain::Grassland).with(TileFlags::BLOCKED_BY_TREATY),
        );
        let explored: Vec<Location> =
            Sprawl::explore(&world, &Nation::us(NationId(1)), world.at(1, 1)).collect();
        assert_eq!(explored.len(), 6);
    }
}
