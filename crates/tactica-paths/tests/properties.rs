//! Search invariants over random maps.

use proptest::prelude::*;
use tactica_core::{
    Domain, GridWorld, Location, Nation, NationId, Terrain, Tile, TileFlags, UnitProfile,
    WorldView,
};
use tactica_paths::{Sprawl, Step, StepRule, TerrainGroup, TravelDistance};

const TERRAINS: [Terrain; 8] = [
    Terrain::Grassland,
    Terrain::Grassland,
    Terrain::Desert,
    Terrain::Forest,
    Terrain::Mountains,
    Terrain::Shore,
    Terrain::Ocean,
    Terrain::Unknown,
];

const FLAGS: [TileFlags; 5] = [
    TileFlags::NONE,
    TileFlags::ROAD,
    TileFlags::RAILROAD,
    TileFlags::RIVER,
    TileFlags::FOREIGN_ZOC,
];

fn world_strategy() -> impl Strategy<Value = GridWorld> {
    (2i32..8, 2i32..8).prop_flat_map(|(w, h)| {
        let len = (w * h) as usize;
        prop::collection::vec((0..TERRAINS.len(), 0..FLAGS.len()), len).prop_map(
            move |cells| {
                let mut world = GridWorld::new(w, h);
                for (i, (t, f)) in cells.into_iter().enumerate() {
                    world.set_tile(Location::new(i), Tile::new(TERRAINS[t]).with(FLAGS[f]));
                }
                world
            },
        )
    })
}

/// Checks that each yielded cell's path ends at it, moves between adjacent
/// cells, and that re-costing each step reproduces the recorded values.
fn check_paths<R: StepRule>(
    world: &GridWorld,
    sprawl: &Sprawl<'_, GridWorld, R>,
    seen: &[Location],
) {
    for &loc in seen {
        let path = sprawl.path(loc).expect("yielded cell has a path");
        if loc == sprawl.origin() {
            assert!(path.is_empty());
            continue;
        }
        assert_eq!(path.last(), Some(&loc));
        let mut prev = sprawl.origin();
        for &next in &path {
            let distance = (world.point(next) - world.point(prev)).step_distance();
            assert!(distance == 2 || distance == 3, "{prev} -> {next} not adjacent");
            let from_value = sprawl.value_of(prev).expect("path cell has a value");
            let to_value = sprawl.value_of(next).expect("path cell has a value");
            assert_eq!(
                sprawl.rule().step(world, prev, next, distance, from_value),
                Step::Ok(to_value)
            );
            prev = next;
        }
    }
}

fn assert_single_visit(world: &GridWorld, seen: &[Location]) {
    let mut visits = vec![0u32; world.size()];
    for loc in seen {
        visits[loc.index()] += 1;
    }
    assert!(visits.iter().all(|&v| v <= 1));
}

proptest! {
    #[test]
    fn region_values_never_decrease(
        world in world_strategy(),
        origin in any::<prop::sample::Index>(),
        group in prop::sample::select(vec![
            TerrainGroup::AllLand,
            TerrainGroup::AllWater,
            TerrainGroup::Shore,
        ]),
    ) {
        let origin = Location::new(origin.index(world.size()));
        let mut sprawl = Sprawl::region(&world, origin, group);
        let mut seen = Vec::new();
        let mut last = 0;
        while let Some(loc) = sprawl.next() {
            let d = sprawl.distance(loc).expect("yielded cell has a distance");
            prop_assert!(d >= last);
            last = d;
            seen.push(loc);
        }
        prop_assert_eq!(seen[0], origin);
        assert_single_visit(&world, &seen);
        check_paths(&world, &sprawl, &seen);
        for loc in &seen[1..] {
            prop_assert!(group.contains(world.tile(*loc).terrain));
        }
    }

    #[test]
    fn travel_values_never_decrease(
        world in world_strategy(),
        origin in any::<prop::sample::Index>(),
        speed in prop::sample::select(vec![100u32, 150, 200, 300]),
        spent in 0u32..=100,
        domain in prop::sample::select(vec![Domain::Land, Domain::Sea, Domain::Air]),
        free_railroad in any::<bool>(),
    ) {
        let origin = Location::new(origin.index(world.size()));
        let mut unit = UnitProfile::new(Nation::us(NationId(1)), origin, domain, speed);
        unit.nation.zero_cost_railroad = free_railroad;
        unit.movement_left = speed - spent.min(speed);
        let mut sprawl = Sprawl::travel(&world, &unit).expect("valid unit");
        let mut seen = Vec::new();
        let mut last = 0;
        let mut last_distance: Option<TravelDistance> = None;
        while let Some(loc) = sprawl.next() {
            // A free step after waiting for a new turn may clear the
            // new-turn bit, so only turns and movement are monotone.
            let v = sprawl.value_of(loc).expect("yielded cell has a value") >> 1;
            prop_assert!(v >= last);
            last = v;

            let d = sprawl.distance(loc);
            prop_assert!(d.is_valid());
            if let Some(prev) = last_distance {
                prop_assert!(prev <= d, "{} yielded after {}", d, prev);
            }
            last_distance = Some(d);
            seen.push(loc);
        }
        assert_single_visit(&world, &seen);
        check_paths(&world, &sprawl, &seen);
    }

    #[test]
    fn restart_reproduces_the_same_order(
        world in world_strategy(),
        origin in any::<prop::sample::Index>(),
    ) {
        let origin = Location::new(origin.index(world.size()));
        let unit = UnitProfile::new(Nation::us(NationId(1)), origin, Domain::Land, 150);
        let mut sprawl = Sprawl::travel(&world, &unit).expect("valid unit");
        let first: Vec<Location> = sprawl.by_ref().collect();
        sprawl.restart();
        let second: Vec<Location> = sprawl.by_ref().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn approach_target_yielded_at_most_once(
        world in world_strategy(),
        origin in any::<prop::sample::Index>(),
        target in any::<prop::sample::Index>(),
    ) {
        let origin = Location::new(origin.index(world.size()));
        let target = Location::new(target.index(world.size()));
        let unit = UnitProfile::new(Nation::us(NationId(1)), origin, Domain::Land, 150);
        let mut sprawl = Sprawl::approach(&world, &unit, target).expect("valid unit");
        let seen: Vec<Location> = sprawl.by_ref().collect();
        prop_assert!(seen.iter().filter(|&&l| l == target).count() <= 1);
        if target != origin && seen.contains(&target) {
            let path = sprawl.path(target).expect("approached target has a path");
            prop_assert!(!path.contains(&target));
            let last = path.last().copied().unwrap_or(origin);
            let d = (world.point(last) - world.point(target)).step_distance();
            prop_assert!(d == 2 || d == 3);
            prop_assert_eq!(sprawl.value_of(target), sprawl.value_of(last));
        }
    }
}
