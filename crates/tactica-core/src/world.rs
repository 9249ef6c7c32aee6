//! Read-only access to the map snapshot: the [`WorldView`] trait and the
//! rectangular [`GridWorld`] implementation.

use crate::geom::{Location, Neighbor, Point, Range};
use crate::rules::MovementRules;
use crate::tile::Tile;
use crate::unit::NationId;

/// The map as seen by our nation during one turn.
///
/// Implementations must not change while a search is running over them.
pub trait WorldView {
    /// Number of addressable cells; every valid [`Location`] is below it.
    fn size(&self) -> usize;

    /// Append the neighbours of `loc` into `buf`. The caller clears `buf`
    /// before calling. Order must be deterministic.
    fn neighbors(&self, loc: Location, buf: &mut Vec<Neighbor>);

    /// Attributes of the cell at `loc`.
    fn tile(&self, loc: Location) -> Tile;

    /// Nation owning the territory at `loc`, if any.
    fn territory(&self, loc: Location) -> Option<NationId>;

    /// Rule constants of the game this map belongs to.
    fn rules(&self) -> &MovementRules;
}

/// A rectangular map with 8-way adjacency.
///
/// Straight neighbours are at step distance 2, diagonal ones at 3.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridWorld {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    territory: Vec<Option<NationId>>,
    #[cfg_attr(feature = "serde", serde(default))]
    rules: MovementRules,
}

impl GridWorld {
    /// Create a map filled with undiscovered cells.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Tile::default())
    }

    /// Create a map with every cell set to `tile`.
    pub fn filled(width: i32, height: i32, tile: Tile) -> Self {
        assert!(width > 0 && height > 0, "map must be non-empty");
        let len = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![tile; len],
            territory: vec![None; len],
            rules: MovementRules::default(),
        }
    }

    /// Replace the rule constants (builder).
    pub fn with_rules(mut self, rules: MovementRules) -> Self {
        self.rules = rules;
        self
    }

    /// The grid rectangle covered by this map.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Address of `p`, or `None` if it is off the map.
    #[inline]
    pub fn location(&self, p: Point) -> Option<Location> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some(Location::new((p.y * self.width + p.x) as usize))
    }

    /// Address of `(x, y)`. Panics if it is off the map.
    pub fn at(&self, x: i32, y: i32) -> Location {
        self.location(Point::new(x, y))
            .unwrap_or_else(|| panic!("({x}, {y}) is outside {}", self.bounds()))
    }

    /// Grid position of an address.
    #[inline]
    pub fn point(&self, loc: Location) -> Point {
        let idx = loc.index() as i32;
        Point::new(idx % self.width, idx / self.width)
    }

    pub fn set_tile(&mut self, loc: Location, tile: Tile) {
        self.tiles[loc.index()] = tile;
    }

    pub fn set_territory(&mut self, loc: Location, owner: Option<NationId>) {
        self.territory[loc.index()] = owner;
    }
}

impl WorldView for GridWorld {
    fn size(&self) -> usize {
        self.tiles.len()
    }

    fn neighbors(&self, loc: Location, buf: &mut Vec<Neighbor>) {
        let p = self.point(loc);
        for n in p.neighbors_8() {
            if let Some(location) = self.location(n) {
                buf.push(Neighbor {
                    location,
                    distance: (n - p).step_distance(),
                });
            }
        }
    }

    fn tile(&self, loc: Location) -> Tile {
        self.tiles[loc.index()]
    }

    fn territory(&self, loc: Location) -> Option<NationId> {
        self.territory[loc.index()]
    }

    fn rules(&self) -> &MovementRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Terrain;

    #[test]
    fn corner_has_three_neighbors() {
        let world = GridWorld::filled(3, 3, Tile::new(Terrain::Grassland));
        let mut buf = Vec::new();
        world.neighbors(world.at(0, 0), &mut buf);
        let mut dists: Vec<u32> = buf.iter().map(|n| n.distance).collect();
        dists.sort();
        assert_eq!(dists, vec![2, 2, 3]);
    }

    #[test]
    fn center_has_eight_neighbors() {
        let world = GridWorld::new(3, 3);
        let mut buf = Vec::new();
        world.neighbors(world.at(1, 1), &mut buf);
        assert_eq!(buf.len(), 8);
        assert_eq!(buf[0].location, world.at(1, 0));
        assert_eq!(buf[0].distance, 2);
        assert_eq!(buf[1].distance, 3);
    }

    #[test]
    fn location_point_round_trip() {
        let world = GridWorld::new(5, 4);
        assert_eq!((world.width(), world.height()), (5, 4));
        let loc = world.at(3, 2);
        assert_eq!(loc, Location(13));
        assert_eq!(world.point(loc), Point::new(3, 2));
        assert_eq!(world.location(Point::new(5, 0)), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn world_snapshot_round_trip() {
        let mut world = GridWorld::filled(2, 2, Tile::new(Terrain::Desert));
        world.set_territory(Location(3), Some(NationId(4)));
        let json = serde_json::to_string(&world).unwrap();
        let back: GridWorld = serde_json::from_str(&json).unwrap();
        assert_eq!(back, world);
    }
}
