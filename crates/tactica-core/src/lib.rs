//! **tactica-core** — the world model a turn-based strategy AI reads.
//!
//! This crate describes the host-owned game-state snapshot from the point
//! of view of one nation: dense cell addresses, per-cell tile attributes,
//! unit and nation profiles, and the rule constants of the movement
//! simulation. Everything here is read-only input for the searches in
//! `tactica-paths`.

pub mod geom;
pub mod rules;
pub mod tile;
pub mod unit;
pub mod world;

pub use geom::{Location, Neighbor, Point, Range};
pub use rules::{MAX_SPEED, MovementRules};
pub use tile::{MovementKind, Terrain, Tile, TileFlags};
pub use unit::{Domain, MAX_HEALTH, Nation, NationId, UnitFeatures, UnitKind, UnitProfile};
pub use world::{GridWorld, WorldView};
