//! Lazy movement searches for turn-based strategy AI.
//!
//! A [`Sprawl`] spreads outward from an origin cell over a
//! [`WorldView`](tactica_core::WorldView) and yields cells in order of
//! increasing cost, one at a time, so callers can stop as soon as they have
//! found what they are looking for. What a step costs is decided by a
//! [`StepRule`]:
//!
//! - [`Travel`]: turns and movement points of a land, sea or air unit,
//!   built with [`Sprawl::travel`], [`Sprawl::approach`] and friends
//! - [`Region`]: grid distance within land, water or shore
//!   ([`Sprawl::region`])
//! - exploration order of an island ([`Sprawl::explore`])
//!
//! The search is backed by [`AddressQueue`], a monotone integer priority
//! queue over dense cell addresses, and reuses its buffers on
//! [`Sprawl::restart`].

mod distance;
mod error;
mod explore;
mod queue;
mod region;
mod sprawl;
mod traits;
mod travel;
mod value;

pub use distance::TravelDistance;
pub use error::TravelError;
pub use queue::{AddressQueue, QueueDistance};
pub use region::{Region, TerrainGroup};
pub use sprawl::Sprawl;
pub use traits::{GridDistance, Step, StepRule};
pub use travel::{Travel, TravelOptions};
pub use value::TravelValue;
