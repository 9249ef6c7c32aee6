use tactica_core::{Location, WorldView};

/// Outcome of costing one edge of the map graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The edge can be taken; the destination's value through it.
    Ok(u32),
    /// This edge is blocked, but the destination may still be reached
    /// through another one.
    ForbiddenStep,
    /// The destination can never be entered in this search.
    ForbiddenLocation,
}

/// Edge-cost strategy driving a [`Sprawl`](crate::Sprawl).
pub trait StepRule {
    /// Cost the move from `from` (already valued at `from_value`) to the
    /// adjacent `to`, which lies `distance` (2 straight, 3 diagonal) away.
    ///
    /// The returned value should not be below `from_value`; a lower one is
    /// still taken next, but cells already yielded are not revisited.
    fn step<W: WorldView + ?Sized>(
        &self,
        world: &W,
        from: Location,
        to: Location,
        distance: u32,
        from_value: u32,
    ) -> Step;
}

/// Plain grid distance: every edge costs its step distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GridDistance;

impl StepRule for GridDistance {
    #[inline]
    fn step<W: WorldView + ?Sized>(
        &self,
        _world: &W,
        _from: Location,
        _to: Location,
        distance: u32,
        from_value: u32,
    ) -> Step {
        Step::Ok(from_value + distance)
    }
}
