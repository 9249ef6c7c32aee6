use tactica_core::MAX_SPEED;

/// A movement search could not be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TravelError {
    #[error("unit speed {0} outside 1..={max}", max = MAX_SPEED)]
    SpeedOutOfRange(u32),
    #[error("movement left {movement_left} exceeds speed {speed}")]
    MovementLeftOutOfRange { movement_left: u32, speed: u32 },
    /// A diagonal step under the rule set would cost more than any speed.
    #[error("diagonal step cost {0} exceeds {max} movement points", max = MAX_SPEED)]
    StepCostOutOfRange(u32),
}
