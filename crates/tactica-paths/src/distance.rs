use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Decoded travel effort to a cell.
///
/// `new_turn` tells whether the last step had to wait for a new turn. It
/// need not agree with `turns`, which may also grow through mountain
/// delay or hostile-terrain recovery within the same turn.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelDistance {
    pub turns: i32,
    pub movement_left: i32,
    pub new_turn: bool,
}

impl TravelDistance {
    /// Distance of a cell not reached (yet).
    pub const INVALID: Self = Self {
        turns: -1,
        movement_left: 0,
        new_turn: true,
    };

    /// Negative `turns` always yields [`INVALID`](Self::INVALID).
    pub fn new(turns: i32, movement_left: i32, new_turn: bool) -> Self {
        if turns < 0 {
            Self::INVALID
        } else {
            Self {
                turns,
                movement_left,
                new_turn,
            }
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.turns >= 0
    }
}

impl Ord for TravelDistance {
    /// Fewer turns first, then more movement left. `new_turn` is ignored.
    fn cmp(&self, other: &Self) -> Ordering {
        self.turns
            .cmp(&other.turns)
            .then(other.movement_left.cmp(&self.movement_left))
    }
}

impl PartialOrd for TravelDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TravelDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TravelDistance {}

impl Hash for TravelDistance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.turns.hash(state);
        self.movement_left.hash(state);
    }
}

impl fmt::Display for TravelDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.turns, self.movement_left)
    }
}
