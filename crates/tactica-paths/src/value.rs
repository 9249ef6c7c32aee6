//! Packed search value of a movement search.
//!
//! Layout, most significant first:
//!
//! ```text
//! [turns: 20 bits][movement spent: 11 bits][new turn: 1 bit]
//! ```
//!
//! Plain integer comparison orders by turns, then by movement spent, which
//! is what the search queue needs.

use std::fmt;

const NEW_TURN: u32 = 0x1;
const MOVEMENT_SHIFT: u32 = 1;
const MOVEMENT_MASK: u32 = 0x7FF;
const TURN_SHIFT: u32 = 12;
const MAX_TURNS: u32 = u32::MAX >> TURN_SHIFT;

/// Turns elapsed, movement spent in the current turn, and whether the last
/// step had to wait for a new turn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TravelValue(pub u32);

impl TravelValue {
    /// Pack the three fields. Panics if a field does not fit its width.
    pub fn new(turns: u32, movement: u32, new_turn: bool) -> Self {
        assert!(
            movement <= MOVEMENT_MASK,
            "movement {movement} exceeds the {MOVEMENT_MASK} point field"
        );
        assert!(turns <= MAX_TURNS, "turn count {turns} overflows");
        Self(turns << TURN_SHIFT | movement << MOVEMENT_SHIFT | new_turn as u32)
    }

    #[inline]
    pub const fn turns(self) -> u32 {
        self.0 >> TURN_SHIFT
    }

    /// Movement points spent in the current turn.
    #[inline]
    pub const fn movement(self) -> u32 {
        (self.0 >> MOVEMENT_SHIFT) & MOVEMENT_MASK
    }

    #[inline]
    pub const fn is_new_turn(self) -> bool {
        self.0 & NEW_TURN != 0
    }

    /// Spend `cost` more within the same turn.
    #[inline]
    pub fn within_turn(self, cost: u32) -> Self {
        Self::new(self.turns(), self.movement() + cost, false)
    }

    /// Wait `turns` turns, then have spent `movement` in the new one.
    #[inline]
    pub fn later_turn(self, turns: u32, movement: u32, new_turn: bool) -> Self {
        Self::new(self.turns() + turns, movement, new_turn)
    }

    /// Add `turns` whole turns, keeping the other fields.
    #[inline]
    pub fn plus_turns(self, turns: u32) -> Self {
        Self::new(self.turns() + turns, self.movement(), self.is_new_turn())
    }
}

impl fmt::Display for TravelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.turns(), self.movement())?;
        if self.is_new_turn() {
            f.write_str("*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_round_trip() {
        let v = TravelValue::new(3, 150, true);
        assert_eq!(v.turns(), 3);
        assert_eq!(v.movement(), 150);
        assert!(v.is_new_turn());
        assert_eq!(v.0, 3 << 12 | 150 << 1 | 1);
    }

    #[test]
    fn ordering_prefers_fewer_turns_then_less_movement() {
        assert!(TravelValue::new(0, 2047, true) < TravelValue::new(1, 0, false));
        assert!(TravelValue::new(2, 40, true) < TravelValue::new(2, 41, false));
    }

    #[test]
    fn within_turn_clears_carry() {
        let v = TravelValue::new(1, 100, true).within_turn(40);
        assert_eq!(v, TravelValue::new(1, 140, false));
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn movement_overflow_panics() {
        TravelValue::new(0, 2000, false).within_turn(100);
    }
}
