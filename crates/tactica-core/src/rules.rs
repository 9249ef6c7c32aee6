//! Rule constants of the movement simulation.

/// Largest movement-point budget a unit can have per turn.
///
/// Movement spent within a turn is packed into an 11-bit field by the
/// movement search, so speeds above this cannot be represented.
pub const MAX_SPEED: u32 = 0x7FF;

/// Movement and hostile-terrain constants.
///
/// `Default` gives the reference rule set; load a different one through
/// serde to model rule variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementRules {
    /// Cost of one straight step on plain terrain (and for ships/aircraft).
    pub base_move_cost: u32,
    /// Cost of a straight step along road, river or canal.
    pub road_move_cost: u32,
    /// Road cost for overweight units, which cannot leave roads.
    pub overweight_road_move_cost: u32,
    pub damage_per_turn_in_desert: u32,
    pub damage_per_turn_in_arctic: u32,
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            base_move_cost: 100,
            road_move_cost: 40,
            overweight_road_move_cost: 80,
            damage_per_turn_in_desert: 20,
            damage_per_turn_in_arctic: 20,
        }
    }
}

impl MovementRules {
    /// Cost of a straight step onto difficult terrain for a unit of `speed`.
    #[inline]
    pub fn difficult_move_cost(&self, speed: u32) -> u32 {
        (self.base_move_cost as i32 + (speed as i32 - 150) / 5).max(0) as u32
    }

    /// Cost of a straight step along railroad for a unit of `speed`.
    #[inline]
    pub fn railroad_move_cost(&self, speed: u32, zero_cost: bool) -> u32 {
        if zero_cost { 0 } else { (speed / 50) * 4 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_costs() {
        let rules = MovementRules::default();
        assert_eq!(rules.difficult_move_cost(150), 100);
        assert_eq!(rules.difficult_move_cost(300), 130);
        assert_eq!(rules.difficult_move_cost(100), 90);
        assert_eq!(rules.railroad_move_cost(150, false), 12);
        assert_eq!(rules.railroad_move_cost(150, true), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_rules_fill_defaults() {
        let rules: MovementRules =
            serde_json::from_str(r#"{"damage_per_turn_in_desert": 30}"#).unwrap();
        assert_eq!(rules.damage_per_turn_in_desert, 30);
        assert_eq!(rules.base_move_cost, 100);
    }
}
