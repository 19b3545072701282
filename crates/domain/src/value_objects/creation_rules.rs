//! Character creation rule constants.
//!
//! The defaults are the level-1 rules. Hosts may override individual values
//! (the engine crate reads them from the environment).

use serde::{Deserialize, Serialize};

/// Numeric rules applied while validating and deriving a level-1 character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreationRules {
    /// Character level being created
    pub level: u8,
    /// Every attribute starts here and costs 1 point per step above it
    pub attribute_floor: i32,
    /// Highest attribute value allowed, before and after modifiers
    pub attribute_cap: i32,
    /// Attribute points that must be spent exactly
    pub attribute_point_budget: i32,
    /// Points available for ancestry traits
    pub ancestry_point_budget: i32,
    /// Skill points before Intelligence and modifiers
    pub base_skill_points: i32,
    pub base_trade_points: i32,
    pub base_language_points: i32,
    pub max_skill_rank: u8,
    pub max_trade_rank: u8,
    pub base_move_speed: i32,
    pub base_grit_points: i32,
    /// Base for Precision and Area Defense
    pub defense_base: i32,
    pub save_dc_base: i32,
}

impl Default for CreationRules {
    fn default() -> Self {
        Self {
            level: 1,
            attribute_floor: -2,
            attribute_cap: 3,
            attribute_point_budget: 12,
            ancestry_point_budget: 5,
            base_skill_points: 5,
            base_trade_points: 3,
            base_language_points: 2,
            max_skill_rank: 2,
            max_trade_rank: 2,
            base_move_speed: 5,
            base_grit_points: 2,
            defense_base: 8,
            save_dc_base: 10,
        }
    }
}

impl CreationRules {
    /// Combat Mastery is half the level, rounded up.
    pub fn combat_mastery(&self) -> i32 {
        (i32::from(self.level) + 1) / 2
    }
}
