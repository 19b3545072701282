//! Proficiency pools, language fluency and pool conversion counters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three proficiency point pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyPool {
    Skills,
    Trades,
    Languages,
}

impl ProficiencyPool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skills => "skill",
            Self::Trades => "trade",
            Self::Languages => "language",
        }
    }
}

impl fmt::Display for ProficiencyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How well a language is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fluency {
    Limited,
    Fluent,
}

impl Fluency {
    /// Language points this fluency costs.
    pub fn cost(&self) -> i32 {
        match self {
            Self::Limited => 1,
            Self::Fluent => 2,
        }
    }
}

/// One-way conversions applied between pools.
///
/// 1 skill point becomes 2 trade points; 1 trade point becomes 2 language points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProficiencyConversionState {
    #[serde(default)]
    pub skill_to_trade: u32,
    #[serde(default)]
    pub trade_to_language: u32,
}

impl ProficiencyConversionState {
    pub fn is_empty(&self) -> bool {
        self.skill_to_trade == 0 && self.trade_to_language == 0
    }
}
