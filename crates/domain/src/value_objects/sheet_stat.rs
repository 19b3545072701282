//! Derived sheet values that effects can modify.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric value on the derived character sheet that `ModifyStat` effects target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetStat {
    HitPoints,
    StaminaPoints,
    ManaPoints,
    GritPoints,
    RestPoints,
    MoveSpeed,
    JumpDistance,
    PrecisionDefense,
    AreaDefense,
    Initiative,
    SkillPoints,
    TradePoints,
    LanguagePoints,
    ManeuversKnown,
    TechniquesKnown,
    CantripsKnown,
    SpellsKnown,
    SaveDc,
}

impl SheetStat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HitPoints => "hit_points",
            Self::StaminaPoints => "stamina_points",
            Self::ManaPoints => "mana_points",
            Self::GritPoints => "grit_points",
            Self::RestPoints => "rest_points",
            Self::MoveSpeed => "move_speed",
            Self::JumpDistance => "jump_distance",
            Self::PrecisionDefense => "precision_defense",
            Self::AreaDefense => "area_defense",
            Self::Initiative => "initiative",
            Self::SkillPoints => "skill_points",
            Self::TradePoints => "trade_points",
            Self::LanguagePoints => "language_points",
            Self::ManeuversKnown => "maneuvers_known",
            Self::TechniquesKnown => "techniques_known",
            Self::CantripsKnown => "cantrips_known",
            Self::SpellsKnown => "spells_known",
            Self::SaveDc => "save_dc",
        }
    }
}

impl fmt::Display for SheetStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetStat {
    type Err = ();

    /// Accepts snake_case names plus the camelCase and short aliases used by
    /// older catalog documents (`hpMax`, `PD`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "hitpoints" | "hp" | "hpmax" => Ok(Self::HitPoints),
            "staminapoints" | "sp" | "spmax" => Ok(Self::StaminaPoints),
            "manapoints" | "mp" | "mpmax" => Ok(Self::ManaPoints),
            "gritpoints" | "grit" => Ok(Self::GritPoints),
            "restpoints" | "rest" => Ok(Self::RestPoints),
            "movespeed" | "speed" => Ok(Self::MoveSpeed),
            "jumpdistance" | "jump" => Ok(Self::JumpDistance),
            "precisiondefense" | "pd" => Ok(Self::PrecisionDefense),
            "areadefense" | "ad" => Ok(Self::AreaDefense),
            "initiative" => Ok(Self::Initiative),
            "skillpoints" => Ok(Self::SkillPoints),
            "tradepoints" => Ok(Self::TradePoints),
            "languagepoints" => Ok(Self::LanguagePoints),
            "maneuversknown" => Ok(Self::ManeuversKnown),
            "techniquesknown" => Ok(Self::TechniquesKnown),
            "cantripsknown" => Ok(Self::CantripsKnown),
            "spellsknown" => Ok(Self::SpellsKnown),
            "savedc" => Ok(Self::SaveDc),
            _ => Err(()),
        }
    }
}
