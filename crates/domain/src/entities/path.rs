//! Progression paths and their tiered benefits.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::ids::PathId;

/// A progression track (martial, spellcaster) with cumulative tiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathDefinition {
    pub id: PathId,
    pub name: String,
    pub tiers: Vec<PathTier>,
}

impl PathDefinition {
    pub fn new(id: impl Into<PathId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tiers: Vec::new(),
        }
    }

    pub fn with_tier(mut self, path_level: u32, benefits: PathBenefits) -> Self {
        self.tiers.push(PathTier {
            path_level,
            benefits,
        });
        self
    }

    /// Highest tier defined; the most points this path can take.
    pub fn max_tier(&self) -> u32 {
        self.tiers.iter().map(|t| t.path_level).max().unwrap_or(0)
    }

    /// Every tier unlocked at `points` invested (cumulative).
    pub fn tiers_reached(&self, points: u32) -> impl Iterator<Item = &PathTier> {
        self.tiers.iter().filter(move |t| t.path_level <= points)
    }
}

/// One row of a path's progression table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathTier {
    /// Points required to unlock this tier
    pub path_level: u32,
    pub benefits: PathBenefits,
}

/// Benefits granted by path tiers. All fields are counts and never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathBenefits {
    pub stamina_points: u32,
    pub mana_points: u32,
    pub maneuvers_learned: u32,
    pub techniques_learned: u32,
    pub cantrips_learned: u32,
    pub spells_learned: u32,
}

impl PathBenefits {
    pub fn martial(stamina_points: u32, maneuvers_learned: u32, techniques_learned: u32) -> Self {
        Self {
            stamina_points,
            maneuvers_learned,
            techniques_learned,
            ..Self::default()
        }
    }

    pub fn spellcaster(mana_points: u32, cantrips_learned: u32, spells_learned: u32) -> Self {
        Self {
            mana_points,
            cantrips_learned,
            spells_learned,
            ..Self::default()
        }
    }

    /// True when no field of `self` is below the same field of `other`.
    pub fn dominates(&self, other: &PathBenefits) -> bool {
        self.stamina_points >= other.stamina_points
            && self.mana_points >= other.mana_points
            && self.maneuvers_learned >= other.maneuvers_learned
            && self.techniques_learned >= other.techniques_learned
            && self.cantrips_learned >= other.cantrips_learned
            && self.spells_learned >= other.spells_learned
    }
}

impl AddAssign<&PathBenefits> for PathBenefits {
    fn add_assign(&mut self, rhs: &PathBenefits) {
        self.stamina_points += rhs.stamina_points;
        self.mana_points += rhs.mana_points;
        self.maneuvers_learned += rhs.maneuvers_learned;
        self.techniques_learned += rhs.techniques_learned;
        self.cantrips_learned += rhs.cantrips_learned;
        self.spells_learned += rhs.spells_learned;
    }
}
