//! Spell and maneuver entities.
//!
//! Spells belong to one or more spell lists; a class may only learn spells
//! from the lists it casts from. Maneuvers are the martial counterpart and
//! are open to any class with maneuvers known.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{ManeuverId, SpellId};

/// A spell or cantrip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    /// Cantrips are tracked against a separate known limit
    #[serde(default)]
    pub cantrip: bool,
    /// Mana cost to cast; 0 for cantrips
    #[serde(default)]
    pub mana_cost: u32,
    pub lists: Vec<SpellList>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Spell {
    pub fn new(id: impl Into<SpellId>, name: impl Into<String>, mana_cost: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cantrip: false,
            mana_cost,
            lists: Vec::new(),
            school: None,
            description: String::new(),
        }
    }

    pub fn cantrip(id: impl Into<SpellId>, name: impl Into<String>) -> Self {
        let mut spell = Self::new(id, name, 0);
        spell.cantrip = true;
        spell
    }

    pub fn on_lists(mut self, lists: Vec<SpellList>) -> Self {
        self.lists = lists;
        self
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_on_any(&self, lists: &[SpellList]) -> bool {
        self.lists.iter().any(|list| lists.contains(list))
    }
}

/// The spell lists a class can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellList {
    Arcane,
    Divine,
    Primal,
}

impl fmt::Display for SpellList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arcane => write!(f, "Arcane"),
            Self::Divine => write!(f, "Divine"),
            Self::Primal => write!(f, "Primal"),
        }
    }
}

/// A martial maneuver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Maneuver {
    pub id: ManeuverId,
    pub name: String,
    pub category: ManeuverCategory,
    /// Techniques are counted against the techniques-known limit
    #[serde(default)]
    pub technique: bool,
    /// Action points spent to use it
    #[serde(default = "default_ap_cost")]
    pub ap_cost: u32,
    #[serde(default)]
    pub description: String,
}

fn default_ap_cost() -> u32 {
    1
}

impl Maneuver {
    pub fn new(
        id: impl Into<ManeuverId>,
        name: impl Into<String>,
        category: ManeuverCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            technique: false,
            ap_cost: default_ap_cost(),
            description: String::new(),
        }
    }

    pub fn technique(
        id: impl Into<ManeuverId>,
        name: impl Into<String>,
        category: ManeuverCategory,
        ap_cost: u32,
    ) -> Self {
        Self {
            technique: true,
            ap_cost,
            ..Self::new(id, name, category)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverCategory {
    Attack,
    Defense,
    Grapple,
    Save,
}
