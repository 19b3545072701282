//! Attribute value object - the four core attributes and a full attribute set.
//!
//! Provides type safety for attribute references instead of magic strings
//! like "might" or "MIG".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Core character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Might - physical power and toughness
    Might,
    /// Agility - speed and reflexes
    Agility,
    /// Charisma - force of personality
    Charisma,
    /// Intelligence - reasoning and memory
    Intelligence,
}

impl Attribute {
    /// All attributes in canonical order (used for tie-breaking the prime attribute).
    pub const ALL: [Attribute; 4] = [
        Self::Might,
        Self::Agility,
        Self::Charisma,
        Self::Intelligence,
    ];

    /// Returns the short uppercase abbreviation (e.g., "MIG", "AGI").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Might => "MIG",
            Self::Agility => "AGI",
            Self::Charisma => "CHA",
            Self::Intelligence => "INT",
        }
    }

    /// Returns the full name of the attribute (e.g., "Might").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Might => "Might",
            Self::Agility => "Agility",
            Self::Charisma => "Charisma",
            Self::Intelligence => "Intelligence",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Attribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MIG" | "MIGHT" => Ok(Self::Might),
            "AGI" | "AGILITY" => Ok(Self::Agility),
            "CHA" | "CHARISMA" => Ok(Self::Charisma),
            "INT" | "INTELLIGENCE" => Ok(Self::Intelligence),
            _ => Err(()),
        }
    }
}

/// One value per attribute.
///
/// Used both for raw point-buy input and for final post-modifier values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttributeSet {
    pub might: i32,
    pub agility: i32,
    pub charisma: i32,
    pub intelligence: i32,
}

impl AttributeSet {
    pub fn new(might: i32, agility: i32, charisma: i32, intelligence: i32) -> Self {
        Self {
            might,
            agility,
            charisma,
            intelligence,
        }
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Might => self.might,
            Attribute::Agility => self.agility,
            Attribute::Charisma => self.charisma,
            Attribute::Intelligence => self.intelligence,
        }
    }

    /// Copy with one attribute replaced.
    pub fn with(mut self, attribute: Attribute, value: i32) -> Self {
        match attribute {
            Attribute::Might => self.might = value,
            Attribute::Agility => self.agility = value,
            Attribute::Charisma => self.charisma = value,
            Attribute::Intelligence => self.intelligence = value,
        }
        self
    }

    /// Iterate `(attribute, value)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL.iter().map(move |a| (*a, self.get(*a)))
    }

    /// The highest attribute. Ties go to the earlier attribute in canonical order.
    pub fn prime(&self) -> (Attribute, i32) {
        self.iter()
            .fold((Attribute::Might, self.might), |best, current| {
                if current.1 > best.1 {
                    current
                } else {
                    best
                }
            })
    }

    /// Points spent when every attribute starts at `floor`.
    pub fn point_cost(&self, floor: i32) -> i32 {
        self.iter().map(|(_, value)| value - floor).sum()
    }
}
