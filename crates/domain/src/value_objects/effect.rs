//! Effects - the rule consequences declared by catalog entries.
//!
//! Every effect kind is its own variant with typed payload fields, so the
//! effect interpreter matches exhaustively instead of switching on strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::attribute::Attribute;
use super::selection::EntryRef;
use super::sheet_stat::SheetStat;
use crate::ids::SpellId;

/// A single rule consequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Effect {
    /// Add to (or subtract from) an attribute
    ModifyAttribute { attribute: Attribute, value: i32 },
    /// Add to (or subtract from) a derived sheet value
    ModifyStat { stat: SheetStat, value: i32 },
    /// Gain a movement mode such as climbing or swimming
    GrantMovementMode {
        mode: MovementMode,
        speed: MovementSpeed,
    },
    /// Gain a sense with a range in spaces
    GrantSense { sense: Sense, range: u32 },
    /// Resist a damage type
    GrantResistance {
        damage: DamageType,
        amount: ResistanceAmount,
    },
    /// Gain a named ability that has no numeric effect on the sheet
    GrantAbility { name: String, description: String },
    /// Learn a spell outside the normal spells-known limit
    GrantSpell { spell_id: SpellId },
    /// Roll saves of this kind with advantage
    GrantAdvantageOnSave { save: SaveTarget },
}

impl Effect {
    /// The capability a grant-* effect confers. `None` for numeric modifiers.
    pub fn capability(&self) -> Option<Capability> {
        match self {
            Self::ModifyAttribute { .. } | Self::ModifyStat { .. } => None,
            Self::GrantMovementMode { mode, speed } => Some(Capability::Movement {
                mode: *mode,
                speed: *speed,
            }),
            Self::GrantSense { sense, range } => Some(Capability::Sense {
                sense: *sense,
                range: *range,
            }),
            Self::GrantResistance { damage, amount } => Some(Capability::Resistance {
                damage: *damage,
                amount: *amount,
            }),
            Self::GrantAbility { name, description } => Some(Capability::Ability {
                name: name.clone(),
                description: description.clone(),
            }),
            Self::GrantSpell { spell_id } => Some(Capability::Spell {
                spell_id: spell_id.clone(),
            }),
            Self::GrantAdvantageOnSave { save } => Some(Capability::SaveAdvantage { save: *save }),
        }
    }
}

/// An effect as declared on a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectDeclaration {
    pub effect: Effect,
    /// Only applies while the condition holds; evaluated by the sheet renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<EffectCondition>,
    /// Repeated grants of the same capability add up instead of collapsing
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stacks: bool,
}

impl EffectDeclaration {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            condition: None,
            stacks: false,
        }
    }

    pub fn when(mut self, condition: EffectCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn stacking(mut self) -> Self {
        self.stacks = true;
        self
    }

    pub fn attribute(attribute: Attribute, value: i32) -> Self {
        Self::new(Effect::ModifyAttribute { attribute, value })
    }

    pub fn stat(stat: SheetStat, value: i32) -> Self {
        Self::new(Effect::ModifyStat { stat, value })
    }

    pub fn ability(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Effect::GrantAbility {
            name: name.into(),
            description: description.into(),
        })
    }
}

/// A conditional effect carried through to the sheet instead of being applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalEffect {
    pub source: EntryRef,
    pub condition: EffectCondition,
    pub effect: Effect,
}

/// Runtime condition attached to an effect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectCondition {
    NotWearingArmor,
    NotWearingHeavyArmor,
    WhileRaging,
    InBrightLight,
    Custom(String),
}

impl FromStr for EffectCondition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(&[' ', '-'][..], "_").as_str() {
            "" => Err(()),
            "not_wearing_armor" | "unarmored" => Ok(Self::NotWearingArmor),
            "not_wearing_heavy_armor" => Ok(Self::NotWearingHeavyArmor),
            "while_raging" | "raging" => Ok(Self::WhileRaging),
            "in_bright_light" | "bright_light" => Ok(Self::InBrightLight),
            _ => Ok(Self::Custom(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    Climb,
    Swim,
    Fly,
    Burrow,
}

impl FromStr for MovementMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "climb" | "climbing" => Ok(Self::Climb),
            "swim" | "swimming" => Ok(Self::Swim),
            "fly" | "flying" => Ok(Self::Fly),
            "burrow" | "burrowing" => Ok(Self::Burrow),
            _ => Err(()),
        }
    }
}

/// Speed of a granted movement mode, relative to the ground speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementSpeed {
    EqualToSpeed,
    HalfSpeed,
}

impl MovementSpeed {
    /// Resolve against the character's ground speed. Half speed rounds up.
    pub fn resolve(&self, move_speed: i32) -> i32 {
        match self {
            Self::EqualToSpeed => move_speed,
            Self::HalfSpeed => (move_speed + 1) / 2,
        }
    }
}

impl FromStr for MovementSpeed {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(&[' ', '-'][..], "_").as_str() {
            "equal_to_speed" | "full" | "speed" => Ok(Self::EqualToSpeed),
            "half_speed" | "half" => Ok(Self::HalfSpeed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    Darkvision,
    Tremorsense,
    Blindsight,
    Truesight,
}

impl FromStr for Sense {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "darkvision" => Ok(Self::Darkvision),
            "tremorsense" => Ok(Self::Tremorsense),
            "blindsight" => Ok(Self::Blindsight),
            "truesight" => Ok(Self::Truesight),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Bludgeoning,
    Piercing,
    Slashing,
    Fire,
    Cold,
    Lightning,
    Poison,
    Psychic,
    Radiant,
    Umbral,
}

impl FromStr for DamageType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bludgeoning" => Ok(Self::Bludgeoning),
            "piercing" => Ok(Self::Piercing),
            "slashing" => Ok(Self::Slashing),
            "fire" => Ok(Self::Fire),
            "cold" => Ok(Self::Cold),
            "lightning" => Ok(Self::Lightning),
            "poison" => Ok(Self::Poison),
            "psychic" => Ok(Self::Psychic),
            "radiant" => Ok(Self::Radiant),
            "umbral" => Ok(Self::Umbral),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceAmount {
    /// Take half damage
    Half,
    /// Reduce damage by a fixed amount
    Fixed(u32),
    /// Take no damage
    Immune,
}

impl ResistanceAmount {
    /// Amount after `multiplicity` stacked grants. Only fixed reductions grow.
    pub fn stacked(&self, multiplicity: u32) -> Self {
        match self {
            Self::Fixed(value) => Self::Fixed(value * multiplicity.max(1)),
            Self::Half | Self::Immune => *self,
        }
    }
}

/// What kind of save a `GrantAdvantageOnSave` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveTarget {
    Might,
    Agility,
    Charisma,
    Intelligence,
    Death,
    Charmed,
    Frightened,
    Poisoned,
    Exhaustion,
}

impl FromStr for SaveTarget {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(attribute) = s.parse::<Attribute>() {
            return Ok(attribute.into());
        }
        match s.to_lowercase().as_str() {
            "death" | "death_save" => Ok(Self::Death),
            "charmed" => Ok(Self::Charmed),
            "frightened" => Ok(Self::Frightened),
            "poisoned" => Ok(Self::Poisoned),
            "exhaustion" => Ok(Self::Exhaustion),
            _ => Err(()),
        }
    }
}

impl From<Attribute> for SaveTarget {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Might => Self::Might,
            Attribute::Agility => Self::Agility,
            Attribute::Charisma => Self::Charisma,
            Attribute::Intelligence => Self::Intelligence,
        }
    }
}

/// A capability conferred by a grant-* effect.
///
/// Grants are collected as a set: the same capability granted twice is still
/// one capability unless its declaration stacks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Capability {
    Movement {
        mode: MovementMode,
        speed: MovementSpeed,
    },
    Sense {
        sense: Sense,
        range: u32,
    },
    Resistance {
        damage: DamageType,
        amount: ResistanceAmount,
    },
    Ability {
        name: String,
        description: String,
    },
    Spell {
        spell_id: SpellId,
    },
    SaveAdvantage {
        save: SaveTarget,
    },
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movement { mode, speed } => write!(f, "{:?} ({:?})", mode, speed),
            Self::Sense { sense, range } => write!(f, "{:?} {}", sense, range),
            Self::Resistance { damage, amount } => write!(f, "{:?} resistance ({:?})", damage, amount),
            Self::Ability { name, .. } => f.write_str(name),
            Self::Spell { spell_id } => write!(f, "spell {}", spell_id),
            Self::SaveAdvantage { save } => write!(f, "advantage on {:?} saves", save),
        }
    }
}
