//! Selection records - what the user picked while building a character.
//!
//! These are plain input data: they arrive from the wizard (usually as JSON),
//! get validated stage by stage, and are never mutated by the rules core.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::attribute::AttributeSet;
use super::proficiency::{Fluency, ProficiencyConversionState};
use crate::error::{CatalogKind, RulesError};
use crate::ids::{
    AncestryId, CharacterId, ChoiceId, ClassId, FeatureId, LanguageId, ManeuverId, OptionId,
    PathId, SkillId, SpellId, TradeId, TraitId,
};

/// A complete character submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Submission {
    /// Persistence key, assigned by the caller
    #[serde(default)]
    pub character_id: Option<CharacterId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw point-buy attributes, before any modifiers
    pub attributes: AttributeSet,
    /// One or two ancestries
    pub ancestries: Vec<AncestryId>,
    #[serde(default)]
    pub traits: Vec<TraitId>,
    pub class_id: ClassId,
    #[serde(default)]
    pub feature_choices: BTreeMap<ChoiceId, ChoiceValue>,
    #[serde(default)]
    pub path_points: PathProgressionState,
    #[serde(default)]
    pub proficiencies: ProficiencySelections,
    #[serde(default)]
    pub spells: Vec<SpellId>,
    #[serde(default)]
    pub maneuvers: Vec<ManeuverId>,
}

impl Submission {
    /// Minimal submission; everything optional starts empty.
    pub fn new(
        attributes: AttributeSet,
        ancestries: Vec<AncestryId>,
        class_id: impl Into<ClassId>,
    ) -> Self {
        Self {
            character_id: None,
            name: None,
            attributes,
            ancestries,
            traits: Vec::new(),
            class_id: class_id.into(),
            feature_choices: BTreeMap::new(),
            path_points: PathProgressionState::default(),
            proficiencies: ProficiencySelections::default(),
            spells: Vec::new(),
            maneuvers: Vec::new(),
        }
    }

    /// Parse a submission from JSON.
    ///
    /// Anything that does not match the expected shape (negative path points,
    /// a number where an id belongs, missing attributes) is a
    /// `MalformedSelectionFormat` error.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_traits<I, T>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TraitId>,
    {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_choice(mut self, choice: impl Into<ChoiceId>, value: ChoiceValue) -> Self {
        self.feature_choices.insert(choice.into(), value);
        self
    }

    pub fn with_path_points(mut self, path: impl Into<PathId>, points: u32) -> Self {
        self.path_points = self.path_points.with(path, points);
        self
    }
}

/// The answer to one class feature choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Single(OptionId),
    Multiple(Vec<OptionId>),
}

impl ChoiceValue {
    pub fn single(option: impl Into<OptionId>) -> Self {
        Self::Single(option.into())
    }

    pub fn multiple<I, T>(options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OptionId>,
    {
        Self::Multiple(options.into_iter().map(Into::into).collect())
    }

    /// Selected options in submission order.
    pub fn options(&self) -> &[OptionId] {
        match self {
            Self::Single(option) => std::slice::from_ref(option),
            Self::Multiple(options) => options,
        }
    }
}

/// Points invested per path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathProgressionState(BTreeMap<PathId, u32>);

impl PathProgressionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathId>, points: u32) -> Self {
        self.0.insert(path.into(), points);
        self
    }

    /// Invested points; 0 for paths not present.
    pub fn points(&self, path: &PathId) -> u32 {
        self.0.get(path).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathId, u32)> {
        self.0.iter().map(|(path, points)| (path, *points))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|points| *points == 0)
    }
}

/// Skill/trade ranks, language fluencies and pool conversions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProficiencySelections {
    #[serde(default)]
    pub skills: BTreeMap<SkillId, u8>,
    #[serde(default)]
    pub trades: BTreeMap<TradeId, u8>,
    #[serde(default)]
    pub languages: BTreeMap<LanguageId, Fluency>,
    #[serde(default)]
    pub conversions: ProficiencyConversionState,
}

/// Reference to any catalog entry that declares effects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntryRef {
    Ancestry(AncestryId),
    Trait(TraitId),
    Feature(FeatureId),
    Option(OptionId),
}

impl EntryRef {
    pub fn kind(&self) -> CatalogKind {
        match self {
            Self::Ancestry(_) => CatalogKind::Ancestry,
            Self::Trait(_) => CatalogKind::Trait,
            Self::Feature(_) => CatalogKind::Feature,
            Self::Option(_) => CatalogKind::Option,
        }
    }

    pub fn id_str(&self) -> &str {
        match self {
            Self::Ancestry(id) => id.as_str(),
            Self::Trait(id) => id.as_str(),
            Self::Feature(id) => id.as_str(),
            Self::Option(id) => id.as_str(),
        }
    }

    /// The error reported when this entry is missing from the catalog.
    pub fn unknown(&self) -> RulesError {
        RulesError::unknown(self.kind(), self.id_str())
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id_str())
    }
}

/// Ancestries chosen for the character; their innate effects always apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestryContext {
    pub ancestries: Vec<AncestryId>,
}

impl AncestryContext {
    pub fn new(ancestries: impl IntoIterator<Item = AncestryId>) -> Self {
        Self {
            ancestries: ancestries.into_iter().collect(),
        }
    }
}
