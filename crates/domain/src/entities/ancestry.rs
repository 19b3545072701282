//! Ancestry and trait entities.
//!
//! An ancestry is a character's species-like origin. Traits are bought from
//! the ancestry point budget; negative traits have a negative cost and give
//! points back.

use serde::{Deserialize, Serialize};

use crate::ids::{AncestryId, TraitId};
use crate::value_objects::EffectDeclaration;

/// A selectable ancestry.
///
/// # Simple Data Struct
///
/// Catalog entries are immutable once loaded and any combination of field
/// values is valid, so fields are public.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ancestry {
    pub id: AncestryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Applied whenever this ancestry is chosen, independent of traits
    #[serde(default)]
    pub effects: Vec<EffectDeclaration>,
}

impl Ancestry {
    pub fn new(id: impl Into<AncestryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_effects(mut self, effects: Vec<EffectDeclaration>) -> Self {
        self.effects = effects;
        self
    }
}

/// A purchasable ancestry trait.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    pub id: TraitId,
    /// Ancestry that offers this trait
    pub ancestry_id: AncestryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ancestry point cost; negative for negative traits
    pub cost: i32,
    #[serde(default)]
    pub effects: Vec<EffectDeclaration>,
}

impl Trait {
    pub fn new(
        id: impl Into<TraitId>,
        ancestry_id: impl Into<AncestryId>,
        name: impl Into<String>,
        cost: i32,
    ) -> Self {
        Self {
            id: id.into(),
            ancestry_id: ancestry_id.into(),
            name: name.into(),
            description: String::new(),
            cost,
            effects: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_effect(mut self, effect: EffectDeclaration) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_negative(&self) -> bool {
        self.cost < 0
    }
}
