//! Class entity, its features and the choice points those features carry.

use serde::{Deserialize, Serialize};

use super::spell::SpellList;
use crate::ids::{ChoiceId, ClassId, FeatureId, OptionId};
use crate::value_objects::{Attribute, EffectDeclaration};

/// A character class and its level-1 baseline.
///
/// # Simple Data Struct
///
/// Immutable catalog data, public fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    pub id: ClassId,
    pub name: String,
    pub base_hit_points: i32,
    #[serde(default)]
    pub base_stamina_points: i32,
    #[serde(default)]
    pub base_mana_points: i32,
    /// Saves that add Combat Mastery
    #[serde(default)]
    pub save_masteries: Vec<Attribute>,
    #[serde(default)]
    pub maneuvers_known: i32,
    #[serde(default)]
    pub techniques_known: i32,
    #[serde(default)]
    pub cantrips_known: i32,
    #[serde(default)]
    pub spells_known: i32,
    /// Spell lists this class may learn from; empty for non-casters
    #[serde(default)]
    pub spell_lists: Vec<SpellList>,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
}

impl ClassDefinition {
    pub fn new(id: impl Into<ClassId>, name: impl Into<String>, base_hit_points: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_hit_points,
            base_stamina_points: 0,
            base_mana_points: 0,
            save_masteries: Vec::new(),
            maneuvers_known: 0,
            techniques_known: 0,
            cantrips_known: 0,
            spells_known: 0,
            spell_lists: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Martial resources: stamina, maneuvers and techniques.
    pub fn with_martial(mut self, stamina: i32, maneuvers: i32, techniques: i32) -> Self {
        self.base_stamina_points = stamina;
        self.maneuvers_known = maneuvers;
        self.techniques_known = techniques;
        self
    }

    /// Spellcasting resources: mana, cantrips, spells and the lists to learn from.
    pub fn with_spellcasting(
        mut self,
        mana: i32,
        cantrips: i32,
        spells: i32,
        lists: Vec<SpellList>,
    ) -> Self {
        self.base_mana_points = mana;
        self.cantrips_known = cantrips;
        self.spells_known = spells;
        self.spell_lists = lists;
        self
    }

    pub fn with_save_masteries(mut self, saves: Vec<Attribute>) -> Self {
        self.save_masteries = saves;
        self
    }

    pub fn with_feature(mut self, feature: ClassFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Features gained at or below `level`.
    pub fn features_up_to(&self, level: u8) -> impl Iterator<Item = &ClassFeature> {
        self.features.iter().filter(move |f| f.level <= level)
    }

    pub fn can_cast_from(&self, list: SpellList) -> bool {
        self.spell_lists.contains(&list)
    }
}

/// A feature granted by a class at a given level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassFeature {
    pub id: FeatureId,
    pub name: String,
    /// Level at which this feature is gained
    pub level: u8,
    #[serde(default)]
    pub description: String,
    /// Effects that apply to everyone with the feature
    #[serde(default)]
    pub effects: Vec<EffectDeclaration>,
    /// Choices the player must make when gaining the feature
    #[serde(default)]
    pub choices: Vec<FeatureChoice>,
}

impl ClassFeature {
    pub fn new(id: impl Into<FeatureId>, name: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            description: String::new(),
            effects: Vec::new(),
            choices: Vec::new(),
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

    pub fn with_choice(mut self, choice: FeatureChoice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// A choice point on a class feature: pick `count` of `options`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureChoice {
    pub id: ChoiceId,
    /// Shown to the player and named in validation errors
    pub prompt: String,
    /// Exact number of options to select
    #[serde(default = "default_choice_count")]
    pub count: u8,
    pub options: Vec<ChoiceOption>,
}

fn default_choice_count() -> u8 {
    1
}

impl FeatureChoice {
    pub fn new(id: impl Into<ChoiceId>, prompt: impl Into<String>, count: u8) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            count,
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: ChoiceOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn option(&self, id: &OptionId) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    pub fn is_multi_select(&self) -> bool {
        self.count > 1
    }
}

/// One option of a feature choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    /// Globally unique across the catalog
    pub id: OptionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: Vec<EffectDeclaration>,
}

impl ChoiceOption {
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
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

    pub fn with_effect(mut self, effect: EffectDeclaration) -> Self {
        self.effects.push(effect);
        self
    }
}
