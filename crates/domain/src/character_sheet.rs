//! DerivedCharacterSheet - the computed, immutable result of a derivation.
//!
//! # Design
//!
//! - **Private fields**: the sheet is read through accessors only
//! - **No mutators**: a change to the selections means a new derivation
//! - **Builder pattern**: the derivation engine assembles it section by section
//!
//! The nested records (resources, defenses, scores) are simple data structs
//! with public fields; they have no invariants of their own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::PathBenefits;
use crate::ids::{
    AncestryId, CharacterId, ChoiceId, ClassId, LanguageId, ManeuverId, OptionId, SkillId,
    SpellId, TradeId, TraitId,
};
use crate::value_objects::{
    Attribute, AttributeSet, ConditionalEffect, DamageType, Fluency, MovementMode,
    PathProgressionState, ProficiencyConversionState, ResistanceAmount, SaveTarget, Sense,
};

/// The fully derived level-1 character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedCharacterSheet {
    identity: SheetIdentity,
    attributes: AttributeSet,
    prime_attribute: Attribute,
    combat_mastery: i32,
    resources: Resources,
    defenses: Defenses,
    saves: BTreeMap<Attribute, SaveScore>,
    scores: CheckScores,
    capabilities: Capabilities,
    conditional_effects: Vec<ConditionalEffect>,
    proficiencies: Proficiencies,
    progression: Progression,
    repertoire: Repertoire,
    feature_choices: BTreeMap<ChoiceId, Vec<OptionId>>,
}

impl DerivedCharacterSheet {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Start a sheet from its identity and final attributes.
    ///
    /// Every other section starts empty and is filled by the `with_*` methods.
    pub fn new(identity: SheetIdentity, attributes: AttributeSet, combat_mastery: i32) -> Self {
        Self {
            identity,
            prime_attribute: attributes.prime().0,
            attributes,
            combat_mastery,
            resources: Resources::default(),
            defenses: Defenses::default(),
            saves: BTreeMap::new(),
            scores: CheckScores::default(),
            capabilities: Capabilities::default(),
            conditional_effects: Vec::new(),
            proficiencies: Proficiencies::default(),
            progression: Progression::default(),
            repertoire: Repertoire::default(),
            feature_choices: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_defenses(mut self, defenses: Defenses) -> Self {
        self.defenses = defenses;
        self
    }

    pub fn with_saves(mut self, saves: BTreeMap<Attribute, SaveScore>) -> Self {
        self.saves = saves;
        self
    }

    pub fn with_scores(mut self, scores: CheckScores) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_capabilities(
        mut self,
        capabilities: Capabilities,
        conditional_effects: Vec<ConditionalEffect>,
    ) -> Self {
        self.capabilities = capabilities;
        self.conditional_effects = conditional_effects;
        self
    }

    pub fn with_proficiencies(mut self, proficiencies: Proficiencies) -> Self {
        self.proficiencies = proficiencies;
        self
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_repertoire(mut self, repertoire: Repertoire) -> Self {
        self.repertoire = repertoire;
        self
    }

    pub fn with_feature_choices(mut self, choices: BTreeMap<ChoiceId, Vec<OptionId>>) -> Self {
        self.feature_choices = choices;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn character_id(&self) -> Option<CharacterId> {
        self.identity.character_id
    }

    pub fn name(&self) -> Option<&str> {
        self.identity.name.as_deref()
    }

    pub fn identity(&self) -> &SheetIdentity {
        &self.identity
    }

    pub fn level(&self) -> u8 {
        self.identity.level
    }

    pub fn class_id(&self) -> &ClassId {
        &self.identity.class_id
    }

    pub fn ancestries(&self) -> &[AncestryId] {
        &self.identity.ancestries
    }

    pub fn traits(&self) -> &[TraitId] {
        &self.identity.traits
    }

    /// Final attributes after all unconditional modifiers.
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(attribute)
    }

    pub fn prime_attribute(&self) -> Attribute {
        self.prime_attribute
    }

    pub fn prime_value(&self) -> i32 {
        self.attributes.get(self.prime_attribute)
    }

    pub fn combat_mastery(&self) -> i32 {
        self.combat_mastery
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn defenses(&self) -> &Defenses {
        &self.defenses
    }

    pub fn saves(&self) -> &BTreeMap<Attribute, SaveScore> {
        &self.saves
    }

    pub fn save(&self, attribute: Attribute) -> Option<&SaveScore> {
        self.saves.get(&attribute)
    }

    pub fn scores(&self) -> &CheckScores {
        &self.scores
    }

    pub fn save_dc(&self) -> i32 {
        self.scores.save_dc
    }

    pub fn check_bonus(&self) -> i32 {
        self.scores.check_bonus
    }

    pub fn initiative(&self) -> i32 {
        self.scores.initiative
    }

    pub fn move_speed(&self) -> i32 {
        self.scores.move_speed
    }

    pub fn jump_distance(&self) -> i32 {
        self.scores.jump_distance
    }

    pub fn death_threshold(&self) -> i32 {
        self.scores.death_threshold
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Effects that only apply under a runtime condition; not in any number above.
    pub fn conditional_effects(&self) -> &[ConditionalEffect] {
        &self.conditional_effects
    }

    pub fn proficiencies(&self) -> &Proficiencies {
        &self.proficiencies
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn repertoire(&self) -> &Repertoire {
        &self.repertoire
    }

    pub fn feature_choices(&self) -> &BTreeMap<ChoiceId, Vec<OptionId>> {
        &self.feature_choices
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Who the character is and what was picked for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetIdentity {
    pub character_id: Option<CharacterId>,
    pub name: Option<String>,
    pub level: u8,
    pub class_id: ClassId,
    pub class_name: String,
    pub ancestries: Vec<AncestryId>,
    pub traits: Vec<TraitId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub max: i32,
    pub current: i32,
}

impl ResourcePool {
    /// A pool at its maximum. Negative maxima are floored at 0.
    pub fn full(max: i32) -> Self {
        let max = max.max(0);
        Self { max, current: max }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    pub hit_points: ResourcePool,
    pub stamina_points: ResourcePool,
    pub mana_points: ResourcePool,
    pub grit_points: ResourcePool,
    pub rest_points: ResourcePool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseScore {
    pub value: i32,
    /// Hits at or above this are heavy
    pub heavy_threshold: i32,
    /// Hits at or above this are brutal
    pub brutal_threshold: i32,
}

impl DefenseScore {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            heavy_threshold: value + 5,
            brutal_threshold: value + 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defenses {
    pub precision: DefenseScore,
    pub area: DefenseScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveScore {
    pub bonus: i32,
    /// Combat Mastery is included in `bonus`
    pub mastered: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckScores {
    pub save_dc: i32,
    pub check_bonus: i32,
    pub initiative: i32,
    pub move_speed: i32,
    pub jump_distance: i32,
    pub death_threshold: i32,
}

/// Everything granted by grant-* effects, resolved against the final sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub movement: Vec<MovementEntry>,
    pub senses: Vec<SenseEntry>,
    pub resistances: Vec<ResistanceEntry>,
    pub abilities: Vec<AbilityEntry>,
    pub save_advantages: Vec<SaveTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEntry {
    pub mode: MovementMode,
    /// In spaces, resolved against the final move speed
    pub speed: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseEntry {
    pub sense: Sense,
    pub range: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceEntry {
    pub damage: DamageType,
    pub amount: ResistanceAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub name: String,
    pub description: String,
}

/// A skill or trade with its rank and total bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencyScore<I> {
    pub id: I,
    pub name: String,
    pub attribute: Attribute,
    pub rank: u8,
    pub bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    pub language_id: LanguageId,
    pub name: String,
    pub fluency: Fluency,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSummary {
    pub available: i32,
    pub spent: i32,
    pub remaining: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proficiencies {
    pub skills: Vec<ProficiencyScore<SkillId>>,
    pub trades: Vec<ProficiencyScore<TradeId>>,
    pub languages: Vec<LanguageEntry>,
    pub summary: ProficiencySummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencySummary {
    pub skills: PoolSummary,
    pub trades: PoolSummary,
    pub languages: PoolSummary,
    pub conversions: ProficiencyConversionState,
}

/// How many maneuvers, techniques, cantrips and spells may be known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownLimits {
    pub maneuvers: i32,
    pub techniques: i32,
    pub cantrips: i32,
    pub spells: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub path_points: PathProgressionState,
    pub path_benefits: PathBenefits,
    pub known_limits: KnownLimits,
}

/// Spells, maneuvers and techniques on the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repertoire {
    /// Chosen by the player, counted against the known limits
    pub spells: Vec<SpellId>,
    /// Granted by effects, not counted
    pub granted_spells: Vec<SpellId>,
    pub maneuvers: Vec<ManeuverId>,
    pub techniques: Vec<ManeuverId>,
}
