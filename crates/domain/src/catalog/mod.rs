//! The Rules Catalog - static, read-only rules content keyed by id.
//!
//! Built once (from the built-in content or a catalog document) and shared
//! read-only afterwards. Every lookup reports a missing id as
//! `UnknownCatalogId`; list operations iterate in id order.

mod content;
mod document;

use std::collections::BTreeMap;
use std::fmt::Display;

pub use content::builtin_document;
pub use document::{migrate_v1_to_v2, CatalogDocument, CatalogError, CURRENT_CATALOG_VERSION};

use crate::entities::{
    Ancestry, ChoiceOption, ClassDefinition, ClassFeature, FeatureChoice, LanguageDefinition,
    Maneuver, PathDefinition, SkillDefinition, Spell, TradeDefinition, Trait,
};
use crate::error::{CatalogKind, RulesError};
use crate::ids::{
    AncestryId, ChoiceId, ClassId, FeatureId, LanguageId, ManeuverId, OptionId, PathId, SkillId,
    SpellId, TradeId, TraitId,
};
use crate::value_objects::{Effect, EffectDeclaration, EntryRef};

/// Indexed rules content.
#[derive(Debug, Clone, Default)]
pub struct RulesCatalog {
    ancestries: BTreeMap<AncestryId, Ancestry>,
    traits: BTreeMap<TraitId, Trait>,
    classes: BTreeMap<ClassId, ClassDefinition>,
    features: BTreeMap<FeatureId, ClassFeature>,
    choices: BTreeMap<ChoiceId, FeatureChoice>,
    options: BTreeMap<OptionId, ChoiceOption>,
    paths: BTreeMap<PathId, PathDefinition>,
    skills: BTreeMap<SkillId, SkillDefinition>,
    trades: BTreeMap<TradeId, TradeDefinition>,
    languages: BTreeMap<LanguageId, LanguageDefinition>,
    spells: BTreeMap<SpellId, Spell>,
    maneuvers: BTreeMap<ManeuverId, Maneuver>,
}

impl RulesCatalog {
    /// The built-in DC20 level-1 content.
    pub fn builtin() -> Self {
        Self::index(builtin_document())
    }

    /// Build a catalog from a document, checking id uniqueness and
    /// referential integrity first.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        check_integrity(&document)?;
        Ok(Self::index(document))
    }

    /// Parse a version 1 or version 2 JSON catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_document(CatalogDocument::from_json(json)?)
    }

    /// Export as a current-version document.
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            version: CURRENT_CATALOG_VERSION,
            ancestries: self.ancestries.values().cloned().collect(),
            traits: self.traits.values().cloned().collect(),
            classes: self.classes.values().cloned().collect(),
            paths: self.paths.values().cloned().collect(),
            skills: self.skills.values().cloned().collect(),
            trades: self.trades.values().cloned().collect(),
            languages: self.languages.values().cloned().collect(),
            spells: self.spells.values().cloned().collect(),
            maneuvers: self.maneuvers.values().cloned().collect(),
        }
    }

    fn index(document: CatalogDocument) -> Self {
        let mut catalog = Self::default();
        for class in &document.classes {
            for feature in &class.features {
                for choice in &feature.choices {
                    for option in &choice.options {
                        catalog.options.insert(option.id.clone(), option.clone());
                    }
                    catalog.choices.insert(choice.id.clone(), choice.clone());
                }
                catalog.features.insert(feature.id.clone(), feature.clone());
            }
        }
        catalog.ancestries = keyed(document.ancestries, |a| a.id.clone());
        catalog.traits = keyed(document.traits, |t| t.id.clone());
        catalog.classes = keyed(document.classes, |c| c.id.clone());
        catalog.paths = keyed(document.paths, |p| p.id.clone());
        catalog.skills = keyed(document.skills, |s| s.id.clone());
        catalog.trades = keyed(document.trades, |t| t.id.clone());
        catalog.languages = keyed(document.languages, |l| l.id.clone());
        catalog.spells = keyed(document.spells, |s| s.id.clone());
        catalog.maneuvers = keyed(document.maneuvers, |m| m.id.clone());
        catalog
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn ancestry(&self, id: &AncestryId) -> Result<&Ancestry, RulesError> {
        lookup(&self.ancestries, id, CatalogKind::Ancestry)
    }

    pub fn trait_entry(&self, id: &TraitId) -> Result<&Trait, RulesError> {
        lookup(&self.traits, id, CatalogKind::Trait)
    }

    pub fn class(&self, id: &ClassId) -> Result<&ClassDefinition, RulesError> {
        lookup(&self.classes, id, CatalogKind::Class)
    }

    pub fn feature(&self, id: &FeatureId) -> Result<&ClassFeature, RulesError> {
        lookup(&self.features, id, CatalogKind::Feature)
    }

    pub fn choice(&self, id: &ChoiceId) -> Result<&FeatureChoice, RulesError> {
        lookup(&self.choices, id, CatalogKind::Choice)
    }

    pub fn option(&self, id: &OptionId) -> Result<&ChoiceOption, RulesError> {
        lookup(&self.options, id, CatalogKind::Option)
    }

    pub fn path(&self, id: &PathId) -> Result<&PathDefinition, RulesError> {
        lookup(&self.paths, id, CatalogKind::Path)
    }

    pub fn skill(&self, id: &SkillId) -> Result<&SkillDefinition, RulesError> {
        lookup(&self.skills, id, CatalogKind::Skill)
    }

    pub fn trade(&self, id: &TradeId) -> Result<&TradeDefinition, RulesError> {
        lookup(&self.trades, id, CatalogKind::Trade)
    }

    pub fn language(&self, id: &LanguageId) -> Result<&LanguageDefinition, RulesError> {
        lookup(&self.languages, id, CatalogKind::Language)
    }

    pub fn spell(&self, id: &SpellId) -> Result<&Spell, RulesError> {
        lookup(&self.spells, id, CatalogKind::Spell)
    }

    pub fn maneuver(&self, id: &ManeuverId) -> Result<&Maneuver, RulesError> {
        lookup(&self.maneuvers, id, CatalogKind::Maneuver)
    }

    /// Effects declared by any effect-bearing entry.
    pub fn effects_of(&self, entry: &EntryRef) -> Result<&[EffectDeclaration], RulesError> {
        match entry {
            EntryRef::Ancestry(id) => self.ancestry(id).map(|a| a.effects.as_slice()),
            EntryRef::Trait(id) => self.trait_entry(id).map(|t| t.effects.as_slice()),
            EntryRef::Feature(id) => self.feature(id).map(|f| f.effects.as_slice()),
            EntryRef::Option(id) => self.option(id).map(|o| o.effects.as_slice()),
        }
    }

    // =========================================================================
    // Listings (id order)
    // =========================================================================

    pub fn ancestries(&self) -> impl Iterator<Item = &Ancestry> {
        self.ancestries.values()
    }

    pub fn traits(&self) -> impl Iterator<Item = &Trait> {
        self.traits.values()
    }

    /// Traits offered by one ancestry.
    pub fn traits_for<'a>(&'a self, ancestry: &'a AncestryId) -> impl Iterator<Item = &'a Trait> {
        self.traits
            .values()
            .filter(move |t| &t.ancestry_id == ancestry)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathDefinition> {
        self.paths.values()
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    pub fn trades(&self) -> impl Iterator<Item = &TradeDefinition> {
        self.trades.values()
    }

    pub fn languages(&self) -> impl Iterator<Item = &LanguageDefinition> {
        self.languages.values()
    }

    pub fn spells(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    pub fn maneuvers(&self) -> impl Iterator<Item = &Maneuver> {
        self.maneuvers.values()
    }
}

fn lookup<'a, K, V>(map: &'a BTreeMap<K, V>, id: &K, kind: CatalogKind) -> Result<&'a V, RulesError>
where
    K: Ord + Display,
{
    map.get(id)
        .ok_or_else(|| RulesError::unknown(kind, id.to_string()))
}

fn keyed<K: Ord, V>(items: Vec<V>, key: impl Fn(&V) -> K) -> BTreeMap<K, V> {
    items.into_iter().map(|item| (key(&item), item)).collect()
}

// =============================================================================
// Integrity checks
// =============================================================================

fn check_integrity(document: &CatalogDocument) -> Result<(), CatalogError> {
    unique(CatalogKind::Ancestry, document.ancestries.iter().map(|a| a.id.as_str()))?;
    unique(CatalogKind::Trait, document.traits.iter().map(|t| t.id.as_str()))?;
    unique(CatalogKind::Class, document.classes.iter().map(|c| c.id.as_str()))?;
    unique(CatalogKind::Path, document.paths.iter().map(|p| p.id.as_str()))?;
    unique(CatalogKind::Skill, document.skills.iter().map(|s| s.id.as_str()))?;
    unique(CatalogKind::Trade, document.trades.iter().map(|t| t.id.as_str()))?;
    unique(CatalogKind::Language, document.languages.iter().map(|l| l.id.as_str()))?;
    unique(CatalogKind::Spell, document.spells.iter().map(|s| s.id.as_str()))?;
    unique(CatalogKind::Maneuver, document.maneuvers.iter().map(|m| m.id.as_str()))?;

    let features = || document.classes.iter().flat_map(|c| c.features.iter());
    let choices = || features().flat_map(|f| f.choices.iter());
    unique(CatalogKind::Feature, features().map(|f| f.id.as_str()))?;
    unique(CatalogKind::Choice, choices().map(|c| c.id.as_str()))?;
    unique(
        CatalogKind::Option,
        choices().flat_map(|c| c.options.iter()).map(|o| o.id.as_str()),
    )?;

    for t in &document.traits {
        if !document.ancestries.iter().any(|a| a.id == t.ancestry_id) {
            return Err(CatalogError::DanglingReference {
                owner: format!("trait '{}'", t.id),
                kind: CatalogKind::Ancestry,
                id: t.ancestry_id.to_string(),
            });
        }
    }

    let granted = document
        .ancestries
        .iter()
        .map(|a| (format!("ancestry '{}'", a.id), &a.effects))
        .chain(
            document
                .traits
                .iter()
                .map(|t| (format!("trait '{}'", t.id), &t.effects)),
        )
        .chain(features().map(|f| (format!("feature '{}'", f.id), &f.effects)))
        .chain(
            choices()
                .flat_map(|c| c.options.iter())
                .map(|o| (format!("option '{}'", o.id), &o.effects)),
        );
    for (owner, effects) in granted {
        for declaration in effects {
            if let Effect::GrantSpell { spell_id } = &declaration.effect {
                if !document.spells.iter().any(|s| &s.id == spell_id) {
                    return Err(CatalogError::DanglingReference {
                        owner,
                        kind: CatalogKind::Spell,
                        id: spell_id.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn unique<'a>(kind: CatalogKind, ids: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builtin_content_passes_integrity_checks() {
        let catalog =
            RulesCatalog::from_document(builtin_document()).expect("built-in content is valid");
        assert_eq!(catalog.ancestries().count(), 5);
        assert_eq!(catalog.classes().count(), 4);
        assert_eq!(catalog.paths().count(), 2);
        assert_eq!(catalog.skills().count(), 12);
        assert_eq!(catalog.languages().count(), 8);
    }

    #[test]
    fn test_unknown_lookup_reports_kind_and_id() {
        let catalog = RulesCatalog::builtin();
        let err = catalog
            .trait_entry(&TraitId::from("gnome_tinker"))
            .expect_err("missing trait");
        assert_eq!(err.kind(), ErrorKind::UnknownCatalogId);
        assert_eq!(err, RulesError::unknown(CatalogKind::Trait, "gnome_tinker"));
    }

    #[test]
    fn test_listings_are_in_id_order() {
        let catalog = RulesCatalog::builtin();
        let ids: Vec<_> = catalog.classes().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["barbarian", "champion", "cleric", "wizard"]);
    }

    #[test]
    fn test_traits_for_ancestry() {
        let catalog = RulesCatalog::builtin();
        let dwarf = AncestryId::from("dwarf");
        assert!(catalog.traits_for(&dwarf).all(|t| t.ancestry_id == dwarf));
        assert!(catalog.traits_for(&dwarf).count() >= 4);
    }

    #[test]
    fn test_feature_choice_and_option_are_indexed() {
        let catalog = RulesCatalog::builtin();
        let choice = catalog
            .choice(&ChoiceId::from("barbarian_battlecry"))
            .expect("battlecry choice");
        assert_eq!(choice.prompt, "Choose a Battlecry");
        assert!(catalog.option(&OptionId::from("fortitude_shout")).is_ok());
        assert!(catalog.feature(&FeatureId::from("barbarian_rage")).is_ok());
    }

    #[test]
    fn test_effects_of_entry() {
        let catalog = RulesCatalog::builtin();
        let effects = catalog
            .effects_of(&EntryRef::Trait(TraitId::from("human_attribute_increase")))
            .expect("known trait");
        assert_eq!(effects.len(), 1);
        assert!(catalog
            .effects_of(&EntryRef::Option(OptionId::from("nope")))
            .is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut document = builtin_document();
        document.skills.push(document.skills[0].clone());
        let err = RulesCatalog::from_document(document).expect_err("duplicate skill");
        assert!(matches!(
            err,
            CatalogError::DuplicateId {
                kind: CatalogKind::Skill,
                ..
            }
        ));
    }

    #[test]
    fn test_trait_with_missing_ancestry_is_dangling() {
        let mut document = builtin_document();
        document
            .traits
            .push(Trait::new("gnome_tinker", "gnome", "Tinker", 1));
        let err = RulesCatalog::from_document(document).expect_err("dangling trait");
        assert!(matches!(
            err,
            CatalogError::DanglingReference {
                kind: CatalogKind::Ancestry,
                ..
            }
        ));
    }

    #[test]
    fn test_granted_spell_must_exist() {
        let mut document = builtin_document();
        document.spells.retain(|s| s.id.as_str() != "light");
        let err = RulesCatalog::from_document(document).expect_err("dangling spell");
        assert!(matches!(
            err,
            CatalogError::DanglingReference {
                kind: CatalogKind::Spell,
                ..
            }
        ));
    }

    #[test]
    fn test_document_round_trip_through_json() {
        let json = RulesCatalog::builtin()
            .to_document()
            .to_json()
            .expect("serializes");
        let reloaded = RulesCatalog::from_json(&json).expect("reloads");
        assert_eq!(reloaded.to_document(), RulesCatalog::builtin().to_document());
    }
}
