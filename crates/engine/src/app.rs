//! Application composition.
//!
//! A host builds one [`CharacterCreator`] at startup and shares it. The
//! catalog sits behind an `Arc` and is never written after loading, so clones
//! are cheap and every call can run on any thread.

use std::sync::Arc;

use sheetsmith_domain::{CreationRules, DerivedCharacterSheet, RulesCatalog, Submission};

use crate::infrastructure::config::{load_catalog, EngineConfig};
use crate::use_cases::{
    derive_character_sheet, AcceptedSubmission, Rejection, SubmissionValidator, ValidationStage,
};

/// Catalog and creation rules, ready to validate and derive characters.
#[derive(Debug, Clone)]
pub struct CharacterCreator {
    catalog: Arc<RulesCatalog>,
    rules: CreationRules,
}

impl CharacterCreator {
    pub fn new(catalog: Arc<RulesCatalog>, rules: CreationRules) -> Self {
        Self { catalog, rules }
    }

    /// Built-in catalog with the default level-1 rules.
    pub fn builtin() -> Self {
        Self::new(Arc::new(RulesCatalog::builtin()), CreationRules::default())
    }

    pub fn from_config(config: &EngineConfig) -> anyhow::Result<Self> {
        let catalog = load_catalog(config)?;
        Ok(Self::new(Arc::new(catalog), config.rules.clone()))
    }

    /// Read `SHEETSMITH_*` variables and load the configured catalog.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_config(&EngineConfig::from_env()?)
    }

    pub fn catalog(&self) -> &RulesCatalog {
        &self.catalog
    }

    /// Another handle to the shared catalog.
    pub fn shared_catalog(&self) -> Arc<RulesCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn rules(&self) -> &CreationRules {
        &self.rules
    }

    /// Run every validation stage without deriving a sheet.
    pub fn validate<'a>(
        &'a self,
        submission: &'a Submission,
    ) -> Result<AcceptedSubmission<'a>, Rejection> {
        SubmissionValidator::new(&self.catalog, &self.rules, submission).validate()
    }

    pub fn derive(&self, submission: &Submission) -> Result<DerivedCharacterSheet, Rejection> {
        derive_character_sheet(&self.catalog, &self.rules, submission)
    }

    /// Parse a JSON submission and derive its sheet. A parse failure is a
    /// rejection before any stage ran.
    pub fn derive_json(&self, json: &str) -> Result<DerivedCharacterSheet, Rejection> {
        let submission = Submission::from_json(json)
            .map_err(|error| Rejection::new(ValidationStage::Unvalidated, error))?;
        self.derive(&submission)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::infrastructure::config::CATALOG_PATH_VAR;
    use sheetsmith_domain::{ErrorKind, PathBenefits};

    const BARBARIAN_JSON: &str = r#"{
        "name": "Brakka",
        "attributes": {"might": 3, "agility": 1, "charisma": 0, "intelligence": 0},
        "ancestries": ["human"],
        "traits": ["human_skill_expertise"],
        "classId": "barbarian",
        "featureChoices": {"barbarian_battlecry": "speed_shout"},
        "pathPoints": {"martial_path": 1, "spellcaster_path": 2},
        "proficiencies": {
            "skills": {"athletics": 2},
            "trades": {"blacksmithing": 2},
            "languages": {"dwarvish": "fluent"},
            "conversions": {"skillToTrade": 1}
        },
        "maneuvers": ["power_attack", "whirlwind"]
    }"#;

    #[test]
    fn derives_from_json() {
        let creator = CharacterCreator::builtin();
        let sheet = creator.derive_json(BARBARIAN_JSON).expect("valid submission");

        assert_eq!(sheet.name(), Some("Brakka"));
        // speed shout adds 1 to initiative
        assert_eq!(sheet.initiative(), 3);
        assert_eq!(
            sheet.progression().path_benefits,
            PathBenefits {
                stamina_points: 1,
                mana_points: 4,
                maneuvers_learned: 1,
                techniques_learned: 1,
                cantrips_learned: 2,
                spells_learned: 1,
            }
        );
        let summary = sheet.proficiencies().summary;
        assert_eq!((summary.skills.available, summary.skills.spent), (6, 3));
        assert_eq!((summary.trades.available, summary.trades.spent), (5, 2));
        assert_eq!(summary.conversions.skill_to_trade, 1);
    }

    #[test]
    fn malformed_json_is_rejected_before_any_stage() {
        let creator = CharacterCreator::builtin();
        let rejection = creator
            .derive_json(r#"{"attributes": {"might": "strong"}}"#)
            .expect_err("malformed");
        assert_eq!(rejection.kind(), ErrorKind::MalformedSelectionFormat);
        assert_eq!(rejection.reached, ValidationStage::Unvalidated);
    }

    #[test]
    fn misspelled_traits_key_is_rejected() {
        let creator = CharacterCreator::builtin();
        let json = BARBARIAN_JSON.replace(r#""traits":"#, r#""trait":"#);
        let rejection = creator.derive_json(&json).expect_err("unknown key");
        assert_eq!(rejection.kind(), ErrorKind::MalformedSelectionFormat);
        assert_eq!(rejection.reached, ValidationStage::Unvalidated);
    }

    #[test]
    fn validate_reports_the_reached_stage() {
        let creator = CharacterCreator::builtin();
        let mut submission = Submission::from_json(BARBARIAN_JSON).expect("valid json");
        submission.traits.push("gnome_tinker".into());
        let rejection = creator.validate(&submission).map(|_| ()).expect_err("unknown trait");
        assert_eq!(rejection.kind(), ErrorKind::UnknownCatalogId);
        assert_eq!(rejection.reached, ValidationStage::AncestryChecked);
    }

    #[test]
    fn shared_catalog_derives_concurrently() {
        let creator = CharacterCreator::builtin();
        let submission = Submission::from_json(BARBARIAN_JSON).expect("valid json");
        let expected = creator.derive(&submission).expect("valid");

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let creator = creator.clone();
                    let submission = &submission;
                    scope.spawn(move || creator.derive(submission))
                })
                .collect();
            for handle in handles {
                let sheet = handle.join().expect("thread finished").expect("valid");
                assert_eq!(sheet, expected);
            }
        });
        assert!(Arc::ptr_eq(&creator.shared_catalog(), &creator.clone().shared_catalog()));
    }

    #[test]
    fn from_config_uses_rules_and_catalog_file() {
        let json = RulesCatalog::builtin()
            .to_document()
            .to_json()
            .expect("serializes");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write catalog");
        let path = file.path().display().to_string();

        let config = EngineConfig::from_lookup(|key| match key {
            "SHEETSMITH_ATTRIBUTE_POINTS" => Some("11".to_string()),
            k if k == CATALOG_PATH_VAR => Some(path.clone()),
            _ => None,
        })
        .expect("valid config");
        let creator = CharacterCreator::from_config(&config).expect("loads");
        assert_eq!(creator.rules().attribute_point_budget, 11);

        // 12 points is now one too many
        let rejection = creator.derive_json(BARBARIAN_JSON).expect_err("over budget");
        assert_eq!(rejection.kind(), ErrorKind::PointBudgetError);
    }

    #[test]
    fn from_config_reports_missing_catalog() {
        let config = EngineConfig {
            catalog_path: Some("/nonexistent/catalog.json".into()),
            ..EngineConfig::default()
        };
        let err = CharacterCreator::from_config(&config).expect_err("missing file");
        assert!(format!("{:#}", err).contains("Failed to read catalog file"));
    }
}
