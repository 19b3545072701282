//! Derivation scenarios: full submissions through validation to a sheet.

use super::*;
use sheetsmith_domain::{
    AncestryId, AttributeSet, CharacterId, ChoiceValue, DamageType, EffectCondition, ErrorKind,
    LanguageId, ManeuverId, OptionId, ResistanceAmount, RulesError, SaveTarget, SkillId, SpellId,
    TradeId,
};

use crate::use_cases::validation::ValidationStage;

fn derive(submission: &Submission) -> Result<DerivedCharacterSheet, Rejection> {
    derive_character_sheet(&RulesCatalog::builtin(), &CreationRules::default(), submission)
}

fn human_barbarian() -> Submission {
    let mut submission = Submission::new(
        AttributeSet::new(3, 1, 0, 0),
        vec![AncestryId::from("human")],
        "barbarian",
    )
    .with_traits(["human_skill_expertise", "human_trade_expertise"])
    .with_choice("barbarian_battlecry", ChoiceValue::single("fortitude_shout"))
    .with_path_points("martial_path", 1);
    submission.name = Some("Brakka".to_string());
    submission.proficiencies.skills = [
        (SkillId::from("athletics"), 2),
        (SkillId::from("intimidation"), 1),
    ]
    .into_iter()
    .collect();
    submission.proficiencies.trades = [(TradeId::from("blacksmithing"), 1)].into_iter().collect();
    submission.proficiencies.languages = [(LanguageId::from("elvish"), Fluency::Limited)]
        .into_iter()
        .collect();
    submission.maneuvers = vec![ManeuverId::from("power_attack"), ManeuverId::from("whirlwind")];
    submission
}

fn halfling_wizard() -> Submission {
    let mut submission = Submission::new(
        AttributeSet::new(0, 1, 0, 3),
        vec![AncestryId::from("halfling")],
        "wizard",
    )
    .with_traits(["halfling_climber", "halfling_nimble"])
    .with_choice("wizard_school", ChoiceValue::single("school_abjuration"));
    submission.spells = ["spark", "mage_hand", "magic_missile", "shield", "burning_hands"]
        .into_iter()
        .map(SpellId::from)
        .collect();
    submission
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn barbarian_core_numbers() {
    let sheet = derive(&human_barbarian()).expect("valid barbarian");

    assert_eq!(sheet.name(), Some("Brakka"));
    assert_eq!(sheet.identity().class_name, "Barbarian");
    assert_eq!(sheet.combat_mastery(), 1);
    assert_eq!(sheet.prime_attribute(), Attribute::Might);
    assert_eq!(sheet.prime_value(), 3);

    let resources = sheet.resources();
    assert_eq!(resources.hit_points, ResourcePool { max: 12, current: 12 });
    // 2 class + 1 martial tier
    assert_eq!(resources.stamina_points.max, 3);
    assert_eq!(resources.mana_points.max, 0);
    assert_eq!(resources.grit_points.max, 2);
    assert_eq!(resources.rest_points.max, 12);

    assert_eq!(sheet.defenses().precision, DefenseScore::new(10));
    assert_eq!(sheet.defenses().area.value, 12);
    assert_eq!(sheet.defenses().area.heavy_threshold, 17);
    assert_eq!(sheet.defenses().area.brutal_threshold, 22);

    assert_eq!(sheet.save(Attribute::Might), Some(&SaveScore { bonus: 4, mastered: true }));
    assert_eq!(sheet.save(Attribute::Agility), Some(&SaveScore { bonus: 2, mastered: true }));
    assert_eq!(sheet.save(Attribute::Charisma), Some(&SaveScore { bonus: 0, mastered: false }));

    assert_eq!(sheet.save_dc(), 14);
    assert_eq!(sheet.check_bonus(), 4);
    assert_eq!(sheet.initiative(), 2);
    assert_eq!(sheet.move_speed(), 5);
    assert_eq!(sheet.jump_distance(), 1);
    assert_eq!(sheet.death_threshold(), -4);
}

#[test]
fn conditional_effects_are_listed_not_applied() {
    let sheet = derive(&human_barbarian()).expect("valid barbarian");

    // berserker speed only applies without armor
    assert_eq!(sheet.move_speed(), 5);
    assert!(sheet
        .conditional_effects()
        .iter()
        .any(|c| c.condition == EffectCondition::NotWearingArmor));
    // rage resistances wait for a rage
    assert!(sheet.capabilities().resistances.is_empty());
    assert_eq!(
        sheet
            .conditional_effects()
            .iter()
            .filter(|c| c.condition == EffectCondition::WhileRaging)
            .count(),
        3
    );
}

#[test]
fn barbarian_capabilities_and_repertoire() {
    let sheet = derive(&human_barbarian()).expect("valid barbarian");
    let names: Vec<&str> = sheet
        .capabilities()
        .abilities
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Fortitude Shout", "Rage"]);
    assert_eq!(sheet.capabilities().save_advantages, vec![SaveTarget::Might]);

    assert_eq!(sheet.repertoire().maneuvers, vec![ManeuverId::from("power_attack")]);
    assert_eq!(sheet.repertoire().techniques, vec![ManeuverId::from("whirlwind")]);
    assert_eq!(sheet.progression().known_limits.maneuvers, 5);
    assert_eq!(
        sheet.feature_choices().get("barbarian_battlecry"),
        Some(&vec![OptionId::from("fortitude_shout")])
    );
}

#[test]
fn proficiency_bonuses_and_listing() {
    let sheet = derive(&human_barbarian()).expect("valid barbarian");
    let proficiencies = sheet.proficiencies();

    // every skill is listed
    assert_eq!(proficiencies.skills.len(), 12);
    let athletics = proficiencies
        .skills
        .iter()
        .find(|s| s.id.as_str() == "athletics")
        .expect("athletics listed");
    assert_eq!((athletics.rank, athletics.bonus), (2, 7));
    let awareness = proficiencies
        .skills
        .iter()
        .find(|s| s.id.as_str() == "awareness")
        .expect("awareness listed");
    // awareness rolls with the prime attribute
    assert_eq!(awareness.attribute, Attribute::Might);
    assert_eq!((awareness.rank, awareness.bonus), (0, 3));

    // only selected trades
    assert_eq!(proficiencies.trades.len(), 1);
    assert_eq!(proficiencies.trades[0].bonus, 5);

    let languages: Vec<(&str, Fluency)> = proficiencies
        .languages
        .iter()
        .map(|l| (l.language_id.as_str(), l.fluency))
        .collect();
    assert_eq!(
        languages,
        vec![("common", Fluency::Fluent), ("elvish", Fluency::Limited)]
    );

    let summary = proficiencies.summary;
    assert_eq!((summary.skills.available, summary.skills.spent), (6, 3));
    assert_eq!((summary.trades.available, summary.trades.remaining), (5, 4));
    assert_eq!(summary.languages.remaining, 1);
}

#[test]
fn dwarf_traits_reach_the_sheet() {
    let mut submission = human_barbarian().with_traits([
        "dwarf_toughness",
        "dwarf_resilience",
        "dwarf_short_legged",
        "dwarf_tremorsense",
    ]);
    submission.ancestries = vec![AncestryId::from("dwarf")];
    let sheet = derive(&submission).expect("valid dwarf");

    assert_eq!(sheet.resources().hit_points.max, 13);
    assert_eq!(sheet.move_speed(), 4);

    let senses: Vec<(Sense, u32)> = sheet
        .capabilities()
        .senses
        .iter()
        .map(|s| (s.sense, s.range))
        .collect();
    assert_eq!(senses, vec![(Sense::Darkvision, 10), (Sense::Tremorsense, 3)]);
    assert_eq!(
        sheet.capabilities().resistances,
        vec![ResistanceEntry {
            damage: DamageType::Poison,
            amount: ResistanceAmount::Half
        }]
    );
    assert_eq!(
        sheet.capabilities().save_advantages,
        vec![SaveTarget::Might, SaveTarget::Poisoned]
    );
}

#[test]
fn halfling_wizard_sheet() {
    let sheet = derive(&halfling_wizard()).expect("valid wizard");

    assert_eq!(sheet.attributes(), &AttributeSet::new(0, 2, 0, 3));
    assert_eq!(sheet.prime_attribute(), Attribute::Intelligence);
    assert_eq!(sheet.resources().hit_points.max, 6);
    assert_eq!(sheet.resources().mana_points.max, 6);
    assert_eq!(sheet.defenses().precision.value, 14);
    assert_eq!(sheet.save_dc(), 14);
    assert_eq!(sheet.initiative(), 3);
    assert_eq!(sheet.jump_distance(), 2);
    assert_eq!(sheet.save(Attribute::Intelligence).map(|s| s.bonus), Some(4));

    assert_eq!(
        sheet.capabilities().movement,
        vec![MovementEntry {
            mode: MovementMode::Climb,
            speed: 3
        }]
    );
    assert_eq!(
        sheet.capabilities().resistances,
        vec![ResistanceEntry {
            damage: DamageType::Psychic,
            amount: ResistanceAmount::Fixed(1)
        }]
    );
    assert_eq!(sheet.repertoire().spells.len(), 5);
    // 5 base + Intelligence
    assert_eq!(sheet.proficiencies().summary.skills.available, 8);
}

#[test]
fn granted_spells_are_listed_separately() {
    let submission = Submission::new(
        AttributeSet::new(0, 0, 3, 1),
        vec![AncestryId::from("human")],
        "cleric",
    )
    .with_choice(
        "cleric_domains",
        ChoiceValue::multiple(["domain_light", "domain_life"]),
    );
    let sheet = derive(&submission).expect("valid cleric");

    assert_eq!(sheet.repertoire().granted_spells, vec![SpellId::from("light")]);
    assert!(sheet.repertoire().spells.is_empty());
    // domain_life
    assert_eq!(sheet.resources().hit_points.max, 9);
    assert_eq!(
        sheet.feature_choices().get("cleric_domains"),
        Some(&vec![OptionId::from("domain_light"), OptionId::from("domain_life")])
    );
}

#[test]
fn mixed_paths_feed_resources_and_limits() {
    let submission = human_barbarian()
        .with_path_points("martial_path", 1)
        .with_path_points("spellcaster_path", 2);
    let sheet = derive(&submission).expect("valid mixed build");

    let benefits = sheet.progression().path_benefits;
    assert_eq!((benefits.stamina_points, benefits.mana_points), (1, 4));
    assert_eq!(sheet.resources().stamina_points.max, 3);
    assert_eq!(sheet.resources().mana_points.max, 4);
    assert_eq!(sheet.progression().known_limits.cantrips, 2);
    assert_eq!(sheet.progression().known_limits.spells, 1);
}

#[test]
fn negative_pools_floor_at_zero() {
    let mut submission = human_barbarian().with_traits(["human_unstable"]);
    submission.attributes = AttributeSet::new(3, 3, -2, 0);
    let sheet = derive(&submission).expect("valid low charisma");
    // 2 - 2 - 1
    assert_eq!(sheet.resources().grit_points, ResourcePool { max: 0, current: 0 });
}

// =============================================================================
// Determinism and rejection
// =============================================================================

#[test]
fn derivation_is_deterministic_and_leaves_catalog_untouched() {
    let catalog = RulesCatalog::builtin();
    let before = catalog.to_document();
    let rules = CreationRules::default();
    let mut submission = human_barbarian();
    submission.character_id = Some(CharacterId::new());

    let first = derive_character_sheet(&catalog, &rules, &submission).expect("valid");
    let second = derive_character_sheet(&catalog, &rules, &submission).expect("valid");
    assert_eq!(first, second);
    assert_eq!(first.character_id(), submission.character_id);
    assert_eq!(catalog.to_document(), before);
}

#[test]
fn exact_budget_is_required() {
    let mut submission = human_barbarian();
    for (attributes, spent) in [
        (AttributeSet::new(3, 0, 0, 0), 11),
        (AttributeSet::new(3, 1, 1, 0), 13),
    ] {
        submission.attributes = attributes;
        let rejection = derive(&submission).expect_err("off budget");
        assert_eq!(rejection.error, RulesError::PointBudget { spent, budget: 12 });
    }
}

#[test]
fn missing_choice_rejects_without_a_sheet() {
    let mut submission = human_barbarian();
    submission.feature_choices.clear();
    let rejection = derive(&submission).expect_err("missing battlecry");
    assert_eq!(rejection.kind(), ErrorKind::InvalidFeatureChoiceError);
    assert_eq!(rejection.reached, ValidationStage::ClassChecked);
    assert!(rejection.to_string().contains("Choose a Battlecry"));
}

#[test]
fn sheet_serializes_to_camel_case_json() {
    let sheet = derive(&human_barbarian()).expect("valid barbarian");
    let json = serde_json::to_value(&sheet).expect("serializes");
    assert_eq!(json["resources"]["hitPoints"]["max"], 12);
    assert_eq!(json["combatMastery"], 1);
    assert_eq!(json["identity"]["classId"], "barbarian");
}
