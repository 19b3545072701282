//! Validation state machine scenarios against the built-in catalog.

use super::*;
use sheetsmith_domain::{
    AncestryId, Attribute, ChoiceValue, Fluency, LanguageId, ManeuverId, SkillId, TradeId,
    TraitId,
};

use crate::use_cases::effects::resolve_effects;

fn catalog() -> RulesCatalog {
    RulesCatalog::builtin()
}

fn ancestries(ids: &[&str]) -> Vec<AncestryId> {
    ids.iter().map(|id| AncestryId::from(*id)).collect()
}

/// Human barbarian spending exactly 12 attribute points.
fn barbarian() -> Submission {
    let mut submission = Submission::new(
        AttributeSet::new(3, 1, 0, 0),
        ancestries(&["human"]),
        "barbarian",
    )
    .with_traits(["human_skill_expertise", "human_trade_expertise"])
    .with_choice("barbarian_battlecry", ChoiceValue::single("fortitude_shout"))
    .with_path_points("martial_path", 1);

    submission.proficiencies.skills = [
        (SkillId::from("athletics"), 2),
        (SkillId::from("intimidation"), 1),
    ]
    .into_iter()
    .collect();
    submission.proficiencies.languages = [(LanguageId::from("elvish"), Fluency::Limited)]
        .into_iter()
        .collect();
    submission.maneuvers = vec![
        ManeuverId::from("power_attack"),
        ManeuverId::from("parry"),
        ManeuverId::from("whirlwind"),
    ];
    submission
}

/// Elf cleric with both domain picks and a full spell selection.
fn cleric() -> Submission {
    let mut submission = Submission::new(
        AttributeSet::new(0, 0, 3, 1),
        ancestries(&["elf"]),
        "cleric",
    )
    .with_traits(["elf_quick_reactions"])
    .with_choice(
        "cleric_domains",
        ChoiceValue::multiple(["domain_life", "domain_knowledge"]),
    );
    submission.spells = ["sacred_bolt", "guidance", "heal", "bless", "command"]
        .into_iter()
        .map(SpellId::from)
        .collect();
    submission
}

fn reject(submission: &Submission) -> Rejection {
    let catalog = catalog();
    let rules = CreationRules::default();
    SubmissionValidator::new(&catalog, &rules, submission)
        .validate()
        .map(|_| ())
        .expect_err("submission should be rejected")
}

fn assert_rejected(submission: &Submission, kind: ErrorKind, reached: ValidationStage) {
    let rejection = reject(submission);
    assert_eq!(rejection.kind(), kind, "unexpected error: {}", rejection.error);
    assert_eq!(rejection.reached, reached);
}

// =============================================================================
// State machine
// =============================================================================

#[test]
fn stages_advance_in_order() {
    let catalog = catalog();
    let rules = CreationRules::default();
    let submission = barbarian();
    let mut validator = SubmissionValidator::new(&catalog, &rules, &submission);

    let mut reached = Vec::new();
    while !validator.stage().is_accepted() {
        reached.push(validator.advance().expect("valid submission"));
    }
    assert_eq!(
        reached,
        vec![
            ValidationStage::AttributesChecked,
            ValidationStage::AncestryChecked,
            ValidationStage::TraitsChecked,
            ValidationStage::ClassChecked,
            ValidationStage::FeatureChoicesChecked,
            ValidationStage::CrossStageChecked,
        ]
    );
    // accepted is terminal
    assert_eq!(validator.advance(), Ok(ValidationStage::CrossStageChecked));
}

#[test]
fn rejection_is_terminal() {
    let catalog = catalog();
    let rules = CreationRules::default();
    let mut submission = barbarian();
    submission.ancestries = ancestries(&["human", "human"]);
    let mut validator = SubmissionValidator::new(&catalog, &rules, &submission);

    validator.advance().expect("attributes are fine");
    let first = validator.advance().expect_err("duplicate ancestry");
    let second = validator.advance().expect_err("still rejected");
    assert_eq!(first, second);
    assert_eq!(validator.stage(), ValidationStage::AttributesChecked);
    assert_eq!(validator.rejection(), Some(&first));
}

#[test]
fn accepted_submission_carries_computed_state() {
    let catalog = catalog();
    let rules = CreationRules::default();
    let submission = barbarian();
    let accepted = SubmissionValidator::new(&catalog, &rules, &submission)
        .validate()
        .expect("valid submission");

    assert_eq!(accepted.class().id.as_str(), "barbarian");
    assert_eq!(accepted.attributes(), &AttributeSet::new(3, 1, 0, 0));
    assert_eq!(accepted.path_benefits().stamina_points, 1);
    assert_eq!(accepted.limits().maneuvers, 5);
    assert_eq!(accepted.limits().techniques, 2);
    assert_eq!(accepted.maneuvers().len(), 2);
    assert_eq!(accepted.techniques(), &[ManeuverId::from("whirlwind")]);

    // 5 base + 1 from Skill Expertise, 3 spent on ranks
    let skills = accepted.budget().balance(ProficiencyPool::Skills);
    assert_eq!((skills.available, skills.spent), (6, 3));
    // 3 base + 2 from Trade Expertise, unspent points are allowed
    assert_eq!(accepted.budget().remaining(ProficiencyPool::Trades), 5);
    assert_eq!(
        accepted.feature_choices().get("barbarian_battlecry"),
        Some(&vec![OptionId::from("fortitude_shout")])
    );
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn point_buy_must_hit_the_budget_exactly() {
    let mut submission = barbarian();
    submission.attributes = AttributeSet::new(3, 0, 0, 0);
    let rejection = reject(&submission);
    assert_eq!(
        rejection.error,
        RulesError::PointBudget {
            spent: 11,
            budget: 12
        }
    );
    assert_eq!(rejection.reached, ValidationStage::Unvalidated);

    submission.attributes = AttributeSet::new(3, 1, 1, 0);
    assert_eq!(
        reject(&submission).error,
        RulesError::PointBudget {
            spent: 13,
            budget: 12
        }
    );
}

#[test]
fn range_is_checked_before_budget() {
    let mut submission = barbarian();
    submission.attributes = AttributeSet::new(4, -2, -2, -2);
    assert_rejected(&submission, ErrorKind::AttributeRangeError, ValidationStage::Unvalidated);

    submission.attributes = AttributeSet::new(3, 3, 3, -3);
    assert_rejected(&submission, ErrorKind::AttributeRangeError, ValidationStage::Unvalidated);
}

#[test]
fn literal_set_exceeds_cap_after_might_trait() {
    let catalog = catalog();
    let rules = CreationRules::default();
    let raw = AttributeSet::new(3, -2, -2, 1);
    let effects = resolve_effects(
        &catalog,
        &[EntryRef::Trait(TraitId::from("human_attribute_increase"))],
        &AncestryContext::new(ancestries(&["human"])),
    )
    .expect("resolves");

    assert_eq!(
        check_attribute_cap(&rules, &raw, &effects),
        Err(RulesError::AttributeCapExceeded {
            attribute: Attribute::Might,
            value: 4,
            cap: 3
        })
    );
    // the same set is also short of the point-buy budget
    assert_eq!(
        check_attributes(&rules, &raw),
        Err(RulesError::PointBudget {
            spent: 8,
            budget: 12
        })
    );
}

#[test]
fn might_trait_on_capped_might_is_rejected() {
    let submission = barbarian().with_traits(["human_attribute_increase"]);
    assert_rejected(
        &submission,
        ErrorKind::AttributeCapExceededError,
        ValidationStage::FeatureChoicesChecked,
    );
}

#[test]
fn conditional_modifiers_do_not_count_toward_cap() {
    let mut submission = barbarian();
    submission.ancestries = ancestries(&["orc"]);
    submission.traits = vec![TraitId::from("orc_rage_hardened")];
    let catalog = catalog();
    let rules = CreationRules::default();
    let accepted = SubmissionValidator::new(&catalog, &rules, &submission)
        .validate()
        .expect("conditional AD bonus is deferred");
    assert_eq!(accepted.effects().stat_modifier(SheetStat::AreaDefense), 0);
}

// =============================================================================
// Ancestry and traits
// =============================================================================

#[test]
fn ancestry_count_must_be_one_or_two() {
    let mut submission = barbarian();
    submission.ancestries = Vec::new();
    assert_rejected(
        &submission,
        ErrorKind::MalformedSelectionFormat,
        ValidationStage::AttributesChecked,
    );

    submission.ancestries = ancestries(&["human", "elf", "dwarf"]);
    assert_rejected(
        &submission,
        ErrorKind::MalformedSelectionFormat,
        ValidationStage::AttributesChecked,
    );
}

#[test]
fn ancestry_must_be_known_and_unique() {
    let mut submission = barbarian();
    submission.ancestries = ancestries(&["human", "gnome"]);
    assert_rejected(&submission, ErrorKind::UnknownCatalogId, ValidationStage::AttributesChecked);

    submission.ancestries = ancestries(&["human", "human"]);
    assert_eq!(
        reject(&submission).error,
        RulesError::DuplicateAncestry {
            ancestry_id: AncestryId::from("human")
        }
    );
}

#[test]
fn unknown_trait_is_rejected_before_effects() {
    let submission = barbarian().with_traits(["human_skill_expertise", "gnome_tinker"]);
    let rejection = reject(&submission);
    assert_eq!(rejection.kind(), ErrorKind::UnknownCatalogId);
    assert_eq!(rejection.reached, ValidationStage::AncestryChecked);
    assert!(rejection.error.to_string().contains("gnome_tinker"));
}

#[test]
fn trait_must_belong_to_a_chosen_ancestry() {
    let submission = barbarian().with_traits(["elf_fleet_of_foot"]);
    assert_rejected(&submission, ErrorKind::TraitNotAvailable, ValidationStage::AncestryChecked);

    let mut two_ancestries = barbarian().with_traits(["elf_fleet_of_foot"]);
    two_ancestries.ancestries = ancestries(&["human", "elf"]);
    assert!(SubmissionValidator::new(&catalog(), &CreationRules::default(), &two_ancestries)
        .validate()
        .is_ok());
}

#[test]
fn repeated_trait_is_rejected() {
    let submission = barbarian().with_traits(["human_determination", "human_determination"]);
    assert_rejected(&submission, ErrorKind::TraitNotAvailable, ValidationStage::AncestryChecked);
}

#[test]
fn trait_costs_are_limited_by_ancestry_points() {
    // 2 + 1 + 1 + 2 = 6 > 5
    let over = barbarian().with_traits([
        "human_skill_expertise",
        "human_trade_expertise",
        "human_determination",
        "human_attribute_increase",
    ]);
    assert_eq!(
        reject(&over).error,
        RulesError::AncestryPointsExceeded {
            spent: 6,
            budget: 5
        }
    );
}

#[test]
fn negative_traits_refund_ancestry_points() {
    // 2 + 1 + 1 + 2 - 1 = 5
    let mut submission = barbarian().with_traits([
        "human_skill_expertise",
        "human_trade_expertise",
        "human_determination",
        "human_attribute_increase",
        "human_unstable",
    ]);
    submission.attributes = AttributeSet::new(2, 1, 1, 0);
    let catalog = catalog();
    let rules = CreationRules::default();
    assert!(SubmissionValidator::new(&catalog, &rules, &submission)
        .validate()
        .is_ok());
}

// =============================================================================
// Class and feature choices
// =============================================================================

#[test]
fn unknown_class_is_rejected() {
    let mut submission = barbarian();
    submission.class_id = "necromancer".into();
    assert_rejected(&submission, ErrorKind::UnknownCatalogId, ValidationStage::TraitsChecked);
}

#[test]
fn missing_choice_names_the_prompt() {
    let mut submission = barbarian();
    submission.feature_choices.clear();
    let rejection = reject(&submission);
    assert_eq!(rejection.kind(), ErrorKind::InvalidFeatureChoiceError);
    assert_eq!(rejection.reached, ValidationStage::ClassChecked);
    assert!(rejection.error.to_string().contains("Choose a Battlecry"));
}

#[test]
fn option_must_belong_to_the_choice() {
    let submission =
        barbarian().with_choice("barbarian_battlecry", ChoiceValue::single("domain_life"));
    assert_eq!(
        reject(&submission).error,
        RulesError::feature_choice(
            "Choose a Battlecry",
            FeatureChoiceProblem::InvalidOption("domain_life".to_string())
        )
    );
}

#[test]
fn multi_select_needs_the_exact_count() {
    let submission = cleric().with_choice("cleric_domains", ChoiceValue::single("domain_life"));
    assert_eq!(
        reject(&submission).error,
        RulesError::feature_choice(
            "Choose two Divine Domains",
            FeatureChoiceProblem::WrongCount {
                expected: 2,
                actual: 1
            }
        )
    );

    let three = cleric().with_choice(
        "cleric_domains",
        ChoiceValue::multiple(["domain_life", "domain_war", "domain_light"]),
    );
    assert_rejected(
        &three,
        ErrorKind::InvalidFeatureChoiceError,
        ValidationStage::ClassChecked,
    );
}

#[test]
fn multi_select_rejects_repeated_options() {
    let submission = cleric().with_choice(
        "cleric_domains",
        ChoiceValue::multiple(["domain_life", "domain_life"]),
    );
    assert_eq!(
        reject(&submission).error,
        RulesError::feature_choice(
            "Choose two Divine Domains",
            FeatureChoiceProblem::RepeatedOption("domain_life".to_string())
        )
    );
}

#[test]
fn choices_outside_the_class_level_are_malformed() {
    // champion's level-2 choice, and a choice of another class
    let submission = barbarian().with_choice("champion_tactics", ChoiceValue::single("tactic_aggressive"));
    assert_rejected(
        &submission,
        ErrorKind::MalformedSelectionFormat,
        ValidationStage::ClassChecked,
    );
}

// =============================================================================
// Cross-stage
// =============================================================================

#[test]
fn path_points_above_max_tier_are_rejected() {
    let submission = barbarian().with_path_points("martial_path", 5);
    assert_rejected(
        &submission,
        ErrorKind::PathPointsError,
        ValidationStage::FeatureChoicesChecked,
    );
}

#[test]
fn skill_ranks_are_bounded() {
    let mut submission = barbarian();
    submission.proficiencies.skills.insert(SkillId::from("stealth"), 3);
    assert_rejected(
        &submission,
        ErrorKind::InvalidProficiencySelection,
        ValidationStage::FeatureChoicesChecked,
    );

    submission.proficiencies.skills.insert(SkillId::from("stealth"), 0);
    assert_rejected(
        &submission,
        ErrorKind::InvalidProficiencySelection,
        ValidationStage::FeatureChoicesChecked,
    );
}

#[test]
fn unknown_proficiency_ids_are_rejected() {
    let mut submission = barbarian();
    submission.proficiencies.trades.insert(TradeId::from("glassblowing"), 1);
    assert_rejected(
        &submission,
        ErrorKind::UnknownCatalogId,
        ValidationStage::FeatureChoicesChecked,
    );
}

#[test]
fn skill_ranks_cannot_exceed_the_pool() {
    let mut submission = barbarian();
    // 6 skill points: 3 already spent, 2 + 2 more is one too many
    submission.proficiencies.skills.insert(SkillId::from("stealth"), 2);
    submission.proficiencies.skills.insert(SkillId::from("trickery"), 2);
    assert_rejected(
        &submission,
        ErrorKind::ProficiencyBudgetError,
        ValidationStage::FeatureChoicesChecked,
    );
}

#[test]
fn conversions_fund_extra_languages() {
    let mut submission = barbarian();
    submission.proficiencies.languages = [
        (LanguageId::from("elvish"), Fluency::Fluent),
        (LanguageId::from("dwarvish"), Fluency::Fluent),
        (LanguageId::from("common"), Fluency::Fluent),
    ]
    .into_iter()
    .collect();
    assert_rejected(
        &submission,
        ErrorKind::ProficiencyBudgetError,
        ValidationStage::FeatureChoicesChecked,
    );

    submission.proficiencies.conversions.trade_to_language = 1;
    let catalog = catalog();
    let rules = CreationRules::default();
    let accepted = SubmissionValidator::new(&catalog, &rules, &submission)
        .validate()
        .expect("converted trade point covers the second language");
    // common is free
    assert_eq!(accepted.budget().remaining(ProficiencyPool::Languages), 0);
}

#[test]
fn cleric_spells_are_accepted() {
    let catalog = catalog();
    let rules = CreationRules::default();
    let submission = cleric();
    let accepted = SubmissionValidator::new(&catalog, &rules, &submission)
        .validate()
        .expect("valid cleric");
    assert_eq!(accepted.limits().cantrips, 2);
    assert_eq!(accepted.limits().spells, 3);
    assert!(accepted.granted_spells().is_empty());
}

#[test]
fn spells_must_be_on_the_class_lists() {
    let mut submission = cleric();
    submission.spells = vec![SpellId::from("magic_missile")];
    assert_rejected(
        &submission,
        ErrorKind::InvalidSpellSelection,
        ValidationStage::FeatureChoicesChecked,
    );
}

#[test]
fn granted_spells_cannot_be_picked_again() {
    let mut submission = cleric().with_choice(
        "cleric_domains",
        ChoiceValue::multiple(["domain_life", "domain_light"]),
    );
    submission.spells = vec![SpellId::from("light")];
    let rejection = reject(&submission);
    assert_eq!(rejection.kind(), ErrorKind::InvalidSpellSelection);
    assert!(rejection.error.to_string().contains("already granted"));
}

#[test]
fn spell_counts_respect_known_limits() {
    let mut submission = cleric();
    submission.spells.push(SpellId::from("light"));
    assert_eq!(
        reject(&submission).error,
        RulesError::SelectionLimitExceeded {
            category: "cantrips",
            selected: 3,
            allowed: 2
        }
    );

    // martial classes only learn spells through the spellcaster path
    let mut martial = barbarian();
    martial.spells = vec![SpellId::from("spark")];
    assert_rejected(&martial, ErrorKind::SelectionLimitError, ValidationStage::FeatureChoicesChecked);

    let mut caster_path = barbarian().with_path_points("spellcaster_path", 1);
    caster_path.spells = vec![SpellId::from("spark"), SpellId::from("heal")];
    assert!(SubmissionValidator::new(&catalog(), &CreationRules::default(), &caster_path)
        .validate()
        .is_ok());
}

#[test]
fn maneuver_counts_respect_known_limits() {
    let mut submission = barbarian();
    submission.maneuvers.extend(
        ["heroic_riposte", "forceful_blow"]
            .into_iter()
            .map(ManeuverId::from),
    );
    assert_eq!(
        reject(&submission).error,
        RulesError::SelectionLimitExceeded {
            category: "techniques",
            selected: 3,
            allowed: 2
        }
    );
}

#[test]
fn repeated_maneuver_is_malformed() {
    let mut submission = barbarian();
    submission.maneuvers.push(ManeuverId::from("parry"));
    assert_rejected(
        &submission,
        ErrorKind::MalformedSelectionFormat,
        ValidationStage::FeatureChoicesChecked,
    );
}
