//! Validation Layer - a linear state machine over a submission.
//!
//! ```text
//! Unvalidated -> AttributesChecked -> AncestryChecked -> TraitsChecked
//!     -> ClassChecked -> FeatureChoicesChecked -> CrossStageChecked
//! ```
//!
//! Each [`SubmissionValidator::advance`] runs the next stage's checks. The
//! first failure is terminal: the validator stops at the last stage it
//! reached and keeps returning the same [`Rejection`]. Only a run that
//! reaches `CrossStageChecked` yields an [`AcceptedSubmission`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use sheetsmith_domain::{
    AncestryContext, AttributeSet, Capability, ChoiceId, ClassDefinition, CreationRules,
    EntryRef, ErrorKind, FeatureChoiceProblem, KnownLimits, ManeuverId, OptionId, PathBenefits,
    ProficiencyPool, RulesCatalog, RulesError, SheetStat, SpellId, Submission,
};

use super::effects::{resolve_effects, AggregateEffects};
use super::path_progression::{calculate_total_path_benefits, validate_path_state};
use super::proficiency::ProficiencyBudget;

#[cfg(test)]
mod tests;

// =============================================================================
// Stages
// =============================================================================

/// How far a submission got through validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationStage {
    Unvalidated,
    AttributesChecked,
    AncestryChecked,
    TraitsChecked,
    ClassChecked,
    FeatureChoicesChecked,
    /// Every check passed; the submission is accepted
    CrossStageChecked,
}

impl ValidationStage {
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Unvalidated => Some(Self::AttributesChecked),
            Self::AttributesChecked => Some(Self::AncestryChecked),
            Self::AncestryChecked => Some(Self::TraitsChecked),
            Self::TraitsChecked => Some(Self::ClassChecked),
            Self::ClassChecked => Some(Self::FeatureChoicesChecked),
            Self::FeatureChoicesChecked => Some(Self::CrossStageChecked),
            Self::CrossStageChecked => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::CrossStageChecked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::AttributesChecked => "attributes_checked",
            Self::AncestryChecked => "ancestry_checked",
            Self::TraitsChecked => "traits_checked",
            Self::ClassChecked => "class_checked",
            Self::FeatureChoicesChecked => "feature_choices_checked",
            Self::CrossStageChecked => "cross_stage_checked",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed validation: the last stage reached and the error that stopped it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Submission rejected after stage '{reached}': {error}")]
pub struct Rejection {
    pub reached: ValidationStage,
    #[source]
    pub error: RulesError,
}

impl Rejection {
    pub fn new(reached: ValidationStage, error: RulesError) -> Self {
        Self { reached, error }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

// =============================================================================
// Accepted Submission
// =============================================================================

/// Everything the cross-stage checks computed for a valid submission.
///
/// Only [`SubmissionValidator`] builds one, so holding an
/// `AcceptedSubmission` means every check passed.
#[derive(Debug, Clone)]
pub struct AcceptedSubmission<'a> {
    submission: &'a Submission,
    class: &'a ClassDefinition,
    effects: AggregateEffects,
    attributes: AttributeSet,
    path_benefits: PathBenefits,
    budget: ProficiencyBudget,
    limits: KnownLimits,
    feature_choices: BTreeMap<ChoiceId, Vec<OptionId>>,
    granted_spells: Vec<SpellId>,
    maneuvers: Vec<ManeuverId>,
    techniques: Vec<ManeuverId>,
}

impl<'a> AcceptedSubmission<'a> {
    pub fn submission(&self) -> &'a Submission {
        self.submission
    }

    pub fn class(&self) -> &'a ClassDefinition {
        self.class
    }

    pub fn effects(&self) -> &AggregateEffects {
        &self.effects
    }

    /// Attributes after unconditional modifiers.
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn path_benefits(&self) -> &PathBenefits {
        &self.path_benefits
    }

    /// The proficiency budget after conversions and every allocation.
    pub fn budget(&self) -> &ProficiencyBudget {
        &self.budget
    }

    pub fn limits(&self) -> &KnownLimits {
        &self.limits
    }

    pub fn feature_choices(&self) -> &BTreeMap<ChoiceId, Vec<OptionId>> {
        &self.feature_choices
    }

    /// Spells granted by effects rather than picked.
    pub fn granted_spells(&self) -> &[SpellId] {
        &self.granted_spells
    }

    pub fn maneuvers(&self) -> &[ManeuverId] {
        &self.maneuvers
    }

    pub fn techniques(&self) -> &[ManeuverId] {
        &self.techniques
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Stepwise validator for one submission against one catalog.
pub struct SubmissionValidator<'a> {
    catalog: &'a RulesCatalog,
    rules: &'a CreationRules,
    submission: &'a Submission,
    stage: ValidationStage,
    rejection: Option<Rejection>,
    class: Option<&'a ClassDefinition>,
    feature_choices: BTreeMap<ChoiceId, Vec<OptionId>>,
    accepted: Option<AcceptedSubmission<'a>>,
}

impl<'a> SubmissionValidator<'a> {
    pub fn new(
        catalog: &'a RulesCatalog,
        rules: &'a CreationRules,
        submission: &'a Submission,
    ) -> Self {
        Self {
            catalog,
            rules,
            submission,
            stage: ValidationStage::Unvalidated,
            rejection: None,
            class: None,
            feature_choices: BTreeMap::new(),
            accepted: None,
        }
    }

    pub fn stage(&self) -> ValidationStage {
        self.stage
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// Run the next stage's checks.
    ///
    /// Returns the stage reached. Once accepted, further calls are no-ops;
    /// once rejected, they return the same rejection.
    pub fn advance(&mut self) -> Result<ValidationStage, Rejection> {
        if let Some(rejection) = &self.rejection {
            return Err(rejection.clone());
        }
        let Some(next) = self.stage.next() else {
            return Ok(self.stage);
        };

        match self.run_stage(next) {
            Ok(()) => {
                tracing::debug!(
                    stage = %next,
                    class_id = %self.submission.class_id,
                    "Validation stage passed"
                );
                self.stage = next;
                Ok(next)
            }
            Err(error) => {
                let rejection = Rejection::new(self.stage, error);
                tracing::debug!(
                    reached = %rejection.reached,
                    kind = ?rejection.kind(),
                    error = %rejection.error,
                    "Submission rejected"
                );
                self.rejection = Some(rejection.clone());
                Err(rejection)
            }
        }
    }

    /// Advance until accepted or rejected.
    pub fn validate(mut self) -> Result<AcceptedSubmission<'a>, Rejection> {
        while !self.stage.is_accepted() {
            self.advance()?;
        }
        self.accepted.ok_or_else(|| {
            Rejection::new(
                self.stage,
                RulesError::malformed("validation finished without a result"),
            )
        })
    }

    fn run_stage(&mut self, stage: ValidationStage) -> Result<(), RulesError> {
        let submission = self.submission;
        match stage {
            ValidationStage::Unvalidated => Ok(()),
            ValidationStage::AttributesChecked => check_attributes(self.rules, &submission.attributes),
            ValidationStage::AncestryChecked => check_ancestries(self.catalog, submission),
            ValidationStage::TraitsChecked => check_traits(self.catalog, self.rules, submission),
            ValidationStage::ClassChecked => {
                self.class = Some(self.catalog.class(&submission.class_id)?);
                Ok(())
            }
            ValidationStage::FeatureChoicesChecked => {
                let class = self.require_class()?;
                self.feature_choices = check_feature_choices(class, self.rules.level, submission)?;
                Ok(())
            }
            ValidationStage::CrossStageChecked => {
                let class = self.require_class()?;
                let choices = std::mem::take(&mut self.feature_choices);
                self.accepted = Some(self.check_cross_stage(class, choices)?);
                Ok(())
            }
        }
    }

    fn require_class(&self) -> Result<&'a ClassDefinition, RulesError> {
        self.class
            .ok_or_else(|| RulesError::malformed("class has not been checked yet"))
    }

    fn check_cross_stage(
        &self,
        class: &'a ClassDefinition,
        feature_choices: BTreeMap<ChoiceId, Vec<OptionId>>,
    ) -> Result<AcceptedSubmission<'a>, RulesError> {
        let submission = self.submission;
        let rules = self.rules;

        let entries = selected_entries(class, rules.level, submission, &feature_choices);
        let context = AncestryContext::new(submission.ancestries.iter().cloned());
        let effects = resolve_effects(self.catalog, &entries, &context)?;

        let attributes = check_attribute_cap(rules, &submission.attributes, &effects)?;

        validate_path_state(self.catalog, &submission.path_points)?;
        let path_benefits = calculate_total_path_benefits(self.catalog, &submission.path_points);

        let budget = check_proficiencies(self.catalog, rules, submission, &attributes, &effects)?;

        let limits = known_limits(class, &path_benefits, &effects);
        let granted_spells = granted_spells(&effects);
        check_spells(self.catalog, class, submission, &limits, &granted_spells)?;
        let (maneuvers, techniques) = check_maneuvers(self.catalog, submission, &limits)?;

        Ok(AcceptedSubmission {
            submission,
            class,
            effects,
            attributes,
            path_benefits,
            budget,
            limits,
            feature_choices,
            granted_spells,
            maneuvers,
            techniques,
        })
    }
}

// =============================================================================
// Stage Checks
// =============================================================================

/// Raw attributes: each within range, then the point-buy total exactly on budget.
///
/// Range runs first so a set that breaks both reports the out-of-range
/// attribute rather than a point total computed from it.
pub fn check_attributes(rules: &CreationRules, attributes: &AttributeSet) -> Result<(), RulesError> {
    for (attribute, value) in attributes.iter() {
        if value < rules.attribute_floor || value > rules.attribute_cap {
            return Err(RulesError::AttributeRange {
                attribute,
                value,
                min: rules.attribute_floor,
                max: rules.attribute_cap,
            });
        }
    }

    let spent = attributes.point_cost(rules.attribute_floor);
    if spent != rules.attribute_point_budget {
        return Err(RulesError::PointBudget {
            spent,
            budget: rules.attribute_point_budget,
        });
    }
    Ok(())
}

fn check_ancestries(catalog: &RulesCatalog, submission: &Submission) -> Result<(), RulesError> {
    let count = submission.ancestries.len();
    if !(1..=2).contains(&count) {
        return Err(RulesError::malformed(format!(
            "expected one or two ancestries, got {}",
            count
        )));
    }

    let mut seen = BTreeSet::new();
    for ancestry_id in &submission.ancestries {
        catalog.ancestry(ancestry_id)?;
        if !seen.insert(ancestry_id) {
            return Err(RulesError::DuplicateAncestry {
                ancestry_id: ancestry_id.clone(),
            });
        }
    }
    Ok(())
}

fn check_traits(
    catalog: &RulesCatalog,
    rules: &CreationRules,
    submission: &Submission,
) -> Result<(), RulesError> {
    let mut seen = BTreeSet::new();
    let mut spent = 0;
    for trait_id in &submission.traits {
        let entry = catalog.trait_entry(trait_id)?;
        if !submission.ancestries.contains(&entry.ancestry_id) {
            return Err(RulesError::TraitNotAvailable {
                trait_id: trait_id.clone(),
                reason: format!("it belongs to ancestry '{}', which was not chosen", entry.ancestry_id),
            });
        }
        if !seen.insert(trait_id) {
            return Err(RulesError::TraitNotAvailable {
                trait_id: trait_id.clone(),
                reason: "it was selected more than once".to_string(),
            });
        }
        spent += entry.cost;
    }

    if spent > rules.ancestry_point_budget {
        return Err(RulesError::AncestryPointsExceeded {
            spent,
            budget: rules.ancestry_point_budget,
        });
    }
    Ok(())
}

/// Check every choice the class offers up to `level` and return the resolved
/// options per choice.
fn check_feature_choices(
    class: &ClassDefinition,
    level: u8,
    submission: &Submission,
) -> Result<BTreeMap<ChoiceId, Vec<OptionId>>, RulesError> {
    let mut resolved = BTreeMap::new();

    for choice in class.features_up_to(level).flat_map(|f| f.choices.iter()) {
        let Some(value) = submission.feature_choices.get(&choice.id) else {
            return Err(RulesError::feature_choice(&choice.prompt, FeatureChoiceProblem::Missing));
        };

        let mut picked: Vec<OptionId> = Vec::with_capacity(value.options().len());
        for option in value.options() {
            if choice.option(option).is_none() {
                return Err(RulesError::feature_choice(
                    &choice.prompt,
                    FeatureChoiceProblem::InvalidOption(option.to_string()),
                ));
            }
            if picked.contains(option) {
                return Err(RulesError::feature_choice(
                    &choice.prompt,
                    FeatureChoiceProblem::RepeatedOption(option.to_string()),
                ));
            }
            picked.push(option.clone());
        }

        if picked.len() != usize::from(choice.count) {
            return Err(RulesError::feature_choice(
                &choice.prompt,
                FeatureChoiceProblem::WrongCount {
                    expected: choice.count,
                    actual: picked.len(),
                },
            ));
        }
        resolved.insert(choice.id.clone(), picked);
    }

    if let Some(extra) = submission
        .feature_choices
        .keys()
        .find(|key| !resolved.contains_key(*key))
    {
        return Err(RulesError::malformed(format!(
            "choice '{}' is not offered by class '{}' at level {}",
            extra, class.id, level
        )));
    }

    Ok(resolved)
}

/// Traits, then class features in order, each followed by its chosen options.
fn selected_entries(
    class: &ClassDefinition,
    level: u8,
    submission: &Submission,
    choices: &BTreeMap<ChoiceId, Vec<OptionId>>,
) -> Vec<EntryRef> {
    let mut entries: Vec<EntryRef> = submission
        .traits
        .iter()
        .cloned()
        .map(EntryRef::Trait)
        .collect();

    for feature in class.features_up_to(level) {
        entries.push(EntryRef::Feature(feature.id.clone()));
        for choice in &feature.choices {
            if let Some(options) = choices.get(&choice.id) {
                entries.extend(options.iter().cloned().map(EntryRef::Option));
            }
        }
    }
    entries
}

/// Apply unconditional attribute modifiers and enforce the cap.
///
/// Returns the final attributes.
pub fn check_attribute_cap(
    rules: &CreationRules,
    raw: &AttributeSet,
    effects: &AggregateEffects,
) -> Result<AttributeSet, RulesError> {
    let mut total = *raw;
    for (attribute, value) in raw.iter() {
        let modified = value + effects.attribute_modifier(attribute);
        if modified > rules.attribute_cap {
            return Err(RulesError::AttributeCapExceeded {
                attribute,
                value: modified,
                cap: rules.attribute_cap,
            });
        }
        total = total.with(attribute, modified);
    }
    Ok(total)
}

fn check_proficiencies(
    catalog: &RulesCatalog,
    rules: &CreationRules,
    submission: &Submission,
    attributes: &AttributeSet,
    effects: &AggregateEffects,
) -> Result<ProficiencyBudget, RulesError> {
    let selections = &submission.proficiencies;
    let mut budget = starting_budget(rules, attributes, effects);
    budget.apply_conversions(&selections.conversions)?;

    for (skill_id, rank) in &selections.skills {
        catalog.skill(skill_id)?;
        check_rank("skill", skill_id.as_str(), *rank, rules.max_skill_rank)?;
        budget.spend(ProficiencyPool::Skills, i32::from(*rank))?;
    }

    for (trade_id, rank) in &selections.trades {
        catalog.trade(trade_id)?;
        check_rank("trade", trade_id.as_str(), *rank, rules.max_trade_rank)?;
        budget.spend(ProficiencyPool::Trades, i32::from(*rank))?;
    }

    for (language_id, fluency) in &selections.languages {
        let language = catalog.language(language_id)?;
        if !language.default_fluent {
            budget.spend(ProficiencyPool::Languages, fluency.cost())?;
        }
    }

    Ok(budget)
}

/// Pool sizes before conversions. Intelligence adds to skill points.
fn starting_budget(
    rules: &CreationRules,
    attributes: &AttributeSet,
    effects: &AggregateEffects,
) -> ProficiencyBudget {
    let skills = rules.base_skill_points
        + attributes.intelligence
        + effects.stat_modifier(SheetStat::SkillPoints);
    let trades = rules.base_trade_points + effects.stat_modifier(SheetStat::TradePoints);
    let languages = rules.base_language_points + effects.stat_modifier(SheetStat::LanguagePoints);
    ProficiencyBudget::new(skills.max(0), trades.max(0), languages.max(0))
}

fn check_rank(kind: &str, id: &str, rank: u8, max: u8) -> Result<(), RulesError> {
    if rank == 0 || rank > max {
        return Err(RulesError::InvalidProficiencySelection(format!(
            "{} '{}' has rank {}, expected 1 to {}",
            kind, id, rank, max
        )));
    }
    Ok(())
}

fn known_limits(
    class: &ClassDefinition,
    benefits: &PathBenefits,
    effects: &AggregateEffects,
) -> KnownLimits {
    KnownLimits {
        maneuvers: class.maneuvers_known
            + benefits.maneuvers_learned as i32
            + effects.stat_modifier(SheetStat::ManeuversKnown),
        techniques: class.techniques_known
            + benefits.techniques_learned as i32
            + effects.stat_modifier(SheetStat::TechniquesKnown),
        cantrips: class.cantrips_known
            + benefits.cantrips_learned as i32
            + effects.stat_modifier(SheetStat::CantripsKnown),
        spells: class.spells_known
            + benefits.spells_learned as i32
            + effects.stat_modifier(SheetStat::SpellsKnown),
    }
}

fn granted_spells(effects: &AggregateEffects) -> Vec<SpellId> {
    effects
        .capabilities()
        .filter_map(|(capability, _)| match capability {
            Capability::Spell { spell_id } => Some(spell_id.clone()),
            _ => None,
        })
        .collect()
}

fn check_spells(
    catalog: &RulesCatalog,
    class: &ClassDefinition,
    submission: &Submission,
    limits: &KnownLimits,
    granted: &[SpellId],
) -> Result<(), RulesError> {
    let mut seen = BTreeSet::new();
    let mut cantrips = 0;
    let mut spells = 0;

    for spell_id in &submission.spells {
        let spell = catalog.spell(spell_id)?;
        if !seen.insert(spell_id) {
            return Err(invalid_spell(spell_id, "it was selected more than once"));
        }
        if granted.contains(spell_id) {
            return Err(invalid_spell(spell_id, "it is already granted by a feature"));
        }
        // Classes without spell lists learn spells only through path points,
        // from any list.
        if !class.spell_lists.is_empty() && !spell.is_on_any(&class.spell_lists) {
            return Err(invalid_spell(
                spell_id,
                format!("it is not on a spell list available to {}", class.name),
            ));
        }
        if spell.cantrip {
            cantrips += 1;
        } else {
            spells += 1;
        }
    }

    check_limit("cantrips", cantrips, limits.cantrips)?;
    check_limit("spells", spells, limits.spells)
}

fn invalid_spell(spell_id: &SpellId, reason: impl Into<String>) -> RulesError {
    RulesError::InvalidSpellSelection {
        spell_id: spell_id.clone(),
        reason: reason.into(),
    }
}

/// Returns the selection split into maneuvers and techniques.
fn check_maneuvers(
    catalog: &RulesCatalog,
    submission: &Submission,
    limits: &KnownLimits,
) -> Result<(Vec<ManeuverId>, Vec<ManeuverId>), RulesError> {
    let mut maneuvers = Vec::new();
    let mut techniques = Vec::new();

    for maneuver_id in &submission.maneuvers {
        let maneuver = catalog.maneuver(maneuver_id)?;
        if maneuvers.contains(maneuver_id) || techniques.contains(maneuver_id) {
            return Err(RulesError::malformed(format!(
                "maneuver '{}' was selected more than once",
                maneuver_id
            )));
        }
        if maneuver.technique {
            techniques.push(maneuver_id.clone());
        } else {
            maneuvers.push(maneuver_id.clone());
        }
    }

    check_limit("maneuvers", maneuvers.len(), limits.maneuvers)?;
    check_limit("techniques", techniques.len(), limits.techniques)?;
    Ok((maneuvers, techniques))
}

fn check_limit(category: &'static str, selected: usize, allowed: i32) -> Result<(), RulesError> {
    let within = usize::try_from(allowed.max(0)).is_ok_and(|allowed| selected <= allowed);
    if !within {
        return Err(RulesError::SelectionLimitExceeded {
            category,
            selected,
            allowed,
        });
    }
    Ok(())
}
