//! Effect Interpreter - fold the effects of selected catalog entries.
//!
//! Numeric modifiers add up per target. Grants form a set: granting the same
//! capability twice is still one grant, unless the declaration stacks, in
//! which case every stacking grant counts. Conditional declarations are never
//! applied here; they are carried through for the sheet to display.

use std::collections::{BTreeMap, BTreeSet};

use sheetsmith_domain::{
    AncestryContext, Attribute, Capability, ConditionalEffect, Effect, EffectDeclaration,
    EntryRef, RulesError, SheetStat,
};

use crate::infrastructure::ports::CatalogPort;

/// An unconditional effect that was applied, with the entry it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEffect {
    pub source: EntryRef,
    pub effect: Effect,
}

/// The combined result of resolving a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateEffects {
    attributes: BTreeMap<Attribute, i32>,
    stats: BTreeMap<SheetStat, i32>,
    capabilities: BTreeMap<Capability, u32>,
    conditional: Vec<ConditionalEffect>,
    applied: Vec<AppliedEffect>,
}

impl AggregateEffects {
    /// Total unconditional modifier for an attribute.
    pub fn attribute_modifier(&self, attribute: Attribute) -> i32 {
        self.attributes.get(&attribute).copied().unwrap_or(0)
    }

    /// Total unconditional modifier for a sheet stat.
    pub fn stat_modifier(&self, stat: SheetStat) -> i32 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }

    /// How many times a capability applies; 0 if never granted.
    pub fn multiplicity(&self, capability: &Capability) -> u32 {
        self.capabilities.get(capability).copied().unwrap_or(0)
    }

    /// Granted capabilities with their multiplicity, in a stable order.
    pub fn capabilities(&self) -> impl Iterator<Item = (&Capability, u32)> {
        self.capabilities.iter().map(|(c, n)| (c, *n))
    }

    pub fn conditional(&self) -> &[ConditionalEffect] {
        &self.conditional
    }

    /// Applied effects in application order (ancestries first, then selections).
    pub fn applied(&self) -> &[AppliedEffect] {
        &self.applied
    }
}

/// Resolve and aggregate the effects of `selected`, after the innate effects
/// of the ancestries in `context`.
///
/// Every entry is looked up before anything is aggregated, so an unknown id
/// fails with `UnknownCatalogId` and no partial result.
pub fn resolve_effects(
    catalog: &dyn CatalogPort,
    selected: &[EntryRef],
    context: &AncestryContext,
) -> Result<AggregateEffects, RulesError> {
    let entries: Vec<EntryRef> = context
        .ancestries
        .iter()
        .cloned()
        .map(EntryRef::Ancestry)
        .chain(selected.iter().cloned())
        .collect();

    let resolved = entries
        .into_iter()
        .map(|entry| match catalog.entry_effects(&entry) {
            Some(effects) => Ok((entry, effects)),
            None => Err(entry.unknown()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = Aggregator::default();
    for (source, declarations) in &resolved {
        for declaration in declarations {
            builder.add(source, declaration);
        }
    }
    let aggregate = builder.finish();

    tracing::debug!(
        entries = resolved.len(),
        applied = aggregate.applied.len(),
        conditional = aggregate.conditional.len(),
        capabilities = aggregate.capabilities.len(),
        "Resolved effects"
    );

    Ok(aggregate)
}

/// Grant multiplicity is tracked as (stacking grants, any non-stacking grant)
/// so the result does not depend on the order grants arrive in.
#[derive(Default)]
struct Aggregator {
    attributes: BTreeMap<Attribute, i32>,
    stats: BTreeMap<SheetStat, i32>,
    stacking: BTreeMap<Capability, u32>,
    single: BTreeSet<Capability>,
    conditional: Vec<ConditionalEffect>,
    applied: Vec<AppliedEffect>,
}

impl Aggregator {
    fn add(&mut self, source: &EntryRef, declaration: &EffectDeclaration) {
        if let Some(condition) = &declaration.condition {
            self.conditional.push(ConditionalEffect {
                source: source.clone(),
                condition: condition.clone(),
                effect: declaration.effect.clone(),
            });
            return;
        }

        match &declaration.effect {
            Effect::ModifyAttribute { attribute, value } => {
                *self.attributes.entry(*attribute).or_insert(0) += value;
            }
            Effect::ModifyStat { stat, value } => {
                *self.stats.entry(*stat).or_insert(0) += value;
            }
            grant => {
                if let Some(capability) = grant.capability() {
                    if declaration.stacks {
                        *self.stacking.entry(capability).or_insert(0) += 1;
                    } else {
                        self.single.insert(capability);
                    }
                }
            }
        }

        self.applied.push(AppliedEffect {
            source: source.clone(),
            effect: declaration.effect.clone(),
        });
    }

    fn finish(self) -> AggregateEffects {
        let mut capabilities = self.stacking;
        for capability in self.single {
            *capabilities.entry(capability).or_insert(0) += 1;
        }
        AggregateEffects {
            attributes: self.attributes,
            stats: self.stats,
            capabilities,
            conditional: self.conditional,
            applied: self.applied,
        }
    }
}
