//! Port traits for the engine's one external boundary: the rules catalog.
//!
//! The effect interpreter only needs "what does this entry declare?", so it
//! talks to this trait. `RulesCatalog` is the production implementation;
//! tests substitute a mock.

use sheetsmith_domain::{EffectDeclaration, EntryRef, RulesCatalog};

#[cfg_attr(test, mockall::automock)]
pub trait CatalogPort: Send + Sync {
    /// Effects declared by `entry`, in declaration order. `None` if unknown.
    fn entry_effects(&self, entry: &EntryRef) -> Option<Vec<EffectDeclaration>>;
}

impl CatalogPort for RulesCatalog {
    fn entry_effects(&self, entry: &EntryRef) -> Option<Vec<EffectDeclaration>> {
        self.effects_of(entry).ok().map(<[EffectDeclaration]>::to_vec)
    }
}
