//! Built-in catalog content.
//!
//! Assembled on demand; nothing here runs at module load.

mod ancestries;
mod classes;
mod magic;
mod paths;
mod proficiencies;

use super::document::{CatalogDocument, CURRENT_CATALOG_VERSION};

/// The built-in rules content as a current-version document.
pub fn builtin_document() -> CatalogDocument {
    CatalogDocument {
        version: CURRENT_CATALOG_VERSION,
        ancestries: ancestries::ancestries(),
        traits: ancestries::traits(),
        classes: classes::classes(),
        paths: paths::paths(),
        skills: proficiencies::skills(),
        trades: proficiencies::trades(),
        languages: proficiencies::languages(),
        spells: magic::spells(),
        maneuvers: magic::maneuvers(),
    }
}
