//! Sheetsmith engine library.
//!
//! Validates character submissions and derives character sheets against a
//! shared rules catalog.
//!
//! ## Structure
//!
//! - `use_cases/` - effect interpreter, path progression, proficiency budget,
//!   validation state machine and sheet derivation
//! - `infrastructure/` - catalog port, configuration and tracing setup
//! - `app` - the `CharacterCreator` facade hosts hold on to

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::CharacterCreator;
