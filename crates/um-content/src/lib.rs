//! Content authoring for Unmasked.
//!
//! Characters are authored as plain JSON records (see [`record`]) and turned
//! into the validated `um-core` object graph by [`build_character`]. Custom
//! effects and conditions are referenced by name and resolved through a
//! [`HookRegistry`]. The [`Library`] ships the built-in characters and
//! resolves names typed by a player.

/// Record → story graph conversion.
pub mod build;
/// Error types for loading content.
pub mod error;
/// Named custom effects and conditions.
pub mod hooks;
/// The built-in character set and name lookup.
pub mod library;
/// Non-fatal authoring checks.
pub mod lint;
/// Serde schema of the authoring format.
pub mod record;

pub use build::{build_character, load_characters, load_file};
pub use error::{LoadError, LoadResult};
pub use hooks::HookRegistry;
pub use library::Library;
pub use lint::{LintIssue, lint_character};
pub use record::{CharacterRecord, ConditionRecord, EffectsRecord, ResponseRecord, ScenarioRecord};
