//! Core types for Unmasked: attributes, effects, conditions, and the story model.
//!
//! This crate defines the object graph a play-through runs against. It is
//! independent of the authoring format. You can construct a [`Character`]
//! programmatically with the builders here, or load one through `um-content`.

/// The three bounded attributes and the store that holds them.
pub mod attribute;
/// Playable characters and their storylines.
pub mod character;
/// Availability predicates over the attribute store.
pub mod condition;
/// Attribute deltas and custom side effects applied when a response is chosen.
pub mod effect;
/// Error types raised while assembling the story graph.
pub mod error;
/// Monotonic identifiers for characters, scenarios, and responses.
pub mod id;
/// Selectable responses within a scenario.
pub mod response;
/// Story beats presenting exposition and a choice set.
pub mod scenario;

/// Re-export attribute types.
pub use attribute::{ATTRIBUTE_MAX, ATTRIBUTE_MIN, Attribute, AttributeStore, Attributes};
/// Re-export character types.
pub use character::{Character, CharacterBuilder, DEFAULT_ICON, Profile};
/// Re-export condition types.
pub use condition::{Availability, Condition, CustomCondition, OVERWHELMED_REASON};
/// Re-export effect types.
pub use effect::{Effect, EffectHook};
/// Re-export error types.
pub use error::{ContentError, ContentResult};
/// Re-export identifier types.
pub use id::{CharacterId, ResponseId, ScenarioId};
/// Re-export response types.
pub use response::Response;
/// Re-export scenario types.
pub use scenario::{Scenario, Theme};
