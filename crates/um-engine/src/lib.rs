//! The Unmasked story engine.
//!
//! [`StoryEngine`] owns one play-through at a time: the selected character,
//! the attribute store and the position in the storyline. It is driven by
//! three actions (select a character, choose a response, continue from a
//! result) and never depends on wall-clock timing, so it runs headlessly
//! under test or behind any presentation layer.
//!
//! ```
//! use std::sync::Arc;
//! use um_core::{Character, Effect, Profile, Response, Scenario};
//! use um_engine::{EngineConfig, StoryEngine, StoryState};
//!
//! let character = Character::builder(Profile::new("Nora", 14, "female", ""))
//!     .scenario(Scenario::new("Lunch.").with_response(
//!         Response::new("Laugh and nod").with_effect(Effect::new(-10, 0, 0)),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let mut engine = StoryEngine::new(EngineConfig::default());
//! engine.select_character(Arc::new(character)).unwrap();
//! assert_eq!(engine.choose_index(0).unwrap(), StoryState::Ended);
//! assert_eq!(engine.attributes().unwrap().stress(), 90);
//! ```

/// Headless play for smoke tests and simulation.
pub mod autoplay;
/// Engine configuration.
pub mod config;
/// The state machine.
pub mod engine;
/// Usage errors.
pub mod error;
/// Per-run journal of what happened.
pub mod history;
/// Transition notifications.
pub mod observer;
/// Public engine states.
pub mod state;
/// End-of-run reporting.
pub mod summary;
/// Read-only views for presentation.
pub mod view;

pub use autoplay::{Autoplayer, DEFAULT_MAX_STEPS, SimulationReport, Strategy, simulate};
pub use config::{DEFAULT_OVERWHELM_THRESHOLD, EngineConfig};
pub use engine::StoryEngine;
pub use error::{EngineError, EngineResult};
pub use history::{History, HistoryEntry};
pub use observer::{StoryEvent, StoryObserver};
pub use state::StoryState;
pub use summary::{ReputationGrade, RunSummary};
pub use view::{ResponseView, ResultView, ScenarioView};
