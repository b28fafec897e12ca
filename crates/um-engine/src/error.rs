//! Error types for the story engine.

use thiserror::Error;
use um_core::{ResponseId, ScenarioId};

use crate::state::StoryState;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Usage errors: an action the current state does not allow.
///
/// None of these change engine state. A presentation layer that only offers
/// what [`ScenarioView`](crate::ScenarioView) marks available never sees them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A character was selected while a story is in progress.
    #[error("a story is already in progress; reset before selecting another character")]
    AlreadyStarted,

    /// The action is not valid in the current state.
    #[error("cannot {action}: {state}")]
    UnexpectedAction {
        /// What was attempted.
        action: &'static str,
        /// The state at the time.
        state: StoryState,
    },

    /// The response is not part of the current scenario.
    #[error("{response} is not a response of {scenario}")]
    ForeignResponse {
        /// The rejected response.
        response: ResponseId,
        /// The scenario awaiting a choice.
        scenario: ScenarioId,
    },

    /// A display index past the end of the response list.
    #[error("no response at position {index} (scenario has {count})")]
    IndexOutOfRange {
        /// The requested zero-based index.
        index: usize,
        /// Number of responses offered.
        count: usize,
    },

    /// The response's condition currently fails.
    #[error("\"{label}\" is unavailable: {reason}")]
    ResponseUnavailable {
        /// Button text of the rejected response.
        label: String,
        /// The condition's rejection message.
        reason: String,
    },

    /// Autoplay found nothing it was allowed to choose.
    #[error("no response is available in {0}")]
    NoAvailableResponse(ScenarioId),

    /// Autoplay gave up before the story ended.
    #[error("story did not end within {limit} steps")]
    StepLimit {
        /// The step budget that ran out.
        limit: usize,
    },
}
