//! Transition notifications.

use serde::Serialize;
use um_core::{Attributes, ResponseId, ScenarioId};

use crate::summary::RunSummary;

/// Something that just happened in the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoryEvent {
    /// A character was selected and the store initialised.
    CharacterSelected {
        /// Character name.
        character: String,
        /// Starting attributes.
        start: Attributes,
    },
    /// A scenario is now awaiting a choice.
    ScenarioEntered {
        /// The scenario.
        scenario: ScenarioId,
        /// Storyline index.
        index: usize,
        /// Whether it is the overwhelm interlude.
        overwhelm: bool,
    },
    /// A response was chosen and its effect applied.
    ResponseChosen {
        /// The response.
        response: ResponseId,
        /// Attributes before the effect.
        before: Attributes,
        /// Attributes after the effect.
        after: Attributes,
    },
    /// A response's result is being shown.
    ResultShown {
        /// The response.
        response: ResponseId,
    },
    /// The story reached its end.
    StoryEnded {
        /// End-of-run report.
        summary: RunSummary,
    },
    /// The engine returned to character selection.
    Reset,
}

/// Receives every [`StoryEvent`], in order, after the transition completes.
pub trait StoryObserver {
    /// Called once per event.
    fn on_event(&mut self, event: &StoryEvent);
}

impl<F> StoryObserver for F
where
    F: FnMut(&StoryEvent),
{
    fn on_event(&mut self, event: &StoryEvent) {
        self(event)
    }
}
