//! Public engine states.

use std::fmt;

use serde::Serialize;
use um_core::{ResponseId, ScenarioId};

/// Where a play-through currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum StoryState {
    /// No character selected.
    NotStarted,
    /// Waiting for the player to choose a response in a storyline scenario.
    AwaitingChoice(ScenarioId),
    /// Waiting for a choice in the character's overwhelm interlude.
    Overwhelmed(ScenarioId),
    /// Showing the result of a chosen response.
    ShowingResult(ResponseId),
    /// The story is complete.
    Ended,
}

impl StoryState {
    /// The scenario waiting for a choice, if any.
    pub fn scenario(self) -> Option<ScenarioId> {
        match self {
            StoryState::AwaitingChoice(id) | StoryState::Overwhelmed(id) => Some(id),
            _ => None,
        }
    }

    /// Returns true if a response may be chosen.
    pub fn accepts_choice(self) -> bool {
        self.scenario().is_some()
    }

    /// Returns true once the story is complete.
    pub fn is_ended(self) -> bool {
        self == StoryState::Ended
    }
}

impl fmt::Display for StoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryState::NotStarted => write!(f, "no character is selected"),
            StoryState::AwaitingChoice(id) => write!(f, "awaiting a choice in {id}"),
            StoryState::Overwhelmed(id) => write!(f, "overwhelmed in {id}"),
            StoryState::ShowingResult(id) => write!(f, "showing the result of {id}"),
            StoryState::Ended => write!(f, "the story has ended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_accessor() {
        let id = ScenarioId(3);
        assert_eq!(StoryState::AwaitingChoice(id).scenario(), Some(id));
        assert_eq!(StoryState::Overwhelmed(id).scenario(), Some(id));
        assert_eq!(StoryState::ShowingResult(ResponseId(1)).scenario(), None);
        assert!(!StoryState::Ended.accepts_choice());
        assert!(StoryState::Ended.is_ended());
    }

    #[test]
    fn display() {
        assert_eq!(
            StoryState::AwaitingChoice(ScenarioId(3)).to_string(),
            "awaiting a choice in scenario#3"
        );
        assert_eq!(StoryState::NotStarted.to_string(), "no character is selected");
    }
}
