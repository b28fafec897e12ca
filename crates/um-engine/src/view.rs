//! Read-only views for a presentation layer.
//!
//! Views borrow from the engine and are rebuilt after every transition.

use serde::Serialize;
use um_core::{Availability, ResponseId, ScenarioId, Theme};

/// The scenario currently awaiting a choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioView<'a> {
    /// The scenario.
    pub scenario: ScenarioId,
    /// Text shown on entering.
    pub exposition: &'a str,
    /// Mood tag for background and ambience.
    pub theme: &'a Theme,
    /// Whether this is the overwhelm interlude.
    pub overwhelm: bool,
    /// Storyline index. Unchanged while overwhelmed.
    pub index: usize,
    /// Responses in display order.
    pub responses: Vec<ResponseView<'a>>,
}

impl<'a> ScenarioView<'a> {
    /// Responses that may currently be chosen.
    pub fn available(&self) -> impl Iterator<Item = &ResponseView<'a>> {
        self.responses.iter().filter(|r| r.availability.available)
    }
}

/// One response as offered to the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseView<'a> {
    /// The response.
    pub id: ResponseId,
    /// Button text.
    pub label: &'a str,
    /// Whether it may be chosen, and why not.
    pub availability: Availability,
}

/// The result of the response just chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView<'a> {
    /// The response.
    pub response: ResponseId,
    /// Its button text.
    pub label: &'a str,
    /// Narrative shown after choosing.
    pub exposition: &'a str,
    /// Optional supplementary info.
    pub info: Option<&'a str>,
}
