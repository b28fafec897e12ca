//! Scenarios: one narrative beat with exposition and a choice set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::id::{ResponseId, ScenarioId};
use crate::response::Response;

/// Mood tag for a scenario. Opaque to the engine; presentation picks
/// backgrounds and ambience from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(String);

impl Theme {
    /// The tag used when content names no theme.
    pub const NONE: &'static str = "none";

    /// Create a theme tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the default `none` tag.
    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Self::NONE)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A story beat.
#[derive(Debug)]
pub struct Scenario {
    id: ScenarioId,
    exposition: String,
    responses: Vec<Response>,
    theme: Theme,
}

impl Scenario {
    /// Create a scenario with no responses and the default theme.
    pub fn new(exposition: impl Into<String>) -> Self {
        Self {
            id: ScenarioId::next(),
            exposition: exposition.into(),
            responses: Vec::new(),
            theme: Theme::default(),
        }
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Theme::new(theme);
        self
    }

    /// Append a response. Order is display order.
    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> ScenarioId {
        self.id
    }

    /// Text shown when the scenario is entered.
    pub fn exposition(&self) -> &str {
        &self.exposition
    }

    /// Responses in display order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// The mood tag.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Find a response of this scenario by id.
    pub fn response(&self, id: ResponseId) -> Option<&Response> {
        self.responses.iter().find(|r| r.id() == id)
    }

    /// Check that the scenario can be played.
    pub fn validate(&self, path: &str) -> ContentResult<()> {
        if self.exposition.trim().is_empty() {
            return Err(ContentError::EmptyField {
                path: path.to_string(),
                field: "exposition",
            });
        }
        if self.responses.is_empty() {
            return Err(ContentError::NoResponses {
                path: path.to_string(),
            });
        }
        for (i, response) in self.responses.iter().enumerate() {
            response.validate(&format!("{path} > response {}", i + 1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_builder() {
        let scenario = Scenario::new("You get home after school.")
            .with_theme("living room")
            .with_response(Response::new("Take a nap"))
            .with_response(Response::new("Stim and draw"));

        assert_eq!(scenario.theme().as_str(), "living room");
        assert_eq!(scenario.responses().len(), 2);
        assert_eq!(scenario.responses()[1].button_text(), "Stim and draw");

        let id = scenario.responses()[0].id();
        assert_eq!(scenario.response(id).map(Response::button_text), Some("Take a nap"));
        assert!(scenario.validate("test").is_ok());
    }

    #[test]
    fn default_theme_is_none() {
        let scenario = Scenario::new("x");
        assert!(scenario.theme().is_none());
        assert_eq!(scenario.theme().to_string(), "none");
    }

    #[test]
    fn foreign_response_not_found() {
        let scenario = Scenario::new("x").with_response(Response::new("a"));
        let other = Response::new("b");
        assert!(scenario.response(other.id()).is_none());
    }

    #[test]
    fn empty_responses_rejected() {
        let err = Scenario::new("Nothing to do.").validate("Roman > scenario 1");
        assert_eq!(
            err,
            Err(ContentError::NoResponses {
                path: "Roman > scenario 1".to_string()
            })
        );
    }

    #[test]
    fn empty_exposition_rejected() {
        let err = Scenario::new("")
            .with_response(Response::new("ok"))
            .validate("s");
        assert!(matches!(err, Err(ContentError::EmptyField { field: "exposition", .. })));
    }

    #[test]
    fn response_errors_carry_path() {
        let err = Scenario::new("x")
            .with_response(Response::new("fine"))
            .with_response(Response::new(""))
            .validate("Nora > scenario 2")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Nora > scenario 2 > response 2: required field `buttonText` is empty"
        );
    }
}
