//! Responses: the choices offered within a scenario.

use crate::attribute::AttributeStore;
use crate::condition::{Availability, Condition};
use crate::effect::Effect;
use crate::error::{ContentError, ContentResult};
use crate::id::ResponseId;

/// A single selectable choice.
///
/// Built once with the `with_*` methods and immutable after it is placed in
/// a scenario.
#[derive(Debug)]
pub struct Response {
    id: ResponseId,
    button_text: String,
    result_exposition: Option<String>,
    result_info: Option<String>,
    effect: Effect,
    condition: Condition,
}

impl Response {
    /// Create a pass-through response with the given label.
    pub fn new(button_text: impl Into<String>) -> Self {
        Self {
            id: ResponseId::next(),
            button_text: button_text.into(),
            result_exposition: None,
            result_info: None,
            effect: Effect::default(),
            condition: Condition::default(),
        }
    }

    /// Set the narrative shown after the response is chosen.
    pub fn with_result(mut self, exposition: impl Into<String>) -> Self {
        self.result_exposition = Some(exposition.into());
        self
    }

    /// Set the supplementary info text.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.result_info = Some(info.into());
        self
    }

    /// Set the effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Set the availability condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> ResponseId {
        self.id
    }

    /// Label on the choice button.
    pub fn button_text(&self) -> &str {
        &self.button_text
    }

    /// Narrative shown after choosing, if any.
    pub fn result_exposition(&self) -> Option<&str> {
        self.result_exposition.as_deref()
    }

    /// Supplementary info shown with the result, if any.
    pub fn result_info(&self) -> Option<&str> {
        self.result_info.as_deref()
    }

    /// The effect applied when chosen.
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    /// The availability condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Returns true if choosing this response skips the result screen.
    pub fn is_pass_through(&self) -> bool {
        self.result_exposition.is_none()
    }

    /// Evaluate the condition against a store.
    pub fn availability(&self, store: &AttributeStore) -> Availability {
        self.condition.evaluate(store)
    }

    pub(crate) fn validate(&self, path: &str) -> ContentResult<()> {
        if self.button_text.trim().is_empty() {
            return Err(ContentError::EmptyField {
                path: path.to_string(),
                field: "buttonText",
            });
        }
        Ok(())
    }
}
