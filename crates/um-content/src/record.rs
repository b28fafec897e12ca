//! The authoring format.
//!
//! A character file is a JSON array of [`CharacterRecord`]s. Keys follow the
//! spelling content authors already use (`buttonText`, `scenarioList`,
//! `stress_start`). Unknown keys are rejected so typos surface at load time.
//!
//! ```json
//! {
//!   "name": "Nora", "age": 14, "gender": "female", "bio": "...",
//!   "stress_start": 100,
//!   "scenarioList": [{
//!     "exposition": "You are at lunch with a group of friends.",
//!     "theme": "cafeteria",
//!     "responses": [{
//!       "buttonText": "Laugh and nod",
//!       "resultExposition": "It gets you through the interaction.",
//!       "effects": { "stress": -10 },
//!       "condition": { "stressAtLeast": 20 }
//!     }]
//!   }]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use um_core::Attribute;

/// One authored character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CharacterRecord {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Gender as authored.
    pub gender: String,
    /// Short biography.
    pub bio: String,
    /// Image path; defaults to the blank icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// The main storyline in order.
    pub scenario_list: Vec<ScenarioRecord>,
    /// Interlude inserted when composure runs low.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwhelm_scenario: Option<ScenarioRecord>,
    /// Starting stress; defaults to 100.
    #[serde(rename = "stress_start", default, skip_serializing_if = "Option::is_none")]
    pub stress_start: Option<i32>,
    /// Starting reputation; defaults to 100.
    #[serde(rename = "reputation_start", default, skip_serializing_if = "Option::is_none")]
    pub reputation_start: Option<i32>,
    /// Starting performance; defaults to 100.
    #[serde(rename = "performance_start", default, skip_serializing_if = "Option::is_none")]
    pub performance_start: Option<i32>,
    /// Per-character override of the engine's overwhelm threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwhelm_threshold: Option<i32>,
}

/// One authored scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScenarioRecord {
    /// Text shown on entering the scenario.
    pub exposition: String,
    /// Mood tag; defaults to `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Responses in display order.
    pub responses: Vec<ResponseRecord>,
}

/// One authored response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResponseRecord {
    /// Button label.
    pub button_text: String,
    /// Narrative shown after choosing. Omit for a pass-through response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_exposition: Option<String>,
    /// Supplementary info text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_info: Option<String>,
    /// Attribute deltas and hooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectsRecord>,
    /// Availability condition; defaults to always available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionRecord>,
}

/// Authored effect deltas. Missing fields are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectsRecord {
    /// Stress delta.
    #[serde(default)]
    pub stress: i32,
    /// Reputation delta.
    #[serde(default)]
    pub reputation: i32,
    /// Performance delta.
    #[serde(default)]
    pub performance: i32,
    /// Flag deltas.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, i32>,
    /// Name of a registered effect hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

/// Authored availability condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionRecord {
    /// Always available.
    Always,
    /// Available iff stress is at least the value.
    StressAtLeast(i32),
    /// Available iff the attribute is at least the value.
    AtLeast {
        /// Attribute to read.
        attribute: Attribute,
        /// Inclusive bound.
        value: i32,
    },
    /// Available iff the attribute is at most the value.
    AtMost {
        /// Attribute to read.
        attribute: Attribute,
        /// Inclusive bound.
        value: i32,
    },
    /// Available iff the flag is at least the value.
    FlagAtLeast {
        /// Flag key.
        key: String,
        /// Inclusive bound.
        value: i32,
    },
    /// Logical NOT.
    Not(Box<ConditionRecord>),
    /// Logical AND.
    All(Vec<ConditionRecord>),
    /// Logical OR.
    Any(Vec<ConditionRecord>),
    /// Name of a registered custom condition.
    Hook(String),
    /// Inner condition with a custom rejection message.
    Explained {
        /// Message shown when unavailable.
        reason: String,
        /// The wrapped condition.
        condition: Box<ConditionRecord>,
    },
}
