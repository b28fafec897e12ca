//! Playable characters: identity, starting attributes, and a storyline.

use serde::{Deserialize, Serialize};

use crate::attribute::{ATTRIBUTE_MAX, ATTRIBUTE_MIN, Attribute, Attributes};
use crate::error::{ContentError, ContentResult};
use crate::id::{CharacterId, ResponseId};
use crate::response::Response;
use crate::scenario::Scenario;

/// Icon used when content names none.
pub const DEFAULT_ICON: &str = "assets/blank_character_icon.png";

/// Identity metadata shown on the character card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Gender as authored.
    pub gender: String,
    /// Short biography.
    pub bio: String,
    /// Image path or URL.
    pub icon: String,
}

impl Profile {
    /// Create a profile with the default icon.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        bio: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
            bio: bio.into(),
            icon: DEFAULT_ICON.to_string(),
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// A fully built, validated character.
#[derive(Debug)]
pub struct Character {
    id: CharacterId,
    profile: Profile,
    scenarios: Vec<Scenario>,
    overwhelm: Option<Scenario>,
    start: Attributes,
    overwhelm_threshold: Option<i32>,
}

impl Character {
    /// Start building a character.
    pub fn builder(profile: Profile) -> CharacterBuilder {
        CharacterBuilder {
            profile,
            scenarios: Vec::new(),
            overwhelm: None,
            start: Attributes::default(),
            overwhelm_threshold: None,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Identity metadata.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.profile.age
    }

    /// Gender as authored.
    pub fn gender(&self) -> &str {
        &self.profile.gender
    }

    /// Short biography.
    pub fn bio(&self) -> &str {
        &self.profile.bio
    }

    /// Image path or URL.
    pub fn icon(&self) -> &str {
        &self.profile.icon
    }

    /// The main storyline in traversal order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The interlude inserted when composure runs low, if any.
    pub fn overwhelm_scenario(&self) -> Option<&Scenario> {
        self.overwhelm.as_ref()
    }

    /// Starting attribute values.
    pub fn start(&self) -> Attributes {
        self.start
    }

    /// Per-character overwhelm threshold, overriding the engine default.
    pub fn overwhelm_threshold(&self) -> Option<i32> {
        self.overwhelm_threshold
    }

    /// Locate a response anywhere in this character's content.
    pub fn find_response(&self, id: ResponseId) -> Option<(&Scenario, &Response)> {
        self.scenarios
            .iter()
            .chain(self.overwhelm.iter())
            .find_map(|s| s.response(id).map(|r| (s, r)))
    }
}

/// Builder for [`Character`]. Validation happens in [`CharacterBuilder::build`].
#[derive(Debug)]
pub struct CharacterBuilder {
    profile: Profile,
    scenarios: Vec<Scenario>,
    overwhelm: Option<Scenario>,
    start: Attributes,
    overwhelm_threshold: Option<i32>,
}

impl CharacterBuilder {
    /// Append a storyline scenario.
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Set the overwhelm interlude.
    pub fn overwhelm(mut self, scenario: Scenario) -> Self {
        self.overwhelm = Some(scenario);
        self
    }

    /// Set the starting attribute values.
    pub fn start(mut self, start: Attributes) -> Self {
        self.start = start;
        self
    }

    /// Override the engine's overwhelm threshold for this character.
    pub fn overwhelm_threshold(mut self, threshold: i32) -> Self {
        self.overwhelm_threshold = Some(threshold);
        self
    }

    /// Validate and assemble the character.
    pub fn build(self) -> ContentResult<Character> {
        let name = self.profile.name.trim();
        if name.is_empty() {
            return Err(ContentError::EmptyField {
                path: "character".to_string(),
                field: "name",
            });
        }
        let path = name.to_string();

        for attribute in Attribute::ALL {
            let value = self.start.get(attribute);
            if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                return Err(ContentError::StartOutOfRange {
                    path,
                    attribute,
                    value,
                });
            }
        }

        if let Some(value) = self.overwhelm_threshold
            && !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value)
        {
            return Err(ContentError::ThresholdOutOfRange { path, value });
        }

        for (i, scenario) in self.scenarios.iter().enumerate() {
            scenario.validate(&format!("{path} > scenario {}", i + 1))?;
        }
        if let Some(scenario) = &self.overwhelm {
            scenario.validate(&format!("{path} > overwhelm scenario"))?;
        }

        Ok(Character {
            id: CharacterId::next(),
            profile: self.profile,
            scenarios: self.scenarios,
            overwhelm: self.overwhelm,
            start: self.start,
            overwhelm_threshold: self.overwhelm_threshold,
        })
    }
}
