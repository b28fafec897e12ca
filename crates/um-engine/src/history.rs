//! Per-run journal of what happened.
//!
//! Timestamps are informational. Nothing in the engine reads them back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use um_core::{Attributes, ResponseId, ScenarioId};

/// A single entry in a run's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEntry {
    /// A scenario was presented.
    ScenarioEntered {
        /// The scenario.
        scenario: ScenarioId,
        /// Storyline index at the time.
        index: usize,
        /// Whether it was the overwhelm interlude.
        overwhelm: bool,
        /// The exposition shown.
        exposition: String,
        /// When it was entered.
        timestamp: DateTime<Utc>,
    },
    /// A response was chosen and its effect applied.
    ResponseChosen {
        /// The response.
        response: ResponseId,
        /// Its button text.
        label: String,
        /// Result narrative, if the response has one.
        result: Option<String>,
        /// Attributes before the effect.
        before: Attributes,
        /// Attributes after the effect.
        after: Attributes,
        /// When it was chosen.
        timestamp: DateTime<Utc>,
    },
    /// The story ended.
    Ended {
        /// Final attributes.
        attributes: Attributes,
        /// When it ended.
        timestamp: DateTime<Utc>,
    },
}

/// A chronological log of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Button labels of every chosen response, in order.
    pub fn choices(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                HistoryEntry::ResponseChosen { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Export the history as markdown.
    pub fn export_markdown(&self, character: &str) -> String {
        let mut out = format!("# {character}\n\n");
        for entry in &self.entries {
            match entry {
                HistoryEntry::ScenarioEntered {
                    index,
                    overwhelm,
                    exposition,
                    ..
                } => {
                    if *overwhelm {
                        out.push_str("## Overwhelmed\n\n");
                    } else {
                        out.push_str(&format!("## Scenario {}\n\n", index + 1));
                    }
                    out.push_str(&format!("{exposition}\n\n"));
                }
                HistoryEntry::ResponseChosen {
                    label,
                    result,
                    after,
                    ..
                } => {
                    out.push_str(&format!("**Choice**: {label}\n"));
                    if let Some(result) = result {
                        out.push_str(&format!("  {result}\n"));
                    }
                    out.push_str(&format!("  *{after}*\n\n"));
                }
                HistoryEntry::Ended { attributes, .. } => {
                    out.push_str(&format!("*The story ends* with {attributes}.\n"));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> History {
        let now = Utc::now();
        let mut history = History::new();
        history.append(HistoryEntry::ScenarioEntered {
            scenario: ScenarioId(0),
            index: 0,
            overwhelm: false,
            exposition: "You are at lunch.".into(),
            timestamp: now,
        });
        history.append(HistoryEntry::ResponseChosen {
            response: ResponseId(0),
            label: "Laugh and nod".into(),
            result: Some("It gets you through.".into()),
            before: Attributes::default(),
            after: Attributes::new(40, 100, 100),
            timestamp: now,
        });
        history.append(HistoryEntry::ScenarioEntered {
            scenario: ScenarioId(9),
            index: 0,
            overwhelm: true,
            exposition: "Everything is too much.".into(),
            timestamp: now,
        });
        history.append(HistoryEntry::ResponseChosen {
            response: ResponseId(9),
            label: "Breathe".into(),
            result: None,
            before: Attributes::new(40, 100, 100),
            after: Attributes::new(70, 100, 100),
            timestamp: now,
        });
        history.append(HistoryEntry::Ended {
            attributes: Attributes::new(70, 100, 100),
            timestamp: now,
        });
        history
    }

    #[test]
    fn append_and_query() {
        let history = sample();
        assert_eq!(history.len(), 5);
        assert!(!history.is_empty());
        assert_eq!(history.choices(), vec!["Laugh and nod", "Breathe"]);
    }

    #[test]
    fn export_markdown() {
        insta::assert_snapshot!(sample().export_markdown("Nora"), @r"
        # Nora

        ## Scenario 1

        You are at lunch.

        **Choice**: Laugh and nod
          It gets you through.
          *stress 40, reputation 100, performance 100*

        ## Overwhelmed

        Everything is too much.

        **Choice**: Breathe
          *stress 70, reputation 100, performance 100*

        *The story ends* with stress 70, reputation 100, performance 100.
        ");
    }

    #[test]
    fn serde_roundtrip() {
        let history = sample();
        let json = serde_json::to_string(&history).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
