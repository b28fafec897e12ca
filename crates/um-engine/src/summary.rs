//! End-of-run reporting.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use um_core::Attributes;
use uuid::Uuid;

/// Letter grade derived from the final reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReputationGrade {
    /// Reputation 100.
    #[serde(rename = "A+")]
    APlus,
    /// 90 and above.
    A,
    /// 88 and above.
    #[serde(rename = "B+")]
    BPlus,
    /// 80 and above.
    B,
    /// 78 and above.
    #[serde(rename = "C+")]
    CPlus,
    /// 70 and above.
    C,
    /// 68 and above.
    #[serde(rename = "D+")]
    DPlus,
    /// Everything lower.
    D,
}

impl ReputationGrade {
    /// Grade a reputation value.
    pub fn from_reputation(reputation: i32) -> Self {
        match reputation {
            100.. => ReputationGrade::APlus,
            90.. => ReputationGrade::A,
            88.. => ReputationGrade::BPlus,
            80.. => ReputationGrade::B,
            78.. => ReputationGrade::CPlus,
            70.. => ReputationGrade::C,
            68.. => ReputationGrade::DPlus,
            _ => ReputationGrade::D,
        }
    }

    /// The grade as printed, e.g. `B+`.
    pub fn as_str(self) -> &'static str {
        match self {
            ReputationGrade::APlus => "A+",
            ReputationGrade::A => "A",
            ReputationGrade::BPlus => "B+",
            ReputationGrade::B => "B",
            ReputationGrade::CPlus => "C+",
            ReputationGrade::C => "C",
            ReputationGrade::DPlus => "D+",
            ReputationGrade::D => "D",
        }
    }
}

impl fmt::Display for ReputationGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a finished (or abandoned) run amounted to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// Name of the character played.
    pub character: String,
    /// Attribute values at the time of the summary.
    pub attributes: Attributes,
    /// Reputation letter grade.
    pub grade: ReputationGrade,
    /// Responses chosen, interlude responses included.
    pub choices: usize,
    /// Times the overwhelm interlude was entered.
    pub overwhelm_count: usize,
    /// Storyline scenarios resolved.
    pub scenarios_completed: usize,
    /// Length of the storyline.
    pub scenarios_total: usize,
    /// Whether the story reached its end.
    pub completed: bool,
    /// When the character was selected.
    pub started_at: DateTime<Utc>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.character, self.attributes)?;
        writeln!(f, "Reputation grade: {}", self.grade)?;
        write!(
            f,
            "Scenarios: {}/{}, choices: {}, overwhelmed: {}",
            self.scenarios_completed, self.scenarios_total, self.choices, self.overwhelm_count
        )
    }
}
