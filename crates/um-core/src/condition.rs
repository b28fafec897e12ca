//! Availability conditions for responses.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::attribute::{Attribute, AttributeStore};

/// Rejection message used by [`Condition::stress_at_least`].
pub const OVERWHELMED_REASON: &str = "You are too overwhelmed to choose this option.";

const NOT_NOW_REASON: &str = "This option is not available right now.";

/// The result of evaluating a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Whether the response may be chosen.
    pub available: bool,
    /// Why not, when unavailable. Shown to the player.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Availability {
    /// Available, no reason.
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    /// Unavailable with a reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
        }
    }

    fn from_check(passed: bool, reason: impl FnOnce() -> String) -> Self {
        if passed {
            Self::available()
        } else {
            Self::unavailable(reason())
        }
    }
}

/// A named custom predicate.
#[derive(Clone)]
pub struct CustomCondition {
    name: String,
    check: Arc<dyn Fn(&AttributeStore) -> Availability + Send + Sync>,
}

impl CustomCondition {
    /// Wrap a closure as a named condition.
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&AttributeStore) -> Availability + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// The condition's name, as referenced from authored content.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate against a store.
    pub fn evaluate(&self, store: &AttributeStore) -> Availability {
        (self.check)(store)
    }
}

impl fmt::Debug for CustomCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomCondition").field(&self.name).finish()
    }
}

/// A predicate over the attribute store deciding whether a response can be chosen.
///
/// Evaluation is a pure query; it never mutates the store.
#[derive(Debug, Clone, Default)]
pub enum Condition {
    /// Always available.
    #[default]
    Always,
    /// Available iff the attribute is at least `value`.
    AtLeast {
        /// Attribute to read.
        attribute: Attribute,
        /// Inclusive lower bound.
        value: i32,
    },
    /// Available iff the attribute is at most `value`.
    AtMost {
        /// Attribute to read.
        attribute: Attribute,
        /// Inclusive upper bound.
        value: i32,
    },
    /// Available iff the flag is at least `value`.
    FlagAtLeast {
        /// Flag key.
        key: String,
        /// Inclusive lower bound.
        value: i32,
    },
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND. Reports the first failing reason.
    All(Vec<Condition>),
    /// Logical OR.
    Any(Vec<Condition>),
    /// Author-supplied predicate.
    Custom(CustomCondition),
    /// Replace the inner condition's rejection message.
    Explained {
        /// Message shown when the inner condition fails.
        reason: String,
        /// The wrapped condition.
        condition: Box<Condition>,
    },
}

impl Condition {
    /// Available iff `stress >= threshold`.
    ///
    /// Stress is a composure budget, so this gates options the character is
    /// too worn down to attempt.
    pub fn stress_at_least(threshold: i32) -> Self {
        Condition::AtLeast {
            attribute: Attribute::Stress,
            value: threshold,
        }
    }

    /// Wrap this condition with a custom rejection message.
    pub fn explained(self, reason: impl Into<String>) -> Self {
        Condition::Explained {
            reason: reason.into(),
            condition: Box::new(self),
        }
    }

    /// Returns true for [`Condition::Always`].
    pub fn is_always(&self) -> bool {
        matches!(self, Condition::Always)
    }

    /// Evaluate against the current store.
    pub fn evaluate(&self, store: &AttributeStore) -> Availability {
        match self {
            Condition::Always => Availability::available(),
            Condition::AtLeast { attribute, value } => {
                Availability::from_check(store.get(*attribute) >= *value, || {
                    if *attribute == Attribute::Stress {
                        OVERWHELMED_REASON.to_string()
                    } else {
                        format!("Requires {attribute} of at least {value}.")
                    }
                })
            }
            Condition::AtMost { attribute, value } => {
                Availability::from_check(store.get(*attribute) <= *value, || {
                    format!("Requires {attribute} of at most {value}.")
                })
            }
            Condition::FlagAtLeast { key, value } => {
                Availability::from_check(store.flag(key) >= *value, || {
                    format!("Requires {key} of at least {value}.")
                })
            }
            Condition::Not(inner) => {
                Availability::from_check(!inner.evaluate(store).available, || {
                    NOT_NOW_REASON.to_string()
                })
            }
            Condition::All(conditions) => conditions
                .iter()
                .map(|c| c.evaluate(store))
                .find(|a| !a.available)
                .unwrap_or_else(Availability::available),
            Condition::Any(conditions) => {
                let mut first_failure = None;
                for condition in conditions {
                    let result = condition.evaluate(store);
                    if result.available {
                        return result;
                    }
                    first_failure.get_or_insert(result);
                }
                first_failure.unwrap_or_else(|| Availability::unavailable(NOT_NOW_REASON))
            }
            Condition::Custom(custom) => custom.evaluate(store),
            Condition::Explained { reason, condition } => {
                Availability::from_check(condition.evaluate(store).available, || reason.clone())
            }
        }
    }

    /// Every attribute threshold mentioned by this condition, for authoring checks.
    pub fn thresholds(&self) -> Vec<(Attribute, i32)> {
        let mut out = Vec::new();
        self.collect_thresholds(&mut out);
        out
    }

    fn collect_thresholds(&self, out: &mut Vec<(Attribute, i32)>) {
        match self {
            Condition::AtLeast { attribute, value } | Condition::AtMost { attribute, value } => {
                out.push((*attribute, *value));
            }
            Condition::Not(inner) => inner.collect_thresholds(out),
            Condition::All(conditions) | Condition::Any(conditions) => {
                for c in conditions {
                    c.collect_thresholds(out);
                }
            }
            Condition::Explained { condition, .. } => condition.collect_thresholds(out),
            Condition::Always | Condition::FlagAtLeast { .. } | Condition::Custom(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attributes;
    use proptest::prelude::*;

    fn store(stress: i32, reputation: i32, performance: i32) -> AttributeStore {
        AttributeStore::new(Attributes::new(stress, reputation, performance))
    }

    #[test]
    fn always_available() {
        let result = Condition::default().evaluate(&store(0, 0, 0));
        assert_eq!(result, Availability::available());
    }

    #[test]
    fn stress_threshold_boundary() {
        let cond = Condition::stress_at_least(40);
        assert!(cond.evaluate(&store(40, 100, 100)).available);
        assert!(cond.evaluate(&store(41, 100, 100)).available);

        let result = cond.evaluate(&store(39, 100, 100));
        assert!(!result.available);
        assert_eq!(result.reason.as_deref(), Some(OVERWHELMED_REASON));
    }

    #[test]
    fn other_attribute_reasons() {
        let cond = Condition::AtLeast {
            attribute: Attribute::Reputation,
            value: 80,
        };
        let result = cond.evaluate(&store(100, 50, 100));
        assert_eq!(
            result.reason.as_deref(),
            Some("Requires reputation of at least 80.")
        );

        let cond = Condition::AtMost {
            attribute: Attribute::Performance,
            value: 20,
        };
        assert!(!cond.evaluate(&store(100, 100, 21)).available);
        assert!(cond.evaluate(&store(100, 100, 20)).available);
    }

    #[test]
    fn flag_condition() {
        let mut s = store(100, 100, 100);
        let cond = Condition::FlagAtLeast {
            key: "friends".to_string(),
            value: 2,
        };
        assert!(!cond.evaluate(&s).available);
        s.set_flag("friends", 2);
        assert!(cond.evaluate(&s).available);
    }

    #[test]
    fn logical_combinators() {
        let s = store(30, 90, 100);
        let calm = Condition::stress_at_least(50);
        let liked = Condition::AtLeast {
            attribute: Attribute::Reputation,
            value: 80,
        };

        let all = Condition::All(vec![liked.clone(), calm.clone()]);
        let result = all.evaluate(&s);
        assert!(!result.available);
        assert_eq!(result.reason.as_deref(), Some(OVERWHELMED_REASON));

        assert!(Condition::Any(vec![calm.clone(), liked]).evaluate(&s).available);
        assert!(Condition::Not(Box::new(calm)).evaluate(&s).available);
        assert!(!Condition::Any(Vec::new()).evaluate(&s).available);
        assert!(Condition::All(Vec::new()).evaluate(&s).available);
    }

    #[test]
    fn explained_overrides_reason() {
        let cond = Condition::stress_at_least(90).explained("You need a moment first.");
        let result = cond.evaluate(&store(10, 100, 100));
        assert_eq!(result.reason.as_deref(), Some("You need a moment first."));
        assert!(cond.evaluate(&store(95, 100, 100)).available);
    }

    #[test]
    fn custom_condition() {
        let cond = Condition::Custom(CustomCondition::new("even_stress", |s| {
            if s.stress() % 2 == 0 {
                Availability::available()
            } else {
                Availability::unavailable("odd")
            }
        }));
        assert!(cond.evaluate(&store(40, 0, 0)).available);
        assert!(!cond.evaluate(&store(41, 0, 0)).available);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let s = store(45, 100, 100);
        let cond = Condition::stress_at_least(50);
        assert_eq!(cond.evaluate(&s), cond.evaluate(&s));
        assert_eq!(s.stress(), 45);
    }

    #[test]
    fn thresholds_collected() {
        let cond = Condition::All(vec![
            Condition::stress_at_least(40),
            Condition::Not(Box::new(Condition::AtMost {
                attribute: Attribute::Reputation,
                value: 120,
            })),
        ]);
        assert_eq!(
            cond.thresholds(),
            vec![(Attribute::Stress, 40), (Attribute::Reputation, 120)]
        );
    }

    proptest! {
        #[test]
        fn stress_at_least_matches_comparison(threshold in 0i32..=100, stress in 0i32..=100) {
            let result = Condition::stress_at_least(threshold).evaluate(&store(stress, 100, 100));
            prop_assert_eq!(result.available, stress >= threshold);
            prop_assert_eq!(result.reason.is_some(), stress < threshold);
        }
    }
}
