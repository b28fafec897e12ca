//! The three tracked attributes and the store that clamps them.
//!
//! Every attribute lives in `ATTRIBUTE_MIN..=ATTRIBUTE_MAX`. Writes are
//! clamped silently; nothing in this module can fail.
//!
//! Note that `stress` reads as a composure budget: 100 is calm, and content
//! lowers it as the character is worn down.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest value any attribute can hold.
pub const ATTRIBUTE_MIN: i32 = 0;
/// Highest value any attribute can hold.
pub const ATTRIBUTE_MAX: i32 = 100;

fn clamp(value: i32) -> i32 {
    value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
}

/// One of the three tracked attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Remaining composure. Low values mean the character is close to a meltdown.
    Stress,
    /// How the character is seen by peers and family.
    Reputation,
    /// Standing at school or work.
    Performance,
}

impl Attribute {
    /// All attributes in application order.
    pub const ALL: [Attribute; 3] = [
        Attribute::Stress,
        Attribute::Reputation,
        Attribute::Performance,
    ];

    /// Lowercase name used in authored content and output.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Stress => "stress",
            Attribute::Reputation => "reputation",
            Attribute::Performance => "performance",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plain snapshot of the three attribute values.
///
/// Also used for a character's starting values, which default to 100 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    /// Stress (composure) value.
    pub stress: i32,
    /// Reputation value.
    pub reputation: i32,
    /// Performance value.
    pub performance: i32,
}

impl Attributes {
    /// Create a snapshot from explicit values.
    pub fn new(stress: i32, reputation: i32, performance: i32) -> Self {
        Self {
            stress,
            reputation,
            performance,
        }
    }

    /// Read a single attribute.
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Stress => self.stress,
            Attribute::Reputation => self.reputation,
            Attribute::Performance => self.performance,
        }
    }

    /// Returns true if every value is within the attribute range.
    pub fn in_range(&self) -> bool {
        Attribute::ALL
            .iter()
            .all(|a| (ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&self.get(*a)))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(ATTRIBUTE_MAX, ATTRIBUTE_MAX, ATTRIBUTE_MAX)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stress {}, reputation {}, performance {}",
            self.stress, self.reputation, self.performance
        )
    }
}

/// Mutable attribute state for one play-through.
///
/// Besides the three clamped attributes the store carries unbounded integer
/// flags, which custom effects may write and conditions may read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeStore {
    stress: i32,
    reputation: i32,
    performance: i32,
    flags: BTreeMap<String, i32>,
}

impl AttributeStore {
    /// Create a store initialized (and clamped) from starting values.
    pub fn new(start: Attributes) -> Self {
        let mut store = Self::default();
        store.reset(start);
        store
    }

    /// Reinitialize all three attributes and clear every flag.
    pub fn reset(&mut self, start: Attributes) {
        self.stress = clamp(start.stress);
        self.reputation = clamp(start.reputation);
        self.performance = clamp(start.performance);
        self.flags.clear();
    }

    /// Current stress value.
    pub fn stress(&self) -> i32 {
        self.stress
    }

    /// Current reputation value.
    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    /// Current performance value.
    pub fn performance(&self) -> i32 {
        self.performance
    }

    /// Set stress, clamped.
    pub fn set_stress(&mut self, value: i32) {
        self.stress = clamp(value);
    }

    /// Set reputation, clamped.
    pub fn set_reputation(&mut self, value: i32) {
        self.reputation = clamp(value);
    }

    /// Set performance, clamped.
    pub fn set_performance(&mut self, value: i32) {
        self.performance = clamp(value);
    }

    /// Read an attribute by kind.
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Stress => self.stress,
            Attribute::Reputation => self.reputation,
            Attribute::Performance => self.performance,
        }
    }

    /// Write an attribute by kind, clamped.
    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Stress => self.set_stress(value),
            Attribute::Reputation => self.set_reputation(value),
            Attribute::Performance => self.set_performance(value),
        }
    }

    /// Add a delta to an attribute, clamping the result. Returns the new value.
    pub fn adjust(&mut self, attribute: Attribute, delta: i32) -> i32 {
        self.set(attribute, self.get(attribute).saturating_add(delta));
        self.get(attribute)
    }

    /// A copyable snapshot of the three attributes.
    pub fn snapshot(&self) -> Attributes {
        Attributes::new(self.stress, self.reputation, self.performance)
    }

    /// Read a flag. Absent flags read as 0.
    pub fn flag(&self, key: &str) -> i32 {
        self.flags.get(key).copied().unwrap_or(0)
    }

    /// Set a flag value.
    pub fn set_flag(&mut self, key: impl Into<String>, value: i32) {
        self.flags.insert(key.into(), value);
    }

    /// Add a delta to a flag. Returns the new value.
    pub fn adjust_flag(&mut self, key: &str, delta: i32) -> i32 {
        let entry = self.flags.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(delta);
        *entry
    }

    /// All flags that have been written, in key order.
    pub fn flags(&self) -> &BTreeMap<String, i32> {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_start_is_full() {
        let store = AttributeStore::new(Attributes::default());
        assert_eq!(store.stress(), 100);
        assert_eq!(store.reputation(), 100);
        assert_eq!(store.performance(), 100);
    }

    #[test]
    fn setters_clamp() {
        let mut store = AttributeStore::new(Attributes::default());
        store.set_stress(-5);
        store.set_reputation(250);
        store.set_performance(42);
        assert_eq!(store.snapshot(), Attributes::new(0, 100, 42));
    }

    #[test]
    fn new_clamps_starting_values() {
        let store = AttributeStore::new(Attributes::new(-10, 150, 50));
        assert_eq!(store.snapshot(), Attributes::new(0, 100, 50));
    }

    #[test]
    fn adjust_returns_new_value() {
        let mut store = AttributeStore::new(Attributes::default());
        assert_eq!(store.adjust(Attribute::Stress, -30), 70);
        assert_eq!(store.adjust(Attribute::Stress, -90), 0);
        assert_eq!(store.adjust(Attribute::Stress, 15), 15);
    }

    #[test]
    fn adjust_does_not_overflow() {
        let mut store = AttributeStore::new(Attributes::default());
        assert_eq!(store.adjust(Attribute::Reputation, i32::MAX), 100);
        assert_eq!(store.adjust(Attribute::Reputation, i32::MIN), 0);
    }

    #[test]
    fn flags_default_to_zero() {
        let mut store = AttributeStore::new(Attributes::default());
        assert_eq!(store.flag("school"), 0);
        assert_eq!(store.adjust_flag("school", 3), 3);
        assert_eq!(store.adjust_flag("school", -5), -2);
        store.set_flag("social", 7);
        assert_eq!(store.flag("social"), 7);
        assert_eq!(store.flags().len(), 2);
    }

    #[test]
    fn reset_clears_flags_and_reinitializes() {
        let mut store = AttributeStore::new(Attributes::default());
        store.set_stress(10);
        store.set_flag("social", 4);
        store.reset(Attributes::new(60, 70, 80));
        assert_eq!(store.snapshot(), Attributes::new(60, 70, 80));
        assert!(store.flags().is_empty());
    }

    #[test]
    fn display_snapshot() {
        let a = Attributes::new(40, 90, 75);
        assert_eq!(a.to_string(), "stress 40, reputation 90, performance 75");
    }

    proptest! {
        #[test]
        fn adjust_stays_in_range(
            start in -200i32..300,
            deltas in proptest::collection::vec(any::<i32>(), 0..32),
        ) {
            let mut store = AttributeStore::new(Attributes::new(start, start, start));
            prop_assert!(store.snapshot().in_range());
            for (i, delta) in deltas.iter().enumerate() {
                let attribute = Attribute::ALL[i % 3];
                store.adjust(attribute, *delta);
                prop_assert!(store.snapshot().in_range());
            }
        }
    }
}
