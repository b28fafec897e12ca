//! Identifiers assigned at construction time.
//!
//! Each type draws from its own process-wide counter, so ids are unique and
//! increasing across the whole content set. They are useful for lookups and
//! logs; they carry no ordering meaning between unrelated entities.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $counter:ident, $label:literal) => {
        static $counter: AtomicU64 = AtomicU64::new(0);

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Draw the next identifier from this type's counter.
            pub fn next() -> Self {
                Self($counter.fetch_add(1, Ordering::Relaxed))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

sequential_id!(
    /// Unique identifier for a [`Character`](crate::Character).
    CharacterId,
    CHARACTER_COUNTER,
    "character"
);
sequential_id!(
    /// Unique identifier for a [`Scenario`](crate::Scenario).
    ScenarioId,
    SCENARIO_COUNTER,
    "scenario"
);
sequential_id!(
    /// Unique identifier for a [`Response`](crate::Response).
    ResponseId,
    RESPONSE_COUNTER,
    "response"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let a = ScenarioId::next();
        let b = ScenarioId::next();
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn display_includes_kind() {
        assert_eq!(ResponseId(7).to_string(), "response#7");
        assert_eq!(CharacterId(0).to_string(), "character#0");
    }
}
