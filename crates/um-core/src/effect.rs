//! Effects applied to the attribute store when a response is chosen.

use std::fmt;
use std::sync::Arc;

use crate::attribute::{Attribute, AttributeStore};

/// A named custom side effect.
///
/// Content authors supply these for state changes the numeric deltas cannot
/// express. The hook runs after the deltas, so it sees the updated values.
#[derive(Clone)]
pub struct EffectHook {
    name: String,
    run: Arc<dyn Fn(&mut AttributeStore) + Send + Sync>,
}

impl EffectHook {
    /// Wrap a closure as a named hook.
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&mut AttributeStore) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    /// The hook's name, as referenced from authored content.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the hook against a store.
    pub fn call(&self, store: &mut AttributeStore) {
        (self.run)(store);
    }
}

impl fmt::Debug for EffectHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EffectHook").field(&self.name).finish()
    }
}

/// Attribute deltas plus an optional custom hook.
///
/// The default effect changes nothing.
#[derive(Debug, Clone, Default)]
pub struct Effect {
    /// Added to stress.
    pub stress: i32,
    /// Added to reputation.
    pub reputation: i32,
    /// Added to performance.
    pub performance: i32,
    /// Flag deltas, applied in order after the attributes.
    pub flags: Vec<(String, i32)>,
    /// Custom logic run last.
    pub extra: Option<EffectHook>,
}

impl Effect {
    /// An effect with no deltas and no hook.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create an effect from the three attribute deltas.
    pub fn new(stress: i32, reputation: i32, performance: i32) -> Self {
        Self {
            stress,
            reputation,
            performance,
            ..Self::default()
        }
    }

    /// Set the stress delta.
    pub fn with_stress(mut self, delta: i32) -> Self {
        self.stress = delta;
        self
    }

    /// Set the reputation delta.
    pub fn with_reputation(mut self, delta: i32) -> Self {
        self.reputation = delta;
        self
    }

    /// Set the performance delta.
    pub fn with_performance(mut self, delta: i32) -> Self {
        self.performance = delta;
        self
    }

    /// Add a flag delta.
    pub fn with_flag(mut self, key: impl Into<String>, delta: i32) -> Self {
        self.flags.push((key.into(), delta));
        self
    }

    /// Attach a custom hook.
    pub fn with_extra(mut self, hook: EffectHook) -> Self {
        self.extra = Some(hook);
        self
    }

    /// The delta for a single attribute.
    pub fn delta(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Stress => self.stress,
            Attribute::Reputation => self.reputation,
            Attribute::Performance => self.performance,
        }
    }

    /// Returns true if applying this effect can never change the store.
    pub fn is_noop(&self) -> bool {
        self.stress == 0
            && self.reputation == 0
            && self.performance == 0
            && self.flags.iter().all(|(_, d)| *d == 0)
            && self.extra.is_none()
    }

    /// Apply the effect: stress, reputation, performance, flags, then the hook.
    pub fn apply(&self, store: &mut AttributeStore) {
        for attribute in Attribute::ALL {
            store.adjust(attribute, self.delta(attribute));
        }
        for (key, delta) in &self.flags {
            store.adjust_flag(key, *delta);
        }
        if let Some(hook) = &self.extra {
            hook.call(store);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attributes;

    #[test]
    fn default_is_noop() {
        let effect = Effect::default();
        assert!(effect.is_noop());

        let mut store = AttributeStore::new(Attributes::new(50, 60, 70));
        effect.apply(&mut store);
        assert_eq!(store.snapshot(), Attributes::new(50, 60, 70));
    }

    #[test]
    fn apply_adds_and_clamps() {
        let mut store = AttributeStore::new(Attributes::new(50, 95, 5));
        Effect::new(-20, 10, -10).apply(&mut store);
        assert_eq!(store.snapshot(), Attributes::new(30, 100, 0));
    }

    #[test]
    fn flags_applied() {
        let mut store = AttributeStore::new(Attributes::default());
        Effect::none()
            .with_flag("social", 2)
            .with_flag("social", 1)
            .apply(&mut store);
        assert_eq!(store.flag("social"), 3);
    }

    #[test]
    fn hook_sees_updated_values() {
        let hook = EffectHook::new("detention_if_shaken", |store: &mut AttributeStore| {
            if store.stress() < 50 {
                store.set_flag("detention", 1);
            }
        });
        let effect = Effect::new(-60, 0, 0).with_extra(hook);

        let mut store = AttributeStore::new(Attributes::default());
        effect.apply(&mut store);
        assert_eq!(store.stress(), 40);
        assert_eq!(store.flag("detention"), 1);
    }

    #[test]
    fn hook_is_not_noop() {
        let effect = Effect::none().with_extra(EffectHook::new("nothing", |_| {}));
        assert!(!effect.is_noop());
        assert_eq!(format!("{:?}", effect.extra.unwrap()), "EffectHook(\"nothing\")");
    }
}
