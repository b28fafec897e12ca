//! Registry of named custom effects and conditions.
//!
//! JSON cannot carry closures, so authored content refers to custom logic by
//! name (`"extra": "..."`, `{"hook": "..."}`) and the host program registers
//! the implementations here before loading.

use std::collections::HashMap;

use um_core::{AttributeStore, Availability, CustomCondition, EffectHook};

/// Named hooks available to the content builder.
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    effects: HashMap<String, EffectHook>,
    conditions: HashMap<String, CustomCondition>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect hook under its own name, replacing any previous one.
    pub fn register_effect(&mut self, hook: EffectHook) {
        self.effects.insert(hook.name().to_string(), hook);
    }

    /// Register a custom condition under its own name, replacing any previous one.
    pub fn register_condition(&mut self, condition: CustomCondition) {
        self.conditions
            .insert(condition.name().to_string(), condition);
    }

    /// Register an effect hook from a closure.
    pub fn with_effect(
        mut self,
        name: impl Into<String>,
        run: impl Fn(&mut AttributeStore) + Send + Sync + 'static,
    ) -> Self {
        self.register_effect(EffectHook::new(name, run));
        self
    }

    /// Register a custom condition from a closure.
    pub fn with_condition(
        mut self,
        name: impl Into<String>,
        check: impl Fn(&AttributeStore) -> Availability + Send + Sync + 'static,
    ) -> Self {
        self.register_condition(CustomCondition::new(name, check));
        self
    }

    /// Look up an effect hook.
    pub fn effect(&self, name: &str) -> Option<&EffectHook> {
        self.effects.get(name)
    }

    /// Look up a custom condition.
    pub fn condition(&self, name: &str) -> Option<&CustomCondition> {
        self.conditions.get(name)
    }

    /// Number of registered hooks of both kinds.
    pub fn len(&self) -> usize {
        self.effects.len() + self.conditions.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
