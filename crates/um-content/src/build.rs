//! Conversion from authored records to the validated story graph.
//!
//! Storyline scenarios and the overwhelm scenario go through the same
//! [`build_scenario`] path. Structural checks (empty responses, blank labels,
//! out-of-range starting values) are left to `CharacterBuilder::build`, so
//! content assembled in code and content loaded from JSON are held to the
//! same rules.

use std::path::Path;

use tracing::debug;
use um_core::{Attributes, Character, Condition, Effect, Profile, Response, Scenario};

use crate::error::{LoadError, LoadResult};
use crate::hooks::HookRegistry;
use crate::record::{CharacterRecord, ConditionRecord, EffectsRecord, ResponseRecord, ScenarioRecord};

/// Build one character from its record.
pub fn build_character(record: &CharacterRecord, hooks: &HookRegistry) -> LoadResult<Character> {
    let path = if record.name.trim().is_empty() {
        "character".to_string()
    } else {
        record.name.clone()
    };

    let mut profile = Profile::new(&record.name, record.age, &record.gender, &record.bio);
    if let Some(icon) = &record.icon {
        profile = profile.with_icon(icon);
    }

    let defaults = Attributes::default();
    let start = Attributes::new(
        record.stress_start.unwrap_or(defaults.stress),
        record.reputation_start.unwrap_or(defaults.reputation),
        record.performance_start.unwrap_or(defaults.performance),
    );

    let mut builder = Character::builder(profile).start(start);
    for (i, scenario) in record.scenario_list.iter().enumerate() {
        let scenario_path = format!("{path} > scenario {}", i + 1);
        builder = builder.scenario(build_scenario(&scenario_path, scenario, hooks)?);
    }
    if let Some(scenario) = &record.overwhelm_scenario {
        let scenario_path = format!("{path} > overwhelm scenario");
        builder = builder.overwhelm(build_scenario(&scenario_path, scenario, hooks)?);
    }
    if let Some(threshold) = record.overwhelm_threshold {
        builder = builder.overwhelm_threshold(threshold);
    }

    let character = builder.build()?;
    debug!(
        character = %character.name(),
        id = %character.id(),
        scenarios = character.scenarios().len(),
        overwhelm = character.overwhelm_scenario().is_some(),
        "built character"
    );
    Ok(character)
}

/// Parse a JSON array of character records and build every character.
pub fn load_characters(json: &str, hooks: &HookRegistry) -> LoadResult<Vec<Character>> {
    let records: Vec<CharacterRecord> = serde_json::from_str(json)?;
    records
        .iter()
        .map(|record| build_character(record, hooks))
        .collect()
}

/// Read a JSON content file and build every character in it.
pub fn load_file(path: &Path, hooks: &HookRegistry) -> LoadResult<Vec<Character>> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_characters(&json, hooks)
}

fn build_scenario(
    path: &str,
    record: &ScenarioRecord,
    hooks: &HookRegistry,
) -> LoadResult<Scenario> {
    let mut scenario = Scenario::new(&record.exposition);
    if let Some(theme) = &record.theme {
        scenario = scenario.with_theme(theme);
    }
    for (i, response) in record.responses.iter().enumerate() {
        let response_path = format!("{path} > response {}", i + 1);
        scenario = scenario.with_response(build_response(&response_path, response, hooks)?);
    }
    Ok(scenario)
}

fn build_response(
    path: &str,
    record: &ResponseRecord,
    hooks: &HookRegistry,
) -> LoadResult<Response> {
    let mut response = Response::new(&record.button_text);
    if let Some(text) = &record.result_exposition {
        response = response.with_result(text);
    }
    if let Some(info) = &record.result_info {
        response = response.with_info(info);
    }
    if let Some(effects) = &record.effects {
        response = response.with_effect(build_effect(path, effects, hooks)?);
    }
    if let Some(condition) = &record.condition {
        response = response.with_condition(build_condition(path, condition, hooks)?);
    }
    Ok(response)
}

fn build_effect(path: &str, record: &EffectsRecord, hooks: &HookRegistry) -> LoadResult<Effect> {
    let mut effect = Effect::new(record.stress, record.reputation, record.performance);
    for (key, delta) in &record.flags {
        effect = effect.with_flag(key, *delta);
    }
    if let Some(name) = &record.extra {
        let hook = hooks.effect(name).ok_or_else(|| LoadError::UnknownHook {
            path: path.to_string(),
            name: name.clone(),
        })?;
        effect = effect.with_extra(hook.clone());
    }
    Ok(effect)
}

fn build_condition(
    path: &str,
    record: &ConditionRecord,
    hooks: &HookRegistry,
) -> LoadResult<Condition> {
    let condition = match record {
        ConditionRecord::Always => Condition::Always,
        ConditionRecord::StressAtLeast(threshold) => Condition::stress_at_least(*threshold),
        ConditionRecord::AtLeast { attribute, value } => Condition::AtLeast {
            attribute: *attribute,
            value: *value,
        },
        ConditionRecord::AtMost { attribute, value } => Condition::AtMost {
            attribute: *attribute,
            value: *value,
        },
        ConditionRecord::FlagAtLeast { key, value } => Condition::FlagAtLeast {
            key: key.clone(),
            value: *value,
        },
        ConditionRecord::Not(inner) => {
            Condition::Not(Box::new(build_condition(path, inner, hooks)?))
        }
        ConditionRecord::All(inner) => Condition::All(
            inner
                .iter()
                .map(|c| build_condition(path, c, hooks))
                .collect::<LoadResult<_>>()?,
        ),
        ConditionRecord::Any(inner) => Condition::Any(
            inner
                .iter()
                .map(|c| build_condition(path, c, hooks))
                .collect::<LoadResult<_>>()?,
        ),
        ConditionRecord::Hook(name) => {
            let custom = hooks.condition(name).ok_or_else(|| LoadError::UnknownHook {
                path: path.to_string(),
                name: name.clone(),
            })?;
            Condition::Custom(custom.clone())
        }
        ConditionRecord::Explained { reason, condition } => {
            build_condition(path, condition, hooks)?.explained(reason)
        }
    };
    Ok(condition)
}
