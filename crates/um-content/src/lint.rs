//! Authoring checks that do not prevent a character from loading.
//!
//! `CharacterBuilder::build` rejects content that cannot be played at all.
//! The checks here flag content that loads but is likely to play badly:
//! dead ends, unreachable thresholds, an interlude that cannot calm the
//! character down.

use std::collections::HashSet;

use um_core::{ATTRIBUTE_MAX, ATTRIBUTE_MIN, Character, Scenario};

/// A warning found while linting a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Where the issue was found.
    pub path: String,
    /// A human-readable description.
    pub message: String,
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning: {}: {}", self.path, self.message)
    }
}

/// Lint a built character. Returns an empty list when nothing looks wrong.
pub fn lint_character(character: &Character) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let name = character.name();

    if character.scenarios().is_empty() {
        issues.push(LintIssue {
            path: name.to_string(),
            message: "storyline is empty; selecting this character ends the story immediately"
                .to_string(),
        });
    }

    for (i, scenario) in character.scenarios().iter().enumerate() {
        let path = format!("{name} > scenario {}", i + 1);
        lint_scenario(&path, scenario, &mut issues);

        if scenario.responses().iter().all(|r| !r.condition().is_always()) {
            issues.push(LintIssue {
                path,
                message: "every response is conditional; the player may be unable to continue"
                    .to_string(),
            });
        }
    }

    let lowers_stress = character
        .scenarios()
        .iter()
        .flat_map(Scenario::responses)
        .any(|r| r.effect().stress < 0);

    match character.overwhelm_scenario() {
        Some(interlude) => {
            let path = format!("{name} > overwhelm scenario");
            lint_scenario(&path, interlude, &mut issues);

            for (i, response) in interlude.responses().iter().enumerate() {
                if !response.condition().is_always() {
                    issues.push(LintIssue {
                        path: format!("{path} > response {}", i + 1),
                        message: "interlude responses should always be available".to_string(),
                    });
                }
            }
            if interlude.responses().iter().all(|r| r.effect().stress <= 0) {
                issues.push(LintIssue {
                    path,
                    message: "no interlude response raises stress; the character stays at the threshold"
                        .to_string(),
                });
            }
        }
        None if lowers_stress => {
            issues.push(LintIssue {
                path: name.to_string(),
                message: "responses lower stress but no overwhelm scenario is defined".to_string(),
            });
        }
        None => {}
    }

    issues
}

fn lint_scenario(path: &str, scenario: &Scenario, issues: &mut Vec<LintIssue>) {
    let mut labels = HashSet::new();

    for (i, response) in scenario.responses().iter().enumerate() {
        let response_path = format!("{path} > response {}", i + 1);

        if !labels.insert(response.button_text().trim().to_lowercase()) {
            issues.push(LintIssue {
                path: response_path.clone(),
                message: format!("duplicate response label \"{}\"", response.button_text()),
            });
        }

        for (attribute, value) in response.condition().thresholds() {
            if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                issues.push(LintIssue {
                    path: response_path.clone(),
                    message: format!(
                        "{attribute} threshold {value} is outside {ATTRIBUTE_MIN}..={ATTRIBUTE_MAX}; the check is constant"
                    ),
                });
            }
        }

        if response.is_pass_through() && response.result_info().is_some() {
            issues.push(LintIssue {
                path: response_path,
                message: "result info is never shown for a response without result exposition"
                    .to_string(),
            });
        }
    }

    if scenario.responses().len() > 1
        && scenario.responses().iter().all(|r| r.effect().is_noop())
    {
        issues.push(LintIssue {
            path: path.to_string(),
            message: "no response has any effect; the choice does not matter".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use um_core::{Condition, Effect, Profile, Response};

    fn profile() -> Profile {
        Profile::new("Nora", 14, "female", "")
    }

    fn calm_interlude() -> Scenario {
        Scenario::new("Too loud.").with_response(
            Response::new("Breathe").with_effect(Effect::new(30, 0, 0)),
        )
    }

    fn messages(issues: &[LintIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn clean_character_has_no_issues() {
        let character = Character::builder(profile())
            .scenario(
                Scenario::new("Lunch.")
                    .with_response(Response::new("Laugh and nod").with_effect(Effect::new(-10, 0, 0)))
                    .with_response(Response::new("Say nothing").with_effect(Effect::new(0, -20, 0))),
            )
            .overwhelm(calm_interlude())
            .build()
            .unwrap();
        assert!(lint_character(&character).is_empty());
    }

    #[test]
    fn empty_storyline_warned() {
        let character = Character::builder(profile()).build().unwrap();
        let issues = lint_character(&character);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().starts_with("warning: Nora: storyline is empty"));
    }

    #[test]
    fn all_conditional_scenario_warned() {
        let character = Character::builder(profile())
            .scenario(Scenario::new("Class.").with_response(
                Response::new("Ask").with_condition(Condition::stress_at_least(40)),
            ))
            .build()
            .unwrap();
        let issues = lint_character(&character);
        assert!(issues.iter().any(|i| i.path == "Nora > scenario 1"
            && i.message.starts_with("every response is conditional")));
    }

    #[test]
    fn threshold_out_of_range_warned() {
        let character = Character::builder(profile())
            .scenario(
                Scenario::new("Class.")
                    .with_response(Response::new("Ask").with_condition(Condition::stress_at_least(140)))
                    .with_response(Response::new("Wait")),
            )
            .build()
            .unwrap();
        let issues = lint_character(&character);
        assert!(issues.iter().any(|i| i.path == "Nora > scenario 1 > response 1"
            && i.message.starts_with("stress threshold 140")));
    }

    #[test]
    fn duplicate_labels_warned() {
        let character = Character::builder(profile())
            .scenario(
                Scenario::new("Dinner.")
                    .with_response(Response::new("Eat it").with_effect(Effect::new(-20, 0, 0)))
                    .with_response(Response::new("eat it ")),
            )
            .overwhelm(calm_interlude())
            .build()
            .unwrap();
        let issues = lint_character(&character);
        assert_eq!(messages(&issues), vec!["duplicate response label \"eat it \""]);
    }

    #[test]
    fn missing_interlude_warned_when_stress_drops() {
        let character = Character::builder(profile())
            .scenario(Scenario::new("Homework.").with_response(
                Response::new("Do it").with_effect(Effect::new(-20, 0, 0)),
            ))
            .build()
            .unwrap();
        let issues = lint_character(&character);
        assert_eq!(
            messages(&issues),
            vec!["responses lower stress but no overwhelm scenario is defined"]
        );
    }

    #[test]
    fn weak_interlude_warned() {
        let character = Character::builder(profile())
            .scenario(Scenario::new("Bus.").with_response(Response::new("Sit down")))
            .overwhelm(Scenario::new("Too loud.").with_response(
                Response::new("Cover your ears").with_condition(Condition::stress_at_least(10)),
            ))
            .build()
            .unwrap();
        let issues = lint_character(&character);
        let msgs = messages(&issues);
        assert!(msgs.contains(&"interlude responses should always be available"));
        assert!(msgs.iter().any(|m| m.starts_with("no interlude response raises stress")));
    }

    #[test]
    fn info_without_result_warned() {
        let character = Character::builder(profile())
            .scenario(Scenario::new("Bus.").with_response(
                Response::new("Sit down").with_info("Noise sensitivity is common."),
            ))
            .build()
            .unwrap();
        let issues = lint_character(&character);
        assert!(messages(&issues)
            .iter()
            .any(|m| m.starts_with("result info is never shown")));
    }

    #[test]
    fn meaningless_choice_warned() {
        let character = Character::builder(profile())
            .scenario(
                Scenario::new("TV.")
                    .with_response(Response::new("Watch"))
                    .with_response(Response::new("Leave")),
            )
            .build()
            .unwrap();
        let issues = lint_character(&character);
        assert_eq!(
            messages(&issues),
            vec!["no response has any effect; the choice does not matter"]
        );
    }
}
