//! Headless play.
//!
//! An [`Autoplayer`] drives an engine to `Ended` without a presentation
//! layer. [`simulate`] runs many seeded play-throughs and aggregates the
//! outcomes, which is how content authors check the tuning of a storyline.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;
use um_core::{Attribute, Character};

use crate::config::EngineConfig;
use crate::engine::StoryEngine;
use crate::error::{EngineError, EngineResult};
use crate::state::StoryState;
use crate::summary::{ReputationGrade, RunSummary};

/// How the autoplayer picks a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Always the first available response in display order.
    FirstAvailable,
    /// A uniformly random available response.
    Random {
        /// RNG seed for reproducible runs.
        seed: u64,
    },
}

/// Steps [`Autoplayer::play`] takes before giving up.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Plays through a story without a player.
#[derive(Debug)]
pub struct Autoplayer {
    strategy: Strategy,
    rng: StdRng,
    max_steps: usize,
}

impl Autoplayer {
    /// Create an autoplayer.
    pub fn new(strategy: Strategy) -> Self {
        let seed = match strategy {
            Strategy::FirstAvailable => 0,
            Strategy::Random { seed } => seed,
        };
        Self {
            strategy,
            rng: StdRng::seed_from_u64(seed),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Set the step budget for [`play`](Self::play).
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The strategy in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Take one action: choose a response, or continue from a result.
    pub fn step(&mut self, engine: &mut StoryEngine) -> EngineResult<StoryState> {
        match engine.state() {
            StoryState::ShowingResult(_) => engine.continue_from_result(),
            state @ (StoryState::NotStarted | StoryState::Ended) => {
                Err(EngineError::UnexpectedAction {
                    action: "autoplay",
                    state,
                })
            }
            StoryState::AwaitingChoice(scenario) | StoryState::Overwhelmed(scenario) => {
                let id = {
                    let view = engine.scenario_view().ok_or(EngineError::UnexpectedAction {
                        action: "autoplay",
                        state: engine.state(),
                    })?;
                    let available: Vec<_> = view.available().map(|r| r.id).collect();
                    let pick = match self.strategy {
                        Strategy::FirstAvailable => available.first().copied(),
                        Strategy::Random { .. } if available.is_empty() => None,
                        Strategy::Random { .. } => {
                            Some(available[self.rng.random_range(0..available.len())])
                        }
                    };
                    pick.ok_or(EngineError::NoAvailableResponse(scenario))?
                };
                debug!(%scenario, response = %id, "autoplay choice");
                engine.choose_response(id)
            }
        }
    }

    /// Play until the story ends and return the summary.
    ///
    /// The engine must already have a character selected. An interlude that
    /// never lifts stress above the threshold repeats forever, so play stops
    /// with [`EngineError::StepLimit`] once the step budget is spent.
    pub fn play(&mut self, engine: &mut StoryEngine) -> EngineResult<RunSummary> {
        let mut steps = 0;
        while !engine.is_ended() {
            if steps == self.max_steps {
                return Err(EngineError::StepLimit {
                    limit: self.max_steps,
                });
            }
            self.step(engine)?;
            steps += 1;
        }
        engine.summary().ok_or(EngineError::UnexpectedAction {
            action: "summarize",
            state: engine.state(),
        })
    }
}

/// Aggregate outcome of many autoplayed runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Character name.
    pub character: String,
    /// Number of runs.
    pub runs: usize,
    /// Mean final value per attribute.
    pub mean: BTreeMap<Attribute, f64>,
    /// Lowest final value per attribute.
    pub min: BTreeMap<Attribute, i32>,
    /// Highest final value per attribute.
    pub max: BTreeMap<Attribute, i32>,
    /// Runs that entered the overwhelm interlude at least once.
    pub overwhelmed_runs: usize,
    /// Mean interludes per run.
    pub mean_overwhelm: f64,
    /// How often each reputation grade occurred.
    pub grades: BTreeMap<ReputationGrade, usize>,
}

impl SimulationReport {
    fn from_summaries(character: &str, summaries: &[RunSummary]) -> Self {
        let runs = summaries.len();
        let mut mean = BTreeMap::new();
        let mut min = BTreeMap::new();
        let mut max = BTreeMap::new();

        for attribute in Attribute::ALL {
            let values: Vec<i32> = summaries
                .iter()
                .map(|s| s.attributes.get(attribute))
                .collect();
            let total: i64 = values.iter().map(|&v| i64::from(v)).sum();
            mean.insert(attribute, average(total, runs));
            min.insert(attribute, values.iter().copied().min().unwrap_or(0));
            max.insert(attribute, values.iter().copied().max().unwrap_or(0));
        }

        let mut grades = BTreeMap::new();
        for summary in summaries {
            *grades.entry(summary.grade).or_insert(0) += 1;
        }
        let interludes: usize = summaries.iter().map(|s| s.overwhelm_count).sum();

        Self {
            character: character.to_string(),
            runs,
            mean,
            min,
            max,
            overwhelmed_runs: summaries.iter().filter(|s| s.overwhelm_count > 0).count(),
            mean_overwhelm: average(interludes as i64, runs),
            grades,
        }
    }
}

fn average(total: i64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Run `runs` random play-throughs seeded `seed`, `seed + 1`, ….
pub fn simulate(
    character: &Arc<Character>,
    config: &EngineConfig,
    runs: usize,
    seed: u64,
) -> EngineResult<SimulationReport> {
    let config = config.clone().with_history(false);
    let mut summaries = Vec::with_capacity(runs);

    for i in 0..runs {
        let mut engine = StoryEngine::new(config.clone());
        engine.select_character(Arc::clone(character))?;
        let mut player = Autoplayer::new(Strategy::Random {
            seed: seed.wrapping_add(i as u64),
        });
        summaries.push(player.play(&mut engine)?);
    }

    Ok(SimulationReport::from_summaries(character.name(), &summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use um_core::{Attributes, Condition, Effect, Profile, Response, Scenario};

    fn school_day() -> Arc<Character> {
        Arc::new(
            Character::builder(Profile::new("Nora", 14, "female", ""))
                .scenario(
                    Scenario::new("Morning.")
                        .with_response(Response::new("Rush").with_effect(Effect::new(-40, 0, 0)))
                        .with_response(
                            Response::new("Skip")
                                .with_result("You stay home.")
                                .with_effect(Effect::new(0, -20, -10)),
                        ),
                )
                .scenario(
                    Scenario::new("Class.")
                        .with_response(Response::new("Focus").with_effect(Effect::new(-30, 0, 0)))
                        .with_response(Response::new("Doodle").with_effect(Effect::new(0, 0, -10))),
                )
                .overwhelm(
                    Scenario::new("Too much.")
                        .with_response(Response::new("Breathe").with_effect(Effect::new(25, 0, 0))),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn first_available_is_deterministic() {
        let mut engine = StoryEngine::default();
        engine.select_character(school_day()).unwrap();
        let summary = Autoplayer::new(Strategy::FirstAvailable)
            .play(&mut engine)
            .unwrap();

        // Rush (60), Focus (30) then the interlude (55).
        assert_eq!(summary.attributes, Attributes::new(55, 100, 100));
        assert_eq!(summary.overwhelm_count, 1);
        assert_eq!(summary.scenarios_completed, 2);
        assert!(summary.completed);
    }

    #[test]
    fn random_is_reproducible() {
        let play = |seed| {
            let mut engine = StoryEngine::default();
            engine.select_character(school_day()).unwrap();
            let summary = Autoplayer::new(Strategy::Random { seed })
                .play(&mut engine)
                .unwrap();
            (summary.attributes, engine.history().unwrap().choices().len())
        };
        assert_eq!(play(7), play(7));
    }

    #[test]
    fn requires_selected_character() {
        let mut engine = StoryEngine::default();
        let err = Autoplayer::new(Strategy::FirstAvailable)
            .play(&mut engine)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnexpectedAction { action: "autoplay", .. }));
    }

    #[test]
    fn dead_end_reported() {
        let character = Arc::new(
            Character::builder(Profile::new("Roman", 31, "male", ""))
                .scenario(Scenario::new("Interview.").with_response(
                    Response::new("Smile").with_condition(Condition::stress_at_least(101)),
                ))
                .build()
                .unwrap(),
        );
        let scenario = character.scenarios()[0].id();
        let mut engine = StoryEngine::default();
        engine.select_character(character).unwrap();
        let err = Autoplayer::new(Strategy::Random { seed: 1 })
            .play(&mut engine)
            .unwrap_err();
        assert_eq!(err, EngineError::NoAvailableResponse(scenario));
    }

    #[test]
    fn stuck_interlude_hits_step_limit() {
        let character = Arc::new(
            Character::builder(Profile::new("Nora", 14, "female", ""))
                .scenario(
                    Scenario::new("Morning.")
                        .with_response(Response::new("Rush").with_effect(Effect::new(-70, 0, 0))),
                )
                .overwhelm(Scenario::new("Too much.").with_response(Response::new("Freeze")))
                .build()
                .unwrap(),
        );
        let mut engine = StoryEngine::default();
        engine.select_character(character).unwrap();
        let err = Autoplayer::new(Strategy::FirstAvailable)
            .with_max_steps(50)
            .play(&mut engine)
            .unwrap_err();

        assert_eq!(err, EngineError::StepLimit { limit: 50 });
        assert!(matches!(engine.state(), StoryState::Overwhelmed(_)));
    }

    #[test]
    fn step_budget_is_enough_for_ordinary_runs() {
        let mut engine = StoryEngine::default();
        engine.select_character(school_day()).unwrap();
        // Rush, Focus, then one interlude.
        let summary = Autoplayer::new(Strategy::FirstAvailable)
            .with_max_steps(3)
            .play(&mut engine)
            .unwrap();
        assert!(summary.completed);
    }

    #[test]
    fn simulate_aggregates() {
        let report = simulate(&school_day(), &EngineConfig::default(), 20, 42).unwrap();
        assert_eq!(report.runs, 20);
        assert_eq!(report.grades.values().sum::<usize>(), 20);
        for attribute in Attribute::ALL {
            assert!(report.min[&attribute] <= report.max[&attribute]);
            assert!((0.0..=100.0).contains(&report.mean[&attribute]));
        }
        assert!(report.overwhelmed_runs <= 20);
    }

    #[test]
    fn simulate_zero_runs() {
        let report = simulate(&school_day(), &EngineConfig::default(), 0, 0).unwrap();
        assert_eq!(report.runs, 0);
        assert_eq!(report.mean[&Attribute::Stress], 0.0);
        assert!(report.grades.is_empty());
    }
}
