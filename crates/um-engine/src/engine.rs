//! The story state machine.
//!
//! A run moves through `AwaitingChoice` → (`ShowingResult`) → next scenario
//! until the storyline is exhausted. After every choice the post-effect
//! stress is compared against the overwhelm threshold exactly once; at or
//! below it, the character's overwhelm scenario is inserted before the
//! pending storyline scenario. The interlude's own responses are checked the
//! same way, so an interlude that leaves stress at or below the threshold is
//! entered again. Once stress is above it, the storyline resumes where it
//! left off.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use um_core::{AttributeStore, Character, ResponseId, Scenario, ScenarioId};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::history::{History, HistoryEntry};
use crate::observer::{StoryEvent, StoryObserver};
use crate::state::StoryState;
use crate::summary::{ReputationGrade, RunSummary};
use crate::view::{ResponseView, ResultView, ScenarioView};

/// Drives one play-through at a time.
pub struct StoryEngine {
    config: EngineConfig,
    run: Option<Run>,
    observers: Vec<Box<dyn StoryObserver>>,
}

/// Everything owned by the active play-through. Dropped wholesale on reset.
struct Run {
    id: Uuid,
    character: Arc<Character>,
    store: AttributeStore,
    index: usize,
    interlude: bool,
    state: StoryState,
    history: History,
    choices: usize,
    completed: usize,
    overwhelm_count: usize,
    started_at: DateTime<Utc>,
}

impl Default for StoryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for StoryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoryEngine")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl StoryEngine {
    /// Create an engine with no character selected.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            run: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer, builder style.
    pub fn with_observer(mut self, observer: impl StoryObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    /// Register an observer.
    pub fn add_observer(&mut self, observer: impl StoryObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current state.
    pub fn state(&self) -> StoryState {
        self.run.as_ref().map_or(StoryState::NotStarted, |run| run.state)
    }

    /// Returns true once the story is complete.
    pub fn is_ended(&self) -> bool {
        self.state().is_ended()
    }

    /// The selected character.
    pub fn character(&self) -> Option<&Arc<Character>> {
        self.run.as_ref().map(|run| &run.character)
    }

    /// The live attribute store.
    pub fn attributes(&self) -> Option<&AttributeStore> {
        self.run.as_ref().map(|run| &run.store)
    }

    /// Position in the storyline. Unchanged while overwhelmed.
    pub fn story_index(&self) -> Option<usize> {
        self.run.as_ref().map(|run| run.index)
    }

    /// Identifier of the active run.
    pub fn run_id(&self) -> Option<Uuid> {
        self.run.as_ref().map(|run| run.id)
    }

    /// The overwhelm threshold in effect for the selected character.
    pub fn threshold(&self) -> i32 {
        self.run
            .as_ref()
            .map_or(self.config.overwhelm_threshold, |run| run.threshold(&self.config))
    }

    /// The scenario awaiting a choice, or whose result is being shown.
    pub fn current_scenario(&self) -> Option<&Scenario> {
        let run = self.run.as_ref()?;
        match run.state {
            StoryState::NotStarted | StoryState::Ended => None,
            _ => run.scenario(),
        }
    }

    /// The scenario awaiting a choice, with each response's availability.
    pub fn scenario_view(&self) -> Option<ScenarioView<'_>> {
        let run = self.run.as_ref()?;
        let id = run.state.scenario()?;
        let scenario = run.scenario()?;
        Some(ScenarioView {
            scenario: id,
            exposition: scenario.exposition(),
            theme: scenario.theme(),
            overwhelm: run.interlude,
            index: run.index,
            responses: scenario
                .responses()
                .iter()
                .map(|r| ResponseView {
                    id: r.id(),
                    label: r.button_text(),
                    availability: r.availability(&run.store),
                })
                .collect(),
        })
    }

    /// The result being shown, if any.
    pub fn shown_result(&self) -> Option<ResultView<'_>> {
        let run = self.run.as_ref()?;
        let StoryState::ShowingResult(id) = run.state else {
            return None;
        };
        let response = run.scenario()?.response(id)?;
        Some(ResultView {
            response: id,
            label: response.button_text(),
            exposition: response.result_exposition()?,
            info: response.result_info(),
        })
    }

    /// The run's history. Empty when history recording is disabled.
    pub fn history(&self) -> Option<&History> {
        self.run.as_ref().map(|run| &run.history)
    }

    /// A report of the run so far. Complete once the story has ended.
    pub fn summary(&self) -> Option<RunSummary> {
        self.run.as_ref().map(Run::summary)
    }

    /// Start a play-through.
    ///
    /// The store is initialised from the character's starting values. A
    /// character with an empty storyline ends immediately.
    pub fn select_character(&mut self, character: Arc<Character>) -> EngineResult<StoryState> {
        if self.run.is_some() {
            return Err(EngineError::AlreadyStarted);
        }

        let mut events = Vec::new();
        let mut run = Run::new(character);
        info!(
            run = %run.id,
            character = run.character.name(),
            scenarios = run.character.scenarios().len(),
            threshold = run.threshold(&self.config),
            "character selected"
        );
        events.push(StoryEvent::CharacterSelected {
            character: run.character.name().to_string(),
            start: run.store.snapshot(),
        });

        let first = run.character.scenarios().first().map(Scenario::id);
        match first {
            Some(id) => run.enter(id, false, &self.config, &mut events),
            None => run.end(&self.config, &mut events),
        }

        let state = run.state;
        self.run = Some(run);
        self.notify(&events);
        Ok(state)
    }

    /// Choose a response in the scenario awaiting a choice.
    ///
    /// The response must belong to that scenario and be available. Its
    /// effect is applied in full before the next scenario is decided. A
    /// response without result exposition advances immediately.
    pub fn choose_response(&mut self, id: ResponseId) -> EngineResult<StoryState> {
        let run = self.run.as_mut().ok_or(EngineError::UnexpectedAction {
            action: "choose a response",
            state: StoryState::NotStarted,
        })?;

        let mut events = Vec::new();
        let state = run.choose(id, &self.config, &mut events)?;
        self.notify(&events);
        Ok(state)
    }

    /// Choose a response by its zero-based display position.
    pub fn choose_index(&mut self, index: usize) -> EngineResult<StoryState> {
        let id = {
            let state = self.state();
            let view = self.scenario_view().ok_or(EngineError::UnexpectedAction {
                action: "choose a response",
                state,
            })?;
            view.responses
                .get(index)
                .map(|r| r.id)
                .ok_or(EngineError::IndexOutOfRange {
                    index,
                    count: view.responses.len(),
                })?
        };
        self.choose_response(id)
    }

    /// Leave the result screen and move to the next scenario.
    pub fn continue_from_result(&mut self) -> EngineResult<StoryState> {
        let state = self.state();
        let run = match (&mut self.run, state) {
            (Some(run), StoryState::ShowingResult(_)) => run,
            _ => {
                return Err(EngineError::UnexpectedAction {
                    action: "continue",
                    state,
                });
            }
        };

        let mut events = Vec::new();
        let state = run.advance(&self.config, &mut events);
        self.notify(&events);
        Ok(state)
    }

    /// Return to character selection, discarding the run entirely.
    pub fn reset(&mut self) {
        if let Some(run) = self.run.take() {
            info!(run = %run.id, character = run.character.name(), "run reset");
            self.notify(&[StoryEvent::Reset]);
        }
    }

    fn notify(&mut self, events: &[StoryEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }
}

impl Run {
    fn new(character: Arc<Character>) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: AttributeStore::new(character.start()),
            character,
            index: 0,
            interlude: false,
            state: StoryState::NotStarted,
            history: History::new(),
            choices: 0,
            completed: 0,
            overwhelm_count: 0,
            started_at: Utc::now(),
        }
    }

    fn threshold(&self, config: &EngineConfig) -> i32 {
        self.character
            .overwhelm_threshold()
            .unwrap_or(config.overwhelm_threshold)
    }

    fn scenario(&self) -> Option<&Scenario> {
        if self.interlude {
            self.character.overwhelm_scenario()
        } else {
            self.character.scenarios().get(self.index)
        }
    }

    fn record(&mut self, config: &EngineConfig, entry: HistoryEntry) {
        if config.record_history {
            self.history.append(entry);
        }
    }

    fn choose(
        &mut self,
        id: ResponseId,
        config: &EngineConfig,
        events: &mut Vec<StoryEvent>,
    ) -> EngineResult<StoryState> {
        let Some(scenario_id) = self.state.scenario() else {
            return Err(EngineError::UnexpectedAction {
                action: "choose a response",
                state: self.state,
            });
        };

        let character = Arc::clone(&self.character);
        let scenario = if self.interlude {
            character.overwhelm_scenario()
        } else {
            character.scenarios().get(self.index)
        }
        .ok_or(EngineError::UnexpectedAction {
            action: "choose a response",
            state: self.state,
        })?;
        let response = scenario
            .response(id)
            .ok_or(EngineError::ForeignResponse {
                response: id,
                scenario: scenario_id,
            })?;

        let availability = response.availability(&self.store);
        if !availability.available {
            debug!(response = %id, reason = ?availability.reason, "unavailable response rejected");
            return Err(EngineError::ResponseUnavailable {
                label: response.button_text().to_string(),
                reason: availability.reason.unwrap_or_default(),
            });
        }

        let before = self.store.snapshot();
        response.effect().apply(&mut self.store);
        let after = self.store.snapshot();

        self.choices += 1;
        if !self.interlude {
            self.completed += 1;
        }
        debug!(
            run = %self.id,
            response = %id,
            label = response.button_text(),
            %after,
            "response chosen"
        );
        self.record(
            config,
            HistoryEntry::ResponseChosen {
                response: id,
                label: response.button_text().to_string(),
                result: response.result_exposition().map(str::to_string),
                before,
                after,
                timestamp: Utc::now(),
            },
        );
        events.push(StoryEvent::ResponseChosen {
            response: id,
            before,
            after,
        });

        if response.is_pass_through() {
            Ok(self.advance(config, events))
        } else {
            self.state = StoryState::ShowingResult(id);
            events.push(StoryEvent::ResultShown { response: id });
            Ok(self.state)
        }
    }

    /// Decide the next scenario after a choice has been fully applied.
    fn advance(&mut self, config: &EngineConfig, events: &mut Vec<StoryEvent>) -> StoryState {
        let threshold = self.threshold(config);
        let stress = self.store.stress();

        if stress <= threshold
            && let Some(id) = self.character.overwhelm_scenario().map(Scenario::id)
        {
            self.interlude = true;
            self.overwhelm_count += 1;
            info!(run = %self.id, stress, threshold, "overwhelmed");
            self.enter(id, true, config, events);
            return self.state;
        }

        self.interlude = false;
        if self.index + 1 < self.character.scenarios().len() {
            self.index += 1;
            let id = self.character.scenarios()[self.index].id();
            self.enter(id, false, config, events);
        } else {
            self.end(config, events);
        }
        self.state
    }

    fn enter(
        &mut self,
        id: ScenarioId,
        overwhelm: bool,
        config: &EngineConfig,
        events: &mut Vec<StoryEvent>,
    ) {
        self.state = if overwhelm {
            StoryState::Overwhelmed(id)
        } else {
            StoryState::AwaitingChoice(id)
        };
        debug!(run = %self.id, scenario = %id, index = self.index, overwhelm, "scenario entered");

        if config.record_history {
            let exposition = self
                .scenario()
                .map(|s| s.exposition().to_string())
                .unwrap_or_default();
            self.history.append(HistoryEntry::ScenarioEntered {
                scenario: id,
                index: self.index,
                overwhelm,
                exposition,
                timestamp: Utc::now(),
            });
        }
        events.push(StoryEvent::ScenarioEntered {
            scenario: id,
            index: self.index,
            overwhelm,
        });
    }

    fn end(&mut self, config: &EngineConfig, events: &mut Vec<StoryEvent>) {
        self.state = StoryState::Ended;
        let attributes = self.store.snapshot();
        self.record(
            config,
            HistoryEntry::Ended {
                attributes,
                timestamp: Utc::now(),
            },
        );

        let summary = self.summary();
        info!(
            run = %self.id,
            character = %summary.character,
            %attributes,
            grade = %summary.grade,
            overwhelmed = summary.overwhelm_count,
            "story ended"
        );
        events.push(StoryEvent::StoryEnded { summary });
    }

    fn summary(&self) -> RunSummary {
        let attributes = self.store.snapshot();
        RunSummary {
            run_id: self.id,
            character: self.character.name().to_string(),
            attributes,
            grade: ReputationGrade::from_reputation(attributes.reputation),
            choices: self.choices,
            overwhelm_count: self.overwhelm_count,
            scenarios_completed: self.completed,
            scenarios_total: self.character.scenarios().len(),
            completed: self.state.is_ended(),
            started_at: self.started_at,
        }
    }
}
