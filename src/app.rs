//! Display-side session glue: owns the engine, drives it from frame time,
//! persists new best scores and follows terminal resizes.

use crate::engine::{
    ConfigError, Engine, EngineConfig, EngineEvent, SessionState, Snapshot, StepClock,
};
use crate::input::{dispatch, GameAction, InputResult};
use crate::persistence::ScoreStore;
use crate::settings::Settings;

pub struct App<S: ScoreStore> {
    engine: Engine,
    store: S,
    settings: Settings,
    clock: StepClock,
    layout_name: &'static str,
    /// Latest terminal size, applied once the session is back to `Idle`.
    size: (u16, u16),
    /// The last finished session set a new best score.
    new_best: bool,
}

impl<S: ScoreStore> App<S> {
    /// Build the engine for a terminal of `cols` x `rows`, seeding the best
    /// score from `store`.
    pub fn new(settings: Settings, store: S, cols: u16, rows: u16) -> Result<Self, ConfigError> {
        let config = settings.engine_config(cols, rows)?;
        let layout_name = Self::layout_name_for(&settings, cols, rows);
        let engine = Self::build_engine(&settings, config, store.load_best())?;
        let clock = StepClock::new(settings.step_ms);

        Ok(Self {
            engine,
            store,
            settings,
            clock,
            layout_name,
            size: (cols, rows),
            new_best: false,
        })
    }

    fn build_engine(
        settings: &Settings,
        config: EngineConfig,
        best: u32,
    ) -> Result<Engine, ConfigError> {
        let engine = match settings.seed {
            Some(seed) => Engine::with_seed(config, seed)?,
            None => Engine::new(config)?,
        };
        Ok(engine.with_best_score(best))
    }

    fn layout_name_for(settings: &Settings, cols: u16, rows: u16) -> &'static str {
        if settings.engine.is_some() {
            "Custom"
        } else {
            settings.orientation_for(cols, rows).name()
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn layout_name(&self) -> &'static str {
        self.layout_name
    }

    pub fn new_best(&self) -> bool {
        self.new_best
    }

    pub fn step_ms(&self) -> u64 {
        self.clock.step_ms()
    }

    pub fn handle_action(&mut self, action: GameAction) -> InputResult {
        let before = self.engine.state();
        let result = dispatch(&mut self.engine, action);
        let after = self.engine.state();
        if before != SessionState::Running && after == SessionState::Running {
            self.new_best = false;
            self.clock.reset();
        }
        if before != SessionState::Idle && after == SessionState::Idle {
            let (cols, rows) = self.size;
            if let Err(e) = self.apply_size(cols, rows) {
                tracing::warn!(error = %e, "keeping previous layout");
            }
        }
        result
    }

    /// Feed elapsed frame time; runs as many fixed ticks as are due.
    pub fn advance(&mut self, dt_ms: u64) {
        if self.engine.state() != SessionState::Running {
            self.clock.reset();
            return;
        }

        let steps = self.clock.advance(dt_ms);
        let step_seconds = self.clock.step_seconds();
        for _ in 0..steps {
            let result = self.engine.tick(step_seconds);
            for event in &result.events {
                self.on_event(*event);
            }
            if result.state != SessionState::Running {
                break;
            }
        }
    }

    fn on_event(&mut self, event: EngineEvent) {
        if let EngineEvent::NewBest { score } = event {
            self.new_best = true;
            if let Err(e) = self.store.save_best(score) {
                tracing::warn!(score, error = %e, "could not save best score");
            }
        }
    }

    /// Swap presets when the terminal changes shape. Only between sessions,
    /// so a running game keeps its geometry; a size seen mid-session is
    /// applied on the way back to `Idle`.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<bool, ConfigError> {
        self.size = (cols, rows);
        if self.engine.state() != SessionState::Idle {
            return Ok(false);
        }
        self.apply_size(cols, rows)
    }

    fn apply_size(&mut self, cols: u16, rows: u16) -> Result<bool, ConfigError> {
        if !self.settings.follows_terminal() {
            return Ok(false);
        }
        let config = self.settings.engine_config(cols, rows)?;
        if &config == self.engine.config() {
            return Ok(false);
        }

        self.engine = Self::build_engine(&self.settings, config, self.engine.best_score())?;
        self.layout_name = Self::layout_name_for(&self.settings, cols, rows);
        tracing::info!(layout = self.layout_name, cols, rows, "layout changed");
        Ok(true)
    }
}
