//! Game logic for Flappy Bee: session lifecycle, physics step, gate stream,
//! scoring and collision detection.

use super::config::{ConfigError, EngineConfig};
use super::types::{
    CrashCause, EngineEvent, Flyer, Gate, SessionState, Snapshot, TickResult,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The minigame simulation. Generic over its random source so tests can
/// inject a seeded generator.
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    config: EngineConfig,
    rng: R,
    state: SessionState,
    flyer: Flyer,
    /// Active gates, oldest (leftmost) first.
    gates: Vec<Gate>,
    score: u32,
    best_score: u32,
    next_gate_id: u64,
    ticks: u64,
    /// Sum of the `delta_time` values passed to `tick` this session.
    elapsed: f64,
}

impl Engine<StdRng> {
    /// Create an engine seeded from system entropy.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose gate sequence is fully determined by `seed`.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine in the `Idle` state. Fails if `config` is inconsistent.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let flyer = Flyer::at_rest(config.center_y());
        Ok(Self {
            config,
            rng,
            state: SessionState::Idle,
            flyer,
            gates: Vec::new(),
            score: 0,
            best_score: 0,
            next_gate_id: 1,
            ticks: 0,
            elapsed: 0.0,
        })
    }

    /// Seed the best score read from storage by the caller.
    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = best_score;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// `Idle -> Running`. No-op in any other state.
    pub fn start(&mut self) {
        if self.state != SessionState::Idle {
            return;
        }
        self.reset_session();
        self.state = SessionState::Running;
        tracing::info!(best = self.best_score, "session started");
    }

    /// Set the flyer's velocity to the upward impulse, replacing whatever
    /// velocity it had. No-op unless `Running`.
    pub fn impulse(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        self.flyer.velocity = self.config.impulse_velocity;
    }

    /// Advance the simulation by exactly one fixed step.
    ///
    /// Callers are expected to tick at a fixed cadence; `delta_time` is only
    /// recorded and never scales the step. Outside `Running` nothing changes.
    pub fn tick(&mut self, delta_time: f64) -> TickResult {
        let mut events = Vec::new();

        if self.state == SessionState::Running {
            if delta_time.is_finite() && delta_time > 0.0 {
                self.elapsed += delta_time;
            }
            self.step(&mut events);
        }

        TickResult {
            state: self.state,
            score: self.score,
            events,
        }
    }

    /// `Over -> Idle`, discarding gates and score. No-op in any other state.
    pub fn restart(&mut self) {
        if self.state != SessionState::Over {
            return;
        }
        self.reset_session();
        self.state = SessionState::Idle;
        tracing::debug!("session reset to idle");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            flyer_y: self.flyer.y,
            flyer_velocity: self.flyer.velocity,
            flyer_x: self.config.flyer_x,
            gates: self.gates.clone(),
            score: self.score,
            best_score: self.best_score,
            ticks: self.ticks,
            elapsed: self.elapsed,
        }
    }

    fn reset_session(&mut self) {
        self.flyer = Flyer::at_rest(self.config.center_y());
        self.gates.clear();
        self.score = 0;
        self.ticks = 0;
        self.elapsed = 0.0;
    }

    /// Single physics step.
    fn step(&mut self, events: &mut Vec<EngineEvent>) {
        self.ticks += 1;

        self.flyer.velocity += self.config.gravity;
        self.flyer.y += self.flyer.velocity;

        let speed = self.config.horizontal_speed;
        for gate in &mut self.gates {
            gate.x -= speed;
        }

        let gate_width = self.config.gate_width;
        self.gates.retain(|gate| gate.x >= -gate_width);

        let spawn_threshold = self.config.field_width - self.config.spawn_interval;
        let needs_gate = match self.gates.last() {
            Some(newest) => newest.x < spawn_threshold,
            None => true,
        };
        if needs_gate {
            let id = self.spawn_gate();
            events.push(EngineEvent::GateSpawned { id });
        }

        let flyer_x = self.config.flyer_x;
        for gate in &mut self.gates {
            if !gate.passed && gate.trailing_edge(gate_width) < flyer_x {
                gate.passed = true;
                self.score += 1;
                tracing::debug!(gate = gate.id, score = self.score, "gate passed");
                events.push(EngineEvent::GatePassed {
                    id: gate.id,
                    score: self.score,
                });
            }
        }

        if let Some(cause) = self.detect_collision() {
            self.finish(cause, events);
        }
    }

    /// Append a gate at the right edge with a random opening.
    fn spawn_gate(&mut self) -> u64 {
        let min_top = self.config.gate_min_top;
        let max_top = self.config.max_top();
        let top_height = if max_top > min_top {
            self.rng.gen_range(min_top..=max_top)
        } else {
            min_top
        };
        let bottom_height = self.config.field_height
            - top_height
            - self.config.gap
            - self.config.ground_height;

        let id = self.next_gate_id;
        self.next_gate_id += 1;
        self.gates.push(Gate {
            id,
            x: self.config.field_width,
            top_height,
            bottom_height,
            passed: false,
        });
        tracing::debug!(gate = id, top = top_height, "gate spawned");
        id
    }

    /// Axis-aligned test of the flyer against ceiling, ground and gates.
    fn detect_collision(&self) -> Option<CrashCause> {
        let y = self.flyer.y;
        let size = self.config.flyer_size;

        if y < 0.0 {
            return Some(CrashCause::Ceiling);
        }
        if y > self.config.ground_limit() {
            return Some(CrashCause::Ground);
        }

        let flyer_left = self.config.flyer_x;
        let flyer_right = flyer_left + size;
        let field_height = self.config.field_height;
        for gate in &self.gates {
            let overlaps = flyer_left < gate.trailing_edge(self.config.gate_width)
                && flyer_right > gate.x;
            if !overlaps {
                continue;
            }
            if y < gate.top_height || y + size > field_height - gate.bottom_height {
                return Some(CrashCause::Gate(gate.id));
            }
        }

        None
    }

    fn finish(&mut self, cause: CrashCause, events: &mut Vec<EngineEvent>) {
        self.state = SessionState::Over;
        events.push(EngineEvent::Crashed {
            score: self.score,
            cause,
        });
        tracing::info!(score = self.score, ?cause, ticks = self.ticks, "session over");

        if self.score > self.best_score {
            self.best_score = self.score;
            events.push(EngineEvent::NewBest { score: self.score });
            tracing::info!(best = self.best_score, "new best score");
        }
    }
}
