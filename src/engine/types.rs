//! Flappy Bee data structures.

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the first start. Physics paused.
    #[default]
    Idle,
    Running,
    /// Frozen after a collision until `restart`.
    Over,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Over => "Over",
        }
    }
}

/// The player-controlled bee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flyer {
    /// Top edge in pixels, increasing downward.
    pub y: f64,
    /// Pixels per tick (positive = downward).
    pub velocity: f64,
}

impl Flyer {
    pub fn at_rest(y: f64) -> Self {
        Self { y, velocity: 0.0 }
    }

    /// Whether the flyer is currently moving upward.
    pub fn rising(&self) -> bool {
        self.velocity < 0.0
    }

    /// Visual tilt in degrees, clamped to ±30.
    pub fn tilt_degrees(&self) -> f64 {
        (self.velocity * 4.0).clamp(-30.0, 30.0)
    }
}

/// A paired top/bottom obstacle with a vertical opening.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub id: u64,
    /// Left edge in pixels.
    pub x: f64,
    /// Height of the obstacle hanging from the ceiling.
    pub top_height: f64,
    /// Height of the obstacle standing on the ground band.
    pub bottom_height: f64,
    /// Set once the gate's trailing edge is behind the flyer.
    pub passed: bool,
}

impl Gate {
    /// Right edge in pixels.
    pub fn trailing_edge(&self, gate_width: f64) -> f64 {
        self.x + gate_width
    }
}

/// What ended a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Ceiling,
    Ground,
    Gate(u64),
}

/// Things that happened during one tick, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    GateSpawned { id: u64 },
    GatePassed { id: u64, score: u32 },
    Crashed { score: u32, cause: CrashCause },
    /// The finished session beat the previous best score.
    NewBest { score: u32 },
}

/// Returned by every tick for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub state: SessionState,
    pub score: u32,
    pub events: Vec<EngineEvent>,
}

impl TickResult {
    pub fn new_best(&self) -> Option<u32> {
        self.events.iter().find_map(|event| match event {
            EngineEvent::NewBest { score } => Some(*score),
            _ => None,
        })
    }
}

/// Read-only copy of the engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: SessionState,
    pub flyer_y: f64,
    pub flyer_velocity: f64,
    pub flyer_x: f64,
    pub gates: Vec<Gate>,
    pub score: u32,
    pub best_score: u32,
    /// Physics ticks elapsed in the current session.
    pub ticks: u64,
    /// Seconds of `delta_time` fed to the current session.
    pub elapsed: f64,
}

impl Snapshot {
    pub fn flyer(&self) -> Flyer {
        Flyer {
            y: self.flyer_y,
            velocity: self.flyer_velocity,
        }
    }
}
