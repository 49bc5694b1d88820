//! Flappy Bee - terminal port of the honey shop's minigame.
//!
//! This library exposes the engine and its collaborators for the binary
//! and for testing.

pub mod app;
pub mod build_info;
pub mod engine;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod settings;

pub use engine::{
    ConfigError, CrashCause, Engine, EngineConfig, EngineEvent, Gate, Orientation, SessionState,
    SharedEngine, Snapshot, StepClock, TickResult,
};
