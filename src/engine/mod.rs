//! Flappy Bee minigame engine.
//!
//! A fixed-timestep side-scroller: gravity pulls the bee down every tick, an
//! impulse sets its velocity upward, and paired flower gates scroll in from
//! the right. Passing a gate scores a point; touching a gate, the ceiling or
//! the ground ends the session.

pub mod clock;
pub mod config;
pub mod logic;
pub mod shared;
pub mod types;

pub use clock::StepClock;
pub use config::{ConfigError, EngineConfig, Orientation};
pub use logic::Engine;
pub use shared::SharedEngine;
pub use types::*;
