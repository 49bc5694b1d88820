//! Thread-safe handle for hosts that tick and feed input from different
//! threads. One mutex guards the whole session for the duration of each call.

use super::logic::Engine;
use super::types::{SessionState, Snapshot, TickResult};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug)]
pub struct SharedEngine<R = StdRng> {
    inner: Arc<Mutex<Engine<R>>>,
}

impl<R> Clone for SharedEngine<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Rng> SharedEngine<R> {
    pub fn new(engine: Engine<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Engine calls never panic midway, so a poisoned lock still holds a
    // consistent session.
    fn lock(&self) -> MutexGuard<'_, Engine<R>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn start(&self) {
        self.lock().start();
    }

    pub fn impulse(&self) {
        self.lock().impulse();
    }

    pub fn tick(&self, delta_time: f64) -> TickResult {
        self.lock().tick(delta_time)
    }

    pub fn restart(&self) {
        self.lock().restart();
    }

    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;

    #[test]
    fn test_clones_share_one_session() {
        let engine = Engine::with_seed(EngineConfig::portrait(), 11).unwrap();
        let shared = SharedEngine::new(engine);
        let other = shared.clone();

        other.start();
        assert_eq!(shared.state(), SessionState::Running);

        shared.tick(1.0 / 60.0);
        assert_eq!(other.snapshot().ticks, 1);
    }
}
