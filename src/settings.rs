//! User settings (~/.flappy-bee/settings.json) and command-line overrides.

use crate::engine::clock::STEP_MS;
use crate::engine::{ConfigError, EngineConfig, Orientation};
use crate::persistence;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub const SETTINGS_FILE: &str = "settings.json";

/// Which preset to play on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutChoice {
    /// Follow the terminal's shape.
    #[default]
    Auto,
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: LayoutChoice,
    /// Fixed seed for the gate sequence; random when absent.
    pub seed: Option<u64>,
    /// Physics step length in milliseconds.
    pub step_ms: u64,
    /// Full engine configuration replacing the presets.
    pub engine: Option<EngineConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutChoice::Auto,
            seed: None,
            step_ms: STEP_MS,
            engine: None,
        }
    }
}

impl Settings {
    /// Load from ~/.flappy-bee/settings.json, defaults when absent or invalid.
    pub fn load() -> io::Result<Self> {
        let path = persistence::save_path(SETTINGS_FILE)?;
        Ok(Self::load_from(&path))
    }

    pub fn load_from(path: &Path) -> Self {
        persistence::load_json_or_default(path)
    }

    /// Pick the orientation for a terminal of `cols` x `rows` cells.
    ///
    /// Cells are about twice as tall as they are wide, so the terminal is
    /// portrait when `rows * 2 > cols`.
    pub fn orientation_for(&self, cols: u16, rows: u16) -> Orientation {
        match self.layout {
            LayoutChoice::Portrait => Orientation::Portrait,
            LayoutChoice::Landscape => Orientation::Landscape,
            LayoutChoice::Auto => {
                if u32::from(rows) * 2 > u32::from(cols) {
                    Orientation::Portrait
                } else {
                    Orientation::Landscape
                }
            }
        }
    }

    /// Resolve the engine configuration for a terminal size and validate it.
    pub fn engine_config(&self, cols: u16, rows: u16) -> Result<EngineConfig, ConfigError> {
        let config = match &self.engine {
            Some(config) => config.clone(),
            None => self.orientation_for(cols, rows).config(),
        };
        config.validate()?;
        tracing::debug!(?config, "engine configuration resolved");
        Ok(config)
    }

    /// Whether the configuration depends on the terminal shape.
    pub fn follows_terminal(&self) -> bool {
        self.engine.is_none() && self.layout == LayoutChoice::Auto
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Version,
    Help,
    ResetBest,
}

/// Parse arguments (without the program name) on top of `settings`.
pub fn parse_args(args: &[String], settings: &mut Settings) -> Result<Command, String> {
    let mut command = Command::Play;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => command = Command::Version,
            "--help" | "-h" => command = Command::Help,
            "reset-best" => command = Command::ResetBest,
            "--portrait" => settings.layout = LayoutChoice::Portrait,
            "--landscape" => settings.layout = LayoutChoice::Landscape,
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed needs a number".to_string())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                settings.seed = Some(seed);
            }
            other => return Err(format!("Unknown command: {}", other)),
        }
    }

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.layout, LayoutChoice::Auto);
        assert_eq!(settings.step_ms, 16);
        assert!(settings.seed.is_none());
        assert!(settings.follows_terminal());
    }

    #[test]
    fn test_auto_orientation_follows_terminal_shape() {
        let settings = Settings::default();
        assert_eq!(settings.orientation_for(80, 50), Orientation::Portrait);
        assert_eq!(settings.orientation_for(200, 50), Orientation::Landscape);
        // Square in pixels counts as landscape
        assert_eq!(settings.orientation_for(100, 50), Orientation::Landscape);
    }

    #[test]
    fn test_forced_layout_ignores_terminal() {
        let settings = Settings {
            layout: LayoutChoice::Landscape,
            ..Settings::default()
        };
        assert_eq!(settings.orientation_for(40, 60), Orientation::Landscape);
        assert!(!settings.follows_terminal());
    }

    #[test]
    fn test_engine_override_is_validated() {
        let settings = Settings {
            engine: Some(EngineConfig {
                gap: 10.0,
                ..EngineConfig::portrait()
            }),
            ..Settings::default()
        };
        assert!(matches!(
            settings.engine_config(80, 24),
            Err(ConfigError::GapBelowFlyerSize { .. })
        ));
    }

    #[test]
    fn test_engine_config_uses_preset() {
        let settings = Settings::default();
        assert_eq!(settings.engine_config(80, 60), Ok(EngineConfig::portrait()));
    }

    #[test]
    fn test_partial_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "layout": "portrait", "seed": 5 }"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.layout, LayoutChoice::Portrait);
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.step_ms, 16);
    }

    #[test]
    fn test_parse_args() {
        let mut settings = Settings::default();
        let command = parse_args(&args(&["--landscape", "--seed", "42"]), &mut settings);
        assert_eq!(command, Ok(Command::Play));
        assert_eq!(settings.layout, LayoutChoice::Landscape);
        assert_eq!(settings.seed, Some(42));

        assert_eq!(
            parse_args(&args(&["reset-best"]), &mut settings),
            Ok(Command::ResetBest)
        );
        assert_eq!(
            parse_args(&args(&["-v"]), &mut settings),
            Ok(Command::Version)
        );
    }

    #[test]
    fn test_parse_args_errors() {
        let mut settings = Settings::default();
        assert!(parse_args(&args(&["--seed"]), &mut settings).is_err());
        assert!(parse_args(&args(&["--seed", "abc"]), &mut settings).is_err());
        assert_eq!(
            parse_args(&args(&["fly"]), &mut settings),
            Err("Unknown command: fly".to_string())
        );
    }
}
