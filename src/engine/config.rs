//! Engine configuration: field geometry and physics constants.
//!
//! Every value is required. The two presets reproduce the portrait and
//! landscape tunings of the web version of Flappy Bee.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Orientation preset for the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
        }
    }

    pub fn config(&self) -> EngineConfig {
        match self {
            Self::Portrait => EngineConfig::portrait(),
            Self::Landscape => EngineConfig::landscape(),
        }
    }
}

/// Fixed-at-construction simulation parameters. Units are pixels and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub field_width: f64,
    pub field_height: f64,
    /// Velocity added every tick (positive = downward).
    pub gravity: f64,
    /// Velocity the flyer is set to by an impulse (negative = upward).
    pub impulse_velocity: f64,
    pub gate_width: f64,
    /// Vertical opening between the top and bottom obstacle of a gate.
    pub gap: f64,
    /// Distance every gate moves left per tick.
    pub horizontal_speed: f64,
    /// A new gate spawns once the rightmost gate is this far from the right edge.
    pub spawn_interval: f64,
    pub ground_height: f64,
    /// Edge length of the flyer's square hitbox.
    pub flyer_size: f64,
    /// Fixed horizontal position of the flyer's left edge.
    pub flyer_x: f64,
    /// Smallest possible top-obstacle height.
    pub gate_min_top: f64,
    /// Largest possible top-obstacle height as a fraction of `field_height`.
    pub gate_max_top_fraction: f64,
}

/// Reasons an [`EngineConfig`] is rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("impulse_velocity must point upward (negative), got {0}")]
    ImpulseNotUpward(f64),
    #[error("gap {gap} must be smaller than the field height {field_height}")]
    GapTooLarge { gap: f64, field_height: f64 },
    #[error("gap {gap} is smaller than the flyer size {flyer_size}")]
    GapBelowFlyerSize { gap: f64, flyer_size: f64 },
    #[error("ground {ground_height} plus flyer {flyer_size} leaves no room in a field of height {field_height}")]
    GroundTooTall {
        ground_height: f64,
        flyer_size: f64,
        field_height: f64,
    },
    #[error("flyer at x={flyer_x} with size {flyer_size} does not fit in a field of width {field_width}")]
    FlyerOutsideField {
        flyer_x: f64,
        flyer_size: f64,
        field_width: f64,
    },
    #[error("gate_max_top_fraction must be in (0, 1], got {0}")]
    TopFractionOutOfRange(f64),
    #[error("gate_min_top {min_top} exceeds the maximum top height {max_top}")]
    TopRangeInverted { min_top: f64, max_top: f64 },
    #[error("tallest top obstacle {max_top} plus gap and ground exceeds the field height {field_height}")]
    GateBandTooTall { max_top: f64, field_height: f64 },
}

impl EngineConfig {
    /// Tall field used on narrow screens.
    pub fn portrait() -> Self {
        Self {
            field_width: 320.0,
            field_height: 500.0,
            gravity: 0.4,
            impulse_velocity: -8.0,
            gate_width: 50.0,
            gap: 140.0,
            horizontal_speed: 2.5,
            spawn_interval: 200.0,
            ground_height: 60.0,
            flyer_size: 35.0,
            flyer_x: 100.0,
            gate_min_top: 50.0,
            gate_max_top_fraction: 0.5,
        }
    }

    /// Wide field used on wide screens.
    ///
    /// Top heights are drawn from 50..=176, narrower than the browser
    /// game's 50..=210, so the bottom obstacle never goes negative.
    pub fn landscape() -> Self {
        Self {
            field_width: 500.0,
            field_height: 400.0,
            gravity: 0.4,
            impulse_velocity: -8.0,
            gate_width: 60.0,
            gap: 160.0,
            horizontal_speed: 3.0,
            spawn_interval: 200.0,
            ground_height: 60.0,
            flyer_size: 45.0,
            flyer_x: 100.0,
            gate_min_top: 50.0,
            gate_max_top_fraction: 0.44,
        }
    }

    /// Largest top-obstacle height a spawned gate can have.
    pub fn max_top(&self) -> f64 {
        self.field_height * self.gate_max_top_fraction
    }

    /// Vertical position the flyer starts from.
    pub fn center_y(&self) -> f64 {
        self.field_height / 2.0
    }

    /// Lowest flyer position that does not touch the ground.
    pub fn ground_limit(&self) -> f64 {
        self.field_height - self.flyer_size - self.ground_height
    }

    /// Check every numeric rule. The first violated rule is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("gravity", self.gravity),
            ("impulse_velocity", self.impulse_velocity),
            ("gate_width", self.gate_width),
            ("gap", self.gap),
            ("horizontal_speed", self.horizontal_speed),
            ("spawn_interval", self.spawn_interval),
            ("ground_height", self.ground_height),
            ("flyer_size", self.flyer_size),
            ("flyer_x", self.flyer_x),
            ("gate_min_top", self.gate_min_top),
            ("gate_max_top_fraction", self.gate_max_top_fraction),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("gravity", self.gravity),
            ("gate_width", self.gate_width),
            ("gap", self.gap),
            ("horizontal_speed", self.horizontal_speed),
            ("spawn_interval", self.spawn_interval),
            ("flyer_size", self.flyer_size),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("ground_height", self.ground_height),
            ("flyer_x", self.flyer_x),
            ("gate_min_top", self.gate_min_top),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.impulse_velocity >= 0.0 {
            return Err(ConfigError::ImpulseNotUpward(self.impulse_velocity));
        }
        if self.gap >= self.field_height {
            return Err(ConfigError::GapTooLarge {
                gap: self.gap,
                field_height: self.field_height,
            });
        }
        if self.gap < self.flyer_size {
            return Err(ConfigError::GapBelowFlyerSize {
                gap: self.gap,
                flyer_size: self.flyer_size,
            });
        }
        if self.ground_height + self.flyer_size >= self.field_height {
            return Err(ConfigError::GroundTooTall {
                ground_height: self.ground_height,
                flyer_size: self.flyer_size,
                field_height: self.field_height,
            });
        }
        if self.flyer_x + self.flyer_size > self.field_width {
            return Err(ConfigError::FlyerOutsideField {
                flyer_x: self.flyer_x,
                flyer_size: self.flyer_size,
                field_width: self.field_width,
            });
        }
        if self.gate_max_top_fraction <= 0.0 || self.gate_max_top_fraction > 1.0 {
            return Err(ConfigError::TopFractionOutOfRange(
                self.gate_max_top_fraction,
            ));
        }

        let max_top = self.max_top();
        if self.gate_min_top > max_top {
            return Err(ConfigError::TopRangeInverted {
                min_top: self.gate_min_top,
                max_top,
            });
        }
        if max_top + self.gap + self.ground_height > self.field_height {
            return Err(ConfigError::GateBandTooTall {
                max_top,
                field_height: self.field_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for orientation in Orientation::ALL {
            assert_eq!(orientation.config().validate(), Ok(()));
        }
    }

    #[test]
    fn test_portrait_preset_values() {
        let config = EngineConfig::portrait();
        assert!((config.field_width - 320.0).abs() < f64::EPSILON);
        assert!((config.field_height - 500.0).abs() < f64::EPSILON);
        assert!((config.max_top() - 250.0).abs() < f64::EPSILON);
        assert!((config.center_y() - 250.0).abs() < f64::EPSILON);
        assert!((config.ground_limit() - 405.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_orientation_names() {
        assert_eq!(Orientation::Portrait.name(), "Portrait");
        assert_eq!(Orientation::Landscape.name(), "Landscape");
    }

    #[test]
    fn test_gap_as_tall_as_field_is_rejected() {
        let config = EngineConfig {
            gap: 500.0,
            ..EngineConfig::portrait()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapTooLarge { .. })
        ));
    }

    #[test]
    fn test_gap_smaller_than_flyer_is_rejected() {
        let config = EngineConfig {
            gap: 20.0,
            ..EngineConfig::portrait()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapBelowFlyerSize { .. })
        ));
    }

    #[test]
    fn test_non_positive_values_are_rejected() {
        let config = EngineConfig {
            horizontal_speed: 0.0,
            ..EngineConfig::portrait()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "horizontal_speed",
                value: 0.0
            })
        );

        let config = EngineConfig {
            field_width: -1.0,
            ..EngineConfig::portrait()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "field_width",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_is_rejected() {
        let config = EngineConfig {
            gravity: f64::NAN,
            ..EngineConfig::portrait()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn test_downward_impulse_is_rejected() {
        let config = EngineConfig {
            impulse_velocity: 8.0,
            ..EngineConfig::portrait()
        };
        assert_eq!(config.validate(), Err(ConfigError::ImpulseNotUpward(8.0)));
    }

    #[test]
    fn test_gate_band_taller_than_field_is_rejected() {
        // 400 * 0.525 + 160 + 60 = 430 > 400
        let config = EngineConfig {
            gate_max_top_fraction: 0.525,
            ..EngineConfig::landscape()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GateBandTooTall { .. })
        ));
    }

    #[test]
    fn test_inverted_top_range_is_rejected() {
        let config = EngineConfig {
            gate_min_top: 260.0,
            ..EngineConfig::portrait()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TopRangeInverted { .. })
        ));
    }

    #[test]
    fn test_flyer_outside_field_is_rejected() {
        let config = EngineConfig {
            flyer_x: 300.0,
            ..EngineConfig::portrait()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FlyerOutsideField { .. })
        ));
    }

    #[test]
    fn test_error_message_names_the_field() {
        let err = ConfigError::NotPositive {
            field: "gap",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "gap must be greater than zero, got 0");
    }

    #[test]
    fn test_deserialize_requires_every_field() {
        let json = r#"{ "field_width": 320.0, "field_height": 500.0 }"#;
        assert!(serde_json::from_str::<EngineConfig>(json).is_err());

        let full = serde_json::to_string(&EngineConfig::landscape()).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&full).unwrap();
        assert_eq!(parsed, EngineConfig::landscape());
    }
}
