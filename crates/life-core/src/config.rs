use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Session parameters supplied by the collaborator driving a simulation.
///
/// Limits here belong to the collaborator: `Grid` and the engine accept any
/// dimensions, `Simulation` checks worlds against these before running them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Pixel size of one cell; stored in world files, unused by the engine.
    pub cell_size: u32,
    pub rows: usize,
    pub columns: usize,
    /// Slider position; the pause between generations is `speed³` seconds.
    pub speed: f64,
    /// Seed for random worlds. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            rows: 50,
            columns: 50,
            speed: 0.4,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell_size ({actual}) must be in {min}..={max}")]
    CellSize { min: u32, max: u32, actual: u32 },
    #[error("rows ({actual}) must be in {min}..={max}")]
    Rows { min: usize, max: usize, actual: usize },
    #[error("columns ({actual}) must be in {min}..={max}")]
    Columns { min: usize, max: usize, actual: usize },
    #[error("speed ({actual}) must be finite and in {min}..={max}")]
    Speed { min: f64, max: f64, actual: f64 },
    #[error("world is {rows}x{columns}, both sides must be at least {min}")]
    WorldTooSmall { min: usize, rows: usize, columns: usize },
    #[error("invalid configuration JSON: {0}")]
    Parse(String),
}

impl LifeConfig {
    pub const MIN_CELL_SIZE: u32 = 1;
    pub const MAX_CELL_SIZE: u32 = 50;
    pub const MIN_DIMENSION: usize = 10;
    pub const MAX_DIMENSION: usize = 1000;
    pub const MIN_SPEED: f64 = 0.05;
    pub const MAX_SPEED: f64 = 0.7;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_CELL_SIZE..=Self::MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(ConfigError::CellSize {
                min: Self::MIN_CELL_SIZE,
                max: Self::MAX_CELL_SIZE,
                actual: self.cell_size,
            });
        }
        Self::validate_dimensions(self.rows, self.columns)?;
        Self::validate_speed(self.speed)
    }

    /// Checks for a configuration describing a loaded world file. The file's
    /// cell size and any dimensions at or above the floor are accepted as is.
    pub fn validate_loaded(&self) -> Result<(), ConfigError> {
        if self.rows < Self::MIN_DIMENSION || self.columns < Self::MIN_DIMENSION {
            return Err(ConfigError::WorldTooSmall {
                min: Self::MIN_DIMENSION,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Self::validate_speed(self.speed)
    }

    pub fn validate_speed(speed: f64) -> Result<(), ConfigError> {
        if !speed.is_finite() || !(Self::MIN_SPEED..=Self::MAX_SPEED).contains(&speed) {
            return Err(ConfigError::Speed {
                min: Self::MIN_SPEED,
                max: Self::MAX_SPEED,
                actual: speed,
            });
        }
        Ok(())
    }

    pub fn validate_dimensions(rows: usize, columns: usize) -> Result<(), ConfigError> {
        let range = Self::MIN_DIMENSION..=Self::MAX_DIMENSION;
        if !range.contains(&rows) {
            return Err(ConfigError::Rows {
                min: Self::MIN_DIMENSION,
                max: Self::MAX_DIMENSION,
                actual: rows,
            });
        }
        if !range.contains(&columns) {
            return Err(ConfigError::Columns {
                min: Self::MIN_DIMENSION,
                max: Self::MAX_DIMENSION,
                actual: columns,
            });
        }
        Ok(())
    }

    /// Pull every field into its accepted range, as an input form would.
    pub fn clamped(&self) -> Self {
        let speed = if self.speed.is_finite() {
            self.speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED)
        } else {
            Self::default().speed
        };
        Self {
            cell_size: self.cell_size.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE),
            rows: self.rows.clamp(Self::MIN_DIMENSION, Self::MAX_DIMENSION),
            columns: self.columns.clamp(Self::MIN_DIMENSION, Self::MAX_DIMENSION),
            speed,
            seed: self.seed,
        }
    }

    /// `speed³` seconds. A non-finite speed uses the default; negatives are zero.
    pub fn step_interval(&self) -> Duration {
        let speed = if self.speed.is_finite() {
            self.speed.max(0.0)
        } else {
            Self::default().speed
        };
        Duration::try_from_secs_f64(speed.powi(3)).unwrap_or(Duration::MAX)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(LifeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn dimensions_below_floor_are_rejected() {
        let config = LifeConfig {
            rows: 9,
            ..LifeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Rows {
                min: 10,
                max: 1000,
                actual: 9
            })
        );
        assert!(matches!(
            LifeConfig::validate_dimensions(10, 1001),
            Err(ConfigError::Columns { actual: 1001, .. })
        ));
    }

    #[test]
    fn cell_size_and_speed_limits() {
        let zero_cells = LifeConfig {
            cell_size: 0,
            ..LifeConfig::default()
        };
        assert!(matches!(zero_cells.validate(), Err(ConfigError::CellSize { .. })));
        let nan_speed = LifeConfig {
            speed: f64::NAN,
            ..LifeConfig::default()
        };
        assert!(matches!(nan_speed.validate(), Err(ConfigError::Speed { .. })));
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let wild = LifeConfig {
            cell_size: 500,
            rows: 2,
            columns: 5000,
            speed: f64::INFINITY,
            seed: Some(3),
        };
        let tame = wild.clamped();
        assert_eq!(tame.cell_size, 50);
        assert_eq!(tame.rows, 10);
        assert_eq!(tame.columns, 1000);
        assert_eq!(tame.speed, 0.4);
        assert_eq!(tame.seed, Some(3));
        assert_eq!(tame.validate(), Ok(()));
    }

    #[test]
    fn step_interval_is_speed_cubed() {
        let config = LifeConfig {
            speed: 0.5,
            ..LifeConfig::default()
        };
        assert_eq!(config.step_interval(), Duration::from_millis(125));
    }

    #[test]
    fn step_interval_never_panics_on_unvalidated_speed() {
        let with_speed = |speed| LifeConfig {
            speed,
            ..LifeConfig::default()
        };
        let default_interval = LifeConfig::default().step_interval();
        assert_eq!(with_speed(f64::INFINITY).step_interval(), default_interval);
        assert_eq!(with_speed(f64::NAN).step_interval(), default_interval);
        assert_eq!(with_speed(-1.0).step_interval(), Duration::ZERO);
        assert_eq!(with_speed(1e200).step_interval(), Duration::MAX);
    }

    #[test]
    fn loaded_worlds_only_need_the_floor() {
        let big = LifeConfig {
            cell_size: 60,
            rows: 1200,
            columns: 10,
            ..LifeConfig::default()
        };
        assert!(big.validate().is_err());
        assert_eq!(big.validate_loaded(), Ok(()));
        let small = LifeConfig {
            rows: 9,
            ..big.clone()
        };
        assert_eq!(
            small.validate_loaded(),
            Err(ConfigError::WorldTooSmall {
                min: 10,
                rows: 9,
                columns: 10
            })
        );
        let bad_speed = LifeConfig { speed: 0.9, ..big };
        assert!(matches!(bad_speed.validate_loaded(), Err(ConfigError::Speed { .. })));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = LifeConfig::from_json_str(r#"{"rows": 80, "seed": 9}"#).unwrap();
        assert_eq!(config.rows, 80);
        assert_eq!(config.columns, 50);
        assert_eq!(config.seed, Some(9));
        let back = LifeConfig::from_json_str(&config.to_json_string()).unwrap();
        assert_eq!(back, config);
        assert!(matches!(
            LifeConfig::from_json_str("{rows"),
            Err(ConfigError::Parse(_))
        ));
    }
}
