//! Generator configuration
//!
//! Holds the tunable knobs of a generation run and validates them before any
//! work starts. Configs can be read from a small rc-style text format:
//!
//! ```text
//! # 25x25 grid, 40 rooms
//! OPTIONS=width:25,height:25,start_x:12,start_y:12,max_rooms:40
//! OPTIONS=empty:32,loot:40,trap:8,key_locked:16,seed:1234
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::dungeon::Cell;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),

    #[error("Invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },

    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidGrid { width: i32, height: i32 },

    #[error("max_rooms must be at least 2 to place both spawn and gate, got {0}")]
    TooFewRooms(i32),

    #[error("Percentage '{name}' must not be negative, got {value}")]
    NegativePercent { name: &'static str, value: i32 },

    #[error("room_size must be a positive finite number, got {0}")]
    InvalidRoomSize(f32),

    #[error("Walk parameter '{name}' out of range: {value}")]
    InvalidWalkParam { name: &'static str, value: u32 },
}

/// Percentage targets for the pooled room types (out of 100)
///
/// The values need not sum to 100; loot also absorbs leftover rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomRatios {
    pub empty: i32,
    pub loot: i32,
    pub trap: i32,
    /// Percentage of rooms that become key/locked pairs (both members counted)
    pub key_locked_pair: i32,
}

impl Default for RoomRatios {
    fn default() -> Self {
        Self {
            empty: 32,
            loot: 40,
            trap: 8,
            key_locked_pair: 16,
        }
    }
}

impl RoomRatios {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("empty", self.empty),
            ("loot", self.loot),
            ("trap", self.trap),
            ("key_locked_pair", self.key_locked_pair),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativePercent { name, value });
            }
        }
        Ok(())
    }
}

/// Tuning for the random walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParams {
    /// Attempt budget is `max_rooms * attempt_factor`
    pub attempt_factor: u32,
    /// Failed steps tolerated before teleporting to a visited cell
    pub stuck_threshold: u32,
    /// Chance (percent) of stepping onto an already occupied cell
    pub revisit_percent: u32,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            attempt_factor: 20,
            stuck_threshold: 20,
            revisit_percent: 30,
        }
    }
}

/// How the gate room is chosen relative to the spawn room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePlacement {
    /// Room with maximum Euclidean distance from spawn
    #[default]
    FurthestEuclidean,
    /// Room furthest along one randomly drawn cardinal direction
    FurthestCardinal,
}

/// Cell to world-space conversion used by room instantiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// `cell * room_size`
    #[default]
    Corner,
    /// `(cell - grid / 2) * room_size`
    Centered,
}

/// Full configuration of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Walk origin; clamped into the grid before use
    pub start: Cell,
    /// Soft target, the walk may return fewer rooms
    pub max_rooms: i32,
    pub room_size: f32,
    /// Explicit seed; `None` draws a fresh one per run
    pub seed: Option<u64>,
    pub ratios: RoomRatios,
    pub walk: WalkParams,
    pub gate_placement: GatePlacement,
    pub placement: Placement,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_width: 25,
            grid_height: 25,
            start: Cell::new(12, 12),
            max_rooms: 40,
            room_size: 10.0,
            seed: None,
            ratios: RoomRatios::default(),
            walk: WalkParams::default(),
            gate_placement: GatePlacement::default(),
            placement: Placement::default(),
        }
    }
}

impl GeneratorConfig {
    /// Check every knob; nothing is generated from an invalid config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.max_rooms < 2 {
            return Err(ConfigError::TooFewRooms(self.max_rooms));
        }
        if !self.room_size.is_finite() || self.room_size <= 0.0 {
            return Err(ConfigError::InvalidRoomSize(self.room_size));
        }
        self.ratios.validate()?;
        if self.walk.attempt_factor == 0 {
            return Err(ConfigError::InvalidWalkParam {
                name: "attempt_factor",
                value: 0,
            });
        }
        if self.walk.revisit_percent > 100 {
            return Err(ConfigError::InvalidWalkParam {
                name: "revisit_percent",
                value: self.walk.revisit_percent,
            });
        }
        Ok(())
    }

    /// Start cell clamped into the grid
    ///
    /// Only meaningful on a validated config.
    pub fn clamped_start(&self) -> Cell {
        self.start.clamped(self.grid_width, self.grid_height)
    }

    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Parse options from a config string, starting from the defaults
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    let opt = opt.trim();
                    if !opt.is_empty() {
                        config.parse_option(opt)?;
                    }
                }
            }
        }

        Ok(config)
    }

    /// Parse a single `key:value` (or `key=value`) option
    fn parse_option(&mut self, opt: &str) -> Result<(), ConfigError> {
        if let Some((key, value)) = opt.split_once(':') {
            return self.set_option(key.trim(), Some(value.trim()));
        }
        if let Some((key, value)) = opt.split_once('=') {
            return self.set_option(key.trim(), Some(value.trim()));
        }
        self.set_option(opt, None)
    }

    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.ok_or_else(|| ConfigError::MissingValue(name.to_string()))?;

        match name {
            "width" | "grid_width" => self.grid_width = parse_value(name, value)?,
            "height" | "grid_height" => self.grid_height = parse_value(name, value)?,
            "start_x" => self.start.x = parse_value(name, value)?,
            "start_y" => self.start.y = parse_value(name, value)?,
            "max_rooms" => self.max_rooms = parse_value(name, value)?,
            "room_size" => self.room_size = parse_value(name, value)?,
            "seed" => {
                self.seed = match value {
                    "random" | "none" => None,
                    _ => Some(parse_value(name, value)?),
                };
            }
            "empty" => self.ratios.empty = parse_value(name, value)?,
            "loot" => self.ratios.loot = parse_value(name, value)?,
            "trap" => self.ratios.trap = parse_value(name, value)?,
            "key_locked" | "key_locked_pair" => {
                self.ratios.key_locked_pair = parse_value(name, value)?
            }
            "attempt_factor" => self.walk.attempt_factor = parse_value(name, value)?,
            "stuck_threshold" => self.walk.stuck_threshold = parse_value(name, value)?,
            "revisit" | "revisit_percent" => {
                self.walk.revisit_percent = parse_value(name, value)?
            }
            "gate" => {
                self.gate_placement = match value.to_lowercase().as_str() {
                    "euclidean" => GatePlacement::FurthestEuclidean,
                    "cardinal" => GatePlacement::FurthestCardinal,
                    _ => return Err(invalid(name, value)),
                };
            }
            "placement" => {
                self.placement = match value.to_lowercase().as_str() {
                    "corner" => Placement::Corner,
                    "centered" | "center" => Placement::Centered,
                    _ => return Err(invalid(name, value)),
                };
            }
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let seed = match self.seed {
            Some(seed) => seed.to_string(),
            None => "random".to_string(),
        };
        let gate = match self.gate_placement {
            GatePlacement::FurthestEuclidean => "euclidean",
            GatePlacement::FurthestCardinal => "cardinal",
        };
        let placement = match self.placement {
            Placement::Corner => "corner",
            Placement::Centered => "centered",
        };

        let mut lines = Vec::new();
        lines.push("# Dungeon generator configuration".to_string());
        lines.push(format!(
            "OPTIONS=width:{},height:{},start_x:{},start_y:{}",
            self.grid_width, self.grid_height, self.start.x, self.start.y
        ));
        lines.push(format!(
            "OPTIONS=max_rooms:{},room_size:{},seed:{}",
            self.max_rooms, self.room_size, seed
        ));
        lines.push(format!(
            "OPTIONS=empty:{},loot:{},trap:{},key_locked:{}",
            self.ratios.empty, self.ratios.loot, self.ratios.trap, self.ratios.key_locked_pair
        ));
        lines.push(format!(
            "OPTIONS=attempt_factor:{},stuck_threshold:{},revisit:{}",
            self.walk.attempt_factor, self.walk.stuck_threshold, self.walk.revisit_percent
        ));
        lines.push(format!("OPTIONS=gate:{},placement:{}", gate, placement));
        lines.join("\n") + "\n"
    }
}

fn parse_value<T: core::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(name, value))
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}
