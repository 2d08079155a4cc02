//! Simulation tuning and runtime settings
//!
//! Loaded from a JSON file; any field left out keeps its default.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Commands a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GunCommand {
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    Fire,
    FireStraight,
}

/// Key code (KeyboardEvent `code` names) to gun command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(pub BTreeMap<String, GunCommand>);

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            ("Numpad4", GunCommand::MoveLeft),
            ("Numpad6", GunCommand::MoveRight),
            ("Numpad7", GunCommand::RotateLeft),
            ("Numpad9", GunCommand::RotateRight),
            ("KeyS", GunCommand::Fire),
            ("KeyW", GunCommand::FireStraight),
        ];
        Self(
            bindings
                .into_iter()
                .map(|(code, cmd)| (code.to_string(), cmd))
                .collect(),
        )
    }
}

impl KeyBindings {
    pub fn lookup(&self, code: &str) -> Option<GunCommand> {
        self.0.get(code).copied()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Clock ===
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Most ticks a single frame may run
    pub max_substeps: u32,

    // === Shapes ===
    /// Velocity multiplier per clock tick
    pub movement_offset: f32,
    /// Velocity multiplier per manual step
    pub step_offset: f32,
    /// Seed for new-shape velocities
    pub seed: u64,

    // === Projectiles ===
    pub projectile_offset: f32,
    pub drift_offset: f32,
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,

    // === Gun ===
    pub gun_width: f32,
    pub gun_height: f32,
    pub gun_bottom_margin: f32,
    pub muzzle_offset: f32,
    /// Pixels per move command
    pub gun_step: f32,
    /// Radians per turn command
    pub gun_turn: f32,

    pub key_bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,

            movement_offset: MOVEMENT_OFFSET,
            step_offset: STEP_OFFSET,
            seed: DEFAULT_SEED,

            projectile_offset: PROJECTILE_OFFSET,
            drift_offset: DRIFT_OFFSET,
            projectile_speed: PROJECTILE_SPEED,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,

            gun_width: GUN_WIDTH,
            gun_height: GUN_HEIGHT,
            gun_bottom_margin: GUN_BOTTOM_MARGIN,
            muzzle_offset: MUZZLE_OFFSET,
            gun_step: GUN_STEP,
            gun_turn: GUN_TURN,

            key_bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn projectile_size(&self) -> Vec2 {
        Vec2::new(self.projectile_width, self.projectile_height)
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "tick_interval_ms",
                reason: "must be greater than zero",
            });
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "max_substeps",
                reason: "must be greater than zero",
            });
        }

        let sizes = [
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("gun_width", self.gun_width),
            ("gun_height", self.gun_height),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a finite, non-negative size",
                });
            }
        }

        Ok(())
    }
}
