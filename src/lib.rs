//! Bounce Arena - shapes bouncing in a box, and a gun to shoot them down
//!
//! Core modules:
//! - `sim`: Simulation (shape motion, projectiles, hit-testing, clock)
//! - `session`: UI-facing facade (placement gestures, key bindings, snapshots)
//! - `settings`: Data-driven tuning and runtime configuration

pub mod session;
pub mod settings;
pub mod sim;

pub use session::{SceneSnapshot, Session};
pub use settings::{KeyBindings, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Tick period of the simulation clock (20 Hz)
    pub const TICK_INTERVAL_MS: u64 = 50;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Shape offset applied by a clock tick
    pub const MOVEMENT_OFFSET: f32 = 6.0;
    /// Shape offset applied by a manual single step
    pub const STEP_OFFSET: f32 = 2.0;

    /// Aimed projectile offset per tick
    pub const PROJECTILE_OFFSET: f32 = 5.0;
    /// Straight-up drift per tick for the legacy bullet stream
    pub const DRIFT_OFFSET: f32 = 10.0;
    /// Aimed projectile speed multiplier
    pub const PROJECTILE_SPEED: f32 = 1.0;
    /// Projectile bounding box (a "|" glyph)
    pub const PROJECTILE_WIDTH: f32 = 6.0;
    pub const PROJECTILE_HEIGHT: f32 = 32.0;

    /// Gun bounding box (an "A" glyph)
    pub const GUN_WIDTH: f32 = 16.0;
    pub const GUN_HEIGHT: f32 = 32.0;
    /// Distance from the bottom edge to the gun's top
    pub const GUN_BOTTOM_MARGIN: f32 = 30.0;
    /// Projectiles spawn this far above the gun's top
    pub const MUZZLE_OFFSET: f32 = 20.0;
    /// Gun translation per move command (pixels)
    pub const GUN_STEP: f32 = 5.0;
    /// Gun rotation per turn command (radians)
    pub const GUN_TURN: f32 = 0.1;

    /// Default RNG seed for shape velocities
    pub const DEFAULT_SEED: u64 = 0x5eed_ba11;
}

/// Unit heading for a gun angle (radians, counter-clockwise, screen y down)
#[inline]
pub fn heading_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}
