//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of UI concerns:
//! - Bounds are supplied by the caller every tick
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod clock;
pub mod collision;
pub mod motion;
pub mod projectile;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, Overlap, PushOut};
pub use clock::{ClockState, SimClock};
pub use collision::{Hit, HitReport, apply_hits, resolve_hits};
pub use motion::advance_shapes;
pub use projectile::{ProjectileOffsets, advance_projectiles, cull_escaped};
pub use state::{
    Bounds, Color, Gun, Projectile, ProjectileId, ProjectileMotion, Scene, Shape, ShapeId,
    ShapeKind,
};
pub use tick::{step, tick};
