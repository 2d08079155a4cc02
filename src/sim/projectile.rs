//! Projectile integration and culling

use glam::Vec2;

use super::state::{Bounds, Projectile, ProjectileMotion};
use crate::settings::Settings;

/// Per-tick offsets for the two projectile motion rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileOffsets {
    /// Multiplier for aimed shots (`heading * speed * aimed`)
    pub aimed: f32,
    /// Straight-up distance for drift shots
    pub drift: f32,
}

impl ProjectileOffsets {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            aimed: settings.projectile_offset,
            drift: settings.drift_offset,
        }
    }
}

/// Move every projectile along its rule, then drop those past the top edge
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, offsets: ProjectileOffsets) {
    for p in projectiles.iter_mut() {
        match p.motion {
            ProjectileMotion::Aimed { heading } => {
                p.pos += heading * p.speed * offsets.aimed;
            }
            ProjectileMotion::Drift => {
                p.pos.y -= offsets.drift;
            }
        }
    }

    projectiles.retain(|p| p.pos.y >= 0.0);
}

/// Drop projectiles whose box lies entirely outside the left, right or
/// bottom edge. Returns how many were removed.
pub fn cull_escaped(projectiles: &mut Vec<Projectile>, bounds: Bounds) -> usize {
    let before = projectiles.len();
    projectiles.retain(|p| {
        let far = p.pos + p.size;
        !(far.x < 0.0 || p.pos.x > bounds.width || p.pos.y > bounds.height)
    });
    before - projectiles.len()
}

/// Total displacement of an aimed shot after `ticks` ticks
pub fn aimed_displacement(heading: Vec2, speed: f32, offset: f32, ticks: u32) -> Vec2 {
    heading * speed * offset * ticks as f32
}
