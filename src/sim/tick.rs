//! Per-tick orchestration
//!
//! One clock tick runs, in order: shape motion, projectile advance,
//! hit-testing, deferred removal, and off-screen projectile culling.

use super::collision::{HitReport, apply_hits, resolve_hits};
use super::motion::advance_shapes;
use super::projectile::{ProjectileOffsets, advance_projectiles, cull_escaped};
use super::state::{Bounds, Scene};
use crate::settings::Settings;

/// Advance the scene by one clock tick
pub fn tick(scene: &mut Scene, bounds: Bounds, settings: &Settings) -> HitReport {
    scene.time_ticks += 1;

    advance_shapes(&mut scene.shapes, bounds, settings.movement_offset);
    advance_projectiles(
        &mut scene.projectiles,
        ProjectileOffsets::from_settings(settings),
    );

    let report = resolve_hits(&scene.projectiles, &scene.shapes);
    for hit in &report.hits {
        log::debug!(
            "tick {}: projectile {} hit shape {}",
            scene.time_ticks,
            hit.projectile.0,
            hit.shape.0
        );
    }
    apply_hits(&report, &mut scene.projectiles, &mut scene.shapes);

    let escaped = cull_escaped(&mut scene.projectiles, bounds);
    if escaped > 0 {
        log::debug!("tick {}: culled {} escaped projectiles", scene.time_ticks, escaped);
    }

    report
}

/// Manual single step: shapes only, with the smaller step offset
///
/// Projectiles are neither moved nor tested and the tick counter is left
/// alone.
pub fn step(scene: &mut Scene, bounds: Bounds, settings: &Settings) {
    advance_shapes(&mut scene.shapes, bounds, settings.step_offset);
}
