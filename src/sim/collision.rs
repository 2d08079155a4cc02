//! Projectile vs shape hit-testing
//!
//! Each projectile stops at the first shape it overlaps (registry order).
//! Nothing is removed until every projectile has been tested, so two
//! projectiles overlapping the same shape in one tick both register a hit
//! and both are consumed.

use std::collections::BTreeSet;

use super::state::{Projectile, ProjectileId, Shape, ShapeId};

/// A single projectile-shape contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile: ProjectileId,
    pub shape: ShapeId,
}

/// Outcome of one hit-test pass
#[derive(Debug, Clone, Default)]
pub struct HitReport {
    /// Contacts in projectile order
    pub hits: Vec<Hit>,
}

impl HitReport {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Projectiles to remove
    pub fn projectiles(&self) -> BTreeSet<ProjectileId> {
        self.hits.iter().map(|h| h.projectile).collect()
    }

    /// Shapes to remove, each listed once even if hit several times
    pub fn shapes(&self) -> BTreeSet<ShapeId> {
        self.hits.iter().map(|h| h.shape).collect()
    }
}

/// Test every projectile against the shape registry without mutating either
pub fn resolve_hits(projectiles: &[Projectile], shapes: &[Shape]) -> HitReport {
    let mut report = HitReport::default();

    for p in projectiles {
        let bullet = p.aabb();
        if let Some(shape) = shapes.iter().find(|s| bullet.intersects(&s.aabb())) {
            report.hits.push(Hit {
                projectile: p.id,
                shape: shape.id,
            });
        }
    }

    report
}

/// Remove everything named in the report
pub fn apply_hits(report: &HitReport, projectiles: &mut Vec<Projectile>, shapes: &mut Vec<Shape>) {
    if report.is_empty() {
        return;
    }

    let dead_shapes = report.shapes();
    let dead_projectiles = report.projectiles();
    shapes.retain(|s| !dead_shapes.contains(&s.id));
    projectiles.retain(|p| !dead_projectiles.contains(&p.id));
}
