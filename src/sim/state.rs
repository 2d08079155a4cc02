//! Scene state and core simulation types
//!
//! Everything a tick reads or writes lives here. The scene is owned by a
//! single session and is never shared.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::heading_from_angle;
use crate::settings::Settings;

/// Stable handle of a shape in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Stable handle of a live projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Shape kinds the toolbar can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rectangle,
}

/// Outline colors offered by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    #[default]
    Black,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Black => "Black",
        }
    }

    /// Map a picker item name to a color; anything unknown draws black
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "red" => Color::Red,
            "green" => Color::Green,
            "blue" => Color::Blue,
            "yellow" => Color::Yellow,
            _ => Color::Black,
        }
    }
}

/// Size of the play area, read from the drawing surface each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest allowed top-left coordinate for a box of `size`
    ///
    /// Pinned at zero when the box is larger than the bounds.
    #[inline]
    pub fn max_origin(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            (self.width - size.x).max(0.0),
            (self.height - size.y).max(0.0),
        )
    }
}

/// A placed shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height, never negative
    pub size: Vec2,
    pub color: Color,
    pub vel: Vec2,
}

impl Shape {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// How a projectile travels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileMotion {
    /// Fired along the gun's heading at fire time
    Aimed { heading: Vec2 },
    /// Legacy bullet stream: constant upward drift
    Drift,
}

/// A live projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    pub motion: ProjectileMotion,
    pub speed: f32,
}

impl Projectile {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// The player's gun, riding the bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gun {
    /// Top-left corner; y stays fixed once placed
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, accumulates without wraparound
    pub angle: f32,
}

impl Gun {
    /// Place a fresh gun with its left edge at mid-width, near the bottom
    pub fn new(bounds: Bounds, settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(
                bounds.width / 2.0,
                bounds.height - settings.gun_bottom_margin,
            ),
            size: Vec2::new(settings.gun_width, settings.gun_height),
            angle: 0.0,
        }
    }

    /// Turn the gun; no clamping or normalization
    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    /// Slide along the bottom edge, staying inside the bounds
    pub fn translate(&mut self, dx: f32, bounds: Bounds) {
        let max_x = bounds.max_origin(self.size).x;
        self.pos.x = (self.pos.x + dx).min(max_x).max(0.0);
    }

    /// Where new projectiles appear
    pub fn muzzle(&self, settings: &Settings) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0,
            self.pos.y - settings.muzzle_offset,
        )
    }

    /// Build an aimed projectile from the current angle
    pub fn fire(&self, id: ProjectileId, settings: &Settings) -> Projectile {
        Projectile {
            id,
            pos: self.muzzle(settings),
            size: settings.projectile_size(),
            motion: ProjectileMotion::Aimed {
                heading: heading_from_angle(self.angle),
            },
            speed: settings.projectile_speed,
        }
    }

    /// Build a straight-up drift projectile
    pub fn fire_straight(&self, id: ProjectileId, settings: &Settings) -> Projectile {
        Projectile {
            id,
            pos: self.muzzle(settings),
            size: settings.projectile_size(),
            motion: ProjectileMotion::Drift,
            speed: settings.projectile_speed,
        }
    }
}

/// Complete scene owned by one session
#[derive(Debug, Clone)]
pub struct Scene {
    /// Shape registry in insertion order
    pub shapes: Vec<Shape>,
    /// Live projectiles in fire order
    pub projectiles: Vec<Projectile>,
    pub gun: Option<Gun>,
    /// Clock ticks run so far
    pub time_ticks: u64,
    rng: Pcg32,
    next_shape_id: u32,
    next_projectile_id: u32,
}

impl Scene {
    pub fn new(seed: u64) -> Self {
        Self {
            shapes: Vec::new(),
            projectiles: Vec::new(),
            gun: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_shape_id: 1,
            next_projectile_id: 1,
        }
    }

    /// Register a shape with an explicit velocity
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        pos: Vec2,
        size: Vec2,
        color: Color,
        vel: Vec2,
    ) -> ShapeId {
        let id = ShapeId(self.next_shape_id);
        self.next_shape_id += 1;
        self.shapes.push(Shape {
            id,
            kind,
            pos,
            size: size.max(Vec2::ZERO),
            color,
            vel,
        });
        id
    }

    /// Register a shape with a random velocity in [-1, 1) per axis
    pub fn spawn_shape(&mut self, kind: ShapeKind, pos: Vec2, size: Vec2, color: Color) -> ShapeId {
        let vel = self.random_velocity();
        self.add_shape(kind, pos, size, color, vel)
    }

    fn random_velocity(&mut self) -> Vec2 {
        let x: f32 = self.rng.random();
        let y: f32 = self.rng.random();
        Vec2::new(x * 2.0 - 1.0, y * 2.0 - 1.0)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Replace any existing gun with a fresh one
    pub fn activate_gun(&mut self, bounds: Bounds, settings: &Settings) {
        self.gun = Some(Gun::new(bounds, settings));
    }

    /// Fire an aimed shot; no-op without a gun
    pub fn fire(&mut self, settings: &Settings) -> Option<ProjectileId> {
        let id = ProjectileId(self.next_projectile_id);
        let projectile = self.gun.as_ref()?.fire(id, settings);
        self.next_projectile_id += 1;
        self.projectiles.push(projectile);
        Some(id)
    }

    /// Fire a straight-up drift shot; no-op without a gun
    pub fn fire_straight(&mut self, settings: &Settings) -> Option<ProjectileId> {
        let id = ProjectileId(self.next_projectile_id);
        let projectile = self.gun.as_ref()?.fire_straight(id, settings);
        self.next_projectile_id += 1;
        self.projectiles.push(projectile);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("Red"), Color::Red);
        assert_eq!(Color::from_name("  yellow "), Color::Yellow);
        assert_eq!(Color::from_name("Magenta"), Color::Black);
        assert_eq!(Color::from_name(""), Color::Black);
    }

    #[test]
    fn test_shape_ids_follow_insertion_order() {
        let mut scene = Scene::new(1);
        let a = scene.spawn_shape(ShapeKind::Circle, Vec2::ZERO, Vec2::splat(10.0), Color::Red);
        let b = scene.spawn_shape(ShapeKind::Rectangle, Vec2::ZERO, Vec2::splat(10.0), Color::Blue);
        assert!(a < b);
        assert_eq!(scene.shapes[0].id, a);
        assert_eq!(scene.shapes[1].id, b);
    }

    #[test]
    fn test_random_velocity_range_and_determinism() {
        let mut s1 = Scene::new(42);
        let mut s2 = Scene::new(42);
        for _ in 0..100 {
            let v1 = s1.random_velocity();
            let v2 = s2.random_velocity();
            assert_eq!(v1, v2);
            assert!((-1.0..1.0).contains(&v1.x));
            assert!((-1.0..1.0).contains(&v1.y));
        }
    }

    #[test]
    fn test_negative_size_is_clamped() {
        let mut scene = Scene::new(1);
        let id = scene.add_shape(
            ShapeKind::Rectangle,
            Vec2::ZERO,
            Vec2::new(-5.0, 3.0),
            Color::Black,
            Vec2::ZERO,
        );
        assert_eq!(scene.shape(id).map(|s| s.size), Some(Vec2::new(0.0, 3.0)));
    }

    #[test]
    fn test_gun_translate_clamps() {
        let settings = Settings::default();
        let bounds = Bounds::new(200.0, 200.0);
        let mut gun = Gun::new(bounds, &settings);
        assert_eq!(gun.pos, Vec2::new(100.0, 170.0));

        gun.translate(-500.0, bounds);
        assert_eq!(gun.pos.x, 0.0);

        gun.translate(500.0, bounds);
        assert_eq!(gun.pos.x, 200.0 - settings.gun_width);
    }

    #[test]
    fn test_gun_angle_is_unbounded() {
        let settings = Settings::default();
        let mut gun = Gun::new(Bounds::new(200.0, 200.0), &settings);
        for _ in 0..100 {
            gun.rotate(0.1);
        }
        assert!(gun.angle > std::f32::consts::TAU);
    }

    #[test]
    fn test_fire_without_gun_is_noop() {
        let settings = Settings::default();
        let mut scene = Scene::new(1);
        assert_eq!(scene.fire(&settings), None);
        assert!(scene.projectiles.is_empty());
    }

    #[test]
    fn test_fire_spawns_at_muzzle() {
        let settings = Settings::default();
        let mut scene = Scene::new(1);
        scene.activate_gun(Bounds::new(200.0, 200.0), &settings);

        let id = scene.fire(&settings);
        assert_eq!(id, Some(ProjectileId(1)));
        let p = &scene.projectiles[0];
        assert_eq!(p.pos.x, 100.0 + settings.gun_width / 2.0);
        assert_eq!(p.pos.y, 170.0 - settings.muzzle_offset);
        assert!(matches!(p.motion, ProjectileMotion::Aimed { .. }));
    }
}
