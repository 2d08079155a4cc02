//! UI-facing session
//!
//! Owns the scene, the clock and the half-finished placement gesture, and
//! turns toolbar clicks, canvas clicks, key presses and frame callbacks into
//! simulation calls. The renderer reads `SceneSnapshot`s between ticks.

use std::time::Duration;

use glam::Vec2;
use serde::Serialize;

use crate::settings::{GunCommand, Settings};
use crate::sim::{
    Bounds, ClockState, Color, HitReport, ProjectileId, Scene, ShapeId, ShapeKind, SimClock, step,
    tick,
};

/// Pending two-click placement
#[derive(Debug, Clone, Default)]
struct Placement {
    kind: Option<ShapeKind>,
    color: Color,
    anchor: Option<Vec2>,
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    /// Key not bound, or no gun yet
    Ignored,
    Moved { x: f32 },
    Rotated { angle: f32 },
    Fired(ProjectileId),
}

pub struct Session {
    settings: Settings,
    scene: Scene,
    clock: SimClock,
    placement: Placement,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let clock = SimClock::new(settings.tick_interval(), settings.max_substeps);
        Self {
            scene: Scene::new(settings.seed),
            clock,
            placement: Placement::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    // === Placement ===

    pub fn select_shape_kind(&mut self, kind: ShapeKind) {
        self.placement.kind = Some(kind);
    }

    pub fn select_color(&mut self, color: Color) {
        self.placement.color = color;
    }

    /// Canvas click. The first click anchors, the second commits a shape.
    ///
    /// Clicks are ignored until a shape kind has been chosen.
    pub fn pointer_down(&mut self, pos: Vec2) -> Option<ShapeId> {
        let kind = self.placement.kind?;

        let Some(anchor) = self.placement.anchor.take() else {
            self.placement.anchor = Some(pos);
            return None;
        };

        let (min, size) = match kind {
            ShapeKind::Circle => {
                // Anchor is the center, second click lands on the rim
                let radius = anchor.distance(pos);
                (anchor - Vec2::splat(radius), Vec2::splat(2.0 * radius))
            }
            ShapeKind::Rectangle => (anchor.min(pos), (pos - anchor).abs()),
        };

        let id = self
            .scene
            .spawn_shape(kind, min, size, self.placement.color);
        log::debug!(
            "placed {:?} {} at ({:.1}, {:.1}) size {:.1}x{:.1}",
            kind,
            id.0,
            min.x,
            min.y,
            size.x,
            size.y
        );
        Some(id)
    }

    // === Clock ===

    pub fn start(&mut self) {
        if self.clock.start() {
            log::info!("Simulation started");
        }
    }

    pub fn stop(&mut self) {
        if self.clock.stop() {
            log::info!("Simulation stopped at tick {}", self.scene.time_ticks);
        }
    }

    /// Single shape-only step; allowed whether or not the clock runs
    pub fn step(&mut self, bounds: Bounds) {
        step(&mut self.scene, bounds, &self.settings);
    }

    /// Frame callback: run whatever ticks are due. Returns how many ran.
    pub fn frame(&mut self, elapsed: Duration, bounds: Bounds) -> u32 {
        let due = self.clock.advance(elapsed);
        for _ in 0..due {
            self.tick(bounds);
        }
        due
    }

    /// Run one clock tick immediately, regardless of clock state
    pub fn tick(&mut self, bounds: Bounds) -> HitReport {
        tick(&mut self.scene, bounds, &self.settings)
    }

    // === Gun ===

    pub fn activate_gun(&mut self, bounds: Bounds) {
        self.scene.activate_gun(bounds, &self.settings);
        log::info!("Gun activated");
    }

    /// Key press; routed through the configured bindings
    pub fn key(&mut self, code: &str, bounds: Bounds) -> KeyOutcome {
        match self.settings.key_bindings.lookup(code) {
            Some(cmd) => self.command(cmd, bounds),
            None => KeyOutcome::Ignored,
        }
    }

    pub fn command(&mut self, cmd: GunCommand, bounds: Bounds) -> KeyOutcome {
        let settings = &self.settings;
        let Some(gun) = self.scene.gun.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match cmd {
            GunCommand::MoveLeft => {
                gun.translate(-settings.gun_step, bounds);
                KeyOutcome::Moved { x: gun.pos.x }
            }
            GunCommand::MoveRight => {
                gun.translate(settings.gun_step, bounds);
                KeyOutcome::Moved { x: gun.pos.x }
            }
            GunCommand::RotateLeft => {
                gun.rotate(-settings.gun_turn);
                KeyOutcome::Rotated { angle: gun.angle }
            }
            GunCommand::RotateRight => {
                gun.rotate(settings.gun_turn);
                KeyOutcome::Rotated { angle: gun.angle }
            }
            GunCommand::Fire => self
                .scene
                .fire(&self.settings)
                .map_or(KeyOutcome::Ignored, KeyOutcome::Fired),
            GunCommand::FireStraight => self
                .scene
                .fire_straight(&self.settings)
                .map_or(KeyOutcome::Ignored, KeyOutcome::Fired),
        }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::from(&self.scene)
    }
}

/// Read-only view of a shape for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeView {
    pub id: u32,
    pub kind: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GunView {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

/// Everything the renderer needs for one redraw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub tick: u64,
    pub shapes: Vec<ShapeView>,
    pub projectiles: Vec<ProjectileView>,
    pub gun: Option<GunView>,
}

impl From<&Scene> for SceneSnapshot {
    fn from(scene: &Scene) -> Self {
        Self {
            tick: scene.time_ticks,
            shapes: scene
                .shapes
                .iter()
                .map(|s| ShapeView {
                    id: s.id.0,
                    kind: s.kind,
                    x: s.pos.x,
                    y: s.pos.y,
                    width: s.size.x,
                    height: s.size.y,
                    color: s.color,
                })
                .collect(),
            projectiles: scene
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id.0,
                    x: p.pos.x,
                    y: p.pos.y,
                    width: p.size.x,
                    height: p.size.y,
                })
                .collect(),
            gun: scene.gun.as_ref().map(|g| GunView {
                x: g.pos.x,
                y: g.pos.y,
                angle: g.angle,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 400.0,
        height: 300.0,
    };

    #[test]
    fn test_clicks_ignored_without_kind() {
        let mut session = Session::new(Settings::default());
        assert_eq!(session.pointer_down(Vec2::new(10.0, 10.0)), None);
        assert_eq!(session.pointer_down(Vec2::new(20.0, 20.0)), None);
        assert!(session.scene().shapes.is_empty());

        // The ignored clicks must not leave an anchor behind
        session.select_shape_kind(ShapeKind::Rectangle);
        assert_eq!(session.pointer_down(Vec2::new(10.0, 10.0)), None);
        assert!(session.pointer_down(Vec2::new(30.0, 50.0)).is_some());
    }

    #[test]
    fn test_circle_from_center_and_rim() {
        let mut session = Session::new(Settings::default());
        session.select_shape_kind(ShapeKind::Circle);
        session.select_color(Color::Blue);
        session.pointer_down(Vec2::new(100.0, 100.0));
        let id = session.pointer_down(Vec2::new(120.0, 100.0));

        let shape = id.and_then(|id| session.scene().shape(id)).cloned();
        let shape = shape.expect("circle placed");
        assert_eq!(shape.kind, ShapeKind::Circle);
        assert_eq!(shape.pos, Vec2::new(80.0, 80.0));
        assert_eq!(shape.size, Vec2::new(40.0, 40.0));
        assert_eq!(shape.color, Color::Blue);
    }

    #[test]
    fn test_rectangle_from_any_corners() {
        let mut session = Session::new(Settings::default());
        session.select_shape_kind(ShapeKind::Rectangle);
        session.pointer_down(Vec2::new(50.0, 10.0));
        let id = session.pointer_down(Vec2::new(20.0, 40.0));

        let shape = id.and_then(|id| session.scene().shape(id)).cloned();
        let shape = shape.expect("rectangle placed");
        assert_eq!(shape.pos, Vec2::new(20.0, 10.0));
        assert_eq!(shape.size, Vec2::new(30.0, 30.0));
        assert_eq!(shape.color, Color::Black);
    }

    #[test]
    fn test_keys_ignored_before_gun() {
        let mut session = Session::new(Settings::default());
        assert_eq!(session.key("KeyS", BOUNDS), KeyOutcome::Ignored);
        assert!(session.scene().projectiles.is_empty());
    }

    #[test]
    fn test_key_bindings_drive_gun() {
        let mut session = Session::new(Settings::default());
        session.activate_gun(BOUNDS);

        assert_eq!(session.key("Numpad4", BOUNDS), KeyOutcome::Moved { x: 195.0 });
        assert_eq!(session.key("Numpad6", BOUNDS), KeyOutcome::Moved { x: 200.0 });
        assert!(matches!(
            session.key("Numpad9", BOUNDS),
            KeyOutcome::Rotated { .. }
        ));
        assert_eq!(session.key("KeyQ", BOUNDS), KeyOutcome::Ignored);
        assert_eq!(
            session.key("KeyS", BOUNDS),
            KeyOutcome::Fired(ProjectileId(1))
        );
    }

    #[test]
    fn test_reactivating_gun_resets_it() {
        let mut session = Session::new(Settings::default());
        session.activate_gun(BOUNDS);
        session.key("Numpad4", BOUNDS);
        session.key("Numpad7", BOUNDS);
        session.activate_gun(BOUNDS);

        let gun = session.snapshot().gun.expect("gun present");
        assert_eq!(gun.x, 200.0);
        assert_eq!(gun.angle, 0.0);
    }

    #[test]
    fn test_frame_runs_due_ticks_only_while_running() {
        let mut session = Session::new(Settings::default());
        assert_eq!(session.frame(Duration::from_millis(200), BOUNDS), 0);

        session.start();
        assert_eq!(session.clock_state(), ClockState::Running);
        assert_eq!(session.frame(Duration::from_millis(100), BOUNDS), 2);
        assert_eq!(session.snapshot().tick, 2);

        session.stop();
        assert_eq!(session.frame(Duration::from_millis(100), BOUNDS), 0);
        assert_eq!(session.snapshot().tick, 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = Session::new(Settings::default());
        session.select_shape_kind(ShapeKind::Rectangle);
        session.pointer_down(Vec2::new(0.0, 0.0));
        session.pointer_down(Vec2::new(10.0, 10.0));
        session.activate_gun(BOUNDS);

        let json = serde_json::to_value(session.snapshot()).expect("serialize");
        assert_eq!(json["shapes"][0]["kind"], "Rectangle");
        assert_eq!(json["shapes"][0]["width"], 10.0);
        assert_eq!(json["gun"]["angle"], 0.0);
    }
}
