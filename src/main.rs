//! Bounce Arena entry point
//!
//! Headless native driver: scripts a few placements and gun commands, runs
//! the clock on a fixed sleep loop and prints one JSON snapshot per frame.

use std::path::PathBuf;
use std::time::Instant;

use bounce_arena::Session;
use bounce_arena::Settings;
use bounce_arena::sim::{Bounds, Color, ShapeKind};
use glam::Vec2;

/// Env var naming a settings file when none is passed on the command line
const SETTINGS_ENV: &str = "BOUNCE_ARENA_SETTINGS";

/// Frames to run before exiting
const DEMO_FRAMES: u32 = 200;

fn settings_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(SETTINGS_ENV).ok())
        .map(PathBuf::from)
}

fn place(session: &mut Session, kind: ShapeKind, color: Color, a: Vec2, b: Vec2) {
    session.select_shape_kind(kind);
    session.select_color(color);
    session.pointer_down(a);
    session.pointer_down(b);
}

fn main() {
    env_logger::init();
    log::info!("Bounce Arena (headless) starting...");

    let settings = Settings::load_or_default(settings_path().as_deref());
    let interval = settings.tick_interval();
    let bounds = Bounds::new(640.0, 480.0);
    let mut session = Session::new(settings);

    place(
        &mut session,
        ShapeKind::Circle,
        Color::Red,
        Vec2::new(120.0, 120.0),
        Vec2::new(150.0, 120.0),
    );
    place(
        &mut session,
        ShapeKind::Rectangle,
        Color::Green,
        Vec2::new(300.0, 80.0),
        Vec2::new(380.0, 140.0),
    );
    place(
        &mut session,
        ShapeKind::Circle,
        Color::Yellow,
        Vec2::new(480.0, 200.0),
        Vec2::new(480.0, 240.0),
    );

    session.activate_gun(bounds);
    session.start();

    let mut last = Instant::now();
    for frame in 0..DEMO_FRAMES {
        std::thread::sleep(interval);
        let now = Instant::now();
        session.frame(now - last, bounds);
        last = now;

        // Sweep the gun left and keep firing
        match frame % 20 {
            0 => {
                session.key("Numpad7", bounds);
            }
            5 => {
                session.key("KeyS", bounds);
            }
            10 => {
                session.key("KeyW", bounds);
            }
            15 => {
                session.key("Numpad4", bounds);
            }
            _ => {}
        }

        match serde_json::to_string(&session.snapshot()) {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("failed to serialize snapshot: {e}"),
        }

        if session.scene().shapes.is_empty() {
            log::info!("All shapes destroyed after {} frames", frame + 1);
            break;
        }
    }

    session.stop();
    // One manual step to show the shape-only path
    session.step(bounds);
    log::info!(
        "Finished with {} shapes and {} projectiles",
        session.scene().shapes.len(),
        session.scene().projectiles.len()
    );
}
