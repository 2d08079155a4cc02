//! Shape motion: integration, wall bounces and shape-vs-shape push-out
//!
//! Shapes are moved one at a time in registry order and written back
//! immediately, so a shape later in the registry collides against the
//! already-moved positions of earlier ones. Results are therefore
//! order-dependent within a tick.

use glam::Vec2;

use super::aabb::{Aabb, PushOut};
use super::state::{Bounds, Shape};

/// Advance every shape by `velocity * offset`, bouncing off walls and
/// each other
pub fn advance_shapes(shapes: &mut [Shape], bounds: Bounds, offset: f32) {
    for i in 0..shapes.len() {
        let (mut pos, mut vel) = {
            let shape = &shapes[i];
            (shape.pos + shape.vel * offset, shape.vel)
        };
        let size = shapes[i].size;

        bounce_off_walls(&mut pos, &mut vel, size, bounds);

        for (j, other) in shapes.iter().enumerate() {
            if j == i {
                continue;
            }
            push_out(&mut pos, &mut vel, size, &other.aabb());
        }

        // A push-out can shove a shape past a wall; keep it inside
        pos = pos.min(bounds.max_origin(size)).max(Vec2::ZERO);

        let shape = &mut shapes[i];
        shape.pos = pos;
        shape.vel = vel;
    }
}

/// Reflect and clamp per axis when the tentative box touches or crosses a wall
fn bounce_off_walls(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, bounds: Bounds) {
    let max = bounds.max_origin(size);

    if pos.x + size.x >= bounds.width || pos.x <= 0.0 {
        vel.x = -vel.x;
        pos.x = pos.x.min(max.x).max(0.0);
    }

    if pos.y + size.y >= bounds.height || pos.y <= 0.0 {
        vel.y = -vel.y;
        pos.y = pos.y.min(max.y).max(0.0);
    }
}

/// Separate the moving box from `other` along the shallowest overlap
///
/// Exact ties between depths leave the position and velocity untouched.
fn push_out(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, other: &Aabb) {
    let moving = Aabb::new(*pos, size);
    if !moving.intersects(other) {
        return;
    }

    match moving.overlap(other).min_push() {
        Some((PushOut::Left, depth)) => {
            pos.x -= depth;
            vel.x = -vel.x;
        }
        Some((PushOut::Right, depth)) => {
            pos.x += depth;
            vel.x = -vel.x;
        }
        Some((PushOut::Up, depth)) => {
            pos.y -= depth;
            vel.y = -vel.y;
        }
        Some((PushOut::Down, depth)) => {
            pos.y += depth;
            vel.y = -vel.y;
        }
        None => {}
    }
}
