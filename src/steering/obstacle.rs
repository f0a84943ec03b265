use glam::Vec2;

use super::steer_toward;
use crate::vec2ext::Vec2Ext;
use crate::world::Obstacle;

/// Lookahead distance along the current velocity.
const LOOKAHEAD: f32 = 20.0;

/// Steer away from the nearest obstacle whose body contains the lookahead
/// point. A linear scan is fine at the obstacle counts this sim runs with.
/// Clear path means zero force; only one obstacle is dodged per tick.
pub fn avoid(
    pos: Vec2,
    vel: Vec2,
    obstacles: &[Obstacle],
    max_speed: f32,
    max_force: f32,
) -> Vec2 {
    let ahead = pos + vel.with_length(LOOKAHEAD);

    let mut nearest: Option<&Obstacle> = None;
    let mut nearest_d2 = f32::MAX;
    for obstacle in obstacles {
        if ahead.distance_squared(obstacle.pos) <= obstacle.radius * obstacle.radius {
            let d2 = pos.distance_squared(obstacle.pos);
            if d2 < nearest_d2 {
                nearest_d2 = d2;
                nearest = Some(obstacle);
            }
        }
    }

    match nearest {
        Some(obstacle) => steer_toward(pos - obstacle.pos, vel, max_speed, max_force),
        None => Vec2::ZERO,
    }
}
