pub mod flocking;
pub mod gradient;
pub mod obstacle;

use glam::Vec2;

use crate::vec2ext::Vec2Ext;

/// Classic Reynolds steering: desired velocity at full speed toward `dir`,
/// minus current velocity, clamped to the force budget.
fn steer_toward(dir: Vec2, vel: Vec2, max_speed: f32, max_force: f32) -> Vec2 {
    if dir == Vec2::ZERO {
        return Vec2::ZERO;
    }
    (dir.with_length(max_speed) - vel).limit(max_force)
}
