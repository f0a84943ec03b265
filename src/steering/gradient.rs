use glam::Vec2;

use super::steer_toward;
use crate::pheromone::{Channel, PheromoneGrid};
use crate::vec2ext::Vec2Ext;

/// How far ahead of the agent each sensor sits.
const SENSOR_DISTANCE: f32 = 15.0;
/// Angular offset of the two side sensors.
const SENSOR_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
/// Samples at or below this read as "no signal".
const SIGNAL_FLOOR: f32 = 1e-3;
/// Wander strength when no signal is present, as a fraction of full force.
const WANDER_SCALE: f32 = 0.2;
/// Heading perturbation range for the wander force.
const WANDER_SPREAD: f32 = std::f32::consts::FRAC_PI_2;

/// Steer along the strongest of three pheromone samples ahead of the agent
/// (straight ahead and +/-45 degrees). Straight ahead wins ties, so a
/// uniform trail does not cause zig-zagging. When every sample is at the
/// signal floor, a weak randomly-perturbed wander force keeps the agent
/// exploring instead of coasting in a straight line forever.
pub fn follow(
    pos: Vec2,
    vel: Vec2,
    grid: &PheromoneGrid,
    channel: Channel,
    max_speed: f32,
    max_force: f32,
    rng: &mut fastrand::Rng,
) -> Vec2 {
    let heading = if vel == Vec2::ZERO {
        Vec2::from_angle(rng.f32() * std::f32::consts::TAU)
    } else {
        vel.normalize()
    };

    let ahead = pos + heading * SENSOR_DISTANCE;
    let left = pos + Vec2::from_angle(-SENSOR_ANGLE).rotate(heading) * SENSOR_DISTANCE;
    let right = pos + Vec2::from_angle(SENSOR_ANGLE).rotate(heading) * SENSOR_DISTANCE;

    let s_ahead = grid.sample(ahead.x, ahead.y, channel);
    let s_left = grid.sample(left.x, left.y, channel);
    let s_right = grid.sample(right.x, right.y, channel);

    if s_ahead <= SIGNAL_FLOOR && s_left <= SIGNAL_FLOOR && s_right <= SIGNAL_FLOOR {
        // No trail nearby: wander.
        let jitter = (rng.f32() - 0.5) * WANDER_SPREAD;
        let dir = Vec2::from_angle(jitter).rotate(heading);
        return steer_toward(dir, vel, max_speed, max_force).limit(max_force * WANDER_SCALE);
    }

    // Straight ahead wins ties against the side sensors.
    let target = if s_ahead >= s_left && s_ahead >= s_right {
        ahead
    } else if s_left > s_right {
        left
    } else {
        right
    };

    steer_toward(target - pos, vel, max_speed, max_force)
}
