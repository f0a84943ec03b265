use glam::Vec2;

use super::steer_toward;
use crate::spatial::AgentSnapshot;

/// Neighbors closer than this push the agent away.
const DESIRED_SEPARATION: f32 = 20.0;

/// The three flocking components for one agent. Each is already a steering
/// force (clamped to `max_force`); weighting is the engine's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlockingForces {
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub separation: Vec2,
}

/// Compute alignment, cohesion and separation in a single pass over the
/// neighbor list. All three are zero when no qualifying neighbors exist.
pub fn calculate(
    pos: Vec2,
    vel: Vec2,
    neighbors: &[u32],
    snapshots: &[AgentSnapshot],
    max_speed: f32,
    max_force: f32,
) -> FlockingForces {
    if neighbors.is_empty() {
        return FlockingForces::default();
    }

    let mut vel_sum = Vec2::ZERO;
    let mut pos_sum = Vec2::ZERO;
    let mut sep_sum = Vec2::ZERO;
    let mut sep_count = 0u32;

    for &idx in neighbors {
        let other = snapshots[idx as usize];
        vel_sum += other.vel;
        pos_sum += other.pos;

        let offset = pos - other.pos;
        let dist = offset.length();
        if dist > 0.0 && dist < DESIRED_SEPARATION {
            // Weight inversely by distance: closer neighbors push harder.
            sep_sum += offset / (dist * dist);
            sep_count += 1;
        }
    }

    let count = neighbors.len() as f32;

    // Alignment: match the average neighbor velocity.
    let alignment = steer_toward(vel_sum / count, vel, max_speed, max_force);

    // Cohesion: steer toward the neighbor centroid.
    let cohesion = steer_toward(pos_sum / count - pos, vel, max_speed, max_force);

    // Separation: steer away from crowding neighbors only.
    let separation = if sep_count > 0 {
        steer_toward(sep_sum / sep_count as f32, vel, max_speed, max_force)
    } else {
        Vec2::ZERO
    };

    FlockingForces {
        alignment,
        cohesion,
        separation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(px: f32, py: f32, vx: f32, vy: f32) -> AgentSnapshot {
        AgentSnapshot {
            pos: Vec2::new(px, py),
            vel: Vec2::new(vx, vy),
        }
    }

    #[test]
    fn no_neighbors_means_no_force() {
        let f = calculate(Vec2::ZERO, Vec2::X, &[], &[], 2.0, 0.1);
        assert_eq!(f.alignment, Vec2::ZERO);
        assert_eq!(f.cohesion, Vec2::ZERO);
        assert_eq!(f.separation, Vec2::ZERO);
    }

    #[test]
    fn alignment_matches_neighbor_heading() {
        // Stationary agent among neighbors all moving +x: alignment points +x.
        let snaps = vec![snap(10.0, 0.0, 1.0, 0.0), snap(-10.0, 0.0, 1.0, 0.0)];
        let f = calculate(Vec2::ZERO, Vec2::ZERO, &[0, 1], &snaps, 2.0, 0.1);
        assert!(f.alignment.x > 0.0);
        assert!(f.alignment.y.abs() < 1e-5);
        assert!(f.alignment.length() <= 0.1 + 1e-5);
    }

    #[test]
    fn cohesion_pulls_toward_centroid() {
        let snaps = vec![snap(30.0, 0.0, 0.0, 0.0), snap(30.0, 10.0, 0.0, 0.0)];
        let f = calculate(Vec2::ZERO, Vec2::ZERO, &[0, 1], &snaps, 2.0, 0.1);
        // Centroid at (30, 5): force points up-right.
        assert!(f.cohesion.x > 0.0);
        assert!(f.cohesion.y > 0.0);
        // Too far away for separation to trigger.
        assert_eq!(f.separation, Vec2::ZERO);
    }

    #[test]
    fn separation_pushes_away_from_close_neighbor() {
        let snaps = vec![snap(5.0, 0.0, 0.0, 0.0)];
        let f = calculate(Vec2::ZERO, Vec2::ZERO, &[0], &snaps, 2.0, 0.1);
        // Neighbor is 5 units to the right: push left.
        assert!(f.separation.x < 0.0);
    }

    #[test]
    fn forces_respect_max_force() {
        let snaps = vec![snap(1.0, 0.0, 100.0, 0.0)];
        let f = calculate(Vec2::ZERO, Vec2::new(-100.0, 0.0), &[0], &snaps, 2.0, 0.1);
        assert!(f.alignment.length() <= 0.1 + 1e-5);
        assert!(f.cohesion.length() <= 0.1 + 1e-5);
        assert!(f.separation.length() <= 0.1 + 1e-5);
    }
}
