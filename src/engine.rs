use glam::Vec2;

use crate::agent::AgentPool;
use crate::config::SimConfig;
use crate::debug::timer::{TickPhase, TickTimers};
use crate::pheromone::{Channel, PheromoneGrid};
use crate::spatial::{AgentSnapshot, SpatialHash};
use crate::steering::{flocking, gradient, obstacle};
use crate::vec2ext::Vec2Ext;
use crate::world::{Obstacles, ResourceKind, Resources};

/// Neighbor query radius for flocking.
const NEIGHBOR_RADIUS: f32 = 50.0;
/// Spatial cell size — 1x the query radius keeps queries to a 3x3 block.
const SPATIAL_CELL_SIZE: f32 = 50.0;
/// Pheromone deposited per agent per second.
const DEPOSIT_RATE: f32 = 240.0;
/// Obstacle avoidance weight. Fixed and high: dodging always wins.
const OBSTACLE_WEIGHT: f32 = 3.0;

/// Per-tick agent orchestration: spatial rebuild, pheromone deposits,
/// steering, integration, and the resource state machine.
///
/// All working buffers are preallocated at construction; a tick performs no
/// heap allocation once bucket capacities have warmed up.
pub struct AgentEngine {
    pub pool: AgentPool,
    grid: SpatialHash,
    snapshots: Vec<AgentSnapshot>,
    neighbor_buf: Vec<u32>,
    world_w: f32,
    world_h: f32,
}

impl AgentEngine {
    pub fn new(world_w: f32, world_h: f32, capacity: usize) -> Self {
        Self {
            pool: AgentPool::with_capacity(capacity),
            grid: SpatialHash::new(world_w, world_h, SPATIAL_CELL_SIZE),
            snapshots: Vec::with_capacity(capacity),
            neighbor_buf: Vec::with_capacity(64),
            world_w,
            world_h,
        }
    }

    /// One fixed simulation step for every active agent.
    pub fn update(
        &mut self,
        dt: f32,
        cfg: &SimConfig,
        pheromones: &mut PheromoneGrid,
        obstacles: &Obstacles,
        resources: &Resources,
        rng: &mut fastrand::Rng,
        timers: &mut TickTimers,
    ) {
        let Self {
            pool,
            grid,
            snapshots,
            neighbor_buf,
            world_w,
            world_h,
        } = self;
        let (world_w, world_h) = (*world_w, *world_h);

        // 1. Rebuild the spatial hash and snapshot cache from current
        //    positions. Stale the moment agents move, by design.
        timers.begin();
        grid.clear();
        snapshots.clear();
        for (i, agent) in pool.active_mut().iter_mut().enumerate() {
            agent.cell = grid.insert(agent.pos, i as u32).unwrap_or(u32::MAX);
            snapshots.push(AgentSnapshot {
                pos: agent.pos,
                vel: agent.vel,
            });
        }
        timers.end(TickPhase::SpatialRebuild);

        // 2. Deposit. Carriers lay ToHome, seekers lay ToFood, so each
        //    channel traces where one population has recently been.
        timers.begin();
        let deposit = DEPOSIT_RATE * dt;
        for agent in pool.active() {
            let channel = if agent.carrying {
                Channel::ToHome
            } else {
                Channel::ToFood
            };
            pheromones.add_density(agent.pos.x, agent.pos.y, channel, deposit);
        }
        timers.end(TickPhase::Deposit);

        // 3. Steering + integration.
        timers.begin();
        let flocking_on = !cfg.flocking_disabled();
        for i in 0..pool.len() {
            let agent = &mut pool.active_mut()[i];
            let max_speed = if cfg.agent_speed_limit > 0.0 {
                cfg.agent_speed_limit
            } else {
                agent.max_speed
            };
            let max_force = agent.max_force;
            let (pos, vel) = (agent.pos, agent.vel);
            let mut acc = agent.acc;

            if flocking_on {
                grid.query_radius(pos, NEIGHBOR_RADIUS, i as u32, neighbor_buf);
                let forces =
                    flocking::calculate(pos, vel, neighbor_buf, snapshots, max_speed, max_force);
                acc += forces.alignment * cfg.weight_alignment
                    + forces.cohesion * cfg.weight_cohesion
                    + forces.separation * cfg.weight_separation;
                agent.last_alignment = forces.alignment;
                agent.last_cohesion = forces.cohesion;
                agent.last_separation = forces.separation;
            }

            // Each state climbs the trail laid by the opposite state:
            // carrier trails emanate from sources, seeker trails from sinks.
            let channel = if agent.carrying {
                Channel::ToFood
            } else {
                Channel::ToHome
            };
            acc += gradient::follow(pos, vel, pheromones, channel, max_speed, max_force, rng)
                * cfg.weight_gradient;

            acc += obstacle::avoid(pos, vel, &obstacles.list, max_speed, max_force)
                * OBSTACLE_WEIGHT;

            agent.acc = acc;
        }
        timers.end(TickPhase::Steering);

        // 4. Integrate, wrap, and run the resource state machine.
        timers.begin();
        for agent in pool.active_mut() {
            let max_speed = if cfg.agent_speed_limit > 0.0 {
                cfg.agent_speed_limit
            } else {
                agent.max_speed
            };
            agent.vel = (agent.vel + agent.acc).limit(max_speed);
            agent.pos = (agent.pos + agent.vel).wrap(world_w, world_h);
            agent.acc = Vec2::ZERO;

            for resource in &resources.list {
                let r2 = resource.radius * resource.radius;
                if agent.pos.distance_squared(resource.pos) > r2 {
                    continue;
                }
                let transition = match resource.kind {
                    ResourceKind::Source => !agent.carrying,
                    ResourceKind::Sink => agent.carrying,
                };
                if transition {
                    agent.carrying = !agent.carrying;
                    // Instant about-face: retrace the inbound path and let
                    // the gradient take over on later ticks.
                    agent.vel = -agent.vel;
                    break;
                }
            }
        }
        timers.end(TickPhase::Integrate);
    }

    /// Renderer surface: the active agents as of the last pool mutation.
    pub fn agents(&self) -> &[crate::agent::Agent] {
        self.pool.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> (AgentEngine, SimConfig, PheromoneGrid, Obstacles, Resources) {
        (
            AgentEngine::new(200.0, 200.0, 64),
            SimConfig::default(),
            PheromoneGrid::new(200.0, 200.0, 8.0),
            Obstacles::new(),
            Resources::new(),
        )
    }

    fn tick(
        engine: &mut AgentEngine,
        cfg: &SimConfig,
        pheromones: &mut PheromoneGrid,
        obstacles: &Obstacles,
        resources: &Resources,
        rng: &mut fastrand::Rng,
    ) {
        let mut timers = TickTimers::new();
        engine.update(1.0 / 60.0, cfg, pheromones, obstacles, resources, rng, &mut timers);
    }

    #[test]
    fn positions_stay_in_bounds() {
        let (mut engine, cfg, mut pheromones, obstacles, resources) = harness();
        let mut rng = fastrand::Rng::with_seed(5);

        for i in 0..32 {
            let agent = engine.pool.spawn(Vec2::new(i as f32 * 6.0, 195.0)).unwrap();
            agent.vel = Vec2::new(1.5, 1.5);
        }
        for _ in 0..300 {
            tick(&mut engine, &cfg, &mut pheromones, &obstacles, &resources, &mut rng);
            for agent in engine.agents() {
                assert!(agent.pos.x >= 0.0 && agent.pos.x < 200.0, "{:?}", agent.pos);
                assert!(agent.pos.y >= 0.0 && agent.pos.y < 200.0, "{:?}", agent.pos);
            }
        }
    }

    #[test]
    fn seekers_deposit_to_food_channel() {
        let (mut engine, cfg, mut pheromones, obstacles, resources) = harness();
        let mut rng = fastrand::Rng::with_seed(5);

        engine.pool.spawn(Vec2::new(100.0, 100.0));
        tick(&mut engine, &cfg, &mut pheromones, &obstacles, &resources, &mut rng);

        assert!(pheromones.total(Channel::ToFood) > 0.0);
        assert_eq!(pheromones.total(Channel::ToHome), 0.0);
    }

    #[test]
    fn source_pickup_flips_state_and_velocity() {
        let (mut engine, cfg, mut pheromones, obstacles, mut resources) = harness();
        let mut rng = fastrand::Rng::with_seed(5);
        resources.add(ResourceKind::Source, 100.0, 100.0);

        let agent = engine.pool.spawn(Vec2::new(98.0, 100.0)).unwrap();
        agent.vel = Vec2::new(2.0, 0.0);

        tick(&mut engine, &cfg, &mut pheromones, &obstacles, &resources, &mut rng);

        let agent = engine.agents()[0];
        assert!(agent.carrying);
        // Velocity was reversed on pickup.
        assert!(agent.vel.x < 0.0, "vel = {:?}", agent.vel);
    }

    #[test]
    fn sink_dropoff_returns_to_seeking() {
        let (mut engine, cfg, mut pheromones, obstacles, mut resources) = harness();
        let mut rng = fastrand::Rng::with_seed(5);
        resources.add(ResourceKind::Sink, 100.0, 100.0);

        let agent = engine.pool.spawn(Vec2::new(100.0, 100.0)).unwrap();
        agent.carrying = true;

        tick(&mut engine, &cfg, &mut pheromones, &obstacles, &resources, &mut rng);
        assert!(!engine.agents()[0].carrying);
    }

    #[test]
    fn zero_weights_skip_flocking_cache() {
        let (mut engine, mut cfg, mut pheromones, obstacles, resources) = harness();
        let mut rng = fastrand::Rng::with_seed(5);
        cfg.weight_alignment = 0.0;
        cfg.weight_cohesion = 0.0;
        cfg.weight_separation = 0.0;

        engine.pool.spawn(Vec2::new(100.0, 100.0));
        engine.pool.spawn(Vec2::new(105.0, 100.0));
        tick(&mut engine, &cfg, &mut pheromones, &obstacles, &resources, &mut rng);

        // Flocking pass never ran, so the cached components stay zero even
        // with a neighbor in range.
        for agent in engine.agents() {
            assert_eq!(agent.last_alignment, Vec2::ZERO);
            assert_eq!(agent.last_separation, Vec2::ZERO);
        }
    }

    #[test]
    fn speed_stays_clamped() {
        let (mut engine, cfg, mut pheromones, obstacles, resources) = harness();
        let mut rng = fastrand::Rng::with_seed(5);

        let agent = engine.pool.spawn(Vec2::new(100.0, 100.0)).unwrap();
        agent.vel = Vec2::new(500.0, 0.0);

        tick(&mut engine, &cfg, &mut pheromones, &obstacles, &resources, &mut rng);
        assert!(engine.agents()[0].vel.length() <= cfg.agent_speed_limit + 1e-4);
    }
}
