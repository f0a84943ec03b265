use glam::Vec2;

use crate::config::SimConfig;
use crate::debug::timer::{TickPhase, TickTimers};
use crate::engine::AgentEngine;
use crate::pheromone::{Channel, PheromoneGrid};
use crate::world::{Obstacles, ResourceKind, Resources};

/// World dimensions in simulation units.
pub const WORLD_W: f32 = 1280.0;
pub const WORLD_H: f32 = 720.0;
/// Agents spawned on init. Also the pool's hard capacity.
pub const TARGET_POPULATION: usize = 10_000;
/// Pheromone grid resolution (world units per cell).
const PHEROMONE_CELL_SIZE: f32 = 8.0;
/// Telemetry cadence in ticks.
const TELEMETRY_INTERVAL: u64 = 60;
/// How many random cells the coverage estimate samples.
const TELEMETRY_SAMPLES: usize = 64;
/// A sampled cell above this counts as "covered".
const TELEMETRY_THRESHOLD: f32 = 1.0;

/// Composition root: owns the field, the environment, and the agent engine,
/// and drives them in order each fixed step.
pub struct Simulation {
    pub engine: AgentEngine,
    pub pheromones: PheromoneGrid,
    pub obstacles: Obstacles,
    pub resources: Resources,
    pub config: SimConfig,
    pub timers: TickTimers,
    rng: fastrand::Rng,
    tick: u64,
    /// Fraction of sampled cells above the coverage threshold. Informational
    /// only — logged, readable by UI, consumed by no simulation logic.
    pub field_coverage: f32,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        let mut sim = Self {
            engine: AgentEngine::new(WORLD_W, WORLD_H, TARGET_POPULATION),
            pheromones: PheromoneGrid::new(WORLD_W, WORLD_H, PHEROMONE_CELL_SIZE),
            obstacles: Obstacles::new(),
            resources: Resources::new(),
            config: SimConfig::default(),
            timers: TickTimers::new(),
            rng: fastrand::Rng::with_seed(seed),
            tick: 0,
            field_coverage: 0.0,
        };
        sim.seed_world();
        sim
    }

    /// Default environment plus the full agent population, all from
    /// constants — `reset()` rebuilds exactly this.
    fn seed_world(&mut self) {
        self.resources
            .add(ResourceKind::Source, WORLD_W * 0.25, WORLD_H * 0.5);
        self.resources
            .add(ResourceKind::Sink, WORLD_W * 0.75, WORLD_H * 0.5);

        for _ in 0..TARGET_POPULATION {
            let pos = Vec2::new(self.rng.f32() * WORLD_W, self.rng.f32() * WORLD_H);
            let Some(agent) = self.engine.pool.spawn(pos) else {
                break;
            };
            let heading = self.rng.f32() * std::f32::consts::TAU;
            agent.vel = Vec2::from_angle(heading) * agent.max_speed;
        }
        log::info!(
            "Seeded world: {}/{} agents, {} resources",
            self.engine.pool.len(),
            self.engine.pool.capacity(),
            self.resources.list.len()
        );
    }

    /// One fixed step: field first, then agents, then telemetry.
    pub fn update(&mut self, dt: f32) {
        self.timers.begin();
        self.pheromones.update(dt, self.config.evaporation_rate);
        self.timers.end(TickPhase::Pheromones);

        self.engine.update(
            dt,
            &self.config,
            &mut self.pheromones,
            &self.obstacles,
            &self.resources,
            &mut self.rng,
            &mut self.timers,
        );

        self.tick += 1;
        if self.tick % TELEMETRY_INTERVAL == 0 {
            self.sample_coverage();
        }
    }

    /// Coarse "percentage of cells above threshold" estimate from a small
    /// random sample of the ToFood channel.
    fn sample_coverage(&mut self) {
        let cells = self.pheromones.channel_cells(Channel::ToFood);
        if cells.is_empty() {
            return;
        }
        let mut covered = 0usize;
        for _ in 0..TELEMETRY_SAMPLES {
            let idx = self.rng.usize(..cells.len());
            if cells[idx] > TELEMETRY_THRESHOLD {
                covered += 1;
            }
        }
        self.field_coverage = covered as f32 / TELEMETRY_SAMPLES as f32;
        let carrying = self
            .engine
            .agents()
            .iter()
            .filter(|a| a.carrying)
            .count();
        log::debug!(
            "tick {}: field coverage ~{:.0}% of {}x{} cells | carrying {}/{}",
            self.tick,
            self.field_coverage * 100.0,
            self.pheromones.cols(),
            self.pheromones.rows(),
            carrying,
            self.engine.pool.len()
        );
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    // -- Tool/UI command surface -------------------------------------------

    pub fn add_obstacle(&mut self, x: f32, y: f32, radius: f32) {
        self.obstacles.add(x, y, radius);
    }

    pub fn add_resource(&mut self, kind: ResourceKind, x: f32, y: f32) {
        self.resources.add(kind, x, y);
    }

    /// Circular erase brush: removes obstacles and resources under it and
    /// zeroes pheromone density in the affected area.
    pub fn erase_environment(&mut self, x: f32, y: f32, radius: f32) {
        self.obstacles.erase_within(x, y, radius);
        self.resources.erase_within(x, y, radius);
        self.pheromones.clear_area(x, y, radius);
    }

    /// Drop everything and reconstruct the initial condition. There is no
    /// save format — the world is fully reconstructible from constants.
    pub fn reset(&mut self) {
        self.engine.pool.clear();
        self.pheromones.clear();
        self.obstacles.clear();
        self.resources.clear();
        self.tick = 0;
        self.field_coverage = 0.0;
        self.seed_world();
        log::info!("Simulation reset");
    }
}
