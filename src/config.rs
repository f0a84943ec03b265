/// Tunables the UI layer writes and the core reads each tick.
///
/// Plain value struct passed by reference into `Simulation::update` — the
/// core never subscribes to change notifications, it just reads the current
/// values every tick.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Fractional pheromone loss per second.
    pub evaporation_rate: f32,
    /// Speed cap in units per tick. Zero falls back to each agent's own cap.
    pub agent_speed_limit: f32,
    /// Flocking weights. When all three are zero the neighbor query and
    /// flocking pass are skipped entirely.
    pub weight_alignment: f32,
    pub weight_cohesion: f32,
    pub weight_separation: f32,
    /// Pheromone-gradient following weight.
    pub weight_gradient: f32,
    /// Renderer-only overlay toggles. Core logic never reads these.
    pub show_pheromones: bool,
    pub show_forces: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            evaporation_rate: 0.05,
            agent_speed_limit: 2.0,
            weight_alignment: 1.0,
            weight_cohesion: 1.0,
            weight_separation: 1.5,
            weight_gradient: 1.0,
            show_pheromones: false,
            show_forces: false,
        }
    }
}

impl SimConfig {
    /// True when every flocking component is disabled — lets the engine
    /// skip the neighbor query outright.
    pub fn flocking_disabled(&self) -> bool {
        self.weight_alignment == 0.0
            && self.weight_cohesion == 0.0
            && self.weight_separation == 0.0
    }
}
