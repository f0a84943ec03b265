use instant::Instant;

/// Which phase of the simulation tick is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TickPhase {
    Pheromones = 0,
    SpatialRebuild = 1,
    Deposit = 2,
    Steering = 3,
    Integrate = 4,
}

impl TickPhase {
    pub const ALL: [TickPhase; 5] = [
        Self::Pheromones,
        Self::SpatialRebuild,
        Self::Deposit,
        Self::Steering,
        Self::Integrate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pheromones => "Pheromones",
            Self::SpatialRebuild => "Spatial",
            Self::Deposit => "Deposit",
            Self::Steering => "Steering",
            Self::Integrate => "Integrate",
        }
    }
}

/// Per-phase tick timing with exponential moving average smoothing.
/// Pure instrumentation; nothing in the sim reads these back.
pub struct TickTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; 5],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl TickTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 5],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: TickPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// One-line summary for the periodic stats log.
    pub fn summary(&self) -> String {
        let mut out = format!("tick {:.0}us [", self.total_us());
        for (i, phase) in TickPhase::ALL.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!(
                "{} {:.0}",
                phase.label(),
                self.durations_us[*phase as usize]
            ));
        }
        out.push(']');
        out
    }
}
