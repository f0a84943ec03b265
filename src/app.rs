use std::time::Duration;

use instant::Instant;

use crate::sim::Simulation;

/// Fixed simulation step (seconds per tick).
const TICK_RATE: f64 = 1.0 / 60.0;
/// Frame deltas above this are dropped outright instead of replayed —
/// catching up after a suspend would burn seconds of wall clock per frame.
const MAX_FRAME_DELTA: f64 = 0.25;
/// How often to log frame/tick stats (seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;
/// Scheduler nap between frames in the headless driver.
const FRAME_SLEEP: Duration = Duration::from_millis(4);

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
    ticks_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
            ticks_since_log: 0,
        }
    }

    fn record(&mut self, dt: f64, ticks: u32, timer_summary: &str) {
        self.frames_since_log += 1;
        self.ticks_since_log += ticks;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= STATS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            log::info!(
                "fps: {:.0} | tps: {:.0} | frame avg: {:.2}ms min: {:.2}ms max: {:.2}ms | {}",
                self.frames_since_log as f64 / elapsed,
                self.ticks_since_log as f64 / elapsed,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                timer_summary,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
            self.ticks_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed-timestep driver
// ---------------------------------------------------------------------------

/// Accumulator-driven loop around the simulation.
///
/// Each frame adds the wall-clock delta to an accumulator and runs fixed
/// steps while it holds a full tick, so simulation behavior is identical
/// whatever the display/callback rate. Rendering (out of scope here) would
/// run once per frame regardless of how many steps fired.
pub struct App {
    pub sim: Simulation,
    paused: bool,
    last_frame: Option<Instant>,
    accumulator: f64,
    stats: FrameStats,
}

impl App {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            paused: false,
            last_frame: None,
            accumulator: 0.0,
            stats: FrameStats::new(),
        }
    }

    /// One scheduler callback. Returns how many fixed steps ran.
    pub fn frame(&mut self, now: Instant) -> u32 {
        let dt = match self.last_frame {
            Some(last) => now.duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_frame = Some(now);

        if self.paused {
            return 0;
        }

        if dt > MAX_FRAME_DELTA {
            // Process was suspended or badly stalled. Drop the whole delta
            // rather than replaying a catch-up burst.
            log::warn!("frame delta {:.0}ms over limit, dropping", dt * 1000.0);
            return 0;
        }

        self.accumulator += dt;
        let mut ticks = 0u32;
        while self.accumulator >= TICK_RATE {
            self.sim.update(TICK_RATE as f32);
            self.accumulator -= TICK_RATE;
            ticks += 1;
        }

        self.stats.record(dt, ticks, &self.sim.timers.summary());
        ticks
    }

    /// Stop running fixed steps. An in-flight frame always completes.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        // Don't replay the pause gap as sim time.
        self.accumulator = 0.0;
        self.last_frame = None;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance exactly one fixed step while paused.
    pub fn step(&mut self) {
        if self.paused {
            self.sim.update(TICK_RATE as f32);
        }
    }
}

/// Headless driver: run frames forever with a short scheduler nap.
pub fn run() {
    let sim = Simulation::new(fastrand::u64(..));
    let mut app = App::new(sim);
    log::info!("Entering fixed-timestep loop ({}Hz)", (1.0 / TICK_RATE) as u32);

    loop {
        app.frame(Instant::now());
        std::thread::sleep(FRAME_SLEEP);
    }
}
