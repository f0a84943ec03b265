use glam::Vec2;

/// Per-agent state captured at hash-rebuild time.
/// Steering reads these instead of the live pool so every force pass sees
/// neighbors as they were at the start of the tick.
#[derive(Debug, Clone, Copy)]
pub struct AgentSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Bounded uniform grid for radius-limited neighbor queries.
///
/// Cell size should be ~1x the largest query radius so a query touches at
/// most a 3x3 block. Rebuilt from scratch every tick; buckets keep their
/// allocations across rebuilds.
pub struct SpatialHash {
    cell_size: f32,
    inv_cell_size: f32,
    cols: usize,
    rows: usize,
    /// Each bucket holds (agent index, position). Pre-allocated, cleared
    /// each rebuild.
    buckets: Vec<Vec<(u32, Vec2)>>,
}

impl SpatialHash {
    pub fn new(world_w: f32, world_h: f32, cell_size: f32) -> Self {
        let cols = (world_w / cell_size).ceil().max(1.0) as usize;
        let rows = (world_h / cell_size).ceil().max(1.0) as usize;
        let mut buckets = Vec::with_capacity(cols * rows);
        for _ in 0..cols * rows {
            // Pre-allocate each bucket to avoid allocs during rebuild.
            buckets.push(Vec::with_capacity(8));
        }
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cols,
            rows,
            buckets,
        }
    }

    /// Clear all buckets. Call at start of each rebuild.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear(); // Keeps allocation.
        }
    }

    /// Insert an agent at the given position. Returns the bucket index so the
    /// caller can cache it; out-of-bounds positions are dropped and yield
    /// `None` (the agent is unqueryable until repositioned in-bounds).
    pub fn insert(&mut self, pos: Vec2, index: u32) -> Option<u32> {
        let cx = (pos.x * self.inv_cell_size).floor() as i32;
        let cy = (pos.y * self.inv_cell_size).floor() as i32;
        if cx < 0 || cy < 0 || cx >= self.cols as i32 || cy >= self.rows as i32 {
            return None;
        }
        let cell = cy as usize * self.cols + cx as usize;
        self.buckets[cell].push((index, pos));
        Some(cell as u32)
    }

    /// Exact-radius query: every inserted agent within Euclidean distance
    /// `radius` of `center`, excluding `ignore`. Matches are appended to the
    /// caller-supplied `out` buffer (cleared first), which makes buffer reuse
    /// across queries explicit instead of a hidden aliasing hazard.
    pub fn query_radius(&self, center: Vec2, radius: f32, ignore: u32, out: &mut Vec<u32>) {
        out.clear();
        let r2 = radius * radius;
        let min_cx = (((center.x - radius) * self.inv_cell_size).floor() as i32).max(0);
        let min_cy = (((center.y - radius) * self.inv_cell_size).floor() as i32).max(0);
        let max_cx =
            (((center.x + radius) * self.inv_cell_size).floor() as i32).min(self.cols as i32 - 1);
        let max_cy =
            (((center.y + radius) * self.inv_cell_size).floor() as i32).min(self.rows as i32 - 1);

        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell = cy as usize * self.cols + cx as usize;
                for &(index, pos) in &self.buckets[cell] {
                    if index != ignore && pos.distance_squared(center) <= r2 {
                        out.push(index);
                    }
                }
            }
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
}
