/// Density ceiling per cell. Deposits saturate here, never wrap.
pub const MAX_DENSITY: f32 = 1000.0;
/// Diffusion coefficient feeding the implicit solve.
const DIFFUSION_RATE: f32 = 0.0001;
/// Gauss-Seidel sweeps per update. Four is plenty for a field that only
/// needs to look smooth at 60Hz.
const RELAX_ITERATIONS: usize = 4;
/// Values below this snap to exactly zero after evaporation, keeping
/// denormal floats out of the hot loop.
const DENSITY_EPSILON: f32 = 1e-4;

/// The two independent pheromone channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    ToHome = 0,
    ToFood = 1,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::ToHome, Channel::ToFood];
}

/// One scalar density field plus its scratch buffer for the implicit solve.
struct Field {
    cells: Vec<f32>,
    scratch: Vec<f32>,
}

/// Dual-channel discretized pheromone field.
///
/// Diffusion uses an implicit relaxation scheme rather than an explicit
/// finite-difference step: the explicit form needs impractically small
/// timesteps to stay stable at interactive rates, while the implicit solve
/// is unconditionally stable at dt = 1/60.
pub struct PheromoneGrid {
    cols: usize,
    rows: usize,
    cell_size: f32,
    inv_cell_size: f32,
    fields: [Field; 2],
}

impl PheromoneGrid {
    pub fn new(world_w: f32, world_h: f32, cell_size: f32) -> Self {
        let cols = (world_w / cell_size).ceil().max(1.0) as usize;
        let rows = (world_h / cell_size).ceil().max(1.0) as usize;
        let field = || Field {
            cells: vec![0.0; cols * rows],
            scratch: vec![0.0; cols * rows],
        };
        Self {
            cols,
            rows,
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            fields: [field(), field()],
        }
    }

    fn cell_index(&self, x: f32, y: f32) -> Option<usize> {
        let cx = (x * self.inv_cell_size).floor() as i32;
        let cy = (y * self.inv_cell_size).floor() as i32;
        if cx < 0 || cy < 0 || cx >= self.cols as i32 || cy >= self.rows as i32 {
            return None;
        }
        Some(cy as usize * self.cols + cx as usize)
    }

    /// Add density at a world position, saturating at `MAX_DENSITY`.
    /// Out-of-bounds deposits are dropped.
    pub fn add_density(&mut self, x: f32, y: f32, channel: Channel, amount: f32) {
        if let Some(idx) = self.cell_index(x, y) {
            let cell = &mut self.fields[channel as usize].cells[idx];
            *cell = (*cell + amount).min(MAX_DENSITY);
        }
    }

    /// Sample a channel at a world position. Out of bounds reads as zero.
    pub fn sample(&self, x: f32, y: f32, channel: Channel) -> f32 {
        match self.cell_index(x, y) {
            Some(idx) => self.fields[channel as usize].cells[idx],
            None => 0.0,
        }
    }

    /// One diffusion + evaporation step for both channels.
    ///
    /// Per channel: swap buffer roles (current state becomes the solve
    /// source), run a fixed number of Gauss-Seidel sweeps of
    /// `x = (x0 + a * sum(neighbors)) / (1 + 4a)` against zero Dirichlet
    /// boundaries — the field does not wrap at world edges — then apply
    /// exponential evaporation with an epsilon floor.
    pub fn update(&mut self, dt: f32, evaporation_rate: f32) {
        let a = dt * DIFFUSION_RATE * (self.cols * self.rows) as f32;
        let decay = (1.0 - evaporation_rate * dt).max(0.0);
        let cols = self.cols;
        let rows = self.rows;

        for field in &mut self.fields {
            field.scratch.copy_from_slice(&field.cells);
            let x0 = &field.scratch;
            let x = &mut field.cells;

            for _ in 0..RELAX_ITERATIONS {
                for cy in 0..rows {
                    for cx in 0..cols {
                        let i = cy * cols + cx;
                        let left = if cx > 0 { x[i - 1] } else { 0.0 };
                        let right = if cx + 1 < cols { x[i + 1] } else { 0.0 };
                        let up = if cy > 0 { x[i - cols] } else { 0.0 };
                        let down = if cy + 1 < rows { x[i + cols] } else { 0.0 };
                        x[i] = (x0[i] + a * (left + right + up + down)) / (1.0 + 4.0 * a);
                    }
                }
            }

            for cell in x.iter_mut() {
                *cell *= decay;
                if *cell < DENSITY_EPSILON {
                    *cell = 0.0;
                }
            }
        }
    }

    /// Zero every cell in both channels. Storage retained.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.cells.fill(0.0);
            field.scratch.fill(0.0);
        }
    }

    /// Zero all cells within `radius` of a world position, both channels.
    /// Used by the erase brush.
    pub fn clear_area(&mut self, x: f32, y: f32, radius: f32) {
        let r2 = radius * radius;
        for cy in 0..self.rows {
            for cx in 0..self.cols {
                let wx = (cx as f32 + 0.5) * self.cell_size;
                let wy = (cy as f32 + 0.5) * self.cell_size;
                let dx = wx - x;
                let dy = wy - y;
                if dx * dx + dy * dy <= r2 {
                    let i = cy * self.cols + cx;
                    for field in &mut self.fields {
                        field.cells[i] = 0.0;
                    }
                }
            }
        }
    }

    /// Read-only cell array for one channel (renderer surface).
    pub fn channel_cells(&self, channel: Channel) -> &[f32] {
        &self.fields[channel as usize].cells
    }

    /// Total mass in one channel. Telemetry and tests only.
    pub fn total(&self, channel: Channel) -> f32 {
        self.fields[channel as usize].cells.iter().sum()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn deposit_saturates_at_max() {
        let mut grid = PheromoneGrid::new(100.0, 100.0, 10.0);
        grid.add_density(50.0, 50.0, Channel::ToFood, MAX_DENSITY - 1.0);
        grid.add_density(50.0, 50.0, Channel::ToFood, 500.0);
        assert_eq!(grid.sample(50.0, 50.0, Channel::ToFood), MAX_DENSITY);
    }

    #[test]
    fn out_of_bounds_is_zero_and_dropped() {
        let mut grid = PheromoneGrid::new(100.0, 100.0, 10.0);
        grid.add_density(-5.0, 50.0, Channel::ToHome, 10.0);
        assert_eq!(grid.sample(-5.0, 50.0, Channel::ToHome), 0.0);
        assert_eq!(grid.sample(200.0, 200.0, Channel::ToHome), 0.0);
        assert_eq!(grid.total(Channel::ToHome), 0.0);
    }

    #[test]
    fn channels_are_independent() {
        let mut grid = PheromoneGrid::new(100.0, 100.0, 10.0);
        grid.add_density(50.0, 50.0, Channel::ToHome, 100.0);
        assert_eq!(grid.sample(50.0, 50.0, Channel::ToFood), 0.0);
        assert_eq!(grid.sample(50.0, 50.0, Channel::ToHome), 100.0);
    }

    #[test]
    fn single_deposit_spreads_and_loses_mass() {
        // Resolution-4 grid, 500 units dropped at (100,100), one update at
        // the default evaporation rate.
        let mut grid = PheromoneGrid::new(800.0, 600.0, 4.0);
        grid.add_density(100.0, 100.0, Channel::ToFood, 500.0);
        grid.update(DT, 0.05);

        let center = grid.sample(100.0, 100.0, Channel::ToFood);
        assert!(center > 0.0 && center < 500.0, "center = {center}");

        // At least one 4-neighbor picked up density it previously lacked.
        let neighbors = [
            grid.sample(96.0, 100.0, Channel::ToFood),
            grid.sample(104.0, 100.0, Channel::ToFood),
            grid.sample(100.0, 96.0, Channel::ToFood),
            grid.sample(100.0, 104.0, Channel::ToFood),
        ];
        assert!(neighbors.iter().any(|&n| n > 0.0), "neighbors = {neighbors:?}");
    }

    #[test]
    fn mass_decays_monotonically_to_zero() {
        let mut grid = PheromoneGrid::new(200.0, 200.0, 10.0);
        grid.add_density(100.0, 100.0, Channel::ToHome, 500.0);

        let mut prev = grid.total(Channel::ToHome);
        for _ in 0..2000 {
            grid.update(DT, 1.0);
            let total = grid.total(Channel::ToHome);
            assert!(total <= prev + 1e-3, "mass grew: {prev} -> {total}");
            prev = total;
        }
        // Epsilon floor drives every cell to exactly zero eventually.
        assert_eq!(grid.total(Channel::ToHome), 0.0);
    }

    #[test]
    fn epsilon_floor_snaps_tiny_values() {
        let mut grid = PheromoneGrid::new(100.0, 100.0, 10.0);
        grid.add_density(50.0, 50.0, Channel::ToFood, 1e-5);
        grid.update(DT, 0.05);
        assert_eq!(grid.sample(50.0, 50.0, Channel::ToFood), 0.0);
    }

    #[test]
    fn clear_area_only_zeroes_brush() {
        let mut grid = PheromoneGrid::new(100.0, 100.0, 10.0);
        grid.add_density(15.0, 15.0, Channel::ToFood, 100.0);
        grid.add_density(85.0, 85.0, Channel::ToFood, 100.0);
        grid.clear_area(15.0, 15.0, 12.0);
        assert_eq!(grid.sample(15.0, 15.0, Channel::ToFood), 0.0);
        assert!(grid.sample(85.0, 85.0, Channel::ToFood) > 0.0);
    }
}
