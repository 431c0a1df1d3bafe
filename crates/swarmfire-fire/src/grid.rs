//! FireGrid: rectangular cellular-automaton grid holding fuel and intensity.

use serde::{Deserialize, Serialize};

use swarmfire_core::constants::{DEFAULT_CELL_SIZE_M, FIRE_EPSILON};
use swarmfire_core::error::EngineError;

/// A single grid cell's combustion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireCell {
    pub intensity: f64,
    pub fuel_density: f64,
    /// Informational only; not read by any control logic.
    pub temperature_k: f64,
    /// Tick at which the cell first ignited, if it ever has.
    pub ignition_time: Option<u64>,
}

impl FireCell {
    pub fn burning(&self) -> bool {
        self.intensity > FIRE_EPSILON
    }
}

/// Aggregate grid status: burning/burned-out counts and the hottest cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FireSummary {
    pub burning_count: u32,
    pub perimeter_count: u32,
    pub max_intensity: f64,
}

/// Fixed-size W×H fire grid, row-major. `intensity` never increases except
/// through [`FireGrid::ignite`] or a spread step; once a cell's
/// `fuel_density` reaches zero its intensity only decays.
#[derive(Debug, Clone)]
pub struct FireGrid {
    width: usize,
    height: usize,
    cell_size_m: f64,
    cells: Vec<FireCell>,
    pending_suppressions: Vec<(usize, usize, f64)>,
}

impl FireGrid {
    pub fn new(width: usize, height: usize, cell_size_m: f64, initial_fuel_density: f64) -> Self {
        let cells = vec![
            FireCell {
                intensity: 0.0,
                fuel_density: initial_fuel_density.clamp(0.0, 1.0),
                temperature_k: 288.0,
                ignition_time: None,
            };
            width * height
        ];
        Self {
            width,
            height,
            cell_size_m: if cell_size_m > 0.0 { cell_size_m } else { DEFAULT_CELL_SIZE_M },
            cells,
            pending_suppressions: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size_m(&self) -> f64 {
        self.cell_size_m
    }

    fn idx(&self, gx: usize, gy: usize) -> usize {
        gy * self.width + gx
    }

    pub fn cell(&self, gx: usize, gy: usize) -> Option<&FireCell> {
        if gx < self.width && gy < self.height {
            Some(&self.cells[self.idx(gx, gy)])
        } else {
            None
        }
    }

    fn cell_mut(&mut self, gx: usize, gy: usize) -> Option<&mut FireCell> {
        if gx < self.width && gy < self.height {
            let i = self.idx(gx, gy);
            Some(&mut self.cells[i])
        } else {
            None
        }
    }

    pub fn world_to_grid(&self, x_m: f64, y_m: f64) -> Option<(usize, usize)> {
        if x_m < 0.0 || y_m < 0.0 {
            return None;
        }
        let gx = (x_m / self.cell_size_m).floor() as usize;
        let gy = (y_m / self.cell_size_m).floor() as usize;
        if gx < self.width && gy < self.height {
            Some((gx, gy))
        } else {
            None
        }
    }

    /// Set a cell's intensity to `max(current, intensity)`. No-op if the
    /// cell has no remaining fuel.
    pub fn ignite(&mut self, x_m: f64, y_m: f64, intensity: f64, tick: u64) -> Result<(), EngineError> {
        let (gx, gy) = self
            .world_to_grid(x_m, y_m)
            .ok_or(EngineError::OutOfBounds { x: x_m, y: y_m })?;
        let cell = self.cell_mut(gx, gy).expect("bounds already checked");
        if cell.fuel_density <= 0.0 {
            return Ok(());
        }
        let was_burning = cell.burning();
        cell.intensity = cell.intensity.max(intensity.clamp(0.0, 1.0));
        if !was_burning && cell.burning() && cell.ignition_time.is_none() {
            cell.ignition_time = Some(tick);
        }
        Ok(())
    }

    /// Queue a suppression pulse. Applied at the next [`FireGrid::step`]
    /// boundary, between the spread and burndown passes.
    pub fn apply_suppression(&mut self, x_m: f64, y_m: f64, strength: f64) -> Result<(), EngineError> {
        let (gx, gy) = self
            .world_to_grid(x_m, y_m)
            .ok_or(EngineError::OutOfBounds { x: x_m, y: y_m })?;
        self.pending_suppressions.push((gx, gy, strength.clamp(0.0, 1.0)));
        Ok(())
    }

    pub(crate) fn drain_pending_suppressions(&mut self) -> Vec<(usize, usize, f64)> {
        std::mem::take(&mut self.pending_suppressions)
    }

    pub fn sample_intensity(&self, x_m: f64, y_m: f64) -> f64 {
        match self.world_to_grid(x_m, y_m) {
            Some((gx, gy)) => self.cell(gx, gy).map(|c| c.intensity).unwrap_or(0.0),
            None => 0.0,
        }
    }

    pub fn iter_burning(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.height).flat_map(move |gy| {
            (0..self.width).filter_map(move |gx| {
                let c = &self.cells[self.idx(gx, gy)];
                c.burning().then_some((gx, gy, c.intensity))
            })
        })
    }

    /// Burning cells, in row-major order, for the spread pass to iterate
    /// a stable snapshot over while mutating the grid underneath it.
    pub(crate) fn burning_snapshot(&self) -> Vec<(usize, usize, f64)> {
        self.iter_burning().collect()
    }

    fn is_perimeter(&self, gx: usize, gy: usize) -> bool {
        const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        NEIGHBORS.iter().any(|(dx, dy)| {
            let nx = gx as isize + dx;
            let ny = gy as isize + dy;
            if nx < 0 || ny < 0 {
                return true;
            }
            match self.cell(nx as usize, ny as usize) {
                Some(c) => !c.burning(),
                None => true,
            }
        })
    }

    pub fn summary(&self) -> FireSummary {
        let mut burning_count = 0u32;
        let mut perimeter_count = 0u32;
        let mut max_intensity = 0.0f64;
        for gy in 0..self.height {
            for gx in 0..self.width {
                let c = &self.cells[self.idx(gx, gy)];
                if c.burning() {
                    burning_count += 1;
                    max_intensity = max_intensity.max(c.intensity);
                    if self.is_perimeter(gx, gy) {
                        perimeter_count += 1;
                    }
                }
            }
        }
        FireSummary { burning_count, perimeter_count, max_intensity }
    }

    pub fn total_intensity(&self) -> f64 {
        self.cells.iter().map(|c| c.intensity).sum()
    }

    pub fn burned_out_count(&self) -> u32 {
        self.cells
            .iter()
            .filter(|c| c.fuel_density <= 0.0 && c.ignition_time.is_some())
            .count() as u32
    }

    pub(crate) fn apply_ignition(&mut self, gx: usize, gy: usize, intensity: f64, tick: u64) {
        if let Some(cell) = self.cell_mut(gx, gy) {
            if cell.fuel_density <= 0.0 {
                return;
            }
            let was_burning = cell.burning();
            cell.intensity = cell.intensity.max(intensity.clamp(0.0, 1.0));
            if !was_burning && cell.burning() && cell.ignition_time.is_none() {
                cell.ignition_time = Some(tick);
            }
        }
    }

    pub(crate) fn apply_burndown(&mut self, dt: f64) {
        const DECAY_BASE: f64 = 0.95;
        const FUEL_RATE: f64 = 0.01;
        for cell in self.cells.iter_mut() {
            if !cell.burning() {
                continue;
            }
            cell.intensity *= DECAY_BASE.powf(dt);
            cell.fuel_density = (cell.fuel_density - FUEL_RATE * cell.intensity * dt).max(0.0);
            if cell.intensity < FIRE_EPSILON {
                cell.intensity = 0.0;
            }
        }
    }

    pub(crate) fn apply_pending_suppressions(
        &mut self,
        pending: Vec<(usize, usize, f64)>,
        effectiveness: f64,
    ) {
        for (gx, gy, strength) in pending {
            if let Some(cell) = self.cell_mut(gx, gy) {
                cell.intensity *= 1.0 - effectiveness * strength;
                if cell.intensity < FIRE_EPSILON {
                    cell.intensity = 0.0;
                }
            }
        }
    }
}
