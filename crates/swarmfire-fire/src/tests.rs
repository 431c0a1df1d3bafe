#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::grid::FireGrid;
    use crate::spread;
    use crate::wind::Wind;

    fn run_ticks(grid: &mut FireGrid, wind: &Wind, ticks: u32, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for tick in 0..ticks {
            spread::step(grid, wind, 0.1, 30.0, 0.9, tick as u64, &mut rng);
        }
    }

    #[test]
    fn fire_spread_sanity() {
        let mut grid = FireGrid::new(50, 50, 10.0, 1.0);
        grid.ignite(250.0, 250.0, 1.0, 0).unwrap();
        run_ticks(&mut grid, &Wind::calm(), 600, 42);

        let summary = grid.summary();
        assert!(
            summary.burning_count >= 20 && summary.burning_count <= 400,
            "expected 20..=400 burning cells, got {}",
            summary.burning_count
        );

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut n = 0.0;
        for (gx, gy, _) in grid.iter_burning() {
            sum_x += gx as f64;
            sum_y += gy as f64;
            n += 1.0;
        }
        if n > 0.0 {
            let centroid_x = sum_x / n;
            let centroid_y = sum_y / n;
            assert!((centroid_x - 25.0).abs() < 10.0, "centroid x drifted to {centroid_x}");
            assert!((centroid_y - 25.0).abs() < 10.0, "centroid y drifted to {centroid_y}");
        }
    }

    #[test]
    fn wind_bias_pushes_fire_downwind() {
        let mut calm = FireGrid::new(50, 50, 10.0, 1.0);
        calm.ignite(250.0, 250.0, 1.0, 0).unwrap();
        run_ticks(&mut calm, &Wind::calm(), 600, 42);
        let calm_centroid_x = centroid_x(&calm);

        let mut windy = FireGrid::new(50, 50, 10.0, 1.0);
        windy.ignite(250.0, 250.0, 1.0, 0).unwrap();
        let wind = Wind::new(5.0, 0.0);
        run_ticks(&mut windy, &wind, 600, 42);
        let windy_centroid_x = centroid_x(&windy);
        let windy_centroid_y = centroid_y(&windy);

        assert!(
            windy_centroid_x > calm_centroid_x,
            "wind-biased centroid ({windy_centroid_x}) should exceed calm centroid ({calm_centroid_x})"
        );
        assert!((windy_centroid_y - 25.0).abs() < 1.0 + 1e-6 || (windy_centroid_y - 25.0).abs() < 3.0);
    }

    fn centroid_x(grid: &FireGrid) -> f64 {
        let (mut sum, mut n) = (0.0, 0.0);
        for (gx, _, _) in grid.iter_burning() {
            sum += gx as f64;
            n += 1.0;
        }
        if n > 0.0 { sum / n } else { 25.0 }
    }

    fn centroid_y(grid: &FireGrid) -> f64 {
        let (mut sum, mut n) = (0.0, 0.0);
        for (_, gy, _) in grid.iter_burning() {
            sum += gy as f64;
            n += 1.0;
        }
        if n > 0.0 { sum / n } else { 25.0 }
    }

    #[test]
    fn fuel_exhaustion_is_monotone() {
        let mut grid = FireGrid::new(10, 10, 10.0, 0.2);
        grid.ignite(50.0, 50.0, 1.0, 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut last_total = f64::INFINITY;
        for tick in 0..200u64 {
            spread::step(&mut grid, &Wind::calm(), 0.1, 30.0, 0.9, tick, &mut rng);
            let total = grid.total_intensity();
            assert!(
                total <= last_total + 1e-9,
                "total intensity rose from {last_total} to {total} at tick {tick}"
            );
            last_total = total;
        }
    }

    #[test]
    fn suppression_reduces_intensity() {
        let mut grid = FireGrid::new(10, 10, 10.0, 1.0);
        grid.ignite(50.0, 50.0, 1.0, 0).unwrap();
        let before = grid.sample_intensity(50.0, 50.0);
        grid.apply_suppression(50.0, 50.0, 1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        spread::step(&mut grid, &Wind::calm(), 0.1, 30.0, 0.9, 0, &mut rng);
        let after = grid.sample_intensity(50.0, 50.0);
        assert!(after < before);
    }

    #[test]
    fn ignite_rejects_out_of_bounds() {
        let mut grid = FireGrid::new(10, 10, 10.0, 1.0);
        let err = grid.ignite(-5.0, 0.0, 1.0, 0);
        assert!(err.is_err());
        let err = grid.ignite(1_000.0, 1_000.0, 1.0, 0);
        assert!(err.is_err());
    }
}
