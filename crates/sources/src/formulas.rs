//! Deposition shapes shared by the built-in sources.

use torus_profiles::Grid;


/// Rescales `shape` so that it integrates to `total` over `rho`.
///
/// A shape with zero integral yields zeros.
pub fn normalize(grid: &Grid, shape: Vec<f64>, total: f64) -> Vec<f64> {
	let integral = grid.integrate(&shape);
	if integral <= 0.0 || !integral.is_finite() {
		return grid.zeros();
	}
	let scale = total / integral;
	shape.into_iter().map(|v| v * scale).collect()
}

/// Gaussian centred on `center` with standard deviation `width`, integrating to `total`.
pub fn gaussian(grid: &Grid, center: f64, width: f64, total: f64) -> Vec<f64> {
	let shape = grid
		.cell_centers()
		.map(|rho| (-(rho - center).powi(2) / (2.0 * width * width)).exp())
		.collect();
	normalize(grid, shape, total)
}

/// Exponential decaying inward from the edge over `decay_length`, integrating to `total`.
pub fn edge_exponential(grid: &Grid, decay_length: f64, total: f64) -> Vec<f64> {
	let shape = grid
		.cell_centers()
		.map(|rho| (-(1.0 - rho) / decay_length).exp())
		.collect();
	normalize(grid, shape, total)
}

/// Radial derivative on cell centres: one-sided at the ends, central inside.
pub fn gradient(grid: &Grid, values: &[f64]) -> Vec<f64> {
	let n = values.len();
	let drho = grid.drho();
	if n < 2 {
		return vec![0.0; n];
	}
	(0..n)
		.map(|i| match i {
			0 => (values[1] - values[0]) / drho,
			i if i == n - 1 => (values[n - 1] - values[n - 2]) / drho,
			i => (values[i + 1] - values[i - 1]) / (2.0 * drho),
		})
		.collect()
}
