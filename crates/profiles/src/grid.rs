use serde::{Deserialize, Serialize};

use crate::ProfileError;


/// Uniform cell-centred grid over the normalized radius `rho` in `[0, 1]`.
///
/// Serializes as its cell count; deserializing goes through [`Grid::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Grid {
	n_cells: usize,
}

impl Grid {
	/// Creates a grid with `n_cells` equally sized cells.
	pub fn new(n_cells: usize) -> Result<Self, ProfileError> {
		if n_cells == 0 {
			return Err(ProfileError::EmptyGrid);
		}
		Ok(Self { n_cells })
	}

	/// Number of cells.
	#[inline]
	pub fn n_cells(&self) -> usize {
		self.n_cells
	}

	/// Cell width.
	#[inline]
	pub fn drho(&self) -> f64 {
		1.0 / self.n_cells as f64
	}

	/// Cell centre coordinates, innermost first.
	pub fn cell_centers(&self) -> impl Iterator<Item = f64> + '_ {
		let drho = self.drho();
		(0..self.n_cells).map(move |i| (i as f64 + 0.5) * drho)
	}

	/// Face coordinates, `n_cells + 1` values from 0 to 1.
	pub fn faces(&self) -> impl Iterator<Item = f64> + '_ {
		let drho = self.drho();
		(0..=self.n_cells).map(move |i| i as f64 * drho)
	}

	/// Returns a profile of zeros sized to this grid.
	pub fn zeros(&self) -> Vec<f64> {
		vec![0.0; self.n_cells]
	}

	/// Integrates a cell-centred profile over `rho`.
	pub fn integrate(&self, values: &[f64]) -> f64 {
		values.iter().sum::<f64>() * self.drho()
	}
}

impl TryFrom<usize> for Grid {
	type Error = ProfileError;

	fn try_from(n_cells: usize) -> Result<Self, ProfileError> {
		Self::new(n_cells)
	}
}

impl From<Grid> for usize {
	fn from(grid: Grid) -> usize {
		grid.n_cells
	}
}
