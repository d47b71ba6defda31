use serde::{Deserialize, Serialize};

use crate::{Grid, ProfileError};

/// Evolved profile a source term contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectedProfile {
	/// Ion temperature equation (heating, MW/m^3).
	TempIon,
	/// Electron temperature equation (heating, MW/m^3).
	TempEl,
	/// Electron density equation (particles, 1e20 m^-3 s^-1).
	Ne,
	/// Poloidal flux equation (current density, MA/m^2).
	Psi,
}

impl AffectedProfile {
	pub const ALL: [Self; 4] = [Self::TempIon, Self::TempEl, Self::Ne, Self::Psi];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::TempIon => "temp_ion",
			Self::TempEl => "temp_el",
			Self::Ne => "ne",
			Self::Psi => "psi",
		}
	}
}

impl core::fmt::Display for AffectedProfile {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Cell-centred plasma state at one point in time.
///
/// Temperatures are in keV, density in 1e20 m^-3, current density in MA/m^2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreProfiles {
	pub temp_ion: Vec<f64>,
	pub temp_el: Vec<f64>,
	pub ne: Vec<f64>,
	pub psi: Vec<f64>,
	pub j_total: Vec<f64>,
}

impl CoreProfiles {
	/// Flat profiles with zero flux and current.
	pub fn flat(grid: &Grid, temp_ion: f64, temp_el: f64, ne: f64) -> Self {
		let n = grid.n_cells();
		Self {
			temp_ion: vec![temp_ion; n],
			temp_el: vec![temp_el; n],
			ne: vec![ne; n],
			psi: vec![0.0; n],
			j_total: vec![0.0; n],
		}
	}

	/// Peaked parabolic profiles `core * (1 - rho^2) + edge`.
	pub fn parabolic(grid: &Grid, core: &CoreProfiles, edge: &CoreProfiles) -> Self {
		let shape: Vec<f64> = grid.cell_centers().map(|rho| 1.0 - rho * rho).collect();
		let blend = |c: &[f64], e: &[f64]| -> Vec<f64> {
			shape
				.iter()
				.zip(c.iter().zip(e))
				.map(|(s, (c, e))| (c - e) * s + e)
				.collect()
		};
		Self {
			temp_ion: blend(&core.temp_ion, &edge.temp_ion),
			temp_el: blend(&core.temp_el, &edge.temp_el),
			ne: blend(&core.ne, &edge.ne),
			psi: blend(&core.psi, &edge.psi),
			j_total: blend(&core.j_total, &edge.j_total),
		}
	}

	/// Checks that every profile is sized to `grid`.
	pub fn validate(&self, grid: &Grid) -> Result<(), ProfileError> {
		let expected = grid.n_cells();
		for (profile, values) in [
			("temp_ion", &self.temp_ion),
			("temp_el", &self.temp_el),
			("ne", &self.ne),
			("psi", &self.psi),
			("j_total", &self.j_total),
		] {
			if values.len() != expected {
				return Err(ProfileError::ShapeMismatch {
					profile,
					expected,
					got: values.len(),
				});
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validate_reports_first_bad_profile() {
		let grid = Grid::new(3).unwrap();
		let mut profiles = CoreProfiles::flat(&grid, 1.0, 1.0, 1.0);
		profiles.ne.pop();

		assert_eq!(
			profiles.validate(&grid),
			Err(ProfileError::ShapeMismatch {
				profile: "ne",
				expected: 3,
				got: 2,
			})
		);
	}

	#[test]
	fn parabolic_reaches_edge_value_at_boundary() {
		let grid = Grid::new(100).unwrap();
		let core = CoreProfiles::flat(&grid, 10.0, 12.0, 1.0);
		let edge = CoreProfiles::flat(&grid, 0.2, 0.2, 0.3);
		let profiles = CoreProfiles::parabolic(&grid, &core, &edge);

		assert!(profiles.temp_el[0] > 11.9);
		assert!((profiles.temp_el[99] - 0.2).abs() < 0.2);
		assert!(profiles.validate(&grid).is_ok());
	}
}
