//! Bremsstrahlung radiation loss from the electrons.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "bremsstrahlung_heat_sink";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::TempEl];

/// MW/m^3 for `ne` in 1e20 m^-3 and `Te` in keV.
const BREMS_COEFF: f64 = 5.35e-3;
const ELECTRON_REST_ENERGY_KEV: f64 = 511.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BremsstrahlungParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub z_eff: f64,
	pub use_relativistic_correction: bool,
}

impl Default for BremsstrahlungParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			z_eff: 1.0,
			use_relativistic_correction: false,
		}
	}
}

impl BremsstrahlungParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::in_range("z_eff", self.z_eff, 1.0, 10.0)
	}
}

crate::impl_runtime_params!(BremsstrahlungParams);

/// Radiated power, reported as a negative electron heat source.
#[derive(Debug)]
pub struct BremsstrahlungHeatSink {
	params: BremsstrahlungParams,
}

impl BremsstrahlungHeatSink {
	// Stott's fit for the relativistic enhancement.
	fn relativistic_correction(&self, te: f64) -> f64 {
		let x = te / ELECTRON_REST_ENERGY_KEV;
		(1.0 + 2.0 * x) * (1.0 + (2.0 / self.params.z_eff) * (1.0 - 1.0 / (1.0 + x)))
	}
}

impl Source for BremsstrahlungHeatSink {
	fn name(&self) -> &'static str {
		SOURCE_NAME
	}

	fn affected_profiles(&self) -> &'static [AffectedProfile] {
		AFFECTED
	}

	fn source_params(&self) -> &SourceParams {
		&self.params.base
	}

	fn model(&self, grid: &Grid, profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		let loss = profiles
			.ne
			.iter()
			.zip(&profiles.temp_el)
			.map(|(ne, te)| {
				let te = te.max(0.0);
				let mut p = BREMS_COEFF * self.params.z_eff * ne * ne * te.sqrt();
				if self.params.use_relativistic_correction {
					p *= self.relativistic_correction(te);
				}
				-p
			})
			.collect();
		Ok(SourceProfile::new().with(grid, AffectedProfile::TempEl, loss)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct BremsstrahlungHeatSinkBuilder {
	pub runtime_params: BremsstrahlungParams,
}

crate::impl_build_source!(
	BremsstrahlungHeatSinkBuilder,
	params: BremsstrahlungParams,
	output: BremsstrahlungHeatSink
);

impl BuildStandalone for BremsstrahlungHeatSinkBuilder {
	fn build(&self) -> Result<BremsstrahlungHeatSink, SourceError> {
		Ok(BremsstrahlungHeatSink {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(bremsstrahlung, {
	name: SOURCE_NAME,
	source: BremsstrahlungHeatSink,
	params: BremsstrahlungParams,
	builder: BremsstrahlungHeatSinkBuilder,
	links_back: false,
});
