//! Bootstrap current driven by the pressure gradient.
//!
//! A reduced model: `j_bs = -mult * 0.1 * sqrt(rho) * d(ne * (Te + Ti)) / d(rho)`,
//! in MA/m^2. Contributes to the poloidal flux equation only.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::formulas;
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "bootstrap_current";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::Psi];

const BOOTSTRAP_COEFF: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapCurrentParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub bootstrap_mult: f64,
}

impl Default for BootstrapCurrentParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			bootstrap_mult: 1.0,
		}
	}
}

impl BootstrapCurrentParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::non_negative("bootstrap_mult", self.bootstrap_mult)
	}
}

crate::impl_runtime_params!(BootstrapCurrentParams);

#[derive(Debug)]
pub struct BootstrapCurrentSource {
	params: BootstrapCurrentParams,
}

impl Source for BootstrapCurrentSource {
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
		let pressure: Vec<f64> = profiles
			.ne
			.iter()
			.zip(&profiles.temp_el)
			.zip(&profiles.temp_ion)
			.map(|((ne, te), ti)| ne * (te + ti))
			.collect();
		let scale = -self.params.bootstrap_mult * BOOTSTRAP_COEFF;
		let current = grid
			.cell_centers()
			.zip(formulas::gradient(grid, &pressure))
			.map(|(rho, dp)| scale * rho.sqrt() * dp)
			.collect();
		Ok(SourceProfile::new().with(grid, AffectedProfile::Psi, current)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct BootstrapCurrentSourceBuilder {
	pub runtime_params: BootstrapCurrentParams,
}

crate::impl_build_source!(
	BootstrapCurrentSourceBuilder,
	params: BootstrapCurrentParams,
	output: BootstrapCurrentSource
);

impl BuildStandalone for BootstrapCurrentSourceBuilder {
	fn build(&self) -> Result<BootstrapCurrentSource, SourceError> {
		Ok(BootstrapCurrentSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(bootstrap_current, {
	name: SOURCE_NAME,
	source: BootstrapCurrentSource,
	params: BootstrapCurrentParams,
	builder: BootstrapCurrentSourceBuilder,
	links_back: false,
});
