//! Electron cyclotron heating and current drive.
//!
//! Power is deposited as a Gaussian in `rho`. Driven current follows the
//! local heating scaled by `cd_efficiency * Te / ne`.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::formulas;
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "electron_cyclotron_source";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::TempEl, AffectedProfile::Psi];

const CURRENT_DRIVE_COEFF: f64 = 0.1;
const MIN_DENSITY: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectronCyclotronParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub total_power_mw: f64,
	pub gaussian_location: f64,
	pub gaussian_width: f64,
	/// Dimensionless current drive efficiency.
	pub cd_efficiency: f64,
}

impl Default for ElectronCyclotronParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			total_power_mw: 10.0,
			gaussian_location: 0.0,
			gaussian_width: 0.1,
			cd_efficiency: 0.2,
		}
	}
}

impl ElectronCyclotronParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::non_negative("total_power_mw", self.total_power_mw)?;
		ParamError::in_range("gaussian_location", self.gaussian_location, 0.0, 1.0)?;
		ParamError::positive("gaussian_width", self.gaussian_width)?;
		ParamError::non_negative("cd_efficiency", self.cd_efficiency)
	}
}

crate::impl_runtime_params!(ElectronCyclotronParams);

#[derive(Debug)]
pub struct ElectronCyclotronSource {
	params: ElectronCyclotronParams,
}

impl Source for ElectronCyclotronSource {
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
		let p = &self.params;
		let heating = formulas::gaussian(grid, p.gaussian_location, p.gaussian_width, p.total_power_mw);
		let current = heating
			.iter()
			.zip(&profiles.temp_el)
			.zip(&profiles.ne)
			.map(|((q, te), ne)| {
				p.cd_efficiency * te.max(0.0) / ne.max(MIN_DENSITY) * q * CURRENT_DRIVE_COEFF
			})
			.collect();
		Ok(SourceProfile::new()
			.with(grid, AffectedProfile::TempEl, heating)?
			.with(grid, AffectedProfile::Psi, current)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct ElectronCyclotronSourceBuilder {
	pub runtime_params: ElectronCyclotronParams,
}

crate::impl_build_source!(
	ElectronCyclotronSourceBuilder,
	params: ElectronCyclotronParams,
	output: ElectronCyclotronSource
);

impl BuildStandalone for ElectronCyclotronSourceBuilder {
	fn build(&self) -> Result<ElectronCyclotronSource, SourceError> {
		Ok(ElectronCyclotronSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(electron_cyclotron, {
	name: SOURCE_NAME,
	source: ElectronCyclotronSource,
	params: ElectronCyclotronParams,
	builder: ElectronCyclotronSourceBuilder,
	links_back: false,
});
