//! Ohmic heating: resistive dissipation of the plasma current.
//!
//! Uses Spitzer resistivity, `eta = 1.65e-9 * z_eff * ln(Lambda) / Te^1.5`
//! (Ohm m, Te in keV), so `P = eta * j^2` with `j` in MA/m^2 gives MW/m^3
//! after the unit factor.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "ohmic";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::TempEl];

const SPITZER_COEFF: f64 = 1.65e-9;
const MIN_TEMP_KEV: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OhmicParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub coulomb_log: f64,
	pub z_eff: f64,
}

impl Default for OhmicParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			coulomb_log: 17.0,
			z_eff: 1.0,
		}
	}
}

impl OhmicParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::positive("coulomb_log", self.coulomb_log)?;
		ParamError::in_range("z_eff", self.z_eff, 1.0, 10.0)
	}
}

crate::impl_runtime_params!(OhmicParams);

#[derive(Debug)]
pub struct OhmicHeatSource {
	params: OhmicParams,
}

impl OhmicHeatSource {
	pub fn params(&self) -> &OhmicParams {
		&self.params
	}
}

impl Source for OhmicHeatSource {
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
		let prefactor = SPITZER_COEFF * self.params.z_eff * self.params.coulomb_log;
		let heating = profiles
			.temp_el
			.iter()
			.zip(&profiles.j_total)
			.map(|(te, j)| {
				let eta = prefactor / te.max(MIN_TEMP_KEV).powf(1.5);
				eta * j * j * 1e6
			})
			.collect();
		Ok(SourceProfile::new().with(grid, AffectedProfile::TempEl, heating)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct OhmicHeatSourceBuilder {
	pub runtime_params: OhmicParams,
}

crate::impl_build_source!(OhmicHeatSourceBuilder, params: OhmicParams, output: OhmicHeatSource);

impl BuildStandalone for OhmicHeatSourceBuilder {
	fn build(&self) -> Result<OhmicHeatSource, SourceError> {
		Ok(OhmicHeatSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(ohmic, {
	name: SOURCE_NAME,
	source: OhmicHeatSource,
	params: OhmicParams,
	builder: OhmicHeatSourceBuilder,
	links_back: false,
});
