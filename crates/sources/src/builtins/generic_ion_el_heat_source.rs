//! Generic auxiliary heating split between ions and electrons.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::formulas;
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "generic_ion_el_heat_source";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::TempIon, AffectedProfile::TempEl];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericIonElHeatParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub gaussian_location: f64,
	pub gaussian_width: f64,
	pub total_power_mw: f64,
	/// Electron share of `total_power_mw`; ions take the rest.
	pub el_heat_fraction: f64,
}

impl Default for GenericIonElHeatParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			gaussian_location: 0.0,
			gaussian_width: 0.25,
			total_power_mw: 120.0,
			el_heat_fraction: 0.66667,
		}
	}
}

impl GenericIonElHeatParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::in_range("gaussian_location", self.gaussian_location, 0.0, 1.0)?;
		ParamError::positive("gaussian_width", self.gaussian_width)?;
		ParamError::non_negative("total_power_mw", self.total_power_mw)?;
		ParamError::in_range("el_heat_fraction", self.el_heat_fraction, 0.0, 1.0)
	}
}

crate::impl_runtime_params!(GenericIonElHeatParams);

#[derive(Debug)]
pub struct GenericIonElHeatSource {
	params: GenericIonElHeatParams,
}

impl GenericIonElHeatSource {
	pub fn params(&self) -> &GenericIonElHeatParams {
		&self.params
	}
}

impl Source for GenericIonElHeatSource {
	fn name(&self) -> &'static str {
		SOURCE_NAME
	}

	fn affected_profiles(&self) -> &'static [AffectedProfile] {
		AFFECTED
	}

	fn source_params(&self) -> &SourceParams {
		&self.params.base
	}

	fn model(&self, grid: &Grid, _profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		let p = &self.params;
		let total = formulas::gaussian(grid, p.gaussian_location, p.gaussian_width, p.total_power_mw);
		let electrons = total.iter().map(|q| p.el_heat_fraction * q).collect();
		let ions = total.iter().map(|q| (1.0 - p.el_heat_fraction) * q).collect();
		Ok(SourceProfile::new()
			.with(grid, AffectedProfile::TempIon, ions)?
			.with(grid, AffectedProfile::TempEl, electrons)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct GenericIonElHeatSourceBuilder {
	pub runtime_params: GenericIonElHeatParams,
}

crate::impl_build_source!(
	GenericIonElHeatSourceBuilder,
	params: GenericIonElHeatParams,
	output: GenericIonElHeatSource
);

impl BuildStandalone for GenericIonElHeatSourceBuilder {
	fn build(&self) -> Result<GenericIonElHeatSource, SourceError> {
		Ok(GenericIonElHeatSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(generic_ion_el_heat, {
	name: SOURCE_NAME,
	source: GenericIonElHeatSource,
	params: GenericIonElHeatParams,
	builder: GenericIonElHeatSourceBuilder,
	links_back: false,
});
