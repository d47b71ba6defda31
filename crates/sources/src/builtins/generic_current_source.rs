//! Externally driven current with a Gaussian profile.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::formulas;
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "generic_current_source";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::Psi];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericCurrentParams {
	#[serde(flatten)]
	pub base: SourceParams,
	/// Total driven current in MA.
	pub total: f64,
	pub gaussian_location: f64,
	pub gaussian_width: f64,
}

impl Default for GenericCurrentParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			total: 3.0,
			gaussian_location: 0.4,
			gaussian_width: 0.05,
		}
	}
}

impl GenericCurrentParams {
	fn check(&self) -> Result<(), ParamError> {
		if !self.total.is_finite() {
			return Err(ParamError::new("total", "must be finite"));
		}
		ParamError::in_range("gaussian_location", self.gaussian_location, 0.0, 1.0)?;
		ParamError::positive("gaussian_width", self.gaussian_width)
	}
}

crate::impl_runtime_params!(GenericCurrentParams);

#[derive(Debug)]
pub struct GenericCurrentSource {
	params: GenericCurrentParams,
}

impl Source for GenericCurrentSource {
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
		let current = formulas::gaussian(grid, p.gaussian_location, p.gaussian_width, p.total);
		Ok(SourceProfile::new().with(grid, AffectedProfile::Psi, current)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct GenericCurrentSourceBuilder {
	pub runtime_params: GenericCurrentParams,
}

crate::impl_build_source!(
	GenericCurrentSourceBuilder,
	params: GenericCurrentParams,
	output: GenericCurrentSource
);

impl BuildStandalone for GenericCurrentSourceBuilder {
	fn build(&self) -> Result<GenericCurrentSource, SourceError> {
		Ok(GenericCurrentSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(generic_current, {
	name: SOURCE_NAME,
	source: GenericCurrentSource,
	params: GenericCurrentParams,
	builder: GenericCurrentSourceBuilder,
	links_back: false,
});
