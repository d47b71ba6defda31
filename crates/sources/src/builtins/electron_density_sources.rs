//! Particle sources for the electron density equation.
//!
//! Rates are in 1e20 particles per second per unit `rho`.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::formulas;
use crate::params::SourceParams;
use crate::source::Source;

pub const GENERIC_PARTICLE_SOURCE_NAME: &str = "generic_particle_source";
pub const GAS_PUFF_SOURCE_NAME: &str = "gas_puff_source";
pub const PELLET_SOURCE_NAME: &str = "pellet_source";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::Ne];

fn density_profile(grid: &Grid, values: Vec<f64>) -> Result<SourceProfile, EvalError> {
	Ok(SourceProfile::new().with(grid, AffectedProfile::Ne, values)?)
}

// Generic particle source

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericParticleParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub deposition_location: f64,
	pub particle_width: f64,
	pub s_total: f64,
}

impl Default for GenericParticleParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			deposition_location: 0.0,
			particle_width: 0.25,
			s_total: 2.05,
		}
	}
}

impl GenericParticleParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::in_range("deposition_location", self.deposition_location, 0.0, 1.0)?;
		ParamError::positive("particle_width", self.particle_width)?;
		ParamError::non_negative("s_total", self.s_total)
	}
}

crate::impl_runtime_params!(GenericParticleParams);

/// Gaussian particle deposition.
#[derive(Debug)]
pub struct GenericParticleSource {
	params: GenericParticleParams,
}

impl Source for GenericParticleSource {
	fn name(&self) -> &'static str {
		GENERIC_PARTICLE_SOURCE_NAME
	}

	fn affected_profiles(&self) -> &'static [AffectedProfile] {
		AFFECTED
	}

	fn source_params(&self) -> &SourceParams {
		&self.params.base
	}

	fn model(&self, grid: &Grid, _profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		let p = &self.params;
		density_profile(
			grid,
			formulas::gaussian(grid, p.deposition_location, p.particle_width, p.s_total),
		)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct GenericParticleSourceBuilder {
	pub runtime_params: GenericParticleParams,
}

crate::impl_build_source!(
	GenericParticleSourceBuilder,
	params: GenericParticleParams,
	output: GenericParticleSource
);

impl BuildStandalone for GenericParticleSourceBuilder {
	fn build(&self) -> Result<GenericParticleSource, SourceError> {
		Ok(GenericParticleSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(generic_particle, {
	name: GENERIC_PARTICLE_SOURCE_NAME,
	source: GenericParticleSource,
	params: GenericParticleParams,
	builder: GenericParticleSourceBuilder,
	links_back: false,
});

// Gas puff

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasPuffParams {
	#[serde(flatten)]
	pub base: SourceParams,
	/// Inward e-folding length from the edge.
	pub puff_decay_length: f64,
	pub s_puff_total: f64,
}

impl Default for GasPuffParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			puff_decay_length: 0.05,
			s_puff_total: 1.0,
		}
	}
}

impl GasPuffParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::positive("puff_decay_length", self.puff_decay_length)?;
		ParamError::non_negative("s_puff_total", self.s_puff_total)
	}
}

crate::impl_runtime_params!(GasPuffParams);

/// Edge-localized fuelling from gas injection.
#[derive(Debug)]
pub struct GasPuffSource {
	params: GasPuffParams,
}

impl Source for GasPuffSource {
	fn name(&self) -> &'static str {
		GAS_PUFF_SOURCE_NAME
	}

	fn affected_profiles(&self) -> &'static [AffectedProfile] {
		AFFECTED
	}

	fn source_params(&self) -> &SourceParams {
		&self.params.base
	}

	fn model(&self, grid: &Grid, _profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		density_profile(
			grid,
			formulas::edge_exponential(grid, self.params.puff_decay_length, self.params.s_puff_total),
		)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct GasPuffSourceBuilder {
	pub runtime_params: GasPuffParams,
}

crate::impl_build_source!(GasPuffSourceBuilder, params: GasPuffParams, output: GasPuffSource);

impl BuildStandalone for GasPuffSourceBuilder {
	fn build(&self) -> Result<GasPuffSource, SourceError> {
		Ok(GasPuffSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(gas_puff, {
	name: GAS_PUFF_SOURCE_NAME,
	source: GasPuffSource,
	params: GasPuffParams,
	builder: GasPuffSourceBuilder,
	links_back: false,
});

// Pellet injection

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PelletParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub pellet_deposition_location: f64,
	pub pellet_width: f64,
	pub s_pellet_total: f64,
}

impl Default for PelletParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			pellet_deposition_location: 0.85,
			pellet_width: 0.1,
			s_pellet_total: 2.0,
		}
	}
}

impl PelletParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::in_range(
			"pellet_deposition_location",
			self.pellet_deposition_location,
			0.0,
			1.0,
		)?;
		ParamError::positive("pellet_width", self.pellet_width)?;
		ParamError::non_negative("s_pellet_total", self.s_pellet_total)
	}
}

crate::impl_runtime_params!(PelletParams);

/// Time-averaged pellet fuelling, deposited as a Gaussian.
#[derive(Debug)]
pub struct PelletSource {
	params: PelletParams,
}

impl Source for PelletSource {
	fn name(&self) -> &'static str {
		PELLET_SOURCE_NAME
	}

	fn affected_profiles(&self) -> &'static [AffectedProfile] {
		AFFECTED
	}

	fn source_params(&self) -> &SourceParams {
		&self.params.base
	}

	fn model(&self, grid: &Grid, _profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		let p = &self.params;
		density_profile(
			grid,
			formulas::gaussian(
				grid,
				p.pellet_deposition_location,
				p.pellet_width,
				p.s_pellet_total,
			),
		)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct PelletSourceBuilder {
	pub runtime_params: PelletParams,
}

crate::impl_build_source!(PelletSourceBuilder, params: PelletParams, output: PelletSource);

impl BuildStandalone for PelletSourceBuilder {
	fn build(&self) -> Result<PelletSource, SourceError> {
		Ok(PelletSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(pellet, {
	name: PELLET_SOURCE_NAME,
	source: PelletSource,
	params: PelletParams,
	builder: PelletSourceBuilder,
	links_back: false,
});
