//! D-T fusion alpha heating.
//!
//! Reactivity follows the Bosch-Hale parameterization. Alpha power is split
//! between ions and electrons by `ion_fraction`. A 50/50 D-T mix is assumed.

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildStandalone;
use crate::error::{EvalError, ParamError, SourceError};
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "fusion_heat_source";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::TempIon, AffectedProfile::TempEl];

// Bosch-Hale D-T coefficients.
const BG: f64 = 34.3827;
const MRC2: f64 = 1_124_656.0;
const C1: f64 = 1.17302e-9;
const C2: f64 = 1.51361e-2;
const C3: f64 = 7.51886e-2;
const C4: f64 = 4.60643e-3;
const C5: f64 = 1.35e-2;
const C6: f64 = -1.0675e-4;
const C7: f64 = 1.366e-5;

/// Alpha particle energy in MJ.
const ALPHA_ENERGY_MJ: f64 = 5.607e-13 / 1e6;
const MIN_TEMP_KEV: f64 = 0.2;

/// `<sigma v>` in m^3/s for ion temperature `ti` in keV.
fn dt_reactivity(ti: f64) -> f64 {
	if ti < MIN_TEMP_KEV {
		return 0.0;
	}
	let theta = ti
		/ (1.0 - (ti * (C2 + ti * (C4 + ti * C6))) / (1.0 + ti * (C3 + ti * (C5 + ti * C7))));
	let xi = (BG * BG / (4.0 * theta)).cbrt();
	let sigma_v_cm3 = C1 * theta * (xi / (MRC2 * ti.powi(3))).sqrt() * (-3.0 * xi).exp();
	sigma_v_cm3 * 1e-6
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionParams {
	#[serde(flatten)]
	pub base: SourceParams,
	/// Share of alpha power deposited on ions.
	pub ion_fraction: f64,
}

impl Default for FusionParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			ion_fraction: 0.2,
		}
	}
}

impl FusionParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::in_range("ion_fraction", self.ion_fraction, 0.0, 1.0)
	}
}

crate::impl_runtime_params!(FusionParams);

#[derive(Debug)]
pub struct FusionHeatSource {
	params: FusionParams,
}

impl Source for FusionHeatSource {
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
		let power: Vec<f64> = profiles
			.ne
			.iter()
			.zip(&profiles.temp_ion)
			.map(|(ne, ti)| {
				let n = ne * 1e20;
				0.25 * n * n * dt_reactivity(*ti) * ALPHA_ENERGY_MJ
			})
			.collect();
		let f = self.params.ion_fraction;
		let ions = power.iter().map(|p| f * p).collect();
		let electrons = power.iter().map(|p| (1.0 - f) * p).collect();
		Ok(SourceProfile::new()
			.with(grid, AffectedProfile::TempIon, ions)?
			.with(grid, AffectedProfile::TempEl, electrons)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct FusionHeatSourceBuilder {
	pub runtime_params: FusionParams,
}

crate::impl_build_source!(FusionHeatSourceBuilder, params: FusionParams, output: FusionHeatSource);

impl BuildStandalone for FusionHeatSourceBuilder {
	fn build(&self) -> Result<FusionHeatSource, SourceError> {
		Ok(FusionHeatSource {
			params: self.runtime_params.clone(),
		})
	}
}

crate::register_source!(fusion_heat, {
	name: SOURCE_NAME,
	source: FusionHeatSource,
	params: FusionParams,
	builder: FusionHeatSourceBuilder,
	links_back: false,
});
