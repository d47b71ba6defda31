//! Collisional heat exchange between ions and electrons.
//!
//! `Q = qei_mult * 0.24 * ln(Lambda) * ne^2 * (Te - Ti) / (A_i * Te^1.5)`
//! in MW/m^3 with `ne` in 1e20 m^-3 and temperatures in keV. Electrons lose
//! `Q`, ions gain it.
//!
//! The builder links back: the built source keeps a weak handle to its
//! aggregate so that, when `limit_to_sibling_heating` is set, the transfer
//! out of the electrons never exceeds what the other sources put in.

use std::sync::Weak;

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::BuildLinked;
use crate::error::{EvalError, ParamError, SourceError};
use crate::models::SourceModels;
use crate::params::SourceParams;
use crate::source::Source;

pub const SOURCE_NAME: &str = "qei";

const AFFECTED: &[AffectedProfile] = &[AffectedProfile::TempIon, AffectedProfile::TempEl];

const EXCHANGE_COEFF: f64 = 0.24;
const MIN_TEMP_KEV: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QeiParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub qei_mult: f64,
	pub coulomb_log: f64,
	/// Main ion mass in amu.
	pub ion_mass_amu: f64,
	/// Caps electron-to-ion transfer at the summed electron heating of
	/// the standalone sources in the same aggregate.
	pub limit_to_sibling_heating: bool,
}

impl Default for QeiParams {
	fn default() -> Self {
		Self {
			base: SourceParams::default(),
			qei_mult: 1.0,
			coulomb_log: 17.0,
			ion_mass_amu: 2.0,
			limit_to_sibling_heating: false,
		}
	}
}

impl QeiParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::non_negative("qei_mult", self.qei_mult)?;
		ParamError::positive("coulomb_log", self.coulomb_log)?;
		ParamError::positive("ion_mass_amu", self.ion_mass_amu)
	}
}

crate::impl_runtime_params!(QeiParams);

#[derive(Debug)]
pub struct QeiSource {
	params: QeiParams,
	models: Weak<SourceModels>,
}

impl QeiSource {
	pub fn params(&self) -> &QeiParams {
		&self.params
	}

	/// Uncapped exchange rate, positive when electrons are hotter.
	fn exchange(&self, profiles: &CoreProfiles) -> Vec<f64> {
		let p = &self.params;
		let prefactor = p.qei_mult * EXCHANGE_COEFF * p.coulomb_log / p.ion_mass_amu;
		profiles
			.temp_el
			.iter()
			.zip(&profiles.temp_ion)
			.zip(&profiles.ne)
			.map(|((te, ti), ne)| prefactor * ne * ne * (te - ti) / te.max(MIN_TEMP_KEV).powf(1.5))
			.collect()
	}
}

impl Source for QeiSource {
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
		let mut q = self.exchange(profiles);

		if self.params.limit_to_sibling_heating {
			let models = self
				.models
				.upgrade()
				.ok_or(EvalError::AggregateDropped { name: SOURCE_NAME })?;
			let available = models.sum_standalone_sources(AffectedProfile::TempEl, grid, profiles)?;
			for (q, avail) in q.iter_mut().zip(available) {
				if *q > 0.0 {
					*q = q.min(avail.max(0.0));
				}
			}
		}

		let electrons = q.iter().map(|v| -v).collect();
		Ok(SourceProfile::new()
			.with(grid, AffectedProfile::TempIon, q)?
			.with(grid, AffectedProfile::TempEl, electrons)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct QeiSourceBuilder {
	pub runtime_params: QeiParams,
}

crate::impl_build_source!(QeiSourceBuilder, params: QeiParams, output: QeiSource);

impl BuildLinked for QeiSourceBuilder {
	fn build(&self, models: &SourceModels) -> Result<QeiSource, SourceError> {
		Ok(QeiSource {
			params: self.runtime_params.clone(),
			models: models.downgrade(),
		})
	}
}

crate::register_source!(qei, {
	name: SOURCE_NAME,
	source: QeiSource,
	params: QeiParams,
	builder: QeiSourceBuilder,
	links_back: true,
});
