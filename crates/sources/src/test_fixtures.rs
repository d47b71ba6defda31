//! Small sources used to exercise the construction protocol.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::builder::{BuildLinked, BuildSource, BuildStandalone, SourceBuilder};
use crate::error::{EvalError, ParamError, SourceError};
use crate::models::SourceModels;
use crate::params::SourceParams;
use crate::source::Source;

const CHANNELS: &[AffectedProfile] = &[AffectedProfile::TempEl];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantParams {
	#[serde(flatten)]
	pub base: SourceParams,
	pub value: f64,
}

impl ConstantParams {
	fn check(&self) -> Result<(), ParamError> {
		ParamError::non_negative("value", self.value)
	}
}

crate::impl_runtime_params!(ConstantParams);

/// Uniform electron heating.
#[derive(Debug)]
pub struct Constant {
	pub params: ConstantParams,
}

impl Source for Constant {
	fn name(&self) -> &'static str {
		"constant"
	}

	fn affected_profiles(&self) -> &'static [AffectedProfile] {
		CHANNELS
	}

	fn source_params(&self) -> &SourceParams {
		&self.params.base
	}

	fn model(&self, grid: &Grid, _profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		Ok(SourceProfile::uniform(grid, CHANNELS, self.params.value))
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

/// Counts builds and can be told to fail the next `n` of them.
#[derive(Debug)]
pub struct ConstantBuilder {
	pub runtime_params: ConstantParams,
	pub builds: Arc<AtomicUsize>,
	pub failures_left: Arc<AtomicUsize>,
}

impl ConstantBuilder {
	pub fn with_value(value: f64) -> Self {
		let mut builder = Self::from_params(ConstantParams::default());
		builder.runtime_params.value = value;
		builder
	}
}

impl BuildSource for ConstantBuilder {
	type Params = ConstantParams;
	type Output = Constant;

	fn from_params(runtime_params: ConstantParams) -> Self {
		Self {
			runtime_params,
			builds: Arc::default(),
			failures_left: Arc::default(),
		}
	}

	fn runtime_params(&self) -> &ConstantParams {
		&self.runtime_params
	}

	fn runtime_params_mut(&mut self) -> &mut ConstantParams {
		&mut self.runtime_params
	}
}

impl BuildStandalone for ConstantBuilder {
	fn build(&self) -> Result<Constant, SourceError> {
		let failing = self
			.failures_left
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
			.is_ok();
		if failing {
			return Err(SourceError::InvalidParams {
				name: "constant".to_owned(),
				source: ParamError::new("value", "injected failure"),
			});
		}
		self.builds.fetch_add(1, Ordering::SeqCst);
		Ok(Constant {
			params: self.runtime_params.clone(),
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SumParams {
	#[serde(flatten)]
	pub base: SourceParams,
	/// Siblings resolved at build time.
	pub depends_on: Vec<String>,
}

impl SumParams {
	fn check(&self) -> Result<(), ParamError> {
		Ok(())
	}
}

crate::impl_runtime_params!(SumParams);

/// Sum of the sibling sources it resolved while being built.
#[derive(Debug)]
pub struct Sum {
	pub params: SumParams,
	pub parts: Vec<Arc<dyn Source>>,
}

impl Source for Sum {
	fn name(&self) -> &'static str {
		"sum"
	}

	fn affected_profiles(&self) -> &'static [AffectedProfile] {
		CHANNELS
	}

	fn source_params(&self) -> &SourceParams {
		&self.params.base
	}

	fn model(&self, grid: &Grid, profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		let mut total = grid.zeros();
		for part in &self.parts {
			part.evaluate(grid, profiles)?
				.accumulate(AffectedProfile::TempEl, &mut total);
		}
		Ok(SourceProfile::new().with(grid, AffectedProfile::TempEl, total)?)
	}

	fn as_any(&self) -> &dyn std::any::Any {
		self
	}
}

#[derive(Debug)]
pub struct SumBuilder {
	pub runtime_params: SumParams,
}

impl SumBuilder {
	pub fn over(depends_on: &[&str]) -> Self {
		Self::from_params(SumParams {
			depends_on: depends_on.iter().map(|s| (*s).to_owned()).collect(),
			..SumParams::default()
		})
	}
}

crate::impl_build_source!(SumBuilder, params: SumParams, output: Sum);

impl BuildLinked for SumBuilder {
	fn build(&self, models: &SourceModels) -> Result<Sum, SourceError> {
		let parts = self
			.runtime_params
			.depends_on
			.iter()
			.map(|name| models.dependency(name))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Sum {
			params: self.runtime_params.clone(),
			parts,
		})
	}
}

/// Linked builder that panics for its first `n` builds, then yields an empty [`Sum`].
#[derive(Debug)]
pub struct PanickingBuilder {
	pub runtime_params: SumParams,
	pub panics_left: Arc<AtomicUsize>,
}

impl PanickingBuilder {
	pub fn panicking(n: usize) -> Self {
		let builder = Self::from_params(SumParams::default());
		builder.panics_left.store(n, Ordering::SeqCst);
		builder
	}
}

impl BuildSource for PanickingBuilder {
	type Params = SumParams;
	type Output = Sum;

	fn from_params(runtime_params: SumParams) -> Self {
		Self {
			runtime_params,
			panics_left: Arc::default(),
		}
	}

	fn runtime_params(&self) -> &SumParams {
		&self.runtime_params
	}

	fn runtime_params_mut(&mut self) -> &mut SumParams {
		&mut self.runtime_params
	}
}

impl BuildLinked for PanickingBuilder {
	fn build(&self, _models: &SourceModels) -> Result<Sum, SourceError> {
		let panicking = self
			.panics_left
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
			.is_ok();
		if panicking {
			panic!("injected builder panic");
		}
		Ok(Sum {
			params: self.runtime_params.clone(),
			parts: Vec::new(),
		})
	}
}

pub fn constant(value: f64) -> SourceBuilder {
	SourceBuilder::standalone(ConstantBuilder::with_value(value))
}

pub fn sum(depends_on: &[&str]) -> SourceBuilder {
	SourceBuilder::linked(SumBuilder::over(depends_on))
}

pub fn grid() -> Grid {
	Grid::new(8).unwrap()
}

pub fn profiles(grid: &Grid) -> CoreProfiles {
	CoreProfiles::flat(grid, 5.0, 6.0, 1.0)
}

/// Installs a test-writer subscriber once per process.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
}
