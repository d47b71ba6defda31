//! Runtime parameters shared by every source term.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// How a source term produces its contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
	/// Contributes zeros on every affected channel.
	Zero,
	/// Runs the term's physics model.
	#[default]
	ModelBased,
	/// Contributes `prescribed_value` on every affected channel.
	Prescribed,
}

/// Parameters every source term carries, flattened into its own params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceParams {
	pub mode: Mode,
	/// Treated explicitly by the outer solver.
	pub is_explicit: bool,
	pub prescribed_value: f64,
}

impl Default for SourceParams {
	fn default() -> Self {
		Self {
			mode: Mode::ModelBased,
			is_explicit: false,
			prescribed_value: 0.0,
		}
	}
}

impl SourceParams {
	pub fn validate(&self) -> Result<(), ParamError> {
		if !self.prescribed_value.is_finite() {
			return Err(ParamError::new("prescribed_value", "must be finite"));
		}
		Ok(())
	}
}

/// Capability set of a builder's mutable configuration.
pub trait RuntimeParams: Any + core::fmt::Debug + Send + Sync {
	/// The common [`SourceParams`] block.
	fn base(&self) -> &SourceParams;

	/// Checks every field, including [`Self::base`].
	fn validate(&self) -> Result<(), ParamError>;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// Concrete type name, for diagnostics.
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// Implements [`RuntimeParams`] for a params struct with a `base: SourceParams`
/// field and an inherent `check(&self) -> Result<(), ParamError>`.
#[macro_export]
macro_rules! impl_runtime_params {
	($ty:ty) => {
		impl $crate::params::RuntimeParams for $ty {
			fn base(&self) -> &$crate::params::SourceParams {
				&self.base
			}

			fn validate(&self) -> Result<(), $crate::error::ParamError> {
				self.base.validate()?;
				self.check()
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}
		}
	};
}
