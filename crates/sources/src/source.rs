//! The evaluation contract every built source term satisfies.

use std::any::Any;

use torus_profiles::{AffectedProfile, CoreProfiles, Grid, SourceProfile};

use crate::error::EvalError;
use crate::params::{Mode, SourceParams};

/// A built source term.
///
/// Instances are immutable once built. The outer solver calls
/// [`Source::evaluate`] once per step.
pub trait Source: Any + core::fmt::Debug + Send + Sync {
	/// Registered name.
	fn name(&self) -> &'static str;

	/// Channels this term contributes to.
	fn affected_profiles(&self) -> &'static [AffectedProfile];

	/// Common params captured at build time.
	fn source_params(&self) -> &SourceParams;

	/// Physics model, used when the mode is [`Mode::ModelBased`].
	fn model(&self, grid: &Grid, profiles: &CoreProfiles) -> Result<SourceProfile, EvalError>;

	fn as_any(&self) -> &dyn Any;

	/// Concrete type name, for diagnostics.
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	fn is_explicit(&self) -> bool {
		self.source_params().is_explicit
	}

	/// Contribution for the current step, honoring the configured [`Mode`].
	fn evaluate(&self, grid: &Grid, profiles: &CoreProfiles) -> Result<SourceProfile, EvalError> {
		profiles.validate(grid)?;
		let params = self.source_params();
		match params.mode {
			Mode::Zero => Ok(SourceProfile::zeros(grid, self.affected_profiles())),
			Mode::Prescribed => Ok(SourceProfile::uniform(
				grid,
				self.affected_profiles(),
				params.prescribed_value,
			)),
			Mode::ModelBased => self.model(grid, profiles),
		}
	}

	/// Whether this term contributes to `channel`.
	fn affects(&self, channel: AffectedProfile) -> bool {
		self.affected_profiles().contains(&channel)
	}
}
