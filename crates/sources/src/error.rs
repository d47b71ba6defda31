//! Error taxonomy for registration, construction and evaluation.
//!
//! Construction errors are programming or configuration mistakes: they are
//! raised at the violating call and never retried internally.

use torus_profiles::ProfileError;

/// Registry-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("source {name:?} is already registered")]
	DuplicateName { name: String },

	#[error("unknown source {name:?}")]
	UnknownComponent { name: String },
}

/// A runtime parameter failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ParamError {
	pub field: &'static str,
	pub reason: String,
}

impl ParamError {
	pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
		Self {
			field,
			reason: reason.into(),
		}
	}

	/// Fails unless `value` is finite and `>= 0`.
	pub fn non_negative(field: &'static str, value: f64) -> Result<(), Self> {
		if value.is_finite() && value >= 0.0 {
			Ok(())
		} else {
			Err(Self::new(field, format!("must be finite and >= 0, got {value}")))
		}
	}

	/// Fails unless `value` is finite and `> 0`.
	pub fn positive(field: &'static str, value: f64) -> Result<(), Self> {
		if value.is_finite() && value > 0.0 {
			Ok(())
		} else {
			Err(Self::new(field, format!("must be finite and > 0, got {value}")))
		}
	}

	/// Fails unless `value` lies in `[lo, hi]`.
	pub fn in_range(field: &'static str, value: f64, lo: f64, hi: f64) -> Result<(), Self> {
		if (lo..=hi).contains(&value) {
			Ok(())
		} else {
			Err(Self::new(field, format!("must be in [{lo}, {hi}], got {value}")))
		}
	}
}

/// Builder, aggregate and harness failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error("unknown source {name:?} in aggregate")]
	UnknownComponent { name: String },

	#[error("builder {builder} cannot produce default runtime params: {source}")]
	ConfigDefault {
		builder: &'static str,
		#[source]
		source: ParamError,
	},

	#[error("source {name:?} registered with links_back={registered}, builder reports {builder}")]
	RegistrationConsistency {
		name: &'static str,
		registered: bool,
		builder: bool,
	},

	#[error("builder {builder} links back and must be built through an aggregate")]
	MissingAggregate { builder: &'static str },

	#[error("source {source_name:?} depends on {dependency:?}, which is not in the aggregate")]
	MissingDependency { source_name: String, dependency: String },

	#[error("circular source dependency: {}", chain.join(" -> "))]
	CircularDependency { chain: Vec<String> },

	#[error("source {name:?}: {what} is {actual}, registered as {expected}")]
	TypeMismatch {
		name: &'static str,
		what: &'static str,
		expected: &'static str,
		actual: &'static str,
	},

	#[error("source {name:?}: invalid runtime params: {source}")]
	InvalidParams {
		name: String,
		#[source]
		source: ParamError,
	},

	#[error("source {name:?}: unknown runtime param {key:?}")]
	UnknownParam { name: String, key: String },

	#[error("source {name:?}: cannot serialize runtime params: {source}")]
	ConfigSerialize {
		name: String,
		#[source]
		source: toml::ser::Error,
	},

	#[error("source {name:?}: bad runtime param override: {source}")]
	ConfigOverride {
		name: String,
		#[source]
		source: toml::de::Error,
	},

	#[error("cannot parse sources config: {0}")]
	ConfigParse(#[source] toml::de::Error),
}

/// Per-step evaluation failures.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
	#[error(transparent)]
	Profile(#[from] ProfileError),

	#[error("source {name:?} outlived the aggregate it links back to")]
	AggregateDropped { name: &'static str },

	#[error("building a sibling source failed: {0}")]
	Build(#[from] SourceError),
}
