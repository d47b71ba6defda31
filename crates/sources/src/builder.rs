//! Source builders.
//!
//! A builder owns one runtime-params value, created with defaults when the
//! builder is constructed and freely mutable until it is invoked. Each
//! invocation produces a fresh source instance.
//!
//! Builders come in two variants, selected by a registration's `links_back`
//! flag:
//!
//! - [`BuildStandalone`]: `build()` needs nothing but its params.
//! - [`BuildLinked`]: `build(models)` receives the [`SourceModels`] aggregate
//!   it is being built into and may query sibling sources through it.
//!
//! [`SourceBuilder`] erases the concrete builder type and dispatches on the
//! variant.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::models::SourceModels;
use crate::params::RuntimeParams;
use crate::source::Source;


/// Typed builder surface shared by both variants.
pub trait BuildSource: core::fmt::Debug + Send + Sync + Sized + 'static {
	type Params: RuntimeParams + Default + Clone + Serialize + DeserializeOwned;
	type Output: Source;

	fn from_params(params: Self::Params) -> Self;

	fn runtime_params(&self) -> &Self::Params;

	fn runtime_params_mut(&mut self) -> &mut Self::Params;

	/// Constructs the builder with default params, validating them.
	fn with_defaults() -> Result<Self, SourceError> {
		let params = Self::Params::default();
		params
			.validate()
			.map_err(|source| SourceError::ConfigDefault {
				builder: std::any::type_name::<Self>(),
				source,
			})?;
		Ok(Self::from_params(params))
	}
}

/// Builder whose output needs no aggregate.
pub trait BuildStandalone: BuildSource {
	fn build(&self) -> Result<Self::Output, SourceError>;
}

/// Builder whose output links back to the aggregate containing it.
pub trait BuildLinked: BuildSource {
	fn build(&self, models: &SourceModels) -> Result<Self::Output, SourceError>;
}

/// Implements [`BuildSource`] for a builder struct with a
/// `runtime_params` field and no other state.
#[macro_export]
macro_rules! impl_build_source {
	($builder:ty, params: $params:ty, output: $output:ty) => {
		impl $crate::builder::BuildSource for $builder {
			type Params = $params;
			type Output = $output;

			fn from_params(runtime_params: $params) -> Self {
				Self { runtime_params }
			}

			fn runtime_params(&self) -> &$params {
				&self.runtime_params
			}

			fn runtime_params_mut(&mut self) -> &mut $params {
				&mut self.runtime_params
			}
		}
	};
}

/// Object-safe view of a [`BuildSource`].
pub trait ErasedBuilder: core::fmt::Debug + Send + Sync {
	fn params(&self) -> &dyn RuntimeParams;

	fn params_mut(&mut self) -> &mut dyn RuntimeParams;

	/// Merges `overrides` onto the current params and validates the result.
	///
	/// Params are left untouched on failure.
	fn apply_overrides(&mut self, name: &str, overrides: &toml::Table) -> Result<(), SourceError>;

	fn builder_name(&self) -> &'static str;
}

impl<B: BuildSource> ErasedBuilder for B {
	fn params(&self) -> &dyn RuntimeParams {
		self.runtime_params()
	}

	fn params_mut(&mut self) -> &mut dyn RuntimeParams {
		self.runtime_params_mut()
	}

	fn apply_overrides(&mut self, name: &str, overrides: &toml::Table) -> Result<(), SourceError> {
		let mut merged =
			toml::Table::try_from(self.runtime_params()).map_err(|source| SourceError::ConfigSerialize {
				name: name.to_owned(),
				source,
			})?;

		for (key, value) in overrides {
			if !merged.contains_key(key) {
				return Err(SourceError::UnknownParam {
					name: name.to_owned(),
					key: key.clone(),
				});
			}
			merged.insert(key.clone(), value.clone());
		}

		let params: B::Params = merged.try_into().map_err(|source| SourceError::ConfigOverride {
			name: name.to_owned(),
			source,
		})?;
		params.validate().map_err(|source| SourceError::InvalidParams {
			name: name.to_owned(),
			source,
		})?;

		*self.runtime_params_mut() = params;
		Ok(())
	}

	fn builder_name(&self) -> &'static str {
		std::any::type_name::<B>()
	}
}

/// Object-safe [`BuildStandalone`].
pub trait DynStandalone: ErasedBuilder {
	fn build_dyn(&self) -> Result<Arc<dyn Source>, SourceError>;
}

impl<B: BuildStandalone> DynStandalone for B {
	fn build_dyn(&self) -> Result<Arc<dyn Source>, SourceError> {
		let source: Arc<dyn Source> = Arc::new(BuildStandalone::build(self)?);
		Ok(source)
	}
}

/// Object-safe [`BuildLinked`].
pub trait DynLinked: ErasedBuilder {
	fn build_dyn(&self, models: &SourceModels) -> Result<Arc<dyn Source>, SourceError>;
}

impl<B: BuildLinked> DynLinked for B {
	fn build_dyn(&self, models: &SourceModels) -> Result<Arc<dyn Source>, SourceError> {
		let source: Arc<dyn Source> = Arc::new(BuildLinked::build(self, models)?);
		Ok(source)
	}
}

macro_rules! dispatch {
	($this:expr, $b:ident => $body:expr) => {
		match $this {
			SourceBuilder::Standalone($b) => $body,
			SourceBuilder::Linked($b) => $body,
		}
	};
}

/// A type-erased builder, tagged by whether it links back.
#[derive(Debug)]
pub enum SourceBuilder {
	Standalone(Box<dyn DynStandalone>),
	Linked(Box<dyn DynLinked>),
}

impl SourceBuilder {
	pub fn standalone<B: BuildStandalone>(builder: B) -> Self {
		Self::Standalone(Box::new(builder))
	}

	pub fn linked<B: BuildLinked>(builder: B) -> Self {
		Self::Linked(Box::new(builder))
	}

	/// Default-configured standalone builder; used as a registration's builder constructor.
	pub fn default_standalone<B: BuildStandalone>() -> Result<Self, SourceError> {
		Ok(Self::standalone(B::with_defaults()?))
	}

	/// Default-configured linked builder; used as a registration's builder constructor.
	pub fn default_linked<B: BuildLinked>() -> Result<Self, SourceError> {
		Ok(Self::linked(B::with_defaults()?))
	}

	/// Whether building requires the containing aggregate.
	pub fn links_back(&self) -> bool {
		matches!(self, Self::Linked(_))
	}

	pub fn builder_name(&self) -> &'static str {
		dispatch!(self, b => b.builder_name())
	}

	pub fn runtime_params(&self) -> &dyn RuntimeParams {
		dispatch!(self, b => b.params())
	}

	pub fn runtime_params_mut(&mut self) -> &mut dyn RuntimeParams {
		dispatch!(self, b => b.params_mut())
	}

	/// Typed read access to the params, if they are a `P`.
	pub fn params_as<P: RuntimeParams>(&self) -> Option<&P> {
		self.runtime_params().as_any().downcast_ref()
	}

	/// Typed write access to the params, if they are a `P`.
	pub fn params_as_mut<P: RuntimeParams>(&mut self) -> Option<&mut P> {
		self.runtime_params_mut().as_any_mut().downcast_mut()
	}

	pub fn apply_overrides(&mut self, name: &str, overrides: &toml::Table) -> Result<(), SourceError> {
		dispatch!(self, b => b.apply_overrides(name, overrides))
	}

	/// Produces a new source instance.
	///
	/// Linked builders require `models`; standalone builders ignore it.
	pub fn build(&self, models: Option<&SourceModels>) -> Result<Arc<dyn Source>, SourceError> {
		match (self, models) {
			(Self::Standalone(b), _) => b.build_dyn(),
			(Self::Linked(b), Some(models)) => b.build_dyn(models),
			(Self::Linked(b), None) => Err(SourceError::MissingAggregate {
				builder: b.builder_name(),
			}),
		}
	}
}
