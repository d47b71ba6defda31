//! Typed registry of physics source terms and the aggregate that builds them.
//!
//! A source term is registered once under a unique name, together with the
//! concrete types of its runtime params and of the source it builds. Builders
//! carry mutable runtime params and produce immutable [`Source`] instances.
//! A [`SourceModels`] aggregate owns a named set of builders and builds each
//! source lazily on first access. Builders that link back receive the
//! aggregate while building and may resolve sibling sources through it.
//!
//! ```ignore
//! let registry = torus_sources::registry::init()?;
//! let config = SourcesConfig::from_toml_str(input)?;
//! let models = config.assemble(registry)?;
//! let heating = models.sum_sources(AffectedProfile::TempEl, &grid, &profiles)?;
//! ```

/// Typed builder traits and the erased [`SourceBuilder`] handle.
pub mod builder;
/// Built-in source terms.
#[cfg(feature = "builtins")]
pub mod builtins;
/// TOML configuration of an aggregate.
pub mod config;
/// Error types.
pub mod error;
/// Deposition shapes shared by source models.
pub mod formulas;
/// Registration consistency harness.
#[cfg(any(test, feature = "test-support"))]
pub mod harness;
mod macros;
/// The lazily built aggregate.
pub mod models;
/// Common runtime params and the [`RuntimeParams`] capability trait.
pub mod params;
/// Registration records and the process-wide registry.
pub mod registry;
/// The [`Source`] evaluation contract.
pub mod source;
#[cfg(test)]
pub(crate) mod test_fixtures;
/// Declared-type descriptors.
pub mod types;

pub use builder::{BuildLinked, BuildSource, BuildStandalone, SourceBuilder};
pub use config::SourcesConfig;
pub use error::{EvalError, ParamError, RegistryError, SourceError};
pub use models::SourceModels;
pub use params::{Mode, RuntimeParams, SourceParams};
pub use registry::{
	RegistryBuilder, SourceReg, SourceRegistration, SourceRegistry, get_registered_source,
};
pub use source::Source;
pub use types::TypeInfo;

#[doc(hidden)]
pub mod __private {
	pub use {inventory, paste};
}
