//! TOML configuration of a source aggregate.
//!
//! ```toml
//! [sources.ohmic]
//!
//! [sources.qei]
//! qei_mult = 0.5
//! limit_to_sibling_heating = true
//! ```
//!
//! Each table names a registered source. Its keys override that source's
//! default runtime params. The aggregate keeps document order.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SourceError;
use crate::models::SourceModels;
use crate::registry::SourceRegistry;


/// Parsed `[sources.*]` tables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
	#[serde(default)]
	pub sources: IndexMap<String, toml::Table>,
}

impl SourcesConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, SourceError> {
		toml::from_str(input).map_err(SourceError::ConfigParse)
	}

	/// Configured names in document order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.sources.keys().map(String::as_str)
	}

	/// Builds an aggregate holding exactly the configured sources.
	///
	/// Every name must be registered. Overrides are applied to a fresh
	/// default builder before it is moved into the aggregate.
	pub fn assemble(&self, registry: &SourceRegistry) -> Result<Arc<SourceModels>, SourceError> {
		let mut builders = Vec::with_capacity(self.sources.len());
		for (name, overrides) in &self.sources {
			let reg = registry.get(name)?;
			let mut builder = reg.source_builder()?;
			if !overrides.is_empty() {
				builder.apply_overrides(name, overrides)?;
			}
			tracing::debug!(
				source = reg.name,
				overrides = overrides.len(),
				"configured source"
			);
			builders.push((reg.name, builder));
		}
		SourceModels::new(builders)
	}
}
