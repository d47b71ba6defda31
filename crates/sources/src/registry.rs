//! Source registry.
//!
//! # Mental Model
//!
//! 1. **Declaration:** each source module declares a static
//!    [`SourceRegistration`] and submits it through `inventory` (see
//!    [`crate::register_source`]).
//! 2. **Initialization:** [`init`] runs once, feeding every submitted record
//!    into a [`RegistryBuilder`], which rejects duplicate names.
//! 3. **Consumption:** the frozen [`SourceRegistry`] is shared as
//!    `&'static` and read concurrently without locking.
//!
//! The registry stores types and flags only. Whether a record's builder
//! and types actually agree is checked by the test harness, not here.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::builder::SourceBuilder;
use crate::error::{RegistryError, SourceError};
use crate::types::TypeInfo;

#[cfg(test)]
mod tests;

/// Immutable descriptor associated with a source name.
#[derive(Debug)]
pub struct SourceRegistration {
	pub name: &'static str,
	/// Type every built source must be.
	pub source_type: TypeInfo,
	/// Type of every builder's runtime params.
	pub params_type: TypeInfo,
	/// Builder constructor; yields default-configured params.
	pub builder: fn() -> Result<SourceBuilder, SourceError>,
	/// Whether building requires the containing aggregate.
	pub links_back: bool,
}

impl SourceRegistration {
	/// Constructs a default-configured builder for this source.
	///
	/// Fails with [`SourceError::RegistrationConsistency`] when the builder's
	/// variant disagrees with [`Self::links_back`].
	pub fn source_builder(&self) -> Result<SourceBuilder, SourceError> {
		let builder = (self.builder)()?;
		if builder.links_back() != self.links_back {
			return Err(SourceError::RegistrationConsistency {
				name: self.name,
				registered: self.links_back,
				builder: builder.links_back(),
			});
		}
		Ok(builder)
	}
}

/// Wrapper for `inventory::collect!`.
pub struct SourceReg(pub &'static SourceRegistration);

inventory::collect!(SourceReg);

/// Accumulates registrations before freezing.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
	entries: IndexMap<&'static str, &'static SourceRegistration>,
}

impl RegistryBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of registrations accepted so far.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Adds a registration, rejecting a name that is already taken.
	pub fn register(&mut self, reg: &'static SourceRegistration) -> Result<(), RegistryError> {
		if self.entries.contains_key(reg.name) {
			return Err(RegistryError::DuplicateName {
				name: reg.name.to_owned(),
			});
		}
		self.entries.insert(reg.name, reg);
		Ok(())
	}

	/// Adds every registration submitted through `inventory`.
	pub fn extend_inventory(&mut self) -> Result<(), RegistryError> {
		for reg in inventory::iter::<SourceReg> {
			self.register(reg.0)?;
		}
		Ok(())
	}

	/// Freezes into an immutable registry ordered by name.
	pub fn build(mut self) -> SourceRegistry {
		self.entries.sort_unstable_keys();
		SourceRegistry {
			entries: self.entries,
		}
	}
}

/// Frozen mapping from source name to registration.
#[derive(Debug)]
pub struct SourceRegistry {
	entries: IndexMap<&'static str, &'static SourceRegistration>,
}

impl SourceRegistry {
	/// Looks up a registration by name.
	pub fn get(&self, name: &str) -> Result<&'static SourceRegistration, RegistryError> {
		self.entries
			.get(name)
			.copied()
			.ok_or_else(|| RegistryError::UnknownComponent {
				name: name.to_owned(),
			})
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.entries.keys().copied()
	}

	/// Registrations in name order.
	pub fn iter(&self) -> impl Iterator<Item = &'static SourceRegistration> + '_ {
		self.entries.values().copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

static REGISTRY: OnceLock<SourceRegistry> = OnceLock::new();

/// Initializes the process-wide registry from `inventory` submissions.
///
/// Idempotent: later calls return the registry frozen by the first. A
/// duplicate name is fatal and leaves the registry uninitialized.
pub fn init() -> Result<&'static SourceRegistry, RegistryError> {
	if let Some(registry) = REGISTRY.get() {
		return Ok(registry);
	}

	let mut builder = RegistryBuilder::new();
	builder.extend_inventory()?;
	let registry = builder.build();
	tracing::debug!(count = registry.len(), "source registry frozen");

	Ok(REGISTRY.get_or_init(|| registry))
}

/// Looks up `name` in the process-wide registry, initializing it if needed.
pub fn get_registered_source(name: &str) -> Result<&'static SourceRegistration, RegistryError> {
	init()?.get(name)
}
