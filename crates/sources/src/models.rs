//! The [`SourceModels`] aggregate.
//!
//! # Purpose
//!
//! Owns a named set of [`SourceBuilder`]s and the sources built from them.
//! Some sources link back: their builder receives the aggregate itself and
//! may query siblings by name while building. The aggregate resolves that
//! circularity as an arena: names are indices, builders are deferred
//! factories, and each slot is filled on first access.
//!
//! # Construction Protocol
//!
//! 1. [`SourceModels::new`] takes ownership of the builders. Nothing is built.
//! 2. [`SourceModels::get`] builds a name on first query and caches the
//!    instance for the aggregate's lifetime. Later queries return the same
//!    `Arc`.
//! 3. A linked builder is invoked with `&self`. Its sibling queries go
//!    through the same lazy path, recursively.
//! 4. Names currently being built sit on an in-progress stack. Re-entering
//!    one of them fails with [`SourceError::CircularDependency`].
//! 5. A failed build caches nothing, so a later query retries cleanly.
//!
//! # Concurrency
//!
//! Build state sits behind a [`ReentrantMutex`]: builds serialize across
//! threads while the building thread may recurse into sibling builds.
//! Cached lookups take the same lock briefly.
//!
//! # Invariants
//!
//! - A linked builder sees the very aggregate it ends up cached in.
//! - A name is cached at most once; cached instances never change.
//! - A failed build leaves its slot empty and the in-progress stack unchanged,
//!   even when the builder panics.

use std::cell::RefCell;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use indexmap::map::Entry;
use parking_lot::ReentrantMutex;
use rustc_hash::FxHashMap;
use torus_profiles::{AffectedProfile, CoreProfiles, Grid};

use crate::builder::SourceBuilder;
use crate::error::{EvalError, RegistryError, SourceError};
use crate::params::RuntimeParams;
use crate::registry::SourceRegistry;
use crate::source::Source;


#[derive(Default)]
struct BuildState {
	built: FxHashMap<String, Arc<dyn Source>>,
	in_progress: Vec<String>,
}

/// Holds a name on the in-progress stack until dropped, including on unwind.
struct InProgress<'a> {
	state: &'a RefCell<BuildState>,
}

impl<'a> InProgress<'a> {
	fn enter(state: &'a RefCell<BuildState>, name: &str) -> Self {
		state.borrow_mut().in_progress.push(name.to_owned());
		Self { state }
	}
}

impl Drop for InProgress<'_> {
	fn drop(&mut self) {
		if let Ok(mut state) = self.state.try_borrow_mut() {
			state.in_progress.pop();
		}
	}
}

/// Composite of named source terms, built lazily.
pub struct SourceModels {
	builders: IndexMap<String, SourceBuilder>,
	state: ReentrantMutex<RefCell<BuildState>>,
	this: Weak<SourceModels>,
}

impl core::fmt::Debug for SourceModels {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let guard = self.state.lock();
		let state = guard.borrow();
		f.debug_struct("SourceModels")
			.field("names", &self.builders.keys().collect::<Vec<_>>())
			.field("built", &state.built.len())
			.field("in_progress", &state.in_progress)
			.finish()
	}
}

impl SourceModels {
	/// Creates an aggregate owning `source_builders`, in iteration order.
	///
	/// Fails with [`RegistryError::DuplicateName`] if a name repeats.
	pub fn new<I, K>(source_builders: I) -> Result<Arc<Self>, SourceError>
	where
		I: IntoIterator<Item = (K, SourceBuilder)>,
		K: Into<String>,
	{
		let mut builders = IndexMap::new();
		for (name, builder) in source_builders {
			match builders.entry(name.into()) {
				Entry::Occupied(e) => {
					return Err(RegistryError::DuplicateName {
						name: e.key().clone(),
					}
					.into());
				}
				Entry::Vacant(e) => {
					e.insert(builder);
				}
			}
		}

		Ok(Arc::new_cyclic(|this| Self {
			builders,
			state: ReentrantMutex::new(RefCell::new(BuildState::default())),
			this: this.clone(),
		}))
	}

	/// Creates an aggregate with a default builder for every registered source.
	pub fn from_registry(registry: &SourceRegistry) -> Result<Arc<Self>, SourceError> {
		let builders = registry
			.iter()
			.map(|reg| Ok((reg.name, reg.source_builder()?)))
			.collect::<Result<Vec<_>, SourceError>>()?;
		Self::new(builders)
	}

	/// Non-owning handle to this aggregate, for sources that link back.
	pub fn downgrade(&self) -> Weak<SourceModels> {
		self.this.clone()
	}

	/// Names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.builders.keys().map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.builders.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.builders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.builders.is_empty()
	}

	/// Whether the builder for `name` links back.
	pub fn links_back(&self, name: &str) -> Result<bool, SourceError> {
		Ok(self.builder(name)?.links_back())
	}

	/// Read access to the runtime params `name` will be (or was) built with.
	pub fn params(&self, name: &str) -> Result<&dyn RuntimeParams, SourceError> {
		Ok(self.builder(name)?.runtime_params())
	}

	/// Whether `name` has been built and cached.
	pub fn is_built(&self, name: &str) -> bool {
		self.state.lock().borrow().built.contains_key(name)
	}

	fn builder(&self, name: &str) -> Result<&SourceBuilder, SourceError> {
		self.builders
			.get(name)
			.ok_or_else(|| SourceError::UnknownComponent {
				name: name.to_owned(),
			})
	}

	/// Returns the source for `name`, building it on first access.
	pub fn get(&self, name: &str) -> Result<Arc<dyn Source>, SourceError> {
		let builder = self.builder(name)?;
		let guard = self.state.lock();

		{
			let state = guard.borrow();
			if let Some(source) = state.built.get(name) {
				return Ok(Arc::clone(source));
			}
			if let Some(pos) = state.in_progress.iter().position(|n| n == name) {
				let mut chain = state.in_progress[pos..].to_vec();
				chain.push(name.to_owned());
				tracing::warn!(chain = ?chain, "circular source dependency");
				return Err(SourceError::CircularDependency { chain });
			}
		}

		let result = {
			let _in_progress = InProgress::enter(&guard, name);
			tracing::trace!(source = name, links_back = builder.links_back(), "building source");
			builder.build(Some(self))
		};

		match result {
			Ok(source) => {
				tracing::trace!(source = name, "source built");
				guard
					.borrow_mut()
					.built
					.insert(name.to_owned(), Arc::clone(&source));
				Ok(source)
			}
			Err(e) => {
				tracing::debug!(source = name, error = %e, "source build failed");
				Err(e)
			}
		}
	}

	/// Resolves a sibling on behalf of the source currently being built.
	///
	/// Like [`Self::get`], but an absent name is reported as
	/// [`SourceError::MissingDependency`] against the requesting source.
	/// Outside a build it behaves exactly like [`Self::get`].
	pub fn dependency(&self, name: &str) -> Result<Arc<dyn Source>, SourceError> {
		if !self.contains(name) {
			let requester = self.state.lock().borrow().in_progress.last().cloned();
			if let Some(requester) = requester {
				return Err(SourceError::MissingDependency {
					source_name: requester,
					dependency: name.to_owned(),
				});
			}
		}
		self.get(name)
	}

	/// Builds every source in insertion order, stopping at the first failure.
	pub fn build_all(&self) -> Result<(), SourceError> {
		for name in self.builders.keys() {
			self.get(name)?;
		}
		Ok(())
	}

	/// Built sources in insertion order, building as needed.
	pub fn sources(&self) -> Result<Vec<(&str, Arc<dyn Source>)>, SourceError> {
		self.names()
			.map(|name| Ok((name, self.get(name)?)))
			.collect()
	}

	/// Sums the `channel` contribution of every source, in insertion order.
	pub fn sum_sources(
		&self,
		channel: AffectedProfile,
		grid: &Grid,
		profiles: &CoreProfiles,
	) -> Result<Vec<f64>, EvalError> {
		self.sum_where(channel, grid, profiles, |_| true)
	}

	/// Like [`Self::sum_sources`], restricted to sources that do not link back.
	///
	/// Linked sources use this to read their siblings without re-entering
	/// one another's evaluation.
	pub fn sum_standalone_sources(
		&self,
		channel: AffectedProfile,
		grid: &Grid,
		profiles: &CoreProfiles,
	) -> Result<Vec<f64>, EvalError> {
		self.sum_where(channel, grid, profiles, |b| !b.links_back())
	}

	fn sum_where(
		&self,
		channel: AffectedProfile,
		grid: &Grid,
		profiles: &CoreProfiles,
		include: impl Fn(&SourceBuilder) -> bool,
	) -> Result<Vec<f64>, EvalError> {
		let mut total = grid.zeros();
		for (name, builder) in &self.builders {
			if !include(builder) {
				continue;
			}
			let source = self.get(name)?;
			if source.affects(channel) {
				source
					.evaluate(grid, profiles)?
					.accumulate(channel, &mut total);
			}
		}
		Ok(total)
	}
}
