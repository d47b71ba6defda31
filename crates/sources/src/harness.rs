//! Registration consistency checks.
//!
//! For each registration: construct a default builder, check its params
//! type, build a source (directly, or through a single-entry aggregate when
//! the source links back) and check the source type. Run from test suites;
//! production construction never pays for these checks.

use std::any::Any;
use std::sync::Arc;

use crate::error::SourceError;
use crate::models::SourceModels;
use crate::registry::{SourceRegistration, SourceRegistry};
use crate::source::Source;
use crate::types::TypeInfo;


fn check_type(
	reg: &SourceRegistration,
	what: &'static str,
	expected: &TypeInfo,
	value: &dyn Any,
	actual: &'static str,
) -> Result<(), SourceError> {
	if expected.matches(value) {
		Ok(())
	} else {
		Err(SourceError::TypeMismatch {
			name: reg.name,
			what,
			expected: expected.name(),
			actual,
		})
	}
}

/// Checks one registration end to end, returning the built source.
pub fn check_registration(reg: &SourceRegistration) -> Result<Arc<dyn Source>, SourceError> {
	let builder = reg.source_builder()?;
	let params = builder.runtime_params();
	check_type(reg, "runtime params", &reg.params_type, params.as_any(), params.type_name())?;

	let source = if reg.links_back {
		let models = SourceModels::new([(reg.name, builder)])?;
		models.get(reg.name)?
	} else {
		builder.build(None)?
	};
	check_type(reg, "source", &reg.source_type, source.as_any(), source.type_name())?;

	tracing::trace!(source = reg.name, links_back = reg.links_back, "registration consistent");
	Ok(source)
}

/// Checks every registration, collecting failures by name.
pub fn check_registry(registry: &SourceRegistry) -> Vec<(&'static str, SourceError)> {
	registry
		.iter()
		.filter_map(|reg| check_registration(reg).err().map(|e| (reg.name, e)))
		.collect()
}
