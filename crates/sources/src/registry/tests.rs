use pretty_assertions::assert_eq;

use super::{RegistryBuilder, SourceRegistration};
use crate::builder::SourceBuilder;
use crate::error::{RegistryError, SourceError};
use crate::test_fixtures::{Constant, ConstantBuilder, ConstantParams, Sum, SumBuilder, SumParams};
use crate::types::TypeInfo;

static CONSTANT: SourceRegistration = SourceRegistration {
	name: "constant",
	source_type: TypeInfo::of::<Constant>(),
	params_type: TypeInfo::of::<ConstantParams>(),
	builder: SourceBuilder::default_standalone::<ConstantBuilder>,
	links_back: false,
};

static SUM: SourceRegistration = SourceRegistration {
	name: "sum",
	source_type: TypeInfo::of::<Sum>(),
	params_type: TypeInfo::of::<SumParams>(),
	builder: SourceBuilder::default_linked::<SumBuilder>,
	links_back: true,
};

static CONSTANT_AGAIN: SourceRegistration = SourceRegistration {
	name: "constant",
	source_type: TypeInfo::of::<Constant>(),
	params_type: TypeInfo::of::<ConstantParams>(),
	builder: SourceBuilder::default_standalone::<ConstantBuilder>,
	links_back: false,
};

/// Claims to link back but hands out a standalone builder.
static MISLABELED: SourceRegistration = SourceRegistration {
	name: "mislabeled",
	source_type: TypeInfo::of::<Constant>(),
	params_type: TypeInfo::of::<ConstantParams>(),
	builder: SourceBuilder::default_standalone::<ConstantBuilder>,
	links_back: true,
};

#[test]
fn register_and_get_returns_record_unchanged() {
	let mut builder = RegistryBuilder::new();
	builder.register(&CONSTANT).unwrap();
	builder.register(&SUM).unwrap();
	let registry = builder.build();

	let reg = registry.get("sum").unwrap();
	assert!(std::ptr::eq(reg, &SUM));
	assert_eq!(reg.source_type, TypeInfo::of::<Sum>());
	assert!(reg.links_back);
}

#[test]
fn duplicate_name_is_rejected() {
	let mut builder = RegistryBuilder::new();
	builder.register(&CONSTANT).unwrap();

	let err = builder.register(&CONSTANT_AGAIN).unwrap_err();
	assert_eq!(
		err,
		RegistryError::DuplicateName {
			name: "constant".to_owned()
		}
	);
	assert_eq!(builder.len(), 1);
}

#[test]
fn unknown_name_is_rejected() {
	let registry = RegistryBuilder::new().build();
	assert!(registry.is_empty());
	assert_eq!(
		registry.get("nonexistent").unwrap_err(),
		RegistryError::UnknownComponent {
			name: "nonexistent".to_owned()
		}
	);
}

#[test]
fn frozen_registry_iterates_by_name() {
	let mut builder = RegistryBuilder::new();
	builder.register(&SUM).unwrap();
	builder.register(&MISLABELED).unwrap();
	builder.register(&CONSTANT).unwrap();
	let registry = builder.build();

	assert_eq!(
		registry.names().collect::<Vec<_>>(),
		vec!["constant", "mislabeled", "sum"]
	);
}

#[test]
fn source_builder_matches_declared_variant() {
	assert!(!CONSTANT.source_builder().unwrap().links_back());
	assert!(SUM.source_builder().unwrap().links_back());
}

#[test]
fn links_back_mismatch_is_a_consistency_error() {
	let err = MISLABELED.source_builder().unwrap_err();
	assert!(
		matches!(
			err,
			SourceError::RegistrationConsistency {
				name: "mislabeled",
				registered: true,
				builder: false,
			}
		),
		"{err:?}"
	);
}

#[cfg(feature = "builtins")]
mod global {
	use pretty_assertions::assert_eq;

	use crate::error::RegistryError;
	use crate::registry::{get_registered_source, init};

	#[test]
	fn init_is_idempotent() {
		let a = init().unwrap();
		let b = init().unwrap();
		assert!(std::ptr::eq(a, b));
		assert_eq!(a.len(), 11);
	}

	#[test]
	fn unknown_global_lookup() {
		assert_eq!(
			get_registered_source("nonexistent").unwrap_err(),
			RegistryError::UnknownComponent {
				name: "nonexistent".to_owned()
			}
		);
	}
}
