//! Source registration macro.

/// Declares a [`SourceRegistration`](crate::registry::SourceRegistration)
/// and submits it to the process-wide registry through `inventory`.
///
/// `links_back` picks the builder variant: `false` requires
/// [`BuildStandalone`](crate::builder::BuildStandalone), `true` requires
/// [`BuildLinked`](crate::builder::BuildLinked).
///
/// ```ignore
/// register_source!(ohmic, {
///     name: SOURCE_NAME,
///     source: OhmicHeatSource,
///     params: OhmicParams,
///     builder: OhmicHeatSourceBuilder,
///     links_back: false,
/// });
/// ```
#[macro_export]
macro_rules! register_source {
	($id:ident, {
		name: $name:expr,
		source: $source:ty,
		params: $params:ty,
		builder: $builder:ty,
		links_back: false $(,)?
	}) => {
		$crate::register_source!(@emit $id, $name, $source, $params,
			$crate::builder::SourceBuilder::default_standalone::<$builder>, false);
	};
	($id:ident, {
		name: $name:expr,
		source: $source:ty,
		params: $params:ty,
		builder: $builder:ty,
		links_back: true $(,)?
	}) => {
		$crate::register_source!(@emit $id, $name, $source, $params,
			$crate::builder::SourceBuilder::default_linked::<$builder>, true);
	};
	(@emit $id:ident, $name:expr, $source:ty, $params:ty, $ctor:expr, $links_back:literal) => {
		$crate::__private::paste::paste! {
			#[allow(non_upper_case_globals)]
			pub(crate) static [<SOURCE_REG_ $id>]: $crate::registry::SourceRegistration =
				$crate::registry::SourceRegistration {
					name: $name,
					source_type: $crate::types::TypeInfo::of::<$source>(),
					params_type: $crate::types::TypeInfo::of::<$params>(),
					builder: $ctor,
					links_back: $links_back,
				};

			$crate::__private::inventory::submit!($crate::registry::SourceReg(&[<SOURCE_REG_ $id>]));
		}
	};
}
