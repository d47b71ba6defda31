use std::any::{Any, TypeId};

/// Declared concrete type of a registered source or its runtime params.
///
/// Stored as function pointers so registrations stay `const`-constructible.
#[derive(Clone, Copy)]
pub struct TypeInfo {
	id: fn() -> TypeId,
	name: fn() -> &'static str,
}

impl TypeInfo {
	pub const fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>,
			name: std::any::type_name::<T>,
		}
	}

	#[inline]
	pub fn id(&self) -> TypeId {
		(self.id)()
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		(self.name)()
	}

	/// Whether `value` is exactly the declared type.
	#[inline]
	pub fn matches(&self, value: &dyn Any) -> bool {
		value.type_id() == self.id()
	}
}

impl core::fmt::Debug for TypeInfo {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

impl PartialEq for TypeInfo {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for TypeInfo {}
