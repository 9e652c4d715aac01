use std::any::Any;
use std::sync::Arc;

use crate::error::DestroyError;

/// Object stored behind a [`Handle`].
///
/// Containers and objects report a name so they can be found with
/// [`Registry::find_by_name`]; kinds without names keep the default.
///
/// [`Handle`]: crate::core::Handle
/// [`Registry::find_by_name`]: crate::registry::Registry::find_by_name
pub trait Resource: IntoAny + Send + Sync {
  /// Returns the name used for name-based lookup, if this kind has one.
  #[inline]
  fn name(&self) -> Option<&str> {
    None
  }
}

/// Conversion of a shared resource into a type-erased [`Any`].
///
/// Implemented for every `'static` type; used to downcast lookups back to
/// their concrete type.
pub trait IntoAny: Any {
  /// Converts `self` into a shared [`Any`].
  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T> IntoAny for T
where
  T: Any + Send + Sync,
{
  #[inline]
  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
    self
  }
}

/// Callback releasing the underlying state of an object when its last
/// reference is dropped.
///
/// Returning an error keeps the object registered so the release can be
/// retried.
pub type Destructor = Arc<dyn Fn(&dyn Resource) -> Result<(), DestroyError> + Send + Sync>;

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
