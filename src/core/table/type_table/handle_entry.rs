use std::sync::Arc;

use crate::core::Handle;
use crate::core::Resource;
use crate::tyre::num::AtomicRefCount;

/// Bookkeeping for one live resource.
///
/// The entry is the sole owner of the object's registration; callers only
/// ever receive shared clones of the object through lookups.
pub(crate) struct HandleEntry {
  handle: Handle,
  object: Arc<dyn Resource>,
  refcount: AtomicRefCount,
}

impl HandleEntry {
  /// Creates a new entry holding a single reference.
  #[inline]
  pub(crate) fn new(handle: Handle, object: Arc<dyn Resource>) -> Self {
    Self {
      handle,
      object,
      refcount: AtomicRefCount::new(),
    }
  }

  #[inline]
  pub(crate) const fn handle(&self) -> Handle {
    self.handle
  }

  #[inline]
  pub(crate) fn object(&self) -> &Arc<dyn Resource> {
    &self.object
  }

  #[inline]
  pub(crate) const fn refcount(&self) -> &AtomicRefCount {
    &self.refcount
  }
}
