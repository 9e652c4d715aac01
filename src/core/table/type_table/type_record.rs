use std::sync::Arc;

use crate::core::Destructor;
use crate::core::Handle;
use crate::core::Kind;
use crate::core::Resource;
use crate::core::table::HandleEntry;
use crate::core::table::HandleStore;
use crate::error::fatal;
use crate::raise;

/// Per-kind bookkeeping: destructor, slot counter, registrations, and the
/// live entries of the kind.
pub(crate) struct TypeRecord {
  kind: Kind,
  destructor: Destructor,
  registrations: u32,
  next_slot: u64,
  store: HandleStore,
}

impl TypeRecord {
  /// Creates a record with a single registration and no entries.
  #[inline]
  pub(crate) fn new(kind: Kind, destructor: Destructor, capacity: usize) -> Self {
    Self {
      kind,
      destructor,
      registrations: 1,
      next_slot: 0,
      store: HandleStore::with_capacity(capacity),
    }
  }

  #[cfg(test)]
  #[inline]
  pub(crate) const fn kind(&self) -> Kind {
    self.kind
  }

  #[inline]
  pub(crate) fn destructor(&self) -> Destructor {
    Arc::clone(&self.destructor)
  }

  #[inline]
  pub(crate) const fn registrations(&self) -> u32 {
    self.registrations
  }

  /// Returns `true` if the record accepts new handles and lookups.
  #[inline]
  pub(crate) const fn is_registered(&self) -> bool {
    self.registrations > 0
  }

  #[cfg(test)]
  #[inline]
  pub(crate) const fn next_slot(&self) -> u64 {
    self.next_slot
  }

  #[inline]
  pub(crate) const fn store(&self) -> &HandleStore {
    &self.store
  }

  #[inline]
  pub(crate) const fn store_mut(&mut self) -> &mut HandleStore {
    &mut self.store
  }

  /// Adds a registration.
  ///
  /// A record revived from zero registrations takes the new destructor;
  /// otherwise the destructor of the first registration is kept.
  ///
  /// # Panics
  ///
  /// Raises a `SysCap` exception if the registration count overflows.
  pub(crate) fn register(&mut self, destructor: Destructor) -> u32 {
    let Some(registrations) = self.registrations.checked_add(1) else {
      raise!(Error, SysCap, format_args!("too many registrations of {}", self.kind));
    };

    if self.registrations == 0 {
      self.destructor = destructor;
    }

    self.registrations = registrations;
    registrations
  }

  /// Drops a registration, returning the remaining count.
  ///
  /// Returns `None` if the record has no registrations left to drop.
  #[inline]
  pub(crate) fn unregister(&mut self) -> Option<u32> {
    self.registrations = self.registrations.checked_sub(1)?;
    Some(self.registrations)
  }

  /// Assigns the next slot to `object` and links its entry.
  ///
  /// # Panics
  ///
  /// Raises a `SysCap` exception if the kind has handed out every slot up
  /// to `slot_limit`.
  pub(crate) fn allocate(&mut self, object: Arc<dyn Resource>, slot_limit: u64) -> Handle {
    let slot: u64 = self.next_slot;

    let Some(handle) = Handle::encode(self.kind, slot).filter(|_| slot <= slot_limit) else {
      raise!(Error, SysCap, format_args!("handle slots exhausted for {}", self.kind));
    };

    if !self.store.insert(HandleEntry::new(handle, object)) {
      fatal!(format_args!("slot {slot} of {} allocated twice", self.kind));
    }

    self.next_slot = slot + 1;

    handle
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
