use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use triomphe::Arc;

use crate::core::Handle;
use crate::core::table::HandleEntry;

/// Live entries of a single kind, keyed by slot.
///
/// Slots are handed out in increasing order and never reused, so ordering
/// entries by slot recovers allocation order.
pub(crate) struct HandleStore {
  entries: HashMap<u64, Arc<HandleEntry>>,
}

impl HandleStore {
  #[inline]
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      entries: HashMap::with_capacity(capacity),
    }
  }

  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub(crate) fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Links a new entry into the store.
  ///
  /// Returns `false` if the slot is already occupied.
  #[inline]
  pub(crate) fn insert(&mut self, entry: HandleEntry) -> bool {
    let slot: u64 = entry.handle().slot();

    match self.entries.entry(slot) {
      Entry::Occupied(_) => false,
      Entry::Vacant(vacant) => {
        vacant.insert(Arc::new(entry));
        true
      }
    }
  }

  #[inline]
  pub(crate) fn get(&self, slot: u64) -> Option<&Arc<HandleEntry>> {
    self.entries.get(&slot)
  }

  #[inline]
  pub(crate) fn remove(&mut self, slot: u64) -> Option<Arc<HandleEntry>> {
    self.entries.remove(&slot)
  }

  /// Returns every entry in allocation order.
  pub(crate) fn snapshot(&self) -> Vec<Arc<HandleEntry>> {
    let mut entries: Vec<Arc<HandleEntry>> = self.entries.values().cloned().collect();
    entries.sort_unstable_by_key(|entry| entry.handle().slot());
    entries
  }

  /// Returns every handle in allocation order.
  pub(crate) fn handles(&self) -> Vec<Handle> {
    let mut handles: Vec<Handle> = self.entries.values().map(|entry| entry.handle()).collect();
    handles.sort_unstable();
    handles
  }

  /// Returns the earliest allocated entry whose object is named `name`.
  pub(crate) fn find_by_name(&self, name: &str) -> Option<Handle> {
    self
      .entries
      .values()
      .filter(|entry| entry.object().name() == Some(name))
      .map(|entry| entry.handle())
      .min()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
