//! Handle registry ("atom table") for PDC resources.
//!
//! A [`Registry`] maps compact [`Handle`]s to shared objects, grouped by
//! [`Kind`]. Each kind is registered once per interested subsystem, hands
//! out handles with strictly increasing slots, and runs its destructor when
//! the reference count of a handle drops to zero.
//!
//! # Lifecycle
//!
//! ```text
//! register_type ──> allocate ──> increment/decrement ──> (count = 0) ──> destructor
//!                                                           ├─ Ok:  entry unlinked
//!                                                           └─ Err: entry kept (count 0)
//! clear_type ──> unregister_type ──> destroy_type
//! ```
//!
//! # Concurrency
//!
//! Reference counts are atomic and only need the shared side of their
//! kind's lock to be located. Structural changes (allocation, unlinking,
//! registration) take the exclusive side. Exactly one thread wins the
//! transition to zero and runs the destructor, without holding any lock.
//!
//! A handle returned by [`Registry::find`] stays readable through the
//! returned `Arc`, but the handle itself is only guaranteed to stay live
//! while the caller holds a reference taken with [`Registry::increment`].

use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Arc;
use tracing::debug;
use tracing::trace;

use crate::core::Destructor;
use crate::core::Handle;
use crate::core::HandleEntry;
use crate::core::IntoAny;
use crate::core::Kind;
use crate::core::Resource;
use crate::core::TypeRecord;
use crate::core::TypeSlot;
use crate::core::TypeTable;
use crate::error::DestroyError;
use crate::error::RegistryError;
use crate::error::fatal;
use crate::loom::sync::atomic::Ordering;
use crate::loom::thread;
use crate::registry::RegistryConfig;
use crate::tyre::num::AtomicRefCount;
use crate::tyre::num::Release;

// -----------------------------------------------------------------------------
// Registry
// -----------------------------------------------------------------------------

/// Registry of typed, reference-counted handles.
///
/// Construct one instance per process (or per test) and share it by
/// reference or `Arc` with every subsystem that creates or resolves handles.
pub struct Registry {
  config: RegistryConfig,
  table: TypeTable,
}

impl Registry {
  /// Creates an empty registry using the default configuration.
  #[inline]
  pub fn new() -> Self {
    Self::with_config(RegistryConfig::new())
  }

  /// Creates an empty registry with no registered kinds.
  #[inline]
  pub fn with_config(config: RegistryConfig) -> Self {
    Self {
      config,
      table: TypeTable::new(),
    }
  }

  /// Returns the configuration of this registry.
  #[inline]
  pub const fn config(&self) -> &RegistryConfig {
    &self.config
  }

  // ---------------------------------------------------------------------------
  // Type Table
  // ---------------------------------------------------------------------------

  /// Registers `kind`, or adds a registration if it already exists.
  ///
  /// The first registration creates the type record and stores
  /// `destructor`. Later registrations only bump the registration count and
  /// leave live handles untouched; `destructor` is kept only when the kind
  /// is revived after its count dropped to zero.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::InvalidType`] if `kind` is out of range.
  ///
  /// # Examples
  ///
  /// ```
  /// use pdc_id::core::Kind;
  /// use pdc_id::registry::Registry;
  ///
  /// let registry: Registry = Registry::new();
  ///
  /// registry.register_type(Kind::CONT, |_| Ok(())).unwrap();
  ///
  /// assert!(registry.is_registered(Kind::CONT));
  /// ```
  pub fn register_type<F>(&self, kind: Kind, destructor: F) -> Result<(), RegistryError>
  where
    F: Fn(&dyn Resource) -> Result<(), DestroyError> + Send + Sync + 'static,
  {
    let destructor: Destructor = Arc::new(destructor);
    let mut guard = self.table.write(kind)?;

    let registrations: u32 = match guard.as_mut() {
      Some(record) => record.register(destructor),
      None => {
        *guard = Some(TypeRecord::new(kind, destructor, self.config.cap_type_entries));
        1
      }
    };

    drop(guard);

    debug!(target: "pdc_id", kind = %kind, registrations, "type registered");

    Ok(())
  }

  /// Returns `true` if `kind` has at least one live registration.
  #[inline]
  pub fn is_registered(&self, kind: Kind) -> bool {
    self.registrations(kind) > 0
  }

  /// Returns the number of live registrations of `kind`.
  pub fn registrations(&self, kind: Kind) -> u32 {
    match self.table.read(kind) {
      Ok(guard) => guard.as_ref().map_or(0, TypeRecord::registrations),
      Err(_) => 0,
    }
  }

  /// Drops one registration of `kind`, returning the remaining count.
  ///
  /// At zero the kind stops accepting new handles and lookups fail, but
  /// existing entries are kept until [`clear_type`] releases them.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::InvalidType`] if `kind` is out of range.
  /// - [`RegistryError::UnregisteredType`] if `kind` has no registrations.
  ///
  /// [`clear_type`]: Self::clear_type
  pub fn unregister_type(&self, kind: Kind) -> Result<u32, RegistryError> {
    let mut guard = self.table.write(kind)?;

    let Some(remaining) = guard.as_mut().and_then(TypeRecord::unregister) else {
      return Err(RegistryError::UnregisteredType(kind));
    };

    drop(guard);

    debug!(target: "pdc_id", kind = %kind, registrations = remaining, "type unregistered");

    Ok(remaining)
  }

  /// Removes the type record of `kind`.
  ///
  /// The record must not own any entries; call [`clear_type`] first.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::InvalidType`] if `kind` is out of range.
  /// - [`RegistryError::UnregisteredType`] if `kind` has no type record.
  /// - [`RegistryError::TypeNotEmpty`] if live entries remain.
  ///
  /// [`clear_type`]: Self::clear_type
  pub fn destroy_type(&self, kind: Kind) -> Result<(), RegistryError> {
    let mut guard = self.table.write(kind)?;

    match guard.as_ref() {
      None => return Err(RegistryError::UnregisteredType(kind)),
      Some(record) if !record.store().is_empty() => return Err(RegistryError::TypeNotEmpty(kind)),
      Some(_) => *guard = None,
    }

    drop(guard);

    debug!(target: "pdc_id", kind = %kind, "type destroyed");

    Ok(())
  }

  /// Returns every kind that currently owns a type record, in ascending
  /// order.
  #[inline]
  pub fn kinds(&self) -> Vec<Kind> {
    self.table.kinds()
  }

  // ---------------------------------------------------------------------------
  // Handle Store
  // ---------------------------------------------------------------------------

  /// Stores `object` under a new handle of `kind` with a reference count
  /// of one.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::InvalidType`] if `kind` is out of range.
  /// - [`RegistryError::UnregisteredType`] if `kind` is not registered.
  ///
  /// # Panics
  ///
  /// Raises a `SysCap` exception if `kind` has exhausted its slot space.
  pub fn allocate<T>(&self, kind: Kind, object: T) -> Result<Handle, RegistryError>
  where
    T: Resource,
  {
    let mut guard = self.table.write(kind)?;
    let record: &mut TypeRecord = registered_mut(&mut guard, kind)?;
    let handle: Handle = record.allocate(Arc::new(object), self.config.slot_limit());

    drop(guard);

    trace!(target: "pdc_id", handle = %handle, "handle allocated");

    Ok(handle)
  }

  /// Returns the object named by `handle`.
  ///
  /// Returns `None` if the handle is malformed, its kind is not registered,
  /// or the entry was destroyed. An entry whose destructor failed is still
  /// found.
  #[inline]
  pub fn find(&self, handle: Handle) -> Option<Arc<dyn Resource>> {
    self
      .resolve(handle)
      .ok()
      .map(|entry| Arc::clone(entry.object()))
  }

  /// Returns the object named by `handle` as its concrete type.
  ///
  /// Returns `None` if [`find`] fails or the object is not a `T`.
  ///
  /// [`find`]: Self::find
  pub fn find_as<T>(&self, handle: Handle) -> Option<Arc<T>>
  where
    T: Resource,
  {
    let object: Arc<dyn Resource> = self.find(handle)?;

    <dyn Resource as IntoAny>::into_any(object)
      .downcast::<T>()
      .ok()
  }

  /// Returns the earliest allocated handle of `kind` whose object is named
  /// `name`.
  ///
  /// Names are not required to be unique; callers that need uniqueness must
  /// enforce it when creating objects.
  pub fn find_by_name(&self, kind: Kind, name: &str) -> Option<Handle> {
    let guard = self.table.read(kind).ok()?;

    registered(&guard, kind).ok()?.store().find_by_name(name)
  }

  /// Adds a reference to `handle`, returning the new count.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::InvalidType`] if the handle's kind is out of range.
  /// - [`RegistryError::UnregisteredType`] if the handle's kind is not
  ///   registered.
  /// - [`RegistryError::NotFound`] if the handle is not live, including
  ///   handles whose count already reached zero.
  ///
  /// # Panics
  ///
  /// Raises a `SysCap` exception if the count would overflow.
  pub fn increment(&self, handle: Handle) -> Result<u32, RegistryError> {
    let entry: triomphe::Arc<HandleEntry> = self.resolve(handle)?;

    match entry.refcount().acquire() {
      Some(count) => Ok(count.get()),
      None => Err(RegistryError::NotFound(handle)),
    }
  }

  /// Drops a reference to `handle`, returning the new count.
  ///
  /// When the count reaches zero the kind's destructor runs. On success the
  /// entry is unlinked and `0` is returned. On failure the entry is kept
  /// with a count of zero and a later `decrement` retries the destructor.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::InvalidType`] if the handle's kind is out of range.
  /// - [`RegistryError::UnregisteredType`] if the handle's kind is not
  ///   registered.
  /// - [`RegistryError::NotFound`] if the handle is not live or is being
  ///   destroyed by another thread.
  /// - [`RegistryError::DestructorFailed`] if the destructor failed.
  pub fn decrement(&self, handle: Handle) -> Result<u32, RegistryError> {
    let entry: triomphe::Arc<HandleEntry> = self.resolve(handle)?;

    match entry.refcount().release() {
      Some(Release::Live(count)) => Ok(count.get()),
      Some(Release::Claimed) => self.destroy(&entry).map(|()| 0),
      None => Err(RegistryError::NotFound(handle)),
    }
  }

  /// Returns the current reference count of `handle`.
  ///
  /// An entry kept after a failed destructor reports `0`.
  ///
  /// # Errors
  ///
  /// Fails under the same conditions as [`find`].
  ///
  /// [`find`]: Self::find
  pub fn refcount(&self, handle: Handle) -> Result<u32, RegistryError> {
    let entry: triomphe::Arc<HandleEntry> = self.resolve(handle)?;

    match entry.refcount().load(Ordering::Acquire) {
      AtomicRefCount::CLAIMED => Ok(0),
      count => Ok(count),
    }
  }

  /// Destroys every entry of `kind` in allocation order, regardless of
  /// outstanding references.
  ///
  /// Stops at the first failing destructor; that entry and every later one
  /// stay registered so the call can be retried. An entry already being
  /// destroyed by another thread is waited on, and its destructor is run
  /// again here if that attempt fails. Works on kinds that were already
  /// unregistered but not yet destroyed.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::InvalidType`] if `kind` is out of range.
  /// - [`RegistryError::UnregisteredType`] if `kind` has no type record.
  /// - [`RegistryError::DestructorFailed`] if a destructor failed.
  pub fn clear_type(&self, kind: Kind) -> Result<(), RegistryError> {
    let entries: Vec<triomphe::Arc<HandleEntry>> = {
      let guard = self.table.read(kind)?;

      match guard.as_ref() {
        Some(record) => record.store().snapshot(),
        None => return Err(RegistryError::UnregisteredType(kind)),
      }
    };

    debug!(target: "pdc_id", kind = %kind, entries = entries.len(), "clearing type");

    for entry in entries {
      self.settle(&entry)?;
    }

    Ok(())
  }

  /// Returns the number of live entries of `kind`.
  ///
  /// # Errors
  ///
  /// - [`RegistryError::InvalidType`] if `kind` is out of range.
  /// - [`RegistryError::UnregisteredType`] if `kind` has no type record.
  pub fn len(&self, kind: Kind) -> Result<usize, RegistryError> {
    let guard = self.table.read(kind)?;

    match guard.as_ref() {
      Some(record) => Ok(record.store().len()),
      None => Err(RegistryError::UnregisteredType(kind)),
    }
  }

  /// Returns `true` if `kind` owns no live entries.
  ///
  /// # Errors
  ///
  /// Fails under the same conditions as [`len`].
  ///
  /// [`len`]: Self::len
  #[inline]
  pub fn is_empty(&self, kind: Kind) -> Result<bool, RegistryError> {
    self.len(kind).map(|len| len == 0)
  }

  /// Returns the live handles of `kind` in allocation order.
  ///
  /// The list is a snapshot and may be stale immediately after returning.
  ///
  /// # Errors
  ///
  /// Fails under the same conditions as [`len`].
  ///
  /// [`len`]: Self::len
  pub fn handles(&self, kind: Kind) -> Result<Vec<Handle>, RegistryError> {
    let guard = self.table.read(kind)?;

    match guard.as_ref() {
      Some(record) => Ok(record.store().handles()),
      None => Err(RegistryError::UnregisteredType(kind)),
    }
  }

  // ---------------------------------------------------------------------------
  // Internals
  // ---------------------------------------------------------------------------

  fn resolve(&self, handle: Handle) -> Result<triomphe::Arc<HandleEntry>, RegistryError> {
    let (kind, slot): (Kind, u64) = handle.decode();
    let guard = self.table.read(kind)?;

    match registered(&guard, kind)?.store().get(slot) {
      Some(entry) => Ok(triomphe::Arc::clone(entry)),
      None => Err(RegistryError::NotFound(handle)),
    }
  }

  /// Destroys `entry` on behalf of [`clear_type`], waiting out any other
  /// thread that holds its claim.
  ///
  /// [`clear_type`]: Self::clear_type
  fn settle(&self, entry: &HandleEntry) -> Result<(), RegistryError> {
    loop {
      if entry.refcount().claim() {
        return self.destroy(entry);
      }

      if !self.is_linked(entry)? {
        return Ok(());
      }

      // Another claimer is still running the destructor.
      thread::yield_now();
    }
  }

  fn is_linked(&self, entry: &HandleEntry) -> Result<bool, RegistryError> {
    let (kind, slot): (Kind, u64) = entry.handle().decode();
    let guard = self.table.read(kind)?;

    Ok(guard.as_ref().is_some_and(|record| record.store().get(slot).is_some()))
  }

  /// Runs the destructor of a claimed entry and unlinks it on success.
  ///
  /// The claim is given up if the destructor fails or unwinds, leaving the
  /// entry at a count of zero for a later retry.
  fn destroy(&self, entry: &HandleEntry) -> Result<(), RegistryError> {
    let handle: Handle = entry.handle();
    let (kind, slot): (Kind, u64) = handle.decode();
    let claim: Claim<'_> = Claim::new(entry);

    let destructor: Destructor = {
      let guard = self.table.read(kind)?;

      match guard.as_ref() {
        Some(record) => record.destructor(),
        None => fatal!(format_args!("{handle} outlived its type record")),
      }
    };

    if let Err(error) = destructor(&**entry.object()) {
      return Err(RegistryError::DestructorFailed { handle, error });
    }

    claim.complete();

    let removed: Option<triomphe::Arc<HandleEntry>> = {
      let mut guard = self.table.write(kind)?;

      guard
        .as_mut()
        .and_then(|record| record.store_mut().remove(slot))
    };

    if removed.is_none() {
      fatal!(format_args!("{handle} destroyed but missing from its type record"));
    }

    trace!(target: "pdc_id", handle = %handle, "handle destroyed");

    Ok(())
  }
}

// -----------------------------------------------------------------------------
// Claim
// -----------------------------------------------------------------------------

/// Exclusive right to destroy an entry, abandoned on drop unless completed.
struct Claim<'a> {
  entry: Option<&'a HandleEntry>,
}

impl<'a> Claim<'a> {
  #[inline]
  const fn new(entry: &'a HandleEntry) -> Self {
    Self { entry: Some(entry) }
  }

  #[inline]
  fn complete(mut self) {
    self.entry = None;
  }
}

impl Drop for Claim<'_> {
  fn drop(&mut self) {
    if let Some(entry) = self.entry {
      entry.refcount().abandon();
    }
  }
}

impl Debug for Registry {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Registry")
      .field("config", &self.config)
      .field("table", &self.table)
      .finish()
  }
}

impl Default for Registry {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

#[inline]
fn registered(slot: &TypeSlot, kind: Kind) -> Result<&TypeRecord, RegistryError> {
  match slot {
    Some(record) if record.is_registered() => Ok(record),
    _ => Err(RegistryError::UnregisteredType(kind)),
  }
}

#[inline]
fn registered_mut(slot: &mut TypeSlot, kind: Kind) -> Result<&mut TypeRecord, RegistryError> {
  match slot {
    Some(record) if record.is_registered() => Ok(record),
    _ => Err(RegistryError::UnregisteredType(kind)),
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
