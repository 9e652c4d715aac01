//! Process-wide table of type records, one lock per kind.
//!
//! # Locking
//!
//! Each kind owns an independent, cache-padded `RwLock`. Lookups and
//! reference count updates share the read side; registration, allocation,
//! and unlinking take the write side. Locks are never held while a
//! destructor runs, so destructors may re-enter the registry.
//!
//! ```text
//! ┌──────────┐ ┌──────────┐ ┌──────────┐     ┌──────────┐
//! │ kind 0   │ │ kind 1   │ │ kind 2   │ ... │ kind 127 │
//! │ reserved │ │ RwLock   │ │ RwLock   │     │ RwLock   │
//! └──────────┘ └──────────┘ └──────────┘     └──────────┘
//! │Cache-line│ │Cache-line│ │Cache-line│     │Cache-line│
//! ```

use crossbeam_utils::CachePadded;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use crate::consts::MAX_KINDS;
use crate::core::Kind;
use crate::core::table::TypeRecord;
use crate::error::RegistryError;
use crate::loom::sync::RwLock;
use crate::loom::sync::RwLockReadGuard;
use crate::loom::sync::RwLockWriteGuard;

/// Slot of the type table, empty until its kind is first registered.
pub(crate) type TypeSlot = Option<TypeRecord>;

pub(crate) struct TypeTable {
  slots: Box<[CachePadded<RwLock<TypeSlot>>]>,
}

impl TypeTable {
  /// Creates a table with no registered kinds.
  pub(crate) fn new() -> Self {
    Self {
      slots: (0..MAX_KINDS)
        .map(|_| CachePadded::new(RwLock::new(None)))
        .collect(),
    }
  }

  /// Acquires the read side of the lock guarding `kind`.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::InvalidType`] if `kind` is out of range.
  #[inline]
  pub(crate) fn read(&self, kind: Kind) -> Result<RwLockReadGuard<'_, TypeSlot>, RegistryError> {
    self.slot(kind).map(|lock| lock.read())
  }

  /// Acquires the write side of the lock guarding `kind`.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::InvalidType`] if `kind` is out of range.
  #[inline]
  pub(crate) fn write(&self, kind: Kind) -> Result<RwLockWriteGuard<'_, TypeSlot>, RegistryError> {
    self.slot(kind).map(|lock| lock.write())
  }

  /// Returns every kind that currently owns a type record.
  pub(crate) fn kinds(&self) -> Vec<Kind> {
    (1..MAX_KINDS as u8)
      .map(Kind::new)
      .filter(|kind| matches!(self.read(*kind), Ok(guard) if guard.is_some()))
      .collect()
  }

  #[inline]
  fn slot(&self, kind: Kind) -> Result<&RwLock<TypeSlot>, RegistryError> {
    if !kind.is_valid() {
      return Err(RegistryError::InvalidType(kind));
    }

    match self.slots.get(kind.index()) {
      Some(lock) => Ok(lock),
      None => Err(RegistryError::InvalidType(kind)),
    }
  }
}

impl Debug for TypeTable {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("TypeTable")
      .field("capacity", &self.slots.len())
      .field("kinds", &self.kinds())
      .finish()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
