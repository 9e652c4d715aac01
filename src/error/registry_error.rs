use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::core::Handle;
use crate::core::Kind;
use crate::error::DestroyError;

/// Error returned from a registry operation.
///
/// Every variant is recoverable; the registry never logs or swallows them.
#[derive(Debug)]
#[non_exhaustive]
pub enum RegistryError {
  /// The kind is outside the range a handle can encode.
  InvalidType(Kind),
  /// The kind is valid but has no live type record.
  UnregisteredType(Kind),
  /// The handle does not name a live entry.
  NotFound(Handle),
  /// The type record still owns entries and cannot be destroyed.
  TypeNotEmpty(Kind),
  /// The kind's destructor failed; the entry was kept.
  DestructorFailed {
    /// Handle of the entry that could not be released.
    handle: Handle,
    /// Error reported by the destructor.
    error: DestroyError,
  },
}

impl Display for RegistryError {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::InvalidType(kind) => write!(f, "invalid type: {kind}"),
      Self::UnregisteredType(kind) => write!(f, "unregistered type: {kind}"),
      Self::NotFound(handle) => write!(f, "handle not found: {handle}"),
      Self::TypeNotEmpty(kind) => write!(f, "type still has live handles: {kind}"),
      Self::DestructorFailed { handle, error } => {
        write!(f, "destructor failed for {handle}: {error}")
      }
    }
  }
}

impl PartialEq for RegistryError {
  /// Destructor failures compare by handle and message.
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::InvalidType(lhs), Self::InvalidType(rhs)) => lhs == rhs,
      (Self::UnregisteredType(lhs), Self::UnregisteredType(rhs)) => lhs == rhs,
      (Self::NotFound(lhs), Self::NotFound(rhs)) => lhs == rhs,
      (Self::TypeNotEmpty(lhs), Self::TypeNotEmpty(rhs)) => lhs == rhs,
      (
        Self::DestructorFailed { handle, error },
        Self::DestructorFailed {
          handle: other_handle,
          error: other_error,
        },
      ) => handle == other_handle && error.to_string() == other_error.to_string(),
      _ => false,
    }
  }
}

impl Error for RegistryError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::DestructorFailed { error, .. } => Some(error),
      _ => None,
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
