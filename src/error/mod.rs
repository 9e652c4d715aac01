//! Error types for the handle registry.
//!
//! Failures fall into three tiers:
//!
//! 1. **Recoverable**: returned as [`RegistryError`] from every registry
//!    operation (unknown kind, stale handle, failed destructor).
//! 2. **Capacity**: a kind ran out of slots or a counter would overflow.
//!    These are raised as panics carrying an [`Exception`] via [`raise!`].
//! 3. **Invariant**: internal bookkeeping is corrupt. The process prints a
//!    diagnostic and aborts via `fatal!`.
//!
//! # Exception Groups
//!
//! - [`SysCap`]: System capacity exhausted (slot space, reference counts)
//! - [`SysInv`]: Invalid system state or operation
//!
//! [`SysCap`]: ExceptionGroup::SysCap
//! [`SysInv`]: ExceptionGroup::SysInv
//!
//! [`raise!`]: crate::raise!

mod destroy_error;
mod exception;
mod registry_error;

pub use self::destroy_error::DestroyError;
pub use self::exception::Exception;
pub use self::exception::ExceptionClass;
pub use self::exception::ExceptionGroup;
pub use self::registry_error::RegistryError;

// -----------------------------------------------------------------------------
// raise!
// -----------------------------------------------------------------------------

/// Raises an exception with the specified class, group, and message.
///
/// # Examples
///
/// ```
/// # use pdc_id::raise;
/// fn reserve(used: u64, limit: u64) {
///   if used > limit {
///     raise!(Error, SysCap, "too many handles");
///   }
/// }
/// ```
#[macro_export]
macro_rules! raise {
  ($class:ident, $group:ident, $error:expr $(,)?) => {
    ::std::panic!(
      "{}",
      $crate::error::Exception::new(
        $crate::error::ExceptionClass::$class,
        $crate::error::ExceptionGroup::$group,
        $error,
      ),
    )
  };
}

// -----------------------------------------------------------------------------
// fatal!
// -----------------------------------------------------------------------------

/// Displays a system error message and aborts the program.
///
/// Use this for unrecoverable errors that indicate bugs in the registry
/// itself. The program prints a diagnostic message and immediately aborts
/// without unwinding.
macro_rules! fatal {
  ($error:expr) => {{
    ::std::eprintln!(
      "{}:{}: {}",
      ::std::file!(),
      ::std::line!(),
      $crate::error::Exception::new(
        $crate::error::ExceptionClass::Error,
        $crate::error::ExceptionGroup::SysInv,
        $error,
      ),
    );

    ::std::process::abort();
  }};
}

pub(crate) use fatal;

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
