use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

// -----------------------------------------------------------------------------
// Exception Class
// -----------------------------------------------------------------------------

/// Exception severity classification.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExceptionClass {
  /// Error that the registry cannot report through a `Result`.
  Error,
}

impl Display for ExceptionClass {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::Error => f.write_str("error"),
    }
  }
}

// -----------------------------------------------------------------------------
// Exception Group
// -----------------------------------------------------------------------------

/// Exception category indicating the nature of the error.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExceptionGroup {
  /// System capacity limit exceeded.
  ///
  /// Raised when a kind runs out of handle slots or a counter would overflow.
  SysCap,
  /// Invalid system operation or state.
  ///
  /// Registry bookkeeping no longer matches the handles it has issued.
  SysInv,
}

impl ExceptionGroup {
  #[inline]
  pub(crate) const fn label(&self) -> &'static str {
    match self {
      Self::SysCap => "syscap",
      Self::SysInv => "sysinv",
    }
  }
}

impl Display for ExceptionGroup {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::SysCap => f.write_str("(SysCap) a system limit has been reached"),
      Self::SysInv => f.write_str("(SysInv) a system invariant has been broken"),
    }
  }
}

// -----------------------------------------------------------------------------
// Exception
// -----------------------------------------------------------------------------

/// A structured exception with class, group, message, and backtrace.
///
/// Exceptions are raised via the [`raise!`] macro and propagated through
/// panic unwinding.
///
/// # Display Format
///
/// Exceptions format as: `{class}:{group} - {message}`
///
/// Example: `error:syscap - handle slots exhausted for kind cont`
///
/// [`raise!`]: crate::raise
pub struct Exception {
  class: ExceptionClass,
  group: ExceptionGroup,
  error: String,
  trace: Backtrace,
}

impl Exception {
  /// Creates a new exception with the given class, group, and message.
  ///
  /// Captures a backtrace at the call site.
  #[inline]
  pub fn new<T>(class: ExceptionClass, group: ExceptionGroup, error: T) -> Self
  where
    T: Display,
  {
    Self {
      class,
      group,
      error: error.to_string(),
      trace: Backtrace::capture(),
    }
  }

  /// Returns the exception's severity class.
  #[inline]
  pub const fn class(&self) -> ExceptionClass {
    self.class
  }

  /// Returns the exception's error category.
  #[inline]
  pub const fn group(&self) -> ExceptionGroup {
    self.group
  }

  /// Returns the human-readable error message.
  #[inline]
  pub const fn error(&self) -> &str {
    self.error.as_str()
  }

  /// Returns the captured backtrace.
  #[inline]
  pub const fn trace(&self) -> &Backtrace {
    &self.trace
  }
}

impl Debug for Exception {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Display::fmt(self, f)
  }
}

impl Display for Exception {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "{}:{} - {}", self.class, self.group.label(), self.error)
  }
}

impl Error for Exception {}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use crate::error::Exception;
  use crate::error::ExceptionClass;
  use crate::error::ExceptionGroup;

  #[test]
  fn test_class_display() {
    assert_eq!(format!("{}", ExceptionClass::Error), "error");
  }

  #[test]
  fn test_group_display() {
    let syscap: String = format!("{}", ExceptionGroup::SysCap);
    let sysinv: String = format!("{}", ExceptionGroup::SysInv);

    assert!(syscap.starts_with("(SysCap)"));
    assert!(sysinv.starts_with("(SysInv)"));
  }

  #[test]
  fn test_exception_accessors() {
    let exception: Exception = Exception::new(ExceptionClass::Error, ExceptionGroup::SysCap, 42);

    assert_eq!(exception.class(), ExceptionClass::Error);
    assert_eq!(exception.group(), ExceptionGroup::SysCap);
    assert_eq!(exception.error(), "42");
  }

  #[test]
  fn test_exception_display() {
    let exception: Exception =
      Exception::new(ExceptionClass::Error, ExceptionGroup::SysInv, "entry missing");

    assert_eq!(format!("{exception}"), "error:sysinv - entry missing");
    assert_eq!(format!("{exception}"), format!("{exception:?}"));
  }
}
