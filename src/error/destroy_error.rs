use std::error::Error;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// Error reported by a kind's destructor when it fails to release an object.
///
/// The registry keeps the entry alive when this is returned so the release
/// can be retried with another decrement.
pub struct DestroyError {
  inner: Box<dyn Error + Send + Sync>,
}

impl DestroyError {
  /// Wraps any error (or message) produced while releasing an object.
  ///
  /// # Examples
  ///
  /// ```
  /// use pdc_id::error::DestroyError;
  ///
  /// let error: DestroyError = DestroyError::new("region still locked");
  ///
  /// assert_eq!(error.to_string(), "region still locked");
  /// ```
  #[inline]
  pub fn new<E>(error: E) -> Self
  where
    E: Into<Box<dyn Error + Send + Sync>>,
  {
    Self {
      inner: error.into(),
    }
  }

  /// Returns the wrapped error.
  #[inline]
  pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
    &*self.inner
  }

  /// Consumes `self`, returning the wrapped error.
  #[inline]
  pub fn into_inner(self) -> Box<dyn Error + Send + Sync> {
    self.inner
  }
}

impl Debug for DestroyError {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_tuple("DestroyError").field(&self.inner).finish()
  }
}

impl Display for DestroyError {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Display::fmt(&self.inner, f)
  }
}

impl Error for DestroyError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    self.inner.source()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
