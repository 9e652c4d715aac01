use crate::consts;
use crate::core::Handle;

// -----------------------------------------------------------------------------
// Registry Config
// -----------------------------------------------------------------------------

/// Configuration of a [`Registry`].
///
/// [`Registry`]: crate::registry::Registry
#[derive(Clone, Debug)]
pub struct RegistryConfig {
  // ---------------------------------------------------------------------------
  // Handle Allocation
  // ---------------------------------------------------------------------------
  /// Highest slot a kind may hand out. Clamped to [`Handle::SLOT_MASK`].
  pub slot_limit: u64,
  /// Number of pre-allocated entries for a newly registered kind.
  pub cap_type_entries: usize,
  // ---------------------------------------------------------------------------
  // Tracing Subscriber Configuration
  // ---------------------------------------------------------------------------
  pub tracing_source_file: bool,
  pub tracing_source_line: bool,
  pub tracing_source_name: bool,
  pub tracing_thread_info: bool,
  pub tracing_verbose: bool,
  pub tracing_very_verbose: bool,
}

impl RegistryConfig {
  #[inline]
  pub fn new() -> Self {
    Self {
      slot_limit: consts::DEFAULT_SLOT_LIMIT,
      cap_type_entries: consts::CAP_TYPE_ENTRIES,
      tracing_source_file: false,
      tracing_source_line: false,
      tracing_source_name: true,
      tracing_thread_info: true,
      tracing_verbose: false,
      tracing_very_verbose: false,
    }
  }

  /// Returns the effective slot limit.
  #[inline]
  pub const fn slot_limit(&self) -> u64 {
    if self.slot_limit > Handle::SLOT_MASK {
      Handle::SLOT_MASK
    } else {
      self.slot_limit
    }
  }

  #[inline]
  pub const fn tracing_filter(&self) -> tracing::Level {
    if self.tracing_very_verbose {
      tracing::Level::TRACE
    } else if self.tracing_verbose {
      tracing::Level::DEBUG
    } else {
      tracing::Level::INFO
    }
  }
}

impl Default for RegistryConfig {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
