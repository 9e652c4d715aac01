//! Process-wide setup for binaries and tests embedding the registry.
//!
//! The registry only emits `tracing` events (target `pdc_id`); installing a
//! subscriber is left to the embedding program. With the `tracing` feature
//! enabled, [`init_tracing`] installs a compact `fmt` subscriber configured
//! from a [`RegistryConfig`].

use std::fmt::Display;

use crate::error::Exception;
use crate::error::ExceptionClass;
use crate::error::ExceptionGroup;
use crate::registry::RegistryConfig;

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns a `SysInv` exception if a global subscriber is already set.
#[cfg(feature = "tracing")]
pub fn init_tracing(config: &RegistryConfig) -> Result<(), Exception> {
  use tracing_subscriber::FmtSubscriber;
  use tracing_subscriber::fmt::format;
  use tracing_subscriber::util::SubscriberInitExt;

  FmtSubscriber::builder()
    .event_format(format().compact())
    .log_internal_errors(true)
    .with_ansi(true)
    .with_file(config.tracing_source_file)
    .with_level(true)
    .with_line_number(config.tracing_source_line)
    .with_max_level(config.tracing_filter())
    .with_target(config.tracing_source_name)
    .with_thread_ids(config.tracing_thread_info)
    .with_thread_names(config.tracing_thread_info)
    .finish()
    .try_init()
    .map_err(error)
}

/// Installs the global tracing subscriber.
///
/// Without the `tracing` feature this does nothing.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn init_tracing(_config: &RegistryConfig) -> Result<(), Exception> {
  Ok(())
}

/// Returns a generic `SysInv` exception with the given error message.
#[cold]
#[allow(dead_code)]
fn error<E>(error: E) -> Exception
where
  E: Display,
{
  Exception::new(ExceptionClass::Error, ExceptionGroup::SysInv, error)
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
