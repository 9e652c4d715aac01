//! The handle registry and its configuration.

mod config;
#[allow(clippy::module_inception)]
mod registry;

pub use self::config::RegistryConfig;
pub use self::registry::Registry;
