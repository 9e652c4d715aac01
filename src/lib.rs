//! PDC-ID - A typed handle registry for PDC resources.
//!
//! Subsystems (classes, containers, objects, regions, queries, ...) hand out
//! compact 64-bit [`Handle`]s instead of pointers. Each handle encodes its
//! [`Kind`] and a per-kind slot, names a shared object, and carries a
//! reference count. When the last reference is dropped the kind's
//! destructor releases the object.
//!
//! # Quick Start
//!
//! ```
//! use pdc_id::core::Handle;
//! use pdc_id::core::Kind;
//! use pdc_id::core::Resource;
//! use pdc_id::registry::Registry;
//!
//! struct Container {
//!   name: String,
//! }
//!
//! impl Resource for Container {
//!   fn name(&self) -> Option<&str> {
//!     Some(&self.name)
//!   }
//! }
//!
//! let registry: Registry = Registry::new();
//!
//! registry.register_type(Kind::CONT, |_| Ok(())).unwrap();
//!
//! let handle: Handle = registry
//!   .allocate(Kind::CONT, Container { name: "c1".to_owned() })
//!   .unwrap();
//!
//! assert_eq!(registry.find_by_name(Kind::CONT, "c1"), Some(handle));
//! assert_eq!(registry.increment(handle), Ok(2));
//! assert_eq!(registry.decrement(handle), Ok(1));
//! assert_eq!(registry.decrement(handle), Ok(0));
//! assert!(registry.find(handle).is_none());
//! ```
//!
//! # Core Modules
//!
//! - [`registry`]: The registry and its configuration
//! - [`core`]: Handle codec, kinds, and the [`Resource`] trait
//! - [`error`]: Registry errors and the exception system
//! - [`init`]: Tracing subscriber setup
//! - [`consts`]: Layout and capacity constants
//!
//! [`Handle`]: crate::core::Handle
//! [`Kind`]: crate::core::Kind
//! [`Resource`]: crate::core::Resource

mod loom;

pub mod consts;
pub mod core;
pub mod error;
pub mod init;
pub mod registry;
pub mod tyre;
