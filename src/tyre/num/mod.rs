//! Atomic numeric types with safety invariants.
//!
//! - [`AtomicRefCount`]: Atomic reference count with terminal states

mod atomic_rc;

pub use self::atomic_rc::AtomicRefCount;
pub use self::atomic_rc::Release;
