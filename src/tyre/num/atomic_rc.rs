use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result;
use core::num::NonZeroU32;

use crate::loom::sync::atomic::AtomicU32;
use crate::loom::sync::atomic::Ordering;

/// Outcome of a successful [`AtomicRefCount::release`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
  /// References remain; holds the new count.
  Live(NonZeroU32),
  /// The count reached zero and the caller now owns destruction.
  Claimed,
}

/// A reference count which can be safely shared between threads.
///
/// Besides the live counts `1..=MAX`, the counter has two terminal states:
///
/// - `0`: destruction was attempted and failed; the owner may retry.
/// - [`CLAIMED`]: exactly one thread is destroying the owner right now.
///
/// Neither terminal state can be re-acquired, so a use after the count
/// reached zero is reported instead of resurrecting the owner.
///
/// [`CLAIMED`]: Self::CLAIMED
#[repr(transparent)]
pub struct AtomicRefCount {
  inner: AtomicU32,
}

impl AtomicRefCount {
  /// Marker for a counter whose owner is being destroyed.
  pub const CLAIMED: u32 = u32::MAX;

  /// Largest live reference count.
  pub const MAX: u32 = u32::MAX - 1;

  /// Creates a new counter holding a single reference.
  #[inline]
  pub fn new() -> Self {
    Self {
      inner: AtomicU32::new(1),
    }
  }

  /// Loads the raw counter value.
  #[inline]
  pub fn load(&self, order: Ordering) -> u32 {
    self.inner.load(order)
  }

  /// Returns `true` if the counter is in a live state.
  #[inline]
  pub fn is_live(&self) -> bool {
    let current: u32 = self.inner.load(Ordering::Acquire);
    current != 0 && current != Self::CLAIMED
  }

  /// Adds one reference, returning the new count.
  ///
  /// Returns `None` if the counter already left the live states.
  ///
  /// # Panics
  ///
  /// Raises a `SysCap` exception if the count would exceed [`MAX`].
  ///
  /// [`MAX`]: Self::MAX
  #[inline]
  pub fn acquire(&self) -> Option<NonZeroU32> {
    let mut current: u32 = self.inner.load(Ordering::Relaxed);

    loop {
      if current == 0 || current == Self::CLAIMED {
        return None;
      }

      if current == Self::MAX {
        crate::raise!(Error, SysCap, "reference count overflow");
      }

      match self.inner.compare_exchange_weak(
        current,
        current + 1,
        Ordering::Relaxed,
        Ordering::Relaxed,
      ) {
        Ok(_) => return Some(NonZeroU32::MIN.saturating_add(current)),
        Err(next) => current = next,
      }
    }
  }

  /// Drops one reference.
  ///
  /// A counter at `1` or `0` moves to [`CLAIMED`] and the caller receives
  /// [`Release::Claimed`]. Returns `None` if another thread already holds
  /// the claim.
  ///
  /// # Ordering
  ///
  /// Uses `AcqRel` on success so the claiming thread observes every write
  /// made by threads that released before it.
  ///
  /// [`CLAIMED`]: Self::CLAIMED
  #[inline]
  pub fn release(&self) -> Option<Release> {
    let mut current: u32 = self.inner.load(Ordering::Relaxed);

    loop {
      let updated: u32 = match current {
        Self::CLAIMED => return None,
        0 | 1 => Self::CLAIMED,
        count => count - 1,
      };

      match self.inner.compare_exchange_weak(
        current,
        updated,
        Ordering::AcqRel,
        Ordering::Relaxed,
      ) {
        Ok(_) => {
          break match NonZeroU32::new(updated) {
            Some(count) if updated != Self::CLAIMED => Some(Release::Live(count)),
            _ => Some(Release::Claimed),
          };
        }
        Err(next) => current = next,
      }
    }
  }

  /// Claims destruction regardless of the outstanding reference count.
  ///
  /// Returns `false` if another thread already holds the claim.
  #[inline]
  pub fn claim(&self) -> bool {
    self.inner.swap(Self::CLAIMED, Ordering::AcqRel) != Self::CLAIMED
  }

  /// Gives up a claim after destruction failed, leaving the counter at `0`.
  #[inline]
  pub fn abandon(&self) {
    debug_assert_eq!(
      self.inner.load(Ordering::Relaxed),
      Self::CLAIMED,
      "AtomicRefCount::abandon requires a claimed counter",
    );

    self.inner.store(0, Ordering::Release);
  }
}

impl Debug for AtomicRefCount {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self.inner.load(Ordering::Relaxed) {
      Self::CLAIMED => f.write_str("CLAIMED"),
      count => Debug::fmt(&count, f),
    }
  }
}

impl Default for AtomicRefCount {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(all(test, not(loom)))]
mod tests {
  use std::panic;

  use crate::loom::sync::atomic::Ordering;
  use crate::tyre::num::AtomicRefCount;
  use crate::tyre::num::Release;

  #[test]
  fn test_new_holds_one() {
    let count: AtomicRefCount = AtomicRefCount::new();

    assert_eq!(count.load(Ordering::Relaxed), 1);
    assert!(count.is_live());
  }

  #[test]
  fn test_acquire_release() {
    let count: AtomicRefCount = AtomicRefCount::new();

    assert_eq!(count.acquire().unwrap().get(), 2);
    assert_eq!(count.acquire().unwrap().get(), 3);

    assert!(matches!(count.release(), Some(Release::Live(n)) if n.get() == 2));
    assert!(matches!(count.release(), Some(Release::Live(n)) if n.get() == 1));
    assert_eq!(count.release(), Some(Release::Claimed));
  }

  #[test]
  fn test_release_claimed_is_rejected() {
    let count: AtomicRefCount = AtomicRefCount::new();

    assert_eq!(count.release(), Some(Release::Claimed));
    assert_eq!(count.release(), None);
    assert_eq!(count.acquire(), None);
    assert!(!count.is_live());
  }

  #[test]
  fn test_abandon_allows_retry() {
    let count: AtomicRefCount = AtomicRefCount::new();

    assert_eq!(count.release(), Some(Release::Claimed));
    count.abandon();

    assert_eq!(count.load(Ordering::Relaxed), 0);
    assert_eq!(count.acquire(), None, "zero count must not be revived");
    assert_eq!(count.release(), Some(Release::Claimed));
  }

  #[test]
  fn test_claim_is_exclusive() {
    let count: AtomicRefCount = AtomicRefCount::new();

    count.acquire().unwrap();

    assert!(count.claim());
    assert!(!count.claim());
    assert_eq!(count.release(), None);
  }

  #[test]
  fn test_acquire_overflow_raises() {
    let count: AtomicRefCount = AtomicRefCount::new();

    count.inner.store(AtomicRefCount::MAX, Ordering::Relaxed);

    assert!(panic::catch_unwind(|| count.acquire()).is_err());
    assert_eq!(count.load(Ordering::Relaxed), AtomicRefCount::MAX);
  }

  #[test]
  fn test_debug() {
    let count: AtomicRefCount = AtomicRefCount::new();

    assert_eq!(format!("{count:?}"), "1");
    assert!(count.claim());
    assert_eq!(format!("{count:?}"), "CLAIMED");
  }
}
