#[cfg(not(loom))]
pub(crate) mod export {
  pub(crate) mod sync {
    pub(crate) use parking_lot::RwLock;
    pub(crate) use parking_lot::RwLockReadGuard;
    pub(crate) use parking_lot::RwLockWriteGuard;

    pub(crate) mod atomic {
      pub(crate) use std::sync::atomic::AtomicU32;
      pub(crate) use std::sync::atomic::Ordering;
    }
  }

  pub(crate) mod thread {
    pub(crate) use std::thread::yield_now;
  }
}

#[cfg(loom)]
pub(crate) mod export {
  pub(crate) mod sync {
    pub(crate) use loom::sync::RwLockReadGuard;
    pub(crate) use loom::sync::RwLockWriteGuard;

    /// Lock with the `parking_lot` calling convention on top of loom's lock.
    ///
    /// Poisoning is ignored, matching `parking_lot` which has none.
    pub(crate) struct RwLock<T> {
      inner: loom::sync::RwLock<T>,
    }

    impl<T> RwLock<T> {
      #[inline]
      pub(crate) fn new(value: T) -> Self {
        Self {
          inner: loom::sync::RwLock::new(value),
        }
      }

      #[inline]
      pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        match self.inner.read() {
          Ok(guard) => guard,
          Err(poison) => poison.into_inner(),
        }
      }

      #[inline]
      pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        match self.inner.write() {
          Ok(guard) => guard,
          Err(poison) => poison.into_inner(),
        }
      }
    }

    pub(crate) mod atomic {
      pub(crate) use loom::sync::atomic::AtomicU32;
      pub(crate) use loom::sync::atomic::Ordering;
    }
  }

  pub(crate) mod thread {
    pub(crate) use loom::thread::yield_now;
  }
}

#[doc(inline)]
pub(crate) use self::export::*;
