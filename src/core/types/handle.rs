//! Registry handle.
//!
//! # Bit Layout (64-bit)
//!
//! ```text
//! ┌────────┬────────┬─────────┐
//! │ Unused │ Kind   │ Slot    │
//! │ 1 bit  │ 7 bits │ 56 bits │
//! └────────┴────────┴─────────┘
//! ```
//!
//! - **Kind (7 bits)**: Type record owning the handle
//! - **Slot (56 bits)**: Per-kind allocation sequence number, never reused
//!
//! The unused bit is decoded together with the kind, so a handle with it set
//! resolves to an out-of-range kind.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::consts::KIND_BITS;
use crate::consts::SLOT_BITS;
use crate::core::Kind;

/// Opaque identifier naming a live resource in a [`Registry`].
///
/// Handles carry no pointers and can be copied into RPC payloads verbatim
/// with [`into_bits`] and restored with [`from_bits`].
///
/// [`Registry`]: crate::registry::Registry
/// [`into_bits`]: Self::into_bits
/// [`from_bits`]: Self::from_bits
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Handle {
  bits: u64,
}

impl Handle {
  /// Bitmask for extracting the slot field.
  pub const SLOT_MASK: u64 = (1_u64 << SLOT_BITS) - 1;

  /// Bitmask for extracting the kind field (including the unused bit).
  pub(crate) const KIND_MASK: u64 = 0xFF;

  /// Sentinel value that never names a live resource.
  pub const INVALID: Self = Self::from_bits(u64::MAX);

  /// Packs `kind` and `slot` into a handle.
  ///
  /// Returns `None` if either field does not fit its bit width.
  ///
  /// # Examples
  ///
  /// ```
  /// use pdc_id::core::Handle;
  /// use pdc_id::core::Kind;
  ///
  /// let handle: Handle = Handle::encode(Kind::CONT, 7).unwrap();
  ///
  /// assert_eq!(handle.decode(), (Kind::CONT, 7));
  /// ```
  #[inline]
  pub const fn encode(kind: Kind, slot: u64) -> Option<Self> {
    if !kind.is_valid() || slot > Self::SLOT_MASK {
      return None;
    }

    Some(Self::from_bits(((kind.get() as u64) << SLOT_BITS) | slot))
  }

  /// Unpacks this handle into its `(kind, slot)` components.
  #[inline]
  pub const fn decode(self) -> (Kind, u64) {
    (self.kind(), self.slot())
  }

  /// Returns the kind encoded in this handle.
  #[inline]
  pub const fn kind(self) -> Kind {
    Kind::new(((self.bits >> SLOT_BITS) & Self::KIND_MASK) as u8)
  }

  /// Returns the slot encoded in this handle.
  #[inline]
  pub const fn slot(self) -> u64 {
    self.bits & Self::SLOT_MASK
  }

  /// Creates a handle from its raw encoded bits.
  #[inline]
  pub const fn from_bits(bits: u64) -> Self {
    Self { bits }
  }

  /// Converts this handle into its raw encoded bits.
  #[inline]
  pub const fn into_bits(self) -> u64 {
    self.bits
  }
}

impl Debug for Handle {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Display::fmt(self, f)
  }
}

impl Display for Handle {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "#Handle<{}.{}>", self.kind(), self.slot())
  }
}

const _: () = assert!(KIND_BITS + SLOT_BITS + 1 == u64::BITS);

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
