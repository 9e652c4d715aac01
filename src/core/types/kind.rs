use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::consts::MAX_KINDS;

/// Resource category owning a handle.
///
/// Library kinds are defined here as constants so independently built
/// subsystems agree on their values. Additional kinds may be created with
/// [`Kind::new`] as long as they stay in `1..MAX_KINDS`.
///
/// [`MAX_KINDS`]: crate::consts::MAX_KINDS
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Kind {
  raw: u8,
}

impl Kind {
  /// Kind of PDC class instances.
  pub const CLASS: Self = Self::new(1);

  /// Kind of container properties.
  pub const CONT_PROP: Self = Self::new(2);

  /// Kind of object properties.
  pub const OBJ_PROP: Self = Self::new(3);

  /// Kind of containers.
  pub const CONT: Self = Self::new(4);

  /// Kind of objects.
  pub const OBJ: Self = Self::new(5);

  /// Kind of regions.
  pub const REGION: Self = Self::new(6);

  /// Kind of queries.
  pub const QUERY: Self = Self::new(7);

  /// Every kind defined by the library, in ascending order.
  pub const LIBRARY: [Self; 7] = [
    Self::CLASS,
    Self::CONT_PROP,
    Self::OBJ_PROP,
    Self::CONT,
    Self::OBJ,
    Self::REGION,
    Self::QUERY,
  ];

  /// Creates a kind from its raw value.
  ///
  /// The value is not checked; registry operations reject kinds that are
  /// not [`valid`].
  ///
  /// [`valid`]: Self::is_valid
  #[inline]
  pub const fn new(raw: u8) -> Self {
    Self { raw }
  }

  /// Returns the raw value of this kind.
  #[inline]
  pub const fn get(self) -> u8 {
    self.raw
  }

  /// Returns `true` if this kind can be encoded in a handle.
  #[inline]
  pub const fn is_valid(self) -> bool {
    self.raw != 0 && (self.raw as usize) < MAX_KINDS
  }

  /// Returns the index of this kind in the type table.
  #[inline]
  pub(crate) const fn index(self) -> usize {
    self.raw as usize
  }

  #[inline]
  const fn label(self) -> Option<&'static str> {
    match self.raw {
      1 => Some("class"),
      2 => Some("cont_prop"),
      3 => Some("obj_prop"),
      4 => Some("cont"),
      5 => Some("obj"),
      6 => Some("region"),
      7 => Some("query"),
      _ => None,
    }
  }
}

impl Debug for Kind {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Display::fmt(self, f)
  }
}

impl Display for Kind {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self.label() {
      Some(label) => f.write_str(label),
      None => write!(f, "kind<{}>", self.raw),
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
