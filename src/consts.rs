use crate::core::Handle;

// -----------------------------------------------------------------------------
// Handle Layout
// -----------------------------------------------------------------------------

/// Number of bits used to store the [`Kind`] of a handle.
///
/// [`Kind`]: crate::core::Kind
pub const KIND_BITS: u32 = 7;

/// Number of bits used to store the slot of a handle.
///
/// The most significant bit of a handle is never used.
pub const SLOT_BITS: u32 = u64::BITS - (KIND_BITS + 1);

/// Number of distinct kinds addressable by a handle, including the reserved
/// kind `0`.
pub const MAX_KINDS: usize = 1 << KIND_BITS;

// -----------------------------------------------------------------------------
// Registry Behavior
// -----------------------------------------------------------------------------

/// Highest slot a kind may hand out before allocation is refused.
pub const DEFAULT_SLOT_LIMIT: u64 = Handle::SLOT_MASK;

// -----------------------------------------------------------------------------
// Registry Memory Allocation
// -----------------------------------------------------------------------------

/// Number of pre-allocated entries in the handle store of a new kind.
pub const CAP_TYPE_ENTRIES: usize = 16;
