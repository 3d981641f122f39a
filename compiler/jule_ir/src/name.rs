//! Interned identifier handle.

use std::fmt;

const SHARD_BITS: u32 = 4;
const LOCAL_BITS: u32 = u32::BITS - SHARD_BITS;

/// Handle to a string owned by a `StringInterner`.
///
/// The high four bits pick the interner shard, the rest index into it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, interned up front in shard 0.
    pub const EMPTY: Name = Name(0);

    pub const NUM_SHARDS: usize = 1 << SHARD_BITS;

    /// Largest index a single shard can hand out.
    pub const MAX_LOCAL: u32 = (1 << LOCAL_BITS) - 1;

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << LOCAL_BITS) | local)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> LOCAL_BITS) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

crate::static_assert_size!(Name, 4);
