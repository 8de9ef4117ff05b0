//! Node ID.

use core::fmt;
use core::num::NonZeroUsize;

/// Handle of a node in a [`Forest`][`crate::Forest`].
///
/// A node ID is only meaningful for the forest that produced it. Converting
/// the same builder twice yields forests whose node IDs coincide, but IDs
/// from one forest must not be used to look up nodes of an unrelated forest.
///
/// The ordering (`PartialOrd` and `Ord`) follows the input order of the
/// records and is provided for use with ordered containers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(NonZeroUsize);

impl NodeId {
    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub(crate) const fn get(self) -> usize {
        self.0.get() - 1
    }

    /// Creates a node ID from the arena index.
    ///
    /// # Panics
    ///
    /// Panics if the index is `usize::MAX`.
    #[inline]
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Self {
        index
            .checked_add(1)
            .and_then(NonZeroUsize::new)
            .map(Self)
            .expect("[precondition] arena index must be less than `usize::MAX`")
    }
}

// Prevent `{:#?}` from printing the value in redundant 3 lines.
impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.get())
    }
}
