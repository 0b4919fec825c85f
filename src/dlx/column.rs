#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Column header metadata.

use crate::dlx::node::{ColumnId, NodeId};
use std::fmt::{Display, Formatter};

/// Column id of the sentinel head. Column selection returns it once every
/// column has been covered.
pub const SENTINEL: ColumnId = 0;

/// Key given to the sentinel column. It never takes part in key lookups.
pub(crate) const SENTINEL_KEY: &str = "START";

/// The metadata of a column: which node roots its vertical ring, the
/// constraint key it stands for and how many row nodes are currently linked
/// beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnHeader {
    node: NodeId,
    key: String,
    size: usize,
}

impl ColumnHeader {
    pub(crate) fn new(node: NodeId, key: impl Into<String>) -> Self {
        Self {
            node,
            key: key.into(),
            size: 0,
        }
    }

    /// The arena index of the header node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The constraint key of this column.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of row nodes currently linked in this column.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Adjusts the live-row counter, `-1` when a member is detached and `+1`
    /// when it is restored.
    pub fn adjust_size(&mut self, delta: isize) {
        debug_assert!(
            self.size.checked_add_signed(delta).is_some(),
            "size of column {} would underflow",
            self.key
        );
        self.size = self.size.saturating_add_signed(delta);
    }
}

impl Display for ColumnHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.key, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_header_is_empty() {
        let header = ColumnHeader::new(4, "R1C1");
        assert_eq!(header.node(), 4);
        assert_eq!(header.key(), "R1C1");
        assert_eq!(header.size(), 0);
    }

    #[test]
    fn test_adjust_size() {
        let mut header = ColumnHeader::new(1, "A");
        header.adjust_size(1);
        header.adjust_size(1);
        header.adjust_size(-1);
        assert_eq!(header.size(), 1);
    }

    #[test]
    fn test_display() {
        let mut header = ColumnHeader::new(1, "B2#7");
        header.adjust_size(3);
        assert_eq!(header.to_string(), "(B2#7, 3)");
    }
}
