#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Link cells of the toroidal list.
//!
//! Every cell of the sparse matrix (the sentinel head, the column headers and
//! the row members) is a [`Node`] stored in a single [`NodeArena`]. Links are
//! plain indices into that arena, so the circular structure never holds a
//! reference to itself.
//!
//! The four detach/reattach operations are the heart of Dancing Links: a
//! detached node keeps its own links untouched, so reattaching it only has to
//! point its former neighbours back at it. That is only sound when the
//! reattach calls happen in the exact reverse order of the detach calls.

use std::ops::{Index, IndexMut};

/// Index of a node inside a [`NodeArena`].
pub type NodeId = usize;

/// Index of a column header's metadata inside a sparse matrix.
pub type ColumnId = usize;

/// The sentinel head node. It is always the first node of an arena and is
/// never detached.
pub const HEAD: NodeId = 0;

/// A four-directional circular link element.
///
/// `left`/`right` thread the node through its row (or, for headers, through
/// the header ring); `up`/`down` thread it through its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    /// Neighbour above in the column ring.
    pub up: NodeId,
    /// Neighbour below in the column ring.
    pub down: NodeId,
    /// Neighbour to the left in the row (or header) ring.
    pub left: NodeId,
    /// Neighbour to the right in the row (or header) ring.
    pub right: NodeId,
    /// The column this node belongs to. Headers point at their own column.
    pub column: ColumnId,
    /// Whether this node roots a column (or is the sentinel head).
    pub is_header: bool,
}

impl Node {
    /// A node forming a ring of one on both axes.
    #[must_use]
    const fn self_linked(id: NodeId, column: ColumnId, is_header: bool) -> Self {
        Self {
            up: id,
            down: id,
            left: id,
            right: id,
            column,
            is_header,
        }
    }

    /// The links of this node in `[up, down, left, right]` order.
    #[must_use]
    pub const fn links(&self) -> [NodeId; 4] {
        [self.up, self.down, self.left, self.right]
    }
}

/// Dense storage for all nodes of one sparse matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeArena(Vec<Node>);

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl NodeArena {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of nodes ever allocated, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no node has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over every allocated node in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.iter()
    }

    /// Allocates a new self-linked node and returns its index.
    pub(crate) fn push_self_linked(&mut self, column: ColumnId, is_header: bool) -> NodeId {
        let id = self.0.len();
        self.0.push(Node::self_linked(id, column, is_header));
        id
    }

    /// Splices `id` into `anchor`'s horizontal ring, directly to its left.
    ///
    /// When `anchor` is the first node of a ring this appends `id` at the
    /// ring's tail.
    pub(crate) fn insert_left_of(&mut self, id: NodeId, anchor: NodeId) {
        let left = self[anchor].left;
        self[id].left = left;
        self[id].right = anchor;
        self[left].right = id;
        self[anchor].left = id;
    }

    /// Splices `id` into `anchor`'s vertical ring, directly above it.
    ///
    /// With a column header as `anchor` this appends `id` at the bottom of
    /// the column.
    pub(crate) fn insert_above(&mut self, id: NodeId, anchor: NodeId) {
        let up = self[anchor].up;
        self[id].up = up;
        self[id].down = anchor;
        self[up].down = id;
        self[anchor].up = id;
    }

    /// Detaches `id` from its horizontal ring. The node's own links are left
    /// as they were.
    pub fn remove_from_row(&mut self, id: NodeId) {
        let Node { left, right, .. } = self[id];
        self[right].left = left;
        self[left].right = right;
    }

    /// Reattaches `id` to its horizontal ring using its untouched links.
    pub fn restore_to_row(&mut self, id: NodeId) {
        let Node { left, right, .. } = self[id];
        self[left].right = id;
        self[right].left = id;
    }

    /// Detaches `id` from its vertical ring. The node's own links are left as
    /// they were.
    pub fn remove_from_column(&mut self, id: NodeId) {
        let Node { up, down, .. } = self[id];
        self[up].down = down;
        self[down].up = up;
    }

    /// Reattaches `id` to its vertical ring using its untouched links.
    pub fn restore_to_column(&mut self, id: NodeId) {
        let Node { up, down, .. } = self[id];
        self[down].up = id;
        self[up].down = id;
    }
}
