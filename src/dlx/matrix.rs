#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The toroidal sparse matrix searched by Dancing Links.
//!
//! A `SparseMatrix` owns a ring of column headers anchored on a sentinel head
//! node, and every row node hanging off those headers. Rows have no object of
//! their own: a row is the horizontal ring reachable from any of its members.
//!
//! ```text
//!     HEAD <> C1 <> C2 <> C3 <> ... <> HEAD      (header ring)
//!             ||    ||    ||
//!          :> n  <> n  <  ||                     (one row)
//!             ||          ||
//!                   :> n <> n <                  (another row)
//! ```

use crate::dlx::column::{ColumnHeader, SENTINEL, SENTINEL_KEY};
use crate::dlx::node::{ColumnId, HEAD, Node, NodeArena, NodeId};
use rustc_hash::FxHashSet;

/// A circular, doubly linked sparse 0/1 matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    /// Every node, the sentinel head first.
    nodes: NodeArena,
    /// Header metadata, indexed by [`ColumnId`]. Slot 0 is the sentinel.
    columns: Vec<ColumnHeader>,
}

impl Default for SparseMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseMatrix {
    /// Creates a matrix holding only the sentinel head.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = NodeArena::new();
        let head = nodes.push_self_linked(SENTINEL, true);
        debug_assert_eq!(head, HEAD);
        Self {
            nodes,
            columns: vec![ColumnHeader::new(head, SENTINEL_KEY)],
        }
    }

    /// Creates a matrix with one column per key, in iteration order.
    pub fn with_columns<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matrix = Self::new();
        for key in keys {
            matrix.add_column(key);
        }
        matrix
    }

    /// Appends a new column at the tail of the header ring.
    ///
    /// Keys are not checked for uniqueness. With duplicate keys,
    /// [`get_column`](Self::get_column) and [`build_row`](Self::build_row)
    /// only ever see the first of them.
    pub fn add_column(&mut self, key: impl Into<String>) -> ColumnId {
        let column = self.columns.len();
        let node = self.nodes.push_self_linked(column, true);
        self.nodes.insert_left_of(node, HEAD);
        self.columns.push(ColumnHeader::new(node, key));
        column
    }

    /// Adds a row with one node in every column whose key is in `keys`.
    ///
    /// Columns are visited in header-ring order, so the new row's horizontal
    /// ring follows the column order, and each key is consumed at most once.
    /// Every node is appended at the bottom of its column.
    ///
    /// # Returns
    ///
    /// One member of the new row, or `None` when no key names a live column
    /// (which includes an empty `keys`). In that case the matrix is untouched.
    pub fn build_row<I, S>(&mut self, keys: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<S> = keys.into_iter().collect();
        let mut remaining: FxHashSet<&str> = keys.iter().map(AsRef::as_ref).collect();
        let mut first: Option<NodeId> = None;

        let mut header = self.nodes[HEAD].right;
        while !remaining.is_empty() && header != HEAD {
            let column = self.nodes[header].column;
            if remaining.remove(self.columns[column].key()) {
                let node = self.nodes.push_self_linked(column, false);
                self.nodes.insert_above(node, header);
                self.columns[column].adjust_size(1);
                match first {
                    None => first = Some(node),
                    Some(first) => self.nodes.insert_left_of(node, first),
                }
            }
            header = self.nodes[header].right;
        }

        if !remaining.is_empty() {
            log::trace!("ignored unknown row keys: {remaining:?}");
        }
        first
    }

    /// Finds the live column with the given key by scanning the header ring.
    ///
    /// Covered columns are not part of the ring and are therefore not found.
    #[must_use]
    pub fn get_column(&self, key: &str) -> Option<ColumnId> {
        self.live_columns()
            .find(|&column| self.columns[column].key() == key)
    }

    /// Whether any column, covered or not, carries `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.columns
            .iter()
            .skip(1)
            .any(|header| header.key() == key)
    }

    /// Counts the live columns and the row nodes linked beneath them.
    ///
    /// # Returns
    ///
    /// `(column_count, row_node_count)`, both measured by walking the rings.
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        let mut columns = 0;
        let mut rows = 0;
        for column in self.live_columns() {
            columns += 1;
            rows += self.column_nodes(column).count();
        }
        (columns, rows)
    }

    /// The sentinel head node.
    #[must_use]
    pub const fn head(&self) -> NodeId {
        HEAD
    }

    /// Whether every column has been covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes[HEAD].right == HEAD
    }

    /// Read access to the node arena.
    #[must_use]
    pub const fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    /// The node at `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// The header metadata of `column`.
    #[must_use]
    pub fn column(&self, column: ColumnId) -> &ColumnHeader {
        &self.columns[column]
    }

    /// The header metadata of the column `node` belongs to.
    #[must_use]
    pub fn header_of(&self, node: NodeId) -> &ColumnHeader {
        &self.columns[self.nodes[node].column]
    }

    /// Number of columns ever added, covered ones included.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len() - 1
    }

    /// Iterates over the live columns in header-ring order.
    pub fn live_columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        ring(&self.nodes, HEAD, |node| node.right).map(|id| self.nodes[id].column)
    }

    /// Iterates over the row nodes currently linked in `column`, top to
    /// bottom.
    pub fn column_nodes(&self, column: ColumnId) -> impl Iterator<Item = NodeId> + '_ {
        ring(&self.nodes, self.columns[column].node(), |node| node.down)
    }

    /// Iterates over the members of the row containing `node`, starting with
    /// `node` itself and moving right.
    pub fn row_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(node).chain(ring(&self.nodes, node, |n| n.right))
    }

    /// The keys of every column the row containing `node` satisfies.
    pub fn row_keys(&self, node: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.row_nodes(node).map(|id| self.header_of(id).key())
    }

    pub(crate) const fn nodes_mut(&mut self) -> &mut NodeArena {
        &mut self.nodes
    }

    pub(crate) fn column_mut(&mut self, column: ColumnId) -> &mut ColumnHeader {
        &mut self.columns[column]
    }
}

/// Walks the ring that `next` follows from `start`, excluding `start`.
fn ring(
    nodes: &NodeArena,
    start: NodeId,
    next: fn(&Node) -> NodeId,
) -> impl Iterator<Item = NodeId> + '_ {
    let first = next(&nodes[start]);
    std::iter::successors(Some(first), move |&id| Some(next(&nodes[id])))
        .take_while(move |&id| id != start)
}
