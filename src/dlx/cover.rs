#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Covering and uncovering columns.
//!
//! Covering a column removes it from the header ring and removes every row
//! that intersects it from all the other columns that row touches. Uncovering
//! walks the same nodes in the opposite direction and restores them.
//!
//! The two operations only invert each other when uncover calls happen in the
//! exact reverse order of the cover calls.

use crate::dlx::matrix::SparseMatrix;
use crate::dlx::node::{ColumnId, NodeId};

impl SparseMatrix {
    /// Covers `column`.
    ///
    /// # Returns
    ///
    /// The number of nodes touched: one per row visited plus one per node
    /// detached from its column.
    pub fn cover(&mut self, column: ColumnId) -> usize {
        let header = self.column(column).node();
        let mut touched = 0;

        self.nodes_mut().remove_from_row(header);

        let mut row = self.node(header).down;
        while row != header {
            touched += 1;
            let mut member = self.node(row).right;
            while member != row {
                let owner = self.node(member).column;
                self.nodes_mut().remove_from_column(member);
                self.column_mut(owner).adjust_size(-1);
                touched += 1;
                member = self.node(member).right;
            }
            row = self.node(row).down;
        }

        touched
    }

    /// Uncovers `column`, undoing the matching [`cover`](Self::cover).
    ///
    /// Rows are walked bottom to top and each row right to left, so every
    /// node is restored in the reverse order it was removed.
    pub fn uncover(&mut self, column: ColumnId) {
        let header = self.column(column).node();

        let mut row = self.node(header).up;
        while row != header {
            let mut member = self.node(row).left;
            while member != row {
                let owner = self.node(member).column;
                self.column_mut(owner).adjust_size(1);
                self.nodes_mut().restore_to_column(member);
                member = self.node(member).left;
            }
            row = self.node(row).up;
        }

        self.nodes_mut().restore_to_row(header);
    }

    /// Covers the column of every row member to the right of `node`, in ring
    /// order. `node`'s own column is expected to be covered already.
    ///
    /// # Returns
    ///
    /// The total number of nodes touched.
    pub fn cover_row(&mut self, node: NodeId) -> usize {
        let mut touched = 0;
        let mut member = self.node(node).right;
        while member != node {
            touched += self.cover(self.node(member).column);
            member = self.node(member).right;
        }
        touched
    }

    /// Undoes [`cover_row`](Self::cover_row), walking the row right to left.
    pub fn uncover_row(&mut self, node: NodeId) {
        let mut member = self.node(node).left;
        while member != node {
            self.uncover(self.node(member).column);
            member = self.node(member).left;
        }
    }
}
