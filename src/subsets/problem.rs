#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exact cover over named subsets of named items.
//!
//! Each item is a column and each declared subset a row. Some subsets may be
//! fixed in advance; they form the initial state and are already applied when
//! the problem is built.

use crate::dlx::matrix::SparseMatrix;
use crate::dlx::problem::{Action, ConstraintKeys, Problem};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// Reasons a set of subsets does not describe an exact cover instance.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SubsetError {
    /// Two items share a name.
    #[display("item {item} is declared twice")]
    DuplicateItem {
        /// The repeated item.
        item: String,
    },
    /// Two subsets share a name.
    #[display("subset {name} is declared twice")]
    DuplicateSubset {
        /// The repeated subset.
        name: String,
    },
    /// A subset with no items.
    #[display("subset {name} is empty")]
    EmptySubset {
        /// The empty subset.
        name: String,
    },
    /// A subset naming an item that was never declared.
    #[display("subset {subset} names unknown item {item}")]
    UnknownItem {
        /// The subset at fault.
        subset: String,
        /// The undeclared item.
        item: String,
    },
    /// A fixed subset that was never declared.
    #[display("no subset is named {name}")]
    UnknownSubset {
        /// The undeclared subset.
        name: String,
    },
}

/// Choosing the subset made of `keys`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubsetAction {
    keys: ConstraintKeys,
}

impl SubsetAction {
    /// An action choosing the subset made of `keys`.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The items of the chosen subset.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Action for SubsetAction {
    fn constraint_keys(&self) -> ConstraintKeys {
        self.keys.clone()
    }

    fn is_valid(&self) -> bool {
        !self.keys.is_empty()
    }
}

impl Display for SubsetAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.keys.iter().join(" "))
    }
}

/// A named subset, its items stored as sorted item indices.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Subset {
    name: String,
    items: Vec<usize>,
}

/// An exact cover instance together with the items covered so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetProblem {
    items: Vec<String>,
    index: FxHashMap<String, usize>,
    subsets: Vec<Subset>,
    fixed: Vec<usize>,
    covered: Vec<bool>,
}

impl SubsetProblem {
    /// Builds an instance and applies its fixed subsets.
    ///
    /// # Arguments
    ///
    /// * `items` - The items to cover, in column order.
    /// * `subsets` - `(name, items)` pairs, in row order.
    /// * `fixed` - Names of the subsets that are part of every solution.
    ///
    /// # Errors
    ///
    /// A [`SubsetError`] if a name is repeated or unknown, or a subset is
    /// empty. Fixed subsets that overlap are accepted; such an instance simply
    /// has no solution.
    pub fn new<N, K>(
        items: impl IntoIterator<Item = N>,
        subsets: impl IntoIterator<Item = (N, Vec<K>)>,
        fixed: impl IntoIterator<Item = K>,
    ) -> Result<Self, SubsetError>
    where
        N: Into<String>,
        K: AsRef<str>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let mut index = FxHashMap::default();
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.clone(), i).is_some() {
                return Err(SubsetError::DuplicateItem { item: item.clone() });
            }
        }

        let mut declared: Vec<Subset> = Vec::new();
        for (name, keys) in subsets {
            let name: String = name.into();
            if declared.iter().any(|s| s.name == name) {
                return Err(SubsetError::DuplicateSubset { name });
            }
            if keys.is_empty() {
                return Err(SubsetError::EmptySubset { name });
            }
            let mut members = Vec::with_capacity(keys.len());
            for key in &keys {
                let Some(&i) = index.get(key.as_ref()) else {
                    return Err(SubsetError::UnknownItem {
                        subset: name,
                        item: key.as_ref().to_owned(),
                    });
                };
                members.push(i);
            }
            members.sort_unstable();
            members.dedup();
            declared.push(Subset {
                name,
                items: members,
            });
        }

        let fixed = fixed
            .into_iter()
            .map(|name| {
                declared
                    .iter()
                    .position(|s| s.name == name.as_ref())
                    .ok_or_else(|| SubsetError::UnknownSubset {
                        name: name.as_ref().to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut problem = Self {
            covered: vec![false; items.len()],
            items,
            index,
            subsets: declared,
            fixed,
        };
        for action in problem.initial_actions() {
            if !problem.apply_action(&action) {
                log::warn!("fixed subset {action} overlaps another fixed subset");
            }
        }
        Ok(problem)
    }

    /// The items, in column order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of declared subsets.
    #[must_use]
    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    /// The name of the declared subset `action` chooses, if any.
    #[must_use]
    pub fn subset_name(&self, action: &SubsetAction) -> Option<&str> {
        let items = self.item_indices(action.keys())?;
        self.find_subset(&items).map(|s| s.name.as_str())
    }

    /// Whether `item` is covered in the current state.
    #[must_use]
    pub fn is_covered(&self, item: &str) -> bool {
        self.index.get(item).is_some_and(|&i| self.covered[i])
    }

    fn action_for(&self, subset: &Subset) -> SubsetAction {
        SubsetAction::new(subset.items.iter().map(|&i| self.items[i].as_str()))
    }

    /// Sorted, deduplicated item indices of `keys`, or `None` if a key is not
    /// an item.
    fn item_indices<S: AsRef<str>>(&self, keys: &[S]) -> Option<Vec<usize>> {
        let mut indices = keys
            .iter()
            .map(|key| self.index.get(key.as_ref()).copied())
            .collect::<Option<Vec<_>>>()?;
        indices.sort_unstable();
        indices.dedup();
        Some(indices)
    }

    fn find_subset(&self, items: &[usize]) -> Option<&Subset> {
        self.subsets.iter().find(|s| s.items == items)
    }
}

impl Problem for SubsetProblem {
    type Action = SubsetAction;

    fn produce_matrix(&self) -> SparseMatrix {
        let mut matrix = SparseMatrix::with_columns(self.items.iter().cloned());
        for subset in &self.subsets {
            matrix.build_row(subset.items.iter().map(|&i| self.items[i].as_str()));
        }
        matrix
    }

    fn initial_actions(&self) -> Vec<SubsetAction> {
        self.fixed
            .iter()
            .map(|&s| self.action_for(&self.subsets[s]))
            .collect()
    }

    fn apply_action(&mut self, action: &SubsetAction) -> bool {
        let Some(items) = self.item_indices(action.keys()) else {
            return false;
        };
        if self.find_subset(&items).is_none() || items.iter().any(|&i| self.covered[i]) {
            return false;
        }
        for i in items {
            self.covered[i] = true;
        }
        true
    }

    fn is_goal(&self) -> bool {
        self.covered.iter().all(|&c| c)
    }

    fn action_from_keys(&self, keys: &[&str]) -> Option<SubsetAction> {
        let items = self.item_indices(keys)?;
        Some(SubsetAction::new(items.iter().map(|&i| self.items[i].as_str())))
    }
}
