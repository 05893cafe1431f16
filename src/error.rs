use thiserror::Error;

/// The error returned by queries that need at least one node in the tree
/// (e.g. [`AvlTree::min`], [`AvlTree::max`])
///
/// [`AvlTree::min`]: crate::AvlTree::min
/// [`AvlTree::max`]: crate::AvlTree::max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the tree is empty")]
pub struct EmptyTreeError;
