use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::Node;

/// An iterator over the values of the tree in ascending order
pub struct IterInorder<'a> {
    nodes: &'a Slab<Node>,
    stack: Vec<Ptr>,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a> IterInorder<'a> {
    pub(super) fn new(nodes: &'a Slab<Node>, root: Ptr) -> Self {
        let mut stack = Vec::new();
        let mut current = root;
        while !current.is_null() {
            stack.push(current);
            current = nodes[current].left;
        }

        Self {nodes, stack}
    }
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a> Iterator for IterInorder<'a> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let top_ptr = self.stack.pop()?;
        let node = &self.nodes[top_ptr];

        let mut current = node.right;
        while !current.is_null() {
            self.stack.push(current);
            current = self.nodes[current].left;
        }

        Some(node.value)
    }
}

impl<'a> FusedIterator for IterInorder<'a> {}
