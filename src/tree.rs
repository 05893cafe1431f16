mod inorder;

pub use inorder::*;

use std::fmt;
use std::iter::FromIterator;

use crate::error::EmptyTreeError;
use crate::slab::{Ptr, Slab};

#[derive(Debug, Clone, Copy)]
struct Node {
    value: f64,
    /// Back-reference to the parent node, or null for the root
    ///
    /// This link is observational only: ownership of a node always belongs to
    /// the slab, reachable through its parent's child link.
    parent: Ptr,
    left: Ptr,
    right: Ptr,
    /// Cached height of the subtree rooted at this node (0 for a leaf)
    height: i32,
}

impl Node {
    fn new(value: f64) -> Self {
        Self {
            value,
            parent: Ptr::null(),
            left: Ptr::null(),
            right: Ptr::null(),
            height: 0,
        }
    }
}

/// A self-balancing binary search tree (AVL tree) of `f64` values
///
/// BST properties: For each node with value `v`:
/// - The value of each node in the left subtree is less than `v`
/// - The value of each node in the right subtree is greater than `v`
///
/// Duplicate values are not allowed. Inserting a value that already exists in
/// the tree does not modify the tree.
///
/// On top of the BST properties, every node's two subtrees differ in height
/// by at most 1. The tree restores that property after every insertion and
/// removal by restructuring around the deepest unbalanced ancestor, so
/// lookups, insertions and removals all stay `O(log n)`.
///
/// Nodes are stored in a slab and linked by stable indexes, including a
/// back-reference from each node to its parent. The parent links are what
/// allow rebalancing to walk from a mutated node up to the root.
#[derive(Debug, Clone, Default)]
pub struct AvlTree {
    nodes: Slab<Node>,
    root: Ptr,
}

impl AvlTree {
    /// Creates an empty `AvlTree`
    ///
    /// The tree is initially created with a capacity of 0, so it will not
    /// allocate until it is first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with the specified capacity.
    ///
    /// The tree will be able to hold at least `capacity` values without
    /// reallocating. If `capacity` is 0, the tree will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: Ptr::null(),
        }
    }

    /// Returns the number of values in the tree
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of values the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns true if the tree is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.nodes.is_empty() == self.root.is_null());
        self.root.is_null()
    }

    /// Returns true if the tree contains the given value
    ///
    /// Time complexity: `O(log n)`
    pub fn contains(&self, value: f64) -> bool {
        if self.root.is_null() {
            return false;
        }
        self.nodes[self.find_closest(self.root, value)].value == value
    }

    /// Returns the smallest value in the tree, or [`EmptyTreeError`] if the
    /// tree has no nodes
    ///
    /// Time complexity: `O(log n)`
    pub fn min(&self) -> Result<f64, EmptyTreeError> {
        if self.root.is_null() {
            return Err(EmptyTreeError);
        }
        // No finite value is less than -inf, so the search descends left all
        // the way down to the leftmost node
        Ok(self.nodes[self.find_closest(self.root, f64::NEG_INFINITY)].value)
    }

    /// Returns the largest value in the tree, or [`EmptyTreeError`] if the
    /// tree has no nodes
    ///
    /// Time complexity: `O(log n)`
    pub fn max(&self) -> Result<f64, EmptyTreeError> {
        if self.root.is_null() {
            return Err(EmptyTreeError);
        }
        Ok(self.nodes[self.find_closest(self.root, f64::INFINITY)].value)
    }

    /// Inserts a new value into the tree
    ///
    /// If the tree did not have this value present, `true` is returned.
    ///
    /// If the tree did have this value present, `false` is returned and the
    /// tree is left unchanged.
    pub fn insert(&mut self, value: f64) -> bool {
        let closest = self.find_closest(self.root, value);

        // Empty tree: the new node becomes the root and nothing can be
        // unbalanced yet
        if closest.is_null() {
            self.root = self.nodes.push(Node::new(value));
            return true;
        }

        if self.nodes[closest].value == value {
            return false;
        }

        let mut node = Node::new(value);
        node.parent = closest;
        let new = self.nodes.push(node);

        if value < self.nodes[closest].value {
            self.nodes[closest].left = new;
        } else {
            self.nodes[closest].right = new;
        }

        self.rebalance(closest);
        true
    }

    /// Removes a value from the tree. Returns whether the value was present
    /// in the tree.
    ///
    /// Removing a value that is not in the tree (or removing from an empty
    /// tree) returns `false` and leaves the tree unchanged.
    pub fn remove(&mut self, value: f64) -> bool {
        if self.root.is_null() {
            return false;
        }

        let found = self.find_closest(self.root, value);
        if self.nodes[found].value != value {
            return false;
        }

        self.remove_node(found);
        true
    }

    /// Clears the tree, removing all values
    ///
    /// Note that this method has no effect on the allocated capacity of the
    /// tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = Ptr::null();
    }

    /// Reserves capacity for at least `additional` more values to be inserted
    /// in the tree. The collection may reserve more space to avoid frequent
    /// reallocations.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the tree as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Performs an in-order traversal of the tree, yielding values in
    /// ascending order
    pub fn iter_inorder(&self) -> IterInorder {
        IterInorder::new(&self.nodes, self.root)
    }

    /// Returns a type that renders the shape of the tree as ASCII art when
    /// displayed
    ///
    /// The rendering is a debugging aid. Its exact format is not stable and
    /// must not be parsed.
    pub fn display(&self) -> DisplayTree<'_> {
        DisplayTree { tree: self }
    }

    /// Searches for `value` starting from `start` and returns the closest
    /// node found.
    ///
    /// The returned node either holds `value` itself, or is the node that a
    /// new node holding `value` would be attached to. Returns null only when
    /// `start` is null.
    ///
    /// This single primitive serves three callers: `insert` reads the result
    /// as an attach point, `remove` as an exact match or "not found", and
    /// `min`/`max` drive it with -inf/+inf so the descent runs all the way
    /// left/right.
    fn find_closest(&self, start: Ptr, value: f64) -> Ptr {
        let mut current = start;
        if current.is_null() {
            return current;
        }

        loop {
            let node = &self.nodes[current];
            if value < node.value {
                if node.left.is_null() {
                    return current;
                }
                current = node.left;
            } else if value > node.value {
                if node.right.is_null() {
                    return current;
                }
                current = node.right;
            } else {
                return current;
            }
        }
    }

    /// Returns a node's height, where a null (empty) subtree has height -1
    fn height(&self, node: Ptr) -> i32 {
        if node.is_null() {
            -1
        } else {
            self.nodes[node].height
        }
    }

    /// Recomputes the cached height of a node from its children. The child
    /// heights must already be accurate. No-op on a null node.
    fn adjust_height(&mut self, node: Ptr) {
        if node.is_null() {
            return;
        }
        let (left, right) = {
            let node = &self.nodes[node];
            (node.left, node.right)
        };
        self.nodes[node].height = 1 + self.height(left).max(self.height(right));
    }

    fn is_balanced(&self, node: Ptr) -> bool {
        if node.is_null() {
            return true;
        }
        let node = &self.nodes[node];
        (self.height(node.left) - self.height(node.right)).abs() <= 1
    }

    /// Returns the child with the strictly greater height, or the right
    /// child when both children have the same height
    fn taller_child(&self, node: Ptr) -> Ptr {
        let node = &self.nodes[node];
        if self.height(node.left) > self.height(node.right) {
            node.left
        } else {
            node.right
        }
    }

    /// Returns the child of `y` to restructure around.
    ///
    /// The strictly taller child wins. When both children of `y` have equal
    /// height (which only happens when a removal shortened the subtree on
    /// the other side of `y`'s parent), the child on the same side as `y`
    /// itself is chosen so the restructure becomes a single rotation.
    /// Rotating around the inside grandchild on a tie would reattach
    /// subtrees whose heights differ by 2.
    fn rotation_child(&self, y: Ptr, y_is_left: bool) -> Ptr {
        let node = &self.nodes[y];
        let left = self.height(node.left);
        let right = self.height(node.right);

        if left > right {
            node.left
        } else if right > left {
            node.right
        } else if y_is_left {
            node.left
        } else {
            node.right
        }
    }

    /// Returns true if the node is the left child of its parent.
    ///
    /// # Panics
    ///
    /// Panics if the node has no parent. Callers must not ask this of the
    /// root.
    fn is_left_child(&self, node: Ptr) -> bool {
        let parent = self.nodes[node].parent;
        assert!(!parent.is_null(), "the node does not have a parent");
        self.nodes[parent].left == node
    }

    /// Walks from `node` up to the root, recomputing heights and
    /// restructuring every unbalanced ancestor found along the way.
    ///
    /// This runs after every structural mutation and touches `O(log n)`
    /// nodes.
    ///
    /// # Panics
    ///
    /// Panics if `node` is null. Callers must guarantee a live starting
    /// point.
    fn rebalance(&mut self, node: Ptr) {
        assert!(!node.is_null(), "should not rebalance a null node");

        let mut current = node;
        loop {
            self.adjust_height(current);
            if !self.is_balanced(current) {
                current = self.restructure(current);
            }

            let parent = self.nodes[current].parent;
            if parent.is_null() {
                break;
            }
            current = parent;
        }
    }

    /// Trinode restructuring around the unbalanced node `z`.
    ///
    /// Takes `y` as the taller child of `z` and `x` as the child `y` gets
    /// rotated around (see `rotation_child` for the tie rule), relabels the
    /// three as `(a, b, c)` in their in-order sequence and
    /// gathers the four subtrees `(t0, t1, t2, t3)` that hang off them. `b`
    /// then replaces `z` with `a` and `c` as its children and `t0..t3`
    /// reattached in order. This covers all four rotation cases (single
    /// left/right, double left-right/right-left) with one splice.
    ///
    /// Returns `b`, the node now occupying `z`'s former position, so the
    /// caller can continue its upward walk from there.
    fn restructure(&mut self, z: Ptr) -> Ptr {
        // z is out of balance by 2, so y is unambiguous. y's children can
        // tie in height after a removal, and then x has to sit on the same
        // side as y.
        let y = self.taller_child(z);
        let y_is_left = self.is_left_child(y);
        let x = self.rotation_child(y, y_is_left);

        let (a, b, c, t0, t1, t2, t3) = if y_is_left {
            if self.is_left_child(x) {
                // single rotation right
                (x, y, z,
                    self.nodes[x].left, self.nodes[x].right,
                    self.nodes[y].right, self.nodes[z].right)
            } else {
                // double rotation left-right
                (y, x, z,
                    self.nodes[y].left, self.nodes[x].left,
                    self.nodes[x].right, self.nodes[z].right)
            }
        } else if self.is_left_child(x) {
            // double rotation right-left
            (z, x, y,
                self.nodes[z].left, self.nodes[x].left,
                self.nodes[x].right, self.nodes[y].right)
        } else {
            // single rotation left
            (z, y, x,
                self.nodes[z].left, self.nodes[y].left,
                self.nodes[x].left, self.nodes[x].right)
        };

        // Replace z with b
        let z_parent = self.nodes[z].parent;
        if z_parent.is_null() {
            self.root = b;
        } else if self.is_left_child(z) {
            self.nodes[z_parent].left = b;
        } else {
            self.nodes[z_parent].right = b;
        }
        self.nodes[b].parent = z_parent;

        // Set the other links
        self.set_left(b, a);
        self.set_right(b, c);
        self.set_left(a, t0);
        self.set_right(a, t1);
        self.set_left(c, t2);
        self.set_right(c, t3);

        // Children before parent so the cached heights stay accurate
        self.adjust_height(a);
        self.adjust_height(c);
        self.adjust_height(b);

        b
    }

    /// Updates the left child link of `parent` and, if the child is not
    /// null, its back-reference
    fn set_left(&mut self, parent: Ptr, child: Ptr) {
        self.nodes[parent].left = child;
        if !child.is_null() {
            self.nodes[child].parent = parent;
        }
    }

    /// Updates the right child link of `parent` and, if the child is not
    /// null, its back-reference
    fn set_right(&mut self, parent: Ptr, child: Ptr) {
        self.nodes[parent].right = child;
        if !child.is_null() {
            self.nodes[child].parent = parent;
        }
    }

    /// Removes a node that is known to be in the tree, dispatching on its
    /// child count
    fn remove_node(&mut self, node: Ptr) {
        let Node { parent, left, right, .. } = self.nodes[node];

        if left.is_null() && right.is_null() {
            // Leaf: detach it from its parent (or clear the root)
            if parent.is_null() {
                self.root = Ptr::null();
            } else if self.is_left_child(node) {
                self.nodes[parent].left = Ptr::null();
            } else {
                self.nodes[parent].right = Ptr::null();
            }

            self.nodes.remove(node);

            if !parent.is_null() {
                self.rebalance(parent);
            }
        } else if left.is_null() || right.is_null() {
            // One child: splice the child into the removed node's position
            let child = if left.is_null() { right } else { left };

            if parent.is_null() {
                // The spliced-in child was already a balanced subtree with an
                // accurate height, so with no ancestors left there is nothing
                // to rebalance
                self.root = child;
                self.nodes[child].parent = Ptr::null();
            } else if self.is_left_child(node) {
                self.set_left(parent, child);
            } else {
                self.set_right(parent, child);
            }

            self.nodes.remove(node);

            if !parent.is_null() {
                self.rebalance(parent);
            }
        } else {
            // Two children: copy in the closest value from the taller child
            // subtree, then remove the node that held it. That node sits at
            // the far end of its subtree and has at most one child, so the
            // nested call takes one of the branches above and performs the
            // single upward rebalance for the whole removal.
            let target = self.find_closest(self.taller_child(node), self.nodes[node].value);
            let replacement = self.nodes[target].value;
            self.nodes[node].value = replacement;
            self.remove_node(target);
        }
    }
}

impl Extend<f64> for AvlTree {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<f64> for AvlTree {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Renders the shape of a tree as ASCII art
///
/// The tree is drawn rotated: the right subtree is above its parent and the
/// left subtree below, with `/` and `\` marking the connections.
pub struct DisplayTree<'a> {
    tree: &'a AvlTree,
}

impl<'a> fmt::Display for DisplayTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        self.fmt_node(f, self.tree.root, "  ")?;
        writeln!(f)
    }
}

impl<'a> DisplayTree<'a> {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: Ptr, indent: &str) -> fmt::Result {
        if node.is_null() {
            return Ok(());
        }

        let Node { value, left, right, .. } = self.tree.nodes[node];
        let deeper = format!("{}     ", indent);

        self.fmt_node(f, right, &deeper)?;
        if !right.is_null() {
            writeln!(f, "{}  /", indent)?;
        }

        writeln!(f, "{}{}", indent, value)?;

        if !left.is_null() {
            writeln!(f, "{}  \\", indent)?;
        }
        self.fmt_node(f, left, &deeper)
    }
}
