use static_assertions::assert_impl_all;

use avl::{AvlTree, EmptyTreeError};
use avl::tree::{DisplayTree, IterInorder};

assert_impl_all!(AvlTree: Send, Sync);
assert_impl_all!(EmptyTreeError: Send, Sync);
assert_impl_all!(IterInorder<'static>: Send, Sync);
assert_impl_all!(DisplayTree<'static>: Send, Sync);
