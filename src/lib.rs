mod slab;

pub mod error;
pub mod tree;

pub use error::EmptyTreeError;
pub use tree::AvlTree;

#[macro_export(local_inner_macros)]
macro_rules! avltree {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(avltree!(@single $rest)),*]));

    ($($value:expr,)+) => { avltree!($($value),+) };
    ($($value:expr),*) => {
        {
            let _cap = avltree!(@count $($value),*);
            let mut _tree = $crate::AvlTree::with_capacity(_cap);
            $(
                let _ = _tree.insert($value);
            )*
            _tree
        }
    };
}
