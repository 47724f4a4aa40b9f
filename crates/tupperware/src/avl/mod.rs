//! AVL tree over arena-indexed intrusive nodes.

pub mod insert;
pub mod merge;
pub mod print;
pub mod query;
pub mod remove;
mod rotate;
pub mod traverse;
pub mod tree;
pub mod validate;

pub use insert::InsertPolicy;
pub use print::{print, snapshot};
pub use query::{find, first, height, last, lower_bound, size, upper_bound};
pub use remove::RemovePolicy;
pub use traverse::{infix_map, map_between, postfix_map, prefix_map, Iter};
pub use tree::Avl;
pub use validate::{assert_avl_tree, ValidationError};
