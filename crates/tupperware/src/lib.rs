//! Intrusive AVL tree over caller-owned arenas.
//!
//! Records embed an [`AvlLink`] (left, right, balance factor) and live in a
//! slice the caller owns; the tree only rewires links between arena indices.
//! It never allocates, frees or moves a record, and it tracks neither size
//! nor height.
//!
//! Comparators have the shape `Fn(&N, &N, &C) -> i32` and are called as
//! `cmp(candidate, existing, cookie)`, where the cookie is a context value
//! stored in the [`Avl`] handle and threaded through every call.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`AvlLink`], [`AvlNodeLike`], [`AvlNode`], comparator helpers |
//! [`avl::tree`] | [`Avl`] handle: lifecycle, insertion, removal, queries |
//! [`avl::insert`] / [`avl::remove`] | Policy-driven recursive cores |
//! [`avl::query`] | `find`, bounds, extremes, `size`, `height` |
//! [`avl::traverse`] | Prefix / infix / postfix maps, range walk, iterator |
//! [`avl::merge`] | `merge`, `update`, `merge_all` |
//! [`avl::validate`] | Invariant checking |
//! [`avl::print`] | Text and JSON renderings |
//!
//! # Example
//!
//! ```
//! use tupperware::{by_key, Avl, AvlNode};
//!
//! let mut arena: Vec<AvlNode<i32>> = [5, 3, 8].into_iter().map(AvlNode::new).collect();
//! let mut tree = Avl::new(by_key(|n: &AvlNode<i32>| &n.v), ());
//! for i in 0..arena.len() as u32 {
//!     assert!(tree.insert(&mut arena, i).0);
//! }
//!
//! let keys: Vec<i32> = tree.iter(&arena).map(|i| arena[i as usize].v).collect();
//! assert_eq!(keys, vec![3, 5, 8]);
//! assert_eq!(tree.find(&arena, &AvlNode::new(8)), Some(2));
//! ```

pub mod avl;
pub mod types;

pub use avl::{Avl, InsertPolicy, RemovePolicy, ValidationError};
pub use types::{by_key, cmp_ord, AvlLink, AvlNode, AvlNodeLike};
