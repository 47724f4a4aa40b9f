//! Node linkage and comparator definitions.
//!
//! Nodes are caller records stored in a caller-owned arena (`&mut [N]`,
//! usually a `Vec<N>`). Every "pointer" is an `Option<u32>` index into that
//! arena, so a record can be linked into a tree without the tree ever
//! allocating or reconstructing the enclosing record from its link field.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Embeddable AVL linkage: left child, right child and balance factor.
///
/// Carries no key. The record embedding it supplies the key through the
/// tree's comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvlLink {
    pub l: Option<u32>,
    pub r: Option<u32>,
    /// Balance factor, `height(left) - height(right)`.
    pub bf: i32,
}

impl AvlLink {
    /// A standalone, unlinked value.
    pub const fn new() -> Self {
        Self {
            l: None,
            r: None,
            bf: 0,
        }
    }

    pub fn is_detached(&self) -> bool {
        self.l.is_none() && self.r.is_none() && self.bf == 0
    }

    pub(crate) fn detach(&mut self) {
        *self = Self::new();
    }
}

/// Access to the [`AvlLink`] embedded in a record.
///
/// Only `link` and `link_mut` need implementing; the child and balance
/// accessors are derived from them.
pub trait AvlNodeLike {
    fn link(&self) -> &AvlLink;
    fn link_mut(&mut self) -> &mut AvlLink;

    #[inline]
    fn l(&self) -> Option<u32> {
        self.link().l
    }

    #[inline]
    fn r(&self) -> Option<u32> {
        self.link().r
    }

    #[inline]
    fn bf(&self) -> i32 {
        self.link().bf
    }

    #[inline]
    fn set_l(&mut self, v: Option<u32>) {
        self.link_mut().l = v;
    }

    #[inline]
    fn set_r(&mut self, v: Option<u32>) {
        self.link_mut().r = v;
    }

    #[inline]
    fn set_bf(&mut self, bf: i32) {
        self.link_mut().bf = bf;
    }
}

impl AvlNodeLike for AvlLink {
    fn link(&self) -> &AvlLink {
        self
    }

    fn link_mut(&mut self) -> &mut AvlLink {
        self
    }
}

/// Ready-made record: a payload with an embedded link.
#[derive(Clone, Debug)]
pub struct AvlNode<T> {
    pub link: AvlLink,
    pub v: T,
}

impl<T> AvlNode<T> {
    pub fn new(v: T) -> Self {
        Self {
            link: AvlLink::new(),
            v,
        }
    }
}

impl<T> AvlNodeLike for AvlNode<T> {
    fn link(&self) -> &AvlLink {
        &self.link
    }

    fn link_mut(&mut self) -> &mut AvlLink {
        &mut self.link
    }
}

/// Maps an [`Ordering`] onto the `-1 / 0 / 1` comparator convention.
#[inline]
pub fn cmp_ord<K: Ord + ?Sized>(a: &K, b: &K) -> i32 {
    match a.cmp(b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Builds a cookie-less comparator ordering records by the key returned
/// from `key_of`.
pub fn by_key<N, K, F>(key_of: F) -> impl Fn(&N, &N, &()) -> i32
where
    K: Ord + ?Sized,
    F: Fn(&N) -> &K,
{
    move |a: &N, b: &N, _: &()| cmp_ord(key_of(a), key_of(b))
}

#[inline]
pub(crate) fn get_l<N: AvlNodeLike>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: AvlNodeLike>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_l<N: AvlNodeLike>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: AvlNodeLike>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

#[inline]
pub(crate) fn bf<N: AvlNodeLike>(arena: &[N], idx: u32) -> i32 {
    arena[idx as usize].bf()
}

#[inline]
pub(crate) fn set_bf<N: AvlNodeLike>(arena: &mut [N], idx: u32, v: i32) {
    arena[idx as usize].set_bf(v);
}

#[inline]
pub(crate) fn in_arena<N>(arena: &[N], idx: u32) -> bool {
    (idx as usize) < arena.len()
}
