//! Draining one tree into another.
//!
//! All three variants repeatedly unlink the source's root (an identity
//! removal that cannot miss) and insert it into the destination, so no
//! intermediate collection of the source is needed. Nodes that cannot go
//! into the destination are rebuilt into a duplicate-tolerant tree using
//! the source's own comparator and cookie, which then becomes the source.

use tracing::debug;

use crate::types::AvlNodeLike;

use super::insert::InsertPolicy;
use super::tree::Avl;

impl<F, C> Avl<F, C> {
    /// Moves every node of `other` whose key is not already present into
    /// `self`. Conflicting nodes stay behind in `other`.
    pub fn merge<N, F2, C2>(&mut self, arena: &mut [N], other: &mut Avl<F2, C2>)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
        F2: Fn(&N, &N, &C2) -> i32,
    {
        let mut kept = None;
        let (mut moved, mut conflicts) = (0usize, 0usize);
        while let Some(n) = other.pop_root(arena) {
            let (accepted, _) = self.insert(arena, n);
            if accepted {
                moved += 1;
            } else {
                conflicts += 1;
                let (top, _, _) = other.insert_into(arena, kept, n, InsertPolicy::AllowMulti);
                kept = Some(top);
            }
        }
        other.root = kept;
        debug!(moved, conflicts, "merged tree");
    }

    /// Moves every node of `other` into `self`, letting incoming nodes
    /// displace equal ones. The displaced nodes end up in `other`.
    pub fn update<N, F2, C2>(&mut self, arena: &mut [N], other: &mut Avl<F2, C2>)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
        F2: Fn(&N, &N, &C2) -> i32,
    {
        let mut kept = None;
        let (mut moved, mut displaced) = (0usize, 0usize);
        while let Some(n) = other.pop_root(arena) {
            moved += 1;
            if let Some(old) = self.insert_or_update(arena, n) {
                displaced += 1;
                let (top, _, _) = other.insert_into(arena, kept, old, InsertPolicy::AllowMulti);
                kept = Some(top);
            }
        }
        other.root = kept;
        debug!(moved, displaced, "updated tree");
    }

    /// Moves every node of `other` into `self`, keeping duplicates.
    /// `other` ends up empty.
    pub fn merge_all<N, F2, C2>(&mut self, arena: &mut [N], other: &mut Avl<F2, C2>)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
        F2: Fn(&N, &N, &C2) -> i32,
    {
        let mut moved = 0usize;
        while let Some(n) = other.pop_root(arena) {
            self.insert_multi(arena, n);
            moved += 1;
        }
        debug!(moved, "merged all");
    }
}
