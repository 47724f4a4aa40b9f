use tracing::debug;

use crate::types::{in_arena, AvlNodeLike};

use super::insert::{insert_help, InsertParams, InsertPolicy, Step};
use super::query;
use super::remove::{remove_help, remove_matching, RemoveParams, RemovePolicy};
use super::traverse::{self, Iter};
use super::validate::{assert_avl_tree, ValidationError};

/// Handle of an AVL tree whose nodes live in a caller-owned arena.
///
/// The handle holds the root index, the comparator and the cookie handed to
/// every comparator and visitor call. It never allocates nodes: insertion
/// links an existing arena slot in, removal unlinks it and hands the index
/// back. Size and height are not cached; both cost a full traversal.
///
/// Several trees may share one arena as long as no node is linked into two
/// of them at once.
pub struct Avl<F, C = ()> {
    pub root: Option<u32>,
    cmp: F,
    cookie: C,
}

impl<F, C> Avl<F, C> {
    /// Creates an empty tree.
    pub fn new(cmp: F, cookie: C) -> Self {
        Self {
            root: None,
            cmp,
            cookie,
        }
    }

    /// Adopts an already linked, balanced subtree.
    pub fn from_root(root: Option<u32>, cmp: F, cookie: C) -> Self {
        Self { root, cmp, cookie }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn cookie(&self) -> &C {
        &self.cookie
    }

    pub fn cookie_mut(&mut self) -> &mut C {
        &mut self.cookie
    }

    pub fn comparator(&self) -> &F {
        &self.cmp
    }

    pub fn empty(&self) -> bool {
        self.root.is_none()
    }

    /// Unlinks every node, children first, calling `dtor` once per node
    /// after it has been detached. The tree is empty afterwards.
    pub fn clear<N, D>(&mut self, arena: &mut [N], mut dtor: D)
    where
        N: AvlNodeLike,
        D: FnMut(u32, &mut N),
    {
        let mut count = 0usize;
        traverse::clear(arena, self.root.take(), &mut |i, n: &mut N| {
            count += 1;
            dtor(i, n);
        });
        debug!(count, "cleared tree");
    }

    pub fn size<N: AvlNodeLike>(&self, arena: &[N]) -> usize {
        query::size(arena, self.root)
    }

    pub fn height<N: AvlNodeLike>(&self, arena: &[N]) -> usize {
        query::height(arena, self.root)
    }

    pub fn first<N: AvlNodeLike>(&self, arena: &[N]) -> Option<u32> {
        query::first(arena, self.root)
    }

    pub fn last<N: AvlNodeLike>(&self, arena: &[N]) -> Option<u32> {
        query::last(arena, self.root)
    }

    /// In-order iterator over the indices of linked nodes.
    pub fn iter<'a, N: AvlNodeLike>(&self, arena: &'a [N]) -> Iter<'a, N> {
        Iter::new(arena, self.root)
    }

    pub fn prefix_map<N, V>(&self, arena: &mut [N], mut visitor: V)
    where
        N: AvlNodeLike,
        V: FnMut(u32, &mut N, &C),
    {
        traverse::prefix_map(arena, self.root, &self.cookie, &mut visitor);
    }

    pub fn infix_map<N, V>(&self, arena: &mut [N], mut visitor: V)
    where
        N: AvlNodeLike,
        V: FnMut(u32, &mut N, &C),
    {
        traverse::infix_map(arena, self.root, &self.cookie, &mut visitor);
    }

    pub fn postfix_map<N, V>(&self, arena: &mut [N], mut visitor: V)
    where
        N: AvlNodeLike,
        V: FnMut(u32, &mut N, &C),
    {
        traverse::postfix_map(arena, self.root, &self.cookie, &mut visitor);
    }

    /// Removes and returns the current root. Always succeeds on a
    /// non-empty tree since the root is found by identity.
    pub(crate) fn pop_root<N>(&mut self, arena: &mut [N]) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        let root = self.root?;
        self.remove_with(arena, root, RemovePolicy::Exact)
    }

    /// Inserts `v` into an arbitrary subtree using this tree's comparator.
    /// Returns the new subtree root, whether `v` was linked in, and the
    /// node holding the key.
    pub(crate) fn insert_into<N>(
        &self,
        arena: &mut [N],
        root: Option<u32>,
        v: u32,
        policy: InsertPolicy,
    ) -> (u32, bool, Option<u32>)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        let params = InsertParams {
            cmp: &self.cmp,
            cookie: &self.cookie,
            policy,
        };
        let mut inserted = None;
        let (top, step) = insert_help(arena, root, v, &mut inserted, &params);
        (top, step != Step::Occupied, inserted)
    }

    /// Shared entry point of the three insertion policies.
    ///
    /// Returns whether `v` was linked in, and the node that matched: `v`
    /// itself, or the equal occupant that stopped the descent.
    pub fn insert_with<N>(
        &mut self,
        arena: &mut [N],
        v: u32,
        policy: InsertPolicy,
    ) -> (bool, Option<u32>)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        if !in_arena(arena, v) {
            return (false, None);
        }
        let (top, linked, inserted) = self.insert_into(arena, self.root, v, policy);
        self.root = Some(top);
        (linked, inserted)
    }

    /// Inserts `v` unless a node comparing equal is present.
    ///
    /// Returns whether `v` was linked in, and the node now holding the key:
    /// `v` itself, or the occupant that rejected it. The occupant is `None`
    /// only when `v` is not an arena index.
    pub fn insert<N>(&mut self, arena: &mut [N], v: u32) -> (bool, Option<u32>)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        self.insert_with(arena, v, InsertPolicy::KeepOld)
    }

    /// Inserts `v`, displacing a node comparing equal if there is one.
    ///
    /// Returns the displaced node, now standalone.
    pub fn insert_or_update<N>(&mut self, arena: &mut [N], v: u32) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        match self.insert_with(arena, v, InsertPolicy::ReplaceOld) {
            (false, prev) => prev.filter(|&prev| prev != v),
            (true, _) => None,
        }
    }

    /// Inserts `v` even if equal nodes are present; it goes after them.
    pub fn insert_multi<N>(&mut self, arena: &mut [N], v: u32)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        self.insert_with(arena, v, InsertPolicy::AllowMulti);
    }

    /// Shared entry point of the two removal policies. Returns the removed
    /// node, now standalone.
    pub fn remove_with<N>(&mut self, arena: &mut [N], v: u32, policy: RemovePolicy) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        if !in_arena(arena, v) {
            return None;
        }
        let params = RemoveParams {
            cmp: &self.cmp,
            cookie: &self.cookie,
            policy,
        };
        let mut target = None;
        let (top, _) = remove_help(arena, self.root, v, &mut target, &params);
        self.root = top;
        target
    }

    /// Removes `v` if it is linked in this tree, otherwise one node
    /// comparing equal to it.
    pub fn remove<N>(&mut self, arena: &mut [N], v: u32) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        self.remove_with(arena, v, RemovePolicy::Any)
    }

    /// Removes `v` itself. Equal but distinct nodes are left in place.
    pub fn remove_exact<N>(&mut self, arena: &mut [N], v: u32) -> bool
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        self.remove_with(arena, v, RemovePolicy::Exact) == Some(v)
    }

    /// Removes one node comparing equal to a probe record that does not
    /// live in the arena.
    pub fn remove_matching<N>(&mut self, arena: &mut [N], probe: &N) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        let (top, _, removed) = remove_matching(arena, self.root, probe, &self.cmp, &self.cookie);
        self.root = top;
        removed
    }

    pub fn find<N>(&self, arena: &[N], probe: &N) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        query::find(arena, self.root, probe, &self.cmp, &self.cookie)
    }

    /// First node not less than `probe`.
    pub fn lower_bound<N>(&self, arena: &[N], probe: &N) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        query::lower_bound(arena, self.root, probe, &self.cmp, &self.cookie)
    }

    /// First node strictly greater than `probe`.
    pub fn upper_bound<N>(&self, arena: &[N], probe: &N) -> Option<u32>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        query::upper_bound(arena, self.root, probe, &self.cmp, &self.cookie)
    }

    /// Visits the nodes from `begin` (inclusive) to `end` (exclusive) in
    /// key order; `end == None` runs to the last node.
    pub fn map_between<N, V>(&self, arena: &mut [N], begin: u32, end: Option<u32>, mut visitor: V)
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
        V: FnMut(u32, &mut N, &C),
    {
        if !in_arena(arena, begin) || end.is_some_and(|e| !in_arena(arena, e)) {
            return;
        }
        traverse::map_between(
            arena,
            self.root,
            begin,
            end,
            &self.cmp,
            &self.cookie,
            &mut visitor,
        );
    }

    /// Checks the balance and ordering invariants.
    pub fn validate<N>(&self, arena: &[N]) -> Result<(), ValidationError>
    where
        N: AvlNodeLike,
        F: Fn(&N, &N, &C) -> i32,
    {
        assert_avl_tree(arena, self.root, &self.cmp, &self.cookie)
    }
}
