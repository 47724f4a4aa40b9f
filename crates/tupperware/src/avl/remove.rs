//! Policy-driven recursive removal.
//!
//! Each helper returns the new subtree root together with a flag telling
//! whether the subtree got shorter. After a removal (with or without a
//! rotation) a subtree is one level shorter exactly when its new root ends
//! up with balance 0, which is what stops the upward propagation.

use crate::types::{bf, get_l, get_r, set_bf, set_l, set_r, AvlNodeLike};

use super::insert::steal;
use super::rotate::rebalance;

/// Which node a removal is allowed to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovePolicy {
    /// The probe itself if it is met on the search path, otherwise the
    /// first node comparing equal to it.
    Any,
    /// Only the probe node itself.
    Exact,
}

pub(crate) struct RemoveParams<'a, F, C> {
    pub cmp: &'a F,
    pub cookie: &'a C,
    pub policy: RemovePolicy,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Re-links `sub` as the `side` child of `r` and rebalances if it shrank.
fn relink<N: AvlNodeLike>(
    arena: &mut [N],
    r: u32,
    side: Side,
    sub: Option<u32>,
    shrunk: bool,
) -> (Option<u32>, bool) {
    match side {
        Side::Left => set_l(arena, r, sub),
        Side::Right => set_r(arena, r, sub),
    }
    if !shrunk {
        return (Some(r), false);
    }
    let delta = match side {
        Side::Left => -1,
        Side::Right => 1,
    };
    set_bf(arena, r, bf(arena, r) + delta);
    let top = rebalance(arena, r);
    (Some(top), bf(arena, top) == 0)
}

/// Unlinks the leftmost node under `r`. Returns `(new_root, min, shrunk)`.
fn remove_min<N: AvlNodeLike>(arena: &mut [N], r: u32) -> (Option<u32>, u32, bool) {
    let Some(l) = get_l(arena, r) else {
        return (get_r(arena, r), r, true);
    };
    let (sub, min, shrunk) = remove_min(arena, l);
    let (top, shrunk) = relink(arena, r, Side::Left, sub, shrunk);
    (top, min, shrunk)
}

/// Unlinks the rightmost node under `r`. Returns `(new_root, max, shrunk)`.
fn remove_max<N: AvlNodeLike>(arena: &mut [N], r: u32) -> (Option<u32>, u32, bool) {
    let Some(rr) = get_r(arena, r) else {
        return (get_l(arena, r), r, true);
    };
    let (sub, max, shrunk) = remove_max(arena, rr);
    let (top, shrunk) = relink(arena, r, Side::Right, sub, shrunk);
    (top, max, shrunk)
}

/// Unlinks `r` itself, which has been identified as the target.
fn remove_found<N: AvlNodeLike>(arena: &mut [N], r: u32) -> (Option<u32>, bool) {
    let (Some(l), Some(rr)) = (get_l(arena, r), get_r(arena, r)) else {
        let child = get_l(arena, r).or(get_r(arena, r));
        arena[r as usize].link_mut().detach();
        return (child, true);
    };

    // Take the replacement from the taller side.
    if bf(arena, r) < 0 {
        let (sub, succ, shrunk) = remove_min(arena, rr);
        steal(arena, succ, r);
        relink(arena, succ, Side::Right, sub, shrunk)
    } else {
        let (sub, pred, shrunk) = remove_max(arena, l);
        steal(arena, pred, r);
        relink(arena, pred, Side::Left, sub, shrunk)
    }
}

fn descend<N, F, C>(
    arena: &mut [N],
    r: u32,
    side: Side,
    v: u32,
    target: &mut Option<u32>,
    params: &RemoveParams<'_, F, C>,
) -> (Option<u32>, bool)
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let child = match side {
        Side::Left => get_l(arena, r),
        Side::Right => get_r(arena, r),
    };
    let (sub, shrunk) = remove_help(arena, child, v, target, params);
    relink(arena, r, side, sub, shrunk)
}

/// Removes the node selected by `v` and `params.policy` from the subtree
/// rooted at `r`. `target` receives the removed node, now standalone.
pub(crate) fn remove_help<N, F, C>(
    arena: &mut [N],
    r: Option<u32>,
    v: u32,
    target: &mut Option<u32>,
    params: &RemoveParams<'_, F, C>,
) -> (Option<u32>, bool)
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let Some(r) = r else {
        return (None, false);
    };

    if r == v {
        *target = Some(r);
        return remove_found(arena, r);
    }

    let c = (params.cmp)(&arena[v as usize], &arena[r as usize], params.cookie);
    if c < 0 {
        return descend(arena, r, Side::Left, v, target, params);
    }
    if c > 0 {
        return descend(arena, r, Side::Right, v, target, params);
    }
    if params.policy == RemovePolicy::Any {
        *target = Some(r);
        return remove_found(arena, r);
    }

    // Duplicates may sit on either side of an equal node once rotations
    // have run, so an exact removal has to look at both.
    let res = descend(arena, r, Side::Left, v, target, params);
    if target.is_some() {
        return res;
    }
    descend(arena, r, Side::Right, v, target, params)
}

/// Removes the first node comparing equal to a probe living outside the
/// arena. Returns the new subtree root, shrink flag and the removed node.
pub(crate) fn remove_matching<N, F, C>(
    arena: &mut [N],
    r: Option<u32>,
    probe: &N,
    cmp: &F,
    cookie: &C,
) -> (Option<u32>, bool, Option<u32>)
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let Some(r) = r else {
        return (None, false, None);
    };

    let c = cmp(probe, &arena[r as usize], cookie);
    if c == 0 {
        let (top, shrunk) = remove_found(arena, r);
        return (top, shrunk, Some(r));
    }
    let side = if c < 0 { Side::Left } else { Side::Right };
    let child = match side {
        Side::Left => get_l(arena, r),
        Side::Right => get_r(arena, r),
    };
    let (sub, shrunk, removed) = remove_matching(arena, child, probe, cmp, cookie);
    let (top, shrunk) = relink(arena, r, side, sub, shrunk);
    (top, shrunk, removed)
}
