//! Policy-driven recursive insertion.

use crate::types::{bf, get_l, get_r, set_bf, set_l, set_r, AvlNodeLike};

use super::rotate::rebalance;

/// How an insertion resolves a node comparing equal to one already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertPolicy {
    /// Reject the incoming node and report the occupant.
    KeepOld,
    /// The incoming node takes over the occupant's position; the occupant
    /// is detached and handed back.
    ReplaceOld,
    /// Keep both. The newcomer descends right of every equal node it meets.
    AllowMulti,
}

/// What happened to the height of the subtree an insertion went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Grew,
    Settled,
    /// An equal key stopped the descent; nothing below changed shape.
    Occupied,
}

pub(crate) struct InsertParams<'a, F, C> {
    pub cmp: &'a F,
    pub cookie: &'a C,
    pub policy: InsertPolicy,
}

/// `n1` takes over the links and balance of `n2`, which becomes standalone.
pub(crate) fn steal<N: AvlNodeLike>(arena: &mut [N], n1: u32, n2: u32) {
    let link = *arena[n2 as usize].link();
    *arena[n1 as usize].link_mut() = link;
    arena[n2 as usize].link_mut().detach();
}

/// Inserts `v` into the subtree rooted at `r`.
///
/// Returns the new subtree root and how its height changed. `inserted`
/// receives `v` when it was linked in, or the occupant on an equal key
/// under [`InsertPolicy::KeepOld`] / [`InsertPolicy::ReplaceOld`].
pub(crate) fn insert_help<N, F, C>(
    arena: &mut [N],
    r: Option<u32>,
    v: u32,
    inserted: &mut Option<u32>,
    params: &InsertParams<'_, F, C>,
) -> (u32, Step)
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let Some(r) = r else {
        arena[v as usize].link_mut().detach();
        *inserted = Some(v);
        return (v, Step::Grew);
    };

    let c = (params.cmp)(&arena[v as usize], &arena[r as usize], params.cookie);
    if c == 0 && params.policy != InsertPolicy::AllowMulti {
        *inserted = Some(r);
        if params.policy == InsertPolicy::ReplaceOld && r != v {
            steal(arena, v, r);
            return (v, Step::Occupied);
        }
        return (r, Step::Occupied);
    }

    let step = if c < 0 {
        let (sub, step) = insert_help(arena, get_l(arena, r), v, inserted, params);
        set_l(arena, r, Some(sub));
        if step == Step::Grew {
            set_bf(arena, r, bf(arena, r) + 1);
        }
        step
    } else {
        let (sub, step) = insert_help(arena, get_r(arena, r), v, inserted, params);
        set_r(arena, r, Some(sub));
        if step == Step::Grew {
            set_bf(arena, r, bf(arena, r) - 1);
        }
        step
    };
    if step != Step::Grew {
        return (r, step);
    }

    let top = rebalance(arena, r);
    if bf(arena, top) == 0 {
        (top, Step::Settled)
    } else {
        (top, Step::Grew)
    }
}
