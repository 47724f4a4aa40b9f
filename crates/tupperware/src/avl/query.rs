//! Read-only queries over a subtree: lookups, bounds, extremes and the
//! O(n) size / height measurements.

use crate::types::{get_l, get_r, AvlNodeLike};

/// Finds a node comparing equal to `probe`.
pub fn find<N, F, C>(arena: &[N], root: Option<u32>, probe: &N, cmp: &F, cookie: &C) -> Option<u32>
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let c = cmp(probe, &arena[i as usize], cookie);
        if c == 0 {
            return Some(i);
        }
        curr = if c < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Leftmost node not less than `probe`.
pub fn lower_bound<N, F, C>(
    arena: &[N],
    root: Option<u32>,
    probe: &N,
    cmp: &F,
    cookie: &C,
) -> Option<u32>
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let r = root?;
    if cmp(probe, &arena[r as usize], cookie) <= 0 {
        lower_bound(arena, get_l(arena, r), probe, cmp, cookie).or(Some(r))
    } else {
        lower_bound(arena, get_r(arena, r), probe, cmp, cookie)
    }
}

/// Leftmost node strictly greater than `probe`.
pub fn upper_bound<N, F, C>(
    arena: &[N],
    root: Option<u32>,
    probe: &N,
    cmp: &F,
    cookie: &C,
) -> Option<u32>
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let r = root?;
    if cmp(probe, &arena[r as usize], cookie) < 0 {
        upper_bound(arena, get_l(arena, r), probe, cmp, cookie).or(Some(r))
    } else {
        upper_bound(arena, get_r(arena, r), probe, cmp, cookie)
    }
}

/// Leftmost node in the tree.
pub fn first<N: AvlNodeLike>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: AvlNodeLike>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

fn size_inner<N: AvlNodeLike>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`, by full traversal.
pub fn size<N: AvlNodeLike>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Height of the tree under `root` (0 when empty, 1 for a single node).
pub fn height<N: AvlNodeLike>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| {
        1 + height(arena, get_l(arena, r)).max(height(arena, get_r(arena, r)))
    })
}
