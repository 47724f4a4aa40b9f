//! Rotations and the ±2 rebalancing rule.
//!
//! Every rotation takes the current subtree root and returns the new one;
//! the caller stores it back into whichever slot held the old root. Balance
//! factors of the touched nodes are updated in closed form from their
//! pre-rotation values, never by re-measuring heights.

use tracing::trace;

use crate::types::{bf, get_l, get_r, set_bf, set_l, set_r, AvlNodeLike};

/// Lifts the left child `nl` over `n` (single right rotation).
pub(crate) fn ll_rotate<N: AvlNodeLike>(arena: &mut [N], n: u32, nl: u32) -> u32 {
    let nlr = get_r(arena, nl);
    set_l(arena, n, nlr);
    set_r(arena, nl, Some(n));

    let mut nbf = bf(arena, n);
    let mut nlbf = bf(arena, nl);
    nbf += -1 - nlbf.max(0);
    nlbf += -1 + nbf.min(0);
    set_bf(arena, n, nbf);
    set_bf(arena, nl, nlbf);

    trace!(node = n, pivot = nl, "ll rotation");
    nl
}

/// Lifts the right child `nr` over `n` (single left rotation).
pub(crate) fn rr_rotate<N: AvlNodeLike>(arena: &mut [N], n: u32, nr: u32) -> u32 {
    let nrl = get_l(arena, nr);
    set_r(arena, n, nrl);
    set_l(arena, nr, Some(n));

    let mut nbf = bf(arena, n);
    let mut nrbf = bf(arena, nr);
    nbf += 1 - nrbf.min(0);
    nrbf += 1 + nbf.max(0);
    set_bf(arena, n, nbf);
    set_bf(arena, nr, nrbf);

    trace!(node = n, pivot = nr, "rr rotation");
    nr
}

/// Left-right double rotation: `nlr` ends up on top.
pub(crate) fn lr_rotate<N: AvlNodeLike>(arena: &mut [N], n: u32, nl: u32, nlr: u32) -> u32 {
    let top = rr_rotate(arena, nl, nlr);
    set_l(arena, n, Some(top));
    ll_rotate(arena, n, top)
}

/// Right-left double rotation: `nrl` ends up on top.
pub(crate) fn rl_rotate<N: AvlNodeLike>(arena: &mut [N], n: u32, nr: u32, nrl: u32) -> u32 {
    let top = ll_rotate(arena, nr, nrl);
    set_r(arena, n, Some(top));
    rr_rotate(arena, n, top)
}

/// Restores `bf ∈ {-1, 0, 1}` at `n` if it has reached ±2.
///
/// Returns the root of the (possibly rotated) subtree.
pub(crate) fn rebalance<N: AvlNodeLike>(arena: &mut [N], n: u32) -> u32 {
    match bf(arena, n) {
        -2 => {
            let Some(nr) = get_r(arena, n) else {
                return n;
            };
            match (bf(arena, nr), get_l(arena, nr)) {
                (1, Some(nrl)) => rl_rotate(arena, n, nr, nrl),
                _ => rr_rotate(arena, n, nr),
            }
        }
        2 => {
            let Some(nl) = get_l(arena, n) else {
                return n;
            };
            match (bf(arena, nl), get_r(arena, nl)) {
                (-1, Some(nlr)) => lr_rotate(arena, n, nl, nlr),
                _ => ll_rotate(arena, n, nl),
            }
        }
        _ => n,
    }
}
