//! Invariant checking for AVL trees.

use thiserror::Error;
use tracing::warn;

use crate::types::{in_arena, AvlNodeLike};

use super::traverse::Iter;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("node {node} is outside the arena")]
    OutOfBounds { node: u32 },
    #[error("node {node} is linked more than once")]
    Cycle { node: u32 },
    #[error("balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i32, actual: i32 },
    #[error("AVL balance violated at node {node}: bf={bf}")]
    Unbalanced { node: u32, bf: i32 },
    #[error("node order violated: {prev} sorts after {next}")]
    OrderViolated { prev: u32, next: u32 },
}

/// Returns the height of the subtree under `node`.
fn check_links<N: AvlNodeLike>(
    arena: &[N],
    node: u32,
    seen: &mut [bool],
) -> Result<i32, ValidationError> {
    if !in_arena(arena, node) {
        return Err(ValidationError::OutOfBounds { node });
    }
    if std::mem::replace(&mut seen[node as usize], true) {
        return Err(ValidationError::Cycle { node });
    }

    let n = &arena[node as usize];
    let lh = match n.l() {
        Some(l) => check_links(arena, l, seen)?,
        None => 0,
    };
    let rh = match n.r() {
        Some(r) => check_links(arena, r, seen)?,
        None => 0,
    };

    let expected = lh - rh;
    let actual = n.bf();
    if actual != expected {
        return Err(ValidationError::BalanceMismatch {
            node,
            expected,
            actual,
        });
    }
    if !(-1..=1).contains(&actual) {
        return Err(ValidationError::Unbalanced { node, bf: actual });
    }
    Ok(1 + lh.max(rh))
}

/// Checks link sanity, balance factors and in-order ordering of the tree
/// under `root`. Equal neighbours are allowed.
pub fn assert_avl_tree<N, F, C>(
    arena: &[N],
    root: Option<u32>,
    cmp: &F,
    cookie: &C,
) -> Result<(), ValidationError>
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let res = check_tree(arena, root, cmp, cookie);
    if let Err(err) = &res {
        warn!(%err, "invalid AVL tree");
    }
    res
}

fn check_tree<N, F, C>(
    arena: &[N],
    root: Option<u32>,
    cmp: &F,
    cookie: &C,
) -> Result<(), ValidationError>
where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    let mut seen = vec![false; arena.len()];
    check_links(arena, root, &mut seen)?;

    let mut prev: Option<u32> = None;
    for i in Iter::new(arena, Some(root)) {
        if let Some(p) = prev {
            if cmp(&arena[p as usize], &arena[i as usize], cookie) > 0 {
                return Err(ValidationError::OrderViolated { prev: p, next: i });
            }
        }
        prev = Some(i);
    }
    Ok(())
}
