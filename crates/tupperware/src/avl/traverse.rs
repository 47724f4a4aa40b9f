//! Whole-tree and bounded-range visitation.
//!
//! Visitors receive the arena index, the record and the tree's cookie. A
//! visitor may change the record's payload but must leave its link alone.

use crate::types::{get_l, get_r, AvlNodeLike};

pub fn prefix_map<N, C, V>(arena: &mut [N], root: Option<u32>, cookie: &C, visitor: &mut V)
where
    N: AvlNodeLike,
    V: FnMut(u32, &mut N, &C),
{
    let Some(r) = root else {
        return;
    };
    let (l, rr) = (get_l(arena, r), get_r(arena, r));
    visitor(r, &mut arena[r as usize], cookie);
    prefix_map(arena, l, cookie, visitor);
    prefix_map(arena, rr, cookie, visitor);
}

pub fn infix_map<N, C, V>(arena: &mut [N], root: Option<u32>, cookie: &C, visitor: &mut V)
where
    N: AvlNodeLike,
    V: FnMut(u32, &mut N, &C),
{
    let Some(r) = root else {
        return;
    };
    let (l, rr) = (get_l(arena, r), get_r(arena, r));
    infix_map(arena, l, cookie, visitor);
    visitor(r, &mut arena[r as usize], cookie);
    infix_map(arena, rr, cookie, visitor);
}

pub fn postfix_map<N, C, V>(arena: &mut [N], root: Option<u32>, cookie: &C, visitor: &mut V)
where
    N: AvlNodeLike,
    V: FnMut(u32, &mut N, &C),
{
    let Some(r) = root else {
        return;
    };
    let (l, rr) = (get_l(arena, r), get_r(arena, r));
    postfix_map(arena, l, cookie, visitor);
    postfix_map(arena, rr, cookie, visitor);
    visitor(r, &mut arena[r as usize], cookie);
}

/// Detaches every node under `root` children-first and hands each one,
/// already standalone, to `dtor`.
pub fn clear<N, D>(arena: &mut [N], root: Option<u32>, dtor: &mut D)
where
    N: AvlNodeLike,
    D: FnMut(u32, &mut N),
{
    let Some(r) = root else {
        return;
    };
    let (l, rr) = (get_l(arena, r), get_r(arena, r));
    clear(arena, l, dtor);
    clear(arena, rr, dtor);
    arena[r as usize].link_mut().detach();
    dtor(r, &mut arena[r as usize]);
}

/// In-order iterator over arena indices.
///
/// Nodes carry no parent link, so the pending ancestors live on an explicit
/// stack: every entry is a node whose left subtree is being walked.
pub struct Iter<'a, N> {
    arena: &'a [N],
    stack: Vec<u32>,
}

impl<'a, N: AvlNodeLike> Iter<'a, N> {
    pub fn new(arena: &'a [N], root: Option<u32>) -> Self {
        let mut it = Self {
            arena,
            stack: Vec::new(),
        };
        it.push_left(root);
        it
    }

    fn push_left(&mut self, mut curr: Option<u32>) {
        while let Some(i) = curr {
            self.stack.push(i);
            curr = get_l(self.arena, i);
        }
    }
}

impl<N: AvlNodeLike> Iterator for Iter<'_, N> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let i = self.stack.pop()?;
        self.push_left(get_r(self.arena, i));
        Some(i)
    }
}

/// Visits `[begin, end)` in key order.
///
/// The walk seeds its stack with the lower-bound path of `begin`, skips
/// nodes equal to `begin` that precede it, and stops at `end` (by identity)
/// or at the first node comparing greater than `end`. Nothing is visited
/// when `begin` is not in the tree.
pub fn map_between<N, F, C, V>(
    arena: &mut [N],
    root: Option<u32>,
    begin: u32,
    end: Option<u32>,
    cmp: &F,
    cookie: &C,
    visitor: &mut V,
) where
    N: AvlNodeLike,
    F: Fn(&N, &N, &C) -> i32,
    V: FnMut(u32, &mut N, &C),
{
    let mut stack = Vec::new();
    let mut curr = root;
    while let Some(i) = curr {
        if cmp(&arena[begin as usize], &arena[i as usize], cookie) <= 0 {
            stack.push(i);
            curr = get_l(arena, i);
        } else {
            curr = get_r(arena, i);
        }
    }

    let mut started = false;
    while let Some(i) = stack.pop() {
        let mut c = get_r(arena, i);
        while let Some(j) = c {
            stack.push(j);
            c = get_l(arena, j);
        }

        if !started {
            if i != begin {
                if cmp(&arena[begin as usize], &arena[i as usize], cookie) < 0 {
                    return;
                }
                continue;
            }
            started = true;
        }

        if let Some(e) = end {
            if i == e || cmp(&arena[i as usize], &arena[e as usize], cookie) > 0 {
                return;
            }
        }
        visitor(i, &mut arena[i as usize], cookie);
    }
}
