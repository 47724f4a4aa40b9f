use std::cell::{Cell, RefCell};

use tupperware::{cmp_ord, Avl, AvlLink, AvlNodeLike};

#[derive(Debug)]
struct IntTree {
    val: i32,
    avl: AvlLink,
}

impl AvlNodeLike for IntTree {
    fn link(&self) -> &AvlLink {
        &self.avl
    }

    fn link_mut(&mut self) -> &mut AvlLink {
        &mut self.avl
    }
}

fn n(val: i32) -> IntTree {
    IntTree {
        val,
        avl: AvlLink::new(),
    }
}

fn arena_of(vals: impl IntoIterator<Item = i32>) -> Vec<IntTree> {
    vals.into_iter().map(n).collect()
}

/// Counts comparator calls through the cookie.
fn int_tree_cmp(l: &IntTree, r: &IntTree, count: &Cell<usize>) -> i32 {
    count.set(count.get() + 1);
    cmp_ord(&l.val, &r.val)
}

fn tree() -> Avl<impl Fn(&IntTree, &IntTree, &Cell<usize>) -> i32, Cell<usize>> {
    Avl::new(int_tree_cmp, Cell::new(0))
}

fn tree_at(root: Option<u32>) -> Avl<impl Fn(&IntTree, &IntTree, &Cell<usize>) -> i32, Cell<usize>> {
    Avl::from_root(root, int_tree_cmp, Cell::new(0))
}

fn filled(arena: &mut [IntTree]) -> Avl<impl Fn(&IntTree, &IntTree, &Cell<usize>) -> i32, Cell<usize>> {
    let mut t = tree();
    for i in 0..arena.len() as u32 {
        assert_eq!(t.insert(arena, i), (true, Some(i)));
    }
    t.cookie().set(0);
    t
}

fn values(arena: &[IntTree], t: &Avl<impl Fn(&IntTree, &IntTree, &Cell<usize>) -> i32, Cell<usize>>) -> Vec<i32> {
    t.iter(arena).map(|i| arena[i as usize].val).collect()
}

#[test]
fn init_matrix() {
    let t = tree();
    assert!(t.empty());
    assert_eq!(t.root(), None);
    assert_eq!(t.cookie().get(), 0);
}

#[test]
fn clear_matrix() {
    let mut arena: Vec<IntTree> = Vec::new();
    let mut t = tree();
    let mut mask = 0u32;
    t.clear(&mut arena, |_, node: &mut IntTree| mask |= 1 << node.val);
    assert_eq!(mask, 0);

    let mut arena = arena_of([12]);
    let mut t = tree_at(Some(0));
    t.clear(&mut arena, |_, node: &mut IntTree| mask |= 1 << node.val);
    assert_eq!(mask, 1 << 12);
    assert!(t.empty());

    let mut arena = arena_of(0..5);
    let mut t = filled(&mut arena);
    let mut mask = 0u32;
    let mut order = Vec::new();
    t.clear(&mut arena, |i, node: &mut IntTree| {
        assert!(node.avl.is_detached());
        mask |= 1 << node.val;
        order.push(i);
    });
    assert_eq!(mask, (1 << 5) - 1);
    assert_eq!(order, vec![0, 2, 4, 3, 1]);
    assert!(t.empty());
    assert_eq!(t.cookie().get(), 0);
}

#[test]
fn insert_one_matrix() {
    let mut arena = arena_of([42]);
    let mut t = tree();
    assert_eq!(t.insert(&mut arena, 0), (true, Some(0)));
    assert_eq!(t.cookie().get(), 0);
    assert_eq!(t.root(), Some(0));
}

#[test]
fn insert_preexisting_matrix() {
    let mut arena = arena_of([42, 42]);
    let mut t = tree();
    t.insert(&mut arena, 0);

    assert_eq!(t.insert(&mut arena, 1), (false, Some(0)));
    assert_eq!(t.cookie().get(), 1);
    assert_eq!(t.root(), Some(0));
    assert!(arena[1].avl.is_detached());
}

#[test]
fn insert_keeps_balance_matrix() {
    let mut arena = arena_of(0..5);
    let mut t = tree();
    for i in 0..5 {
        assert_eq!(t.insert(&mut arena, i), (true, Some(i)));
        t.validate(&arena).unwrap();
    }
}

#[test]
fn insert_twice_matrix() {
    let mut arena = arena_of(0..5);
    let mut t = filled(&mut arena);
    for i in 0..5 {
        assert_eq!(t.insert(&mut arena, i), (false, Some(i)));
        t.validate(&arena).unwrap();
    }
    assert_eq!(t.size(&arena), 5);
}

#[test]
fn insert_or_update_matrix() {
    let mut arena = arena_of([42, 42]);
    let mut t = tree();
    assert_eq!(t.insert_or_update(&mut arena, 0), None);
    assert_eq!(t.cookie().get(), 0);

    assert_eq!(t.insert_or_update(&mut arena, 1), Some(0));
    assert_eq!(t.cookie().get(), 1);
    assert_eq!(t.root(), Some(1));
    assert!(arena[0].avl.is_detached());

    // Re-submitting the occupant itself displaces nothing.
    assert_eq!(t.insert_or_update(&mut arena, 1), None);
    assert_eq!(t.root(), Some(1));
}

#[test]
fn insert_or_update_inner_node_matrix() {
    let mut arena = arena_of([4, 2, 6, 1, 3, 5, 7, 2]);
    let mut t = tree();
    for i in 0..7 {
        t.insert(&mut arena, i);
    }
    let shape = arena[1].avl;

    assert_eq!(t.insert_or_update(&mut arena, 7), Some(1));
    assert_eq!(arena[7].avl, shape);
    assert!(arena[1].avl.is_detached());
    assert_eq!(t.size(&arena), 7);
    assert_eq!(t.find(&arena, &n(2)), Some(7));
    t.validate(&arena).unwrap();
}

#[test]
fn insert_multi_matrix() {
    let mut arena = arena_of([42, 42]);
    let mut t = tree();
    t.insert_multi(&mut arena, 0);
    assert_eq!(t.cookie().get(), 0);

    t.insert_multi(&mut arena, 1);
    assert_eq!(t.cookie().get(), 1);
    assert_eq!(t.root(), Some(0));
    assert_eq!(arena[0].avl.l, None);
    assert_eq!(arena[0].avl.r, Some(1));
}

#[test]
fn insert_multi_keeps_arrival_order_matrix() {
    let mut arena = arena_of([7; 9]);
    let mut t = tree();
    for i in 0..9 {
        t.insert_multi(&mut arena, i);
        t.validate(&arena).unwrap();
    }
    let order: Vec<u32> = t.iter(&arena).collect();
    assert_eq!(order, (0..9).collect::<Vec<_>>());
}

#[test]
fn comparator_sees_candidate_first_matrix() {
    let mut arena = arena_of([5, 3]);
    let calls = RefCell::new(Vec::new());
    let mut t = Avl::new(
        |l: &IntTree, r: &IntTree, calls: &RefCell<Vec<(i32, i32)>>| {
            calls.borrow_mut().push((l.val, r.val));
            cmp_ord(&l.val, &r.val)
        },
        calls,
    );
    t.insert(&mut arena, 0);
    t.insert(&mut arena, 1);
    assert_eq!(*t.cookie().borrow(), vec![(3, 5)]);
}

#[test]
fn remove_matrix() {
    let mut arena = arena_of([42]);
    let mut t = tree_at(Some(0));
    assert_eq!(t.remove(&mut arena, 0), Some(0));
    assert_eq!(t.cookie().get(), 0);
    assert!(t.empty());
}

#[test]
fn remove_cmp_matrix() {
    let mut arena = arena_of([42, 42]);
    let mut t = tree_at(Some(0));
    assert_eq!(t.remove(&mut arena, 1), Some(0));
    assert_eq!(t.cookie().get(), 1);
    assert!(t.empty());
}

#[test]
fn remove_twice_matrix() {
    let mut arena = arena_of([42]);
    let mut t = tree_at(Some(0));
    assert_eq!(t.remove(&mut arena, 0), Some(0));
    assert!(t.empty());
    assert_eq!(t.remove(&mut arena, 0), None);
}

#[test]
fn remove_exact_matrix() {
    let mut arena = arena_of([42, 42]);
    let mut t = tree_at(Some(0));

    assert!(!t.remove_exact(&mut arena, 1));
    assert_eq!(t.cookie().get(), 1);
    assert_eq!(t.root(), Some(0));

    assert!(t.remove_exact(&mut arena, 0));
    assert_eq!(t.cookie().get(), 1);
    assert!(t.empty());
}

#[test]
fn remove_exact_multi_matrix() {
    let mut arena = arena_of([42, 42]);
    arena[1].avl.r = Some(0);
    arena[1].avl.bf = -1;
    let mut t = tree_at(Some(1));

    assert!(t.remove_exact(&mut arena, 0));
    assert_eq!(t.cookie().get(), 1);
    assert_eq!(t.root(), Some(1));
    t.validate(&arena).unwrap();

    assert!(t.remove_exact(&mut arena, 1));
    assert_eq!(t.cookie().get(), 1);
    assert!(t.empty());
}

#[test]
fn remove_exact_multi_root_first_matrix() {
    let mut arena = arena_of([42, 42]);
    arena[1].avl.r = Some(0);
    arena[1].avl.bf = -1;
    let mut t = tree_at(Some(1));

    assert!(t.remove_exact(&mut arena, 1));
    assert_eq!(t.cookie().get(), 0);
    assert_eq!(t.root(), Some(0));

    assert!(t.remove_exact(&mut arena, 0));
    assert_eq!(t.cookie().get(), 0);
    assert!(t.empty());
}

#[test]
fn remove_exact_finds_duplicates_left_of_equal_node_matrix() {
    // Three equal keys rotate into a root with an equal left child.
    let mut arena = arena_of([42, 42, 42]);
    let mut t = tree();
    for i in 0..3 {
        t.insert_multi(&mut arena, i);
    }
    assert_eq!(t.root(), Some(1));
    assert_eq!(arena[1].avl.l, Some(0));

    assert!(t.remove_exact(&mut arena, 0));
    assert_eq!(t.size(&arena), 2);
    t.validate(&arena).unwrap();
    assert!(t.remove_exact(&mut arena, 2));
    assert!(t.remove_exact(&mut arena, 1));
    assert!(t.empty());
}

#[test]
fn remove_matching_probe_outside_arena_matrix() {
    let mut arena = arena_of(0..6);
    let mut t = filled(&mut arena);
    assert_eq!(t.remove_matching(&mut arena, &n(3)), Some(3));
    assert_eq!(t.remove_matching(&mut arena, &n(3)), None);
    assert_eq!(values(&arena, &t), vec![0, 1, 2, 4, 5]);
    t.validate(&arena).unwrap();
}

#[test]
fn remove_ladder_matrix() {
    let mut arena = arena_of(0..300);
    let mut t = filled(&mut arena);
    for i in (0..300).step_by(3) {
        assert_eq!(t.remove(&mut arena, i), Some(i));
        t.validate(&arena).unwrap();
    }
    for i in 0..300 {
        let found = t.find(&arena, &n(i as i32));
        if i % 3 == 0 {
            assert_eq!(found, None);
            assert!(arena[i as usize].avl.is_detached());
        } else {
            assert_eq!(found, Some(i));
        }
    }
    assert_eq!(t.size(&arena), 200);
}

#[test]
fn find_matrix() {
    let arena = arena_of([42]);
    let t = tree();
    assert_eq!(t.find(&arena, &arena[0]), None);

    let t = tree_at(Some(0));
    assert_eq!(t.find(&arena, &arena[0]), Some(0));

    let mut arena = arena_of(0..5);
    let t = filled(&mut arena);
    for i in 0..5u32 {
        assert_eq!(t.find(&arena, &arena[i as usize]), Some(i));
        assert_eq!(t.find(&arena, &n(i as i32)), Some(i));
    }
    assert_eq!(t.find(&arena, &n(5)), None);
}

#[test]
fn lower_bound_matrix() {
    let arena = arena_of([42]);
    assert_eq!(tree().lower_bound(&arena, &n(42)), None);

    let t = tree_at(Some(0));
    assert_eq!(t.lower_bound(&arena, &n(41)), Some(0));
    assert_eq!(t.lower_bound(&arena, &n(42)), Some(0));
    assert_eq!(t.lower_bound(&arena, &n(43)), None);

    let mut arena = arena_of(0..5);
    let t = filled(&mut arena);
    assert_eq!(t.lower_bound(&arena, &n(-1)), Some(0));
    for i in 0..5 {
        assert_eq!(t.lower_bound(&arena, &n(i)), Some(i as u32));
    }
    assert_eq!(t.lower_bound(&arena, &n(5)), None);
}

#[test]
fn upper_bound_matrix() {
    let arena = arena_of([42]);
    assert_eq!(tree().upper_bound(&arena, &n(42)), None);

    let t = tree_at(Some(0));
    assert_eq!(t.upper_bound(&arena, &n(41)), Some(0));
    assert_eq!(t.upper_bound(&arena, &n(42)), None);
    assert_eq!(t.upper_bound(&arena, &n(43)), None);

    let mut arena = arena_of(0..5);
    let t = filled(&mut arena);
    assert_eq!(t.upper_bound(&arena, &n(-1)), Some(0));
    for i in 0..4 {
        assert_eq!(t.upper_bound(&arena, &n(i)), Some(i as u32 + 1));
    }
    assert_eq!(t.upper_bound(&arena, &n(4)), None);
}

#[test]
fn bounds_with_duplicates_matrix() {
    let mut arena = arena_of([1, 2, 2, 2, 3]);
    let mut t = tree();
    for i in 0..5 {
        t.insert_multi(&mut arena, i);
    }
    assert_eq!(t.lower_bound(&arena, &n(2)), Some(1));
    assert_eq!(t.upper_bound(&arena, &n(2)), Some(4));
}

#[test]
fn empty_size_height_matrix() {
    let arena: Vec<IntTree> = Vec::new();
    let t = tree();
    assert!(t.empty());
    assert_eq!(t.size(&arena), 0);
    assert_eq!(t.height(&arena), 0);

    let mut arena = arena_of([42, 42]);
    let t = tree_at(Some(0));
    assert!(!t.empty());
    assert_eq!(t.size(&arena), 1);
    assert_eq!(t.height(&arena), 1);

    arena[0].avl.l = Some(1);
    assert_eq!(t.height(&arena), 2);
    arena[0].avl.l = None;
    arena[0].avl.r = Some(1);
    assert_eq!(t.height(&arena), 2);
    assert_eq!(t.size(&arena), 2);

    let mut arena = arena_of(0..5);
    let t = filled(&mut arena);
    assert_eq!(t.size(&arena), 5);
    assert_eq!(t.height(&arena), 3);
}

#[test]
fn out_of_arena_indices_are_ignored_matrix() {
    let mut arena = arena_of(0..3);
    let mut t = filled(&mut arena);
    assert_eq!(t.insert(&mut arena, 99), (false, None));
    assert_eq!(t.insert_or_update(&mut arena, 99), None);
    t.insert_multi(&mut arena, 99);
    assert_eq!(t.remove(&mut arena, 99), None);
    assert!(!t.remove_exact(&mut arena, 99));
    assert_eq!(t.size(&arena), 3);
    assert_eq!(t.cookie().get(), 0);
}

#[test]
fn scenario_mixed_insertions_matrix() {
    let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6, 0];
    let mut arena = arena_of(keys);
    let mut t = tree();
    for i in 0..keys.len() {
        assert_eq!(t.insert(&mut arena, i as u32), (true, Some(i as u32)));
        t.validate(&arena).unwrap();
        for (j, key) in keys.iter().enumerate().take(i + 1) {
            assert_eq!(t.find(&arena, &n(*key)), Some(j as u32));
        }
    }
    assert_eq!(values(&arena, &t), (0..10).collect::<Vec<_>>());
}

#[test]
fn scenario_single_left_rotation_matrix() {
    let mut arena = arena_of([10, 20, 30]);
    let mut t = tree();
    for i in 0..3 {
        t.insert(&mut arena, i);
    }
    assert_eq!(t.root(), Some(1));
    assert_eq!(arena[1].val, 20);
    assert_eq!(arena[1].avl.bf, 0);
    assert_eq!(arena[1].avl.l, Some(0));
    assert_eq!(arena[1].avl.r, Some(2));
}

#[test]
fn scenario_remove_root_of_perfect_tree_matrix() {
    let keys = [4, 2, 6, 1, 3, 5, 7];
    let mut arena = arena_of(keys);
    let mut t = filled(&mut arena);
    assert_eq!(t.root(), Some(0));
    assert_eq!(t.height(&arena), 3);

    assert_eq!(t.remove(&mut arena, 0), Some(0));
    assert!(arena[0].avl.is_detached());
    t.validate(&arena).unwrap();
    assert_eq!(t.size(&arena), 6);
    // The in-order predecessor takes the root's place.
    assert_eq!(t.root(), Some(4));
    for (i, key) in keys.iter().enumerate().skip(1) {
        assert_eq!(t.find(&arena, &n(*key)), Some(i as u32));
    }
}

#[test]
fn first_last_matrix() {
    let mut arena = arena_of([5, 3, 8, 1, 4]);
    let t = filled(&mut arena);
    assert_eq!(t.first(&arena), Some(3));
    assert_eq!(t.last(&arena), Some(2));
    assert_eq!(tree().first(&arena), None);
    assert_eq!(tree().last(&arena), None);
}
