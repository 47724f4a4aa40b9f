//! Debug renderings of a tree.

use std::fmt::Debug;

use serde_json::{json, Value};

use crate::types::AvlNodeLike;

/// Indented text dump, one node per line with its balance factor.
pub fn print<N, K, F>(arena: &[N], node: Option<u32>, tab: &str, key_of: &F) -> String
where
    N: AvlNodeLike,
    K: Debug + ?Sized,
    F: Fn(&N) -> &K,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, n.l(), &format!("{tab}  "), key_of);
            let right = print(arena, n.r(), &format!("{tab}  "), key_of);
            format!(
                "Node[{i}] [bf={}] {:?}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                key_of(n)
            )
        }
    }
}

/// JSON shape of the tree: `{"key", "bf", "l", "r"}` per node, `null` for
/// an empty slot.
pub fn snapshot<N, F>(arena: &[N], node: Option<u32>, key_of: &F) -> Value
where
    N: AvlNodeLike,
    F: Fn(&N) -> Value,
{
    match node {
        None => Value::Null,
        Some(i) => {
            let n = &arena[i as usize];
            json!({
                "key": key_of(n),
                "bf": n.bf(),
                "l": snapshot(arena, n.l(), key_of),
                "r": snapshot(arena, n.r(), key_of),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AvlNode;

    fn key(n: &AvlNode<i32>) -> &i32 {
        &n.v
    }

    fn arena() -> Vec<AvlNode<i32>> {
        let mut arena: Vec<_> = [1, 2, 3].into_iter().map(AvlNode::new).collect();
        arena[1].link.l = Some(0);
        arena[1].link.r = Some(2);
        arena
    }

    #[test]
    fn print_renders_empty_slots() {
        let out = print(&arena(), Some(1), "", &key);
        assert_eq!(
            out,
            "Node[1] [bf=0] 2\nL=Node[0] [bf=0] 1\n  L=∅\n  R=∅\nR=Node[2] [bf=0] 3\n  L=∅\n  R=∅"
        );
    }

    #[test]
    fn snapshot_nests_children() {
        let shape = snapshot(&arena(), Some(1), &|n: &AvlNode<i32>| json!(n.v));
        assert_eq!(
            shape,
            json!({
                "key": 2, "bf": 0,
                "l": {"key": 1, "bf": 0, "l": null, "r": null},
                "r": {"key": 3, "bf": 0, "l": null, "r": null},
            })
        );
    }
}
