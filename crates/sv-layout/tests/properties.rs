//! Property tests for the partition tree

use std::collections::HashSet;

use proptest::prelude::*;
use sv_core::LayoutSettings;
use sv_layout::{LayoutEngine, LayoutError, NodeId, Orientation, PartitionNode, Rect};

#[derive(Debug, Clone)]
enum Op {
    Split { pick: usize, orientation: Orientation },
    Remove { pick: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), any::<bool>()).prop_map(|(pick, vertical)| Op::Split {
            pick,
            orientation: if vertical {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            },
        }),
        2 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
    ]
}

fn leaf_ids(engine: &LayoutEngine<u32>) -> Vec<NodeId> {
    engine.leaves().map(|leaf| leaf.id).collect()
}

/// Walks the tree from the root checking structure and parent links
fn check_structure(engine: &LayoutEngine<u32>) -> Result<usize, TestCaseError> {
    let mut stack = vec![(engine.root(), None)];
    let mut splits = 0;
    while let Some((id, parent)) = stack.pop() {
        prop_assert_eq!(engine.parent_of(id), parent);
        match engine.node(id) {
            Some(PartitionNode::Split {
                primary, secondary, ..
            }) => {
                prop_assert_ne!(primary, secondary);
                prop_assert!(engine.node(*primary).is_some());
                prop_assert!(engine.node(*secondary).is_some());
                splits += 1;
                stack.push((*primary, Some(id)));
                stack.push((*secondary, Some(id)));
            }
            Some(PartitionNode::Leaf { .. }) => {}
            None => prop_assert!(false, "dangling child {:?}", id),
        }
    }
    Ok(splits)
}

fn area_sum(engine: &LayoutEngine<u32>) -> f32 {
    engine.leaves().map(|leaf| leaf.bounds.area()).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn tree_invariants_hold_after_any_sequence(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut engine = LayoutEngine::new(0u32, LayoutSettings::default());
        let mut next_content = 1u32;
        let mut splits = 0usize;
        let mut removes = 0usize;

        for op in ops {
            let leaves = leaf_ids(&engine);
            if leaves.is_empty() {
                break;
            }
            match op {
                Op::Split { pick, orientation } => {
                    let target = leaves[pick % leaves.len()];
                    engine.split(target, next_content, orientation).unwrap();
                    next_content += 1;
                    splits += 1;
                }
                Op::Remove { pick } => {
                    let target = leaves[pick % leaves.len()];
                    engine.remove(target).unwrap();
                    prop_assert_eq!(engine.remove(target), Err(LayoutError::AlreadyRemoved(target)));
                    removes += 1;
                }
            }

            prop_assert_eq!(engine.leaves().count(), splits + 1 - removes);
            prop_assert_eq!(engine.len(), splits + 1 - removes);

            let split_nodes = check_structure(&engine)?;
            prop_assert_eq!(split_nodes, engine.split_count());
            if !engine.is_empty() {
                prop_assert_eq!(split_nodes + 1, engine.leaves().count());
            }

            let mut seen = HashSet::new();
            for leaf in engine.leaves() {
                prop_assert!(seen.insert(*leaf.content), "content {} placed twice", leaf.content);
                prop_assert_eq!(engine.leaf_of(leaf.content), Some(leaf.id));
                prop_assert_eq!(engine.bounds_of(leaf.id), Some(leaf.bounds));
            }

            if !engine.is_empty() {
                let total = engine.area().area();
                prop_assert!((area_sum(&engine) - total).abs() < total * 1e-4);
            }
        }
    }

    #[test]
    fn split_bisects_the_target(
        width in 10.0f32..4000.0,
        height in 10.0f32..4000.0,
        vertical in any::<bool>(),
    ) {
        let settings = LayoutSettings { width, height, ..LayoutSettings::default() };
        let mut engine = LayoutEngine::new("a", settings);
        let a = engine.root();
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let axis = orientation.axis();
        let before = engine.bounds_of(a).unwrap().extent(axis);

        let b = engine.split(a, "b", orientation).unwrap().leaf;

        let first = engine.bounds_of(a).unwrap().extent(axis);
        let second = engine.bounds_of(b).unwrap().extent(axis);
        prop_assert!((first - before / 2.0).abs() < 1e-3);
        prop_assert!((second - before / 2.0).abs() < 1e-3);
        prop_assert!((first + second - before).abs() < 1e-3);
    }

    #[test]
    fn split_then_remove_restores_single_leaf(vertical in any::<bool>(), remove_new in any::<bool>()) {
        let mut engine = LayoutEngine::new("a", LayoutSettings::default());
        let a = engine.root();
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let b = engine.split(a, "b", orientation).unwrap().leaf;

        let (gone, kept, kept_content) = if remove_new { (b, a, "a") } else { (a, b, "b") };
        engine.remove(gone).unwrap();

        prop_assert_eq!(engine.root(), kept);
        prop_assert_eq!(engine.split_count(), 0);
        let leaves: Vec<_> = engine.leaves().map(|leaf| (*leaf.content, leaf.bounds)).collect();
        prop_assert_eq!(leaves, vec![(kept_content, Rect::sized(1200.0, 800.0))]);
    }
}

#[test]
fn remove_frees_exactly_one_slot() {
    let mut engine = LayoutEngine::new(0u32, LayoutSettings::default());
    let root = engine.root();
    let one = engine.split(root, 1, Orientation::Vertical).unwrap().leaf;
    let placement = engine.split(one, 2, Orientation::Horizontal).unwrap();
    let inner_split = placement.divider.node();
    let outer_split = engine.parent_of(inner_split).unwrap();

    engine.remove(placement.leaf).unwrap();

    assert!(engine.node(inner_split).is_none());
    assert_eq!(engine.parent_of(one), Some(outer_split));
    assert_eq!(
        engine.node(outer_split).and_then(|node| node.children()),
        Some((root, one))
    );
}
