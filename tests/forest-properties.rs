//! Property tests for conversion invariants.

use std::collections::HashSet;

use flatforest::{Forest, ForestBuilder, NodeId, Options};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for acyclic record collections.
///
/// Record `i` has id `i + 1` and may only reference ids of earlier records,
/// plus the id `0` (no parent) and ids past the end (unresolvable).
fn acyclic_records() -> impl Strategy<Value = Value> {
    (1_usize..24)
        .prop_flat_map(|len| {
            let parents = (0..len)
                .map(|i| prop::collection::vec(0..=(i as u64 + 2), 0..3))
                .collect::<Vec<_>>();
            (Just(len), parents, prop::collection::vec(any::<bool>(), len))
        })
        .prop_map(|(len, parents, as_list)| {
            let records = (0..len)
                .map(|i| {
                    let id = i as u64 + 1;
                    // Only earlier records may be referenced, keeping links acyclic.
                    let refs = parents[i]
                        .iter()
                        .map(|&p| if p >= id { p + len as u64 } else { p })
                        .collect::<Vec<_>>();
                    let parent = match (as_list[i], refs.first()) {
                        (true, _) => json!(refs),
                        (false, Some(&p)) => json!(p),
                        (false, None) => Value::Null,
                    };
                    json!({ "id": id, "parent": parent })
                })
                .collect::<Vec<_>>();
            Value::Array(records)
        })
}

/// Returns every node reachable from the roots through children.
fn reachable(forest: &Forest) -> HashSet<NodeId> {
    let mut visited = HashSet::new();
    let mut stack = forest.root_ids().to_vec();
    while let Some(id) = stack.pop() {
        if visited.insert(id) {
            let node = forest.node(id).expect("valid node");
            stack.extend_from_slice(node.child_ids());
        }
    }
    visited
}

proptest! {
    #[test]
    fn every_record_is_reachable_exactly_once(records in acyclic_records()) {
        let forest = ForestBuilder::new(&records).expect("valid records").convert();

        let len = records.as_array().map_or(0, Vec::len);
        prop_assert_eq!(forest.len(), len);
        prop_assert_eq!(reachable(&forest).len(), len);

        // A node is either a root or somebody's child, never both.
        let roots = forest.root_ids().iter().copied().collect::<HashSet<_>>();
        prop_assert_eq!(roots.len(), forest.root_ids().len());
        let children = forest
            .nodes()
            .flat_map(|node| node.child_ids().to_vec())
            .collect::<HashSet<_>>();
        prop_assert!(roots.is_disjoint(&children));
        prop_assert_eq!(roots.len() + children.len(), len);
    }

    #[test]
    fn roots_have_no_resolved_parents(records in acyclic_records()) {
        let forest = ForestBuilder::new(&records).expect("valid records").convert();
        for root in forest.roots() {
            prop_assert_eq!(root.parent_ids().map(<[_]>::len), Some(0));
        }
        for node in forest.nodes().filter(|node| !node.is_root()) {
            let parents = node.parent_ids().expect("tracked");
            prop_assert!(!parents.is_empty());
            for &parent in parents {
                let parent = forest.node(parent).expect("valid node");
                prop_assert!(parent.child_ids().contains(&node.id()));
            }
        }
    }

    #[test]
    fn conversion_is_idempotent_and_leaves_input_alone(records in acyclic_records()) {
        let snapshot = records.clone();
        let mut builder = ForestBuilder::new(&records).expect("valid records");
        let first = builder.convert();
        let second = builder.convert();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_value(), second.to_value());
        prop_assert_eq!(&records, &snapshot);
    }

    #[test]
    fn attached_conversion_matches_detached(records in acyclic_records()) {
        let detached = ForestBuilder::new(&records).expect("valid records").convert();

        let mut attached_records = records.clone();
        let attached = ForestBuilder::construct(
            &mut attached_records,
            Options::new().alter_original(true),
        )
        .expect("valid records")
        .convert();

        prop_assert_eq!(&detached, &attached);
        let written = attached_records.as_array().expect("still a sequence");
        for (node, record) in attached.nodes().zip(written) {
            let expected = node
                .children()
                .map(|child| child.record_id().to_value())
                .collect::<Vec<_>>();
            match record.get("children") {
                Some(children) => prop_assert_eq!(children, &Value::Array(expected)),
                None => prop_assert!(expected.is_empty()),
            }
        }
    }
}
