//! Tests for converting flat records into forests.

use flatforest::{DftEvent, Forest, ForestBuilder, NodeId, Options, RecordId};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Returns the record ids of the nodes.
fn record_ids(forest: &Forest, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| {
            forest
                .node(id)
                .expect("should never fail: the node belongs to the forest")
                .record_id()
                .to_string()
        })
        .collect()
}

/// Returns the sample records.
///
/// Forest to be built:
///
/// ```text
/// 1
/// |-- 2
/// |   `-- 3
/// `-- 3
/// ```
fn sample_records() -> Value {
    json!([
        { "id": "1", "parent": 0 },
        { "id": "2", "parent": "1" },
        { "id": "3", "parent": ["2", "1"] },
    ])
}

#[test]
fn multi_parent_example() {
    let forest = ForestBuilder::new(&sample_records())
        .expect("should succeed")
        .convert();

    assert_eq!(record_ids(&forest, forest.root_ids()), ["1"]);

    let node1 = forest.find(&"1".into()).expect("node 1 exists");
    let node2 = forest.find(&"2".into()).expect("node 2 exists");
    let node3 = forest.find(&"3".into()).expect("node 3 exists");

    assert_eq!(record_ids(&forest, node1.child_ids()), ["2", "3"]);
    assert_eq!(node1.parent_ids(), Some(&[][..]));
    assert_eq!(record_ids(&forest, node2.child_ids()), ["3"]);
    assert_eq!(node2.parent_ids(), Some(&[node1.id()][..]));
    assert!(node3.child_ids().is_empty());
    // Parents follow the input order of the records, not the order in `parent`.
    assert_eq!(
        record_ids(&forest, node3.parent_ids().expect("tracked")),
        ["1", "2"]
    );

    // The node under "1" is the very same node as the one under "2".
    assert_eq!(node1.child_ids()[1], node2.child_ids()[0]);
    assert_eq!(node1.child_ids()[1], node3.id());
}

#[test]
fn multi_parent_example_as_json() {
    let forest = ForestBuilder::new(&sample_records())
        .expect("should succeed")
        .convert();

    let node3 = json!({ "id": "3", "parent": ["2", "1"], "parents": ["1", "2"] });
    // `parent` comes back as written, even where it means "no parent".
    let expected = json!([{
        "id": "1",
        "parent": 0,
        "children": [
            {
                "id": "2",
                "parent": "1",
                "parents": ["1"],
                "children": [node3.clone()],
            },
            node3,
        ],
    }]);

    assert_eq!(forest.to_value(), expected);
}

#[test]
fn orphan_is_promoted_to_root() {
    let records = json!([
        { "id": "9", "parent": "missing" },
        { "id": "1", "parent": null },
    ]);
    let forest = ForestBuilder::new(&records)
        .expect("should succeed")
        .convert();

    assert_eq!(record_ids(&forest, forest.root_ids()), ["1", "9"]);
    let orphan = forest.find(&"9".into()).expect("node 9 exists");
    assert!(orphan.is_root());
    assert_eq!(orphan.parent_ids(), Some(&[][..]));
}

#[test]
fn text_and_whole_ids_do_not_match() {
    let records = json!([
        { "id": 1, "parent": null },
        { "id": "child", "parent": "1" },
    ]);
    let forest = ForestBuilder::new(&records)
        .expect("should succeed")
        .convert();

    assert_eq!(record_ids(&forest, forest.root_ids()), ["1", "child"]);
}

#[test]
fn parent_references_disabled() {
    let options = Options::new().parent_references(false);
    let forest = ForestBuilder::with_options(&sample_records(), options)
        .expect("should succeed")
        .convert();

    assert!(!forest.tracks_parents());
    for node in forest.nodes() {
        assert!(node.parent_ids().is_none());
        assert!(node.parents().is_none());
    }
    let node1 = forest.find(&"1".into()).expect("node 1 exists");
    assert_eq!(record_ids(&forest, node1.child_ids()), ["2", "3"]);
    assert_eq!(
        forest.to_value()[0]["children"][0],
        json!({ "id": "2", "parent": "1", "children": [{ "id": "3", "parent": ["2", "1"] }] })
    );
}

#[test]
fn convert_twice_yields_equal_forests() {
    let mut builder = ForestBuilder::new(&sample_records()).expect("should succeed");
    let first = builder.convert();
    let second = builder.convert();

    assert_eq!(first, second);
    let node1 = second.find(&"1".into()).expect("node 1 exists");
    assert_eq!(node1.child_ids().len(), 2);
}

#[test]
fn original_records_are_not_modified() {
    let records = sample_records();
    let snapshot = records.clone();

    let mut builder = ForestBuilder::new(&records).expect("should succeed");
    builder.convert();
    builder.convert();

    assert_eq!(records, snapshot);
}

#[test]
fn extra_fields_pass_through() {
    let records = json!([
        { "id": "a", "parent": null, "title": "Alpha", "meta": { "rank": 1 } },
        { "id": "b", "parent": "a", "title": "Beta" },
    ]);
    let forest = ForestBuilder::new(&records)
        .expect("should succeed")
        .convert();

    let a = forest.find(&"a".into()).expect("a exists");
    assert_eq!(a.field("title"), Some(&json!("Alpha")));
    assert_eq!(a.field("meta"), Some(&json!({ "rank": 1 })));
    let b = a.children().next().expect("a has a child");
    assert_eq!(b.field("title"), Some(&json!("Beta")));
}

#[test]
fn duplicate_parent_ids_link_once() {
    let records = json!([
        { "id": "p", "parent": null },
        { "id": "c", "parent": ["p", "p"] },
    ]);
    let forest = ForestBuilder::new(&records)
        .expect("should succeed")
        .convert();

    let p = forest.find(&"p".into()).expect("p exists");
    let c = forest.find(&"c".into()).expect("c exists");
    assert_eq!(p.child_ids(), [c.id()]);
    assert_eq!(c.parent_ids(), Some(&[p.id()][..]));
}

#[test]
fn depth_first_visits_shared_nodes_under_each_parent() {
    let forest = ForestBuilder::new(&sample_records())
        .expect("should succeed")
        .convert();
    let root = forest.root_ids()[0];

    let actual = forest
        .depth_first_traverse(root)
        .map(|ev| ev.map(|node| node.record_id().to_string()))
        .collect::<Vec<_>>();
    let expected = [
        DftEvent::Open("1"),
        DftEvent::Open("2"),
        DftEvent::Open("3"),
        DftEvent::Close("3"),
        DftEvent::Close("2"),
        DftEvent::Open("3"),
        DftEvent::Close("3"),
        DftEvent::Close("1"),
    ]
    .map(|ev| ev.map(str::to_owned));
    assert_eq!(actual, expected);
}

#[test]
fn whole_number_ids() {
    let records = json!([
        { "id": 1, "parent": null },
        { "id": 2, "parent": 1 },
        { "id": 3, "parent": [1, 2] },
        { "id": 4, "parent": 2.0 },
    ]);
    let forest = ForestBuilder::new(&records)
        .expect("should succeed")
        .convert();

    let node2 = forest.find(&RecordId::Whole(2)).expect("node 2 exists");
    assert_eq!(record_ids(&forest, node2.child_ids()), ["3", "4"]);
    assert_eq!(forest.root_ids().len(), 1);

    let node4 = forest.find(&RecordId::Whole(4)).expect("node 4 exists");
    assert_eq!(node4.to_value(), json!({ "id": 4, "parent": 2.0, "parents": [2] }));
}

#[test]
fn blank_parents_render_as_written() {
    let records = json!([
        { "id": "1", "parent": 0 },
        { "id": "2", "parent": "", "k": 1 },
        { "id": 2, "parent": null },
    ]);
    let forest = ForestBuilder::new(&records)
        .expect("should succeed")
        .convert();

    assert_eq!(forest.to_value(), records);
}

#[test]
fn empty_input_yields_empty_forest() {
    let forest = ForestBuilder::new(&json!([]))
        .expect("should succeed")
        .convert();
    assert!(forest.is_empty());
    assert_eq!(forest.to_value(), json!([]));
}
