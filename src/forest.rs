//! Forest.

mod builder;
mod debug_print;
mod node;
pub mod traverse;

use std::collections::HashSet;

use serde_json::Value;
use tracing::trace;

use crate::id::NodeId;
use crate::record::{Record, RecordId};

pub use self::builder::ForestBuilder;
pub use self::debug_print::DebugPrint;
pub use self::node::Node;
pub use self::traverse::{DepthFirstTraverse, DftEvent};

/// Links from a node to other nodes, deduplicated by record id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Links {
    /// Linked nodes in attachment order.
    nodes: Vec<NodeId>,
    /// Record ids of the linked nodes.
    seen: HashSet<RecordId>,
}

impl Links {
    /// Attaches a node unless a node with the same record id is already linked.
    ///
    /// Returns true if the node is newly attached.
    fn attach(&mut self, node: NodeId, record_id: &RecordId) -> bool {
        if self.seen.contains(record_id) {
            return false;
        }
        self.seen.insert(record_id.clone());
        self.nodes.push(node);
        true
    }
}

/// Arena slot of a node.
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    /// Record.
    record: Record,
    /// Whether the node is listed in the roots.
    is_root: bool,
    /// Children.
    children: Links,
    /// Parents.
    ///
    /// `None` if parent references are disabled.
    parents: Option<Links>,
}

/// Forest of records linked to their parents.
///
/// Each record occupies exactly one arena slot. A record with several parents
/// is a single node listed in the children of every one of them.
///
/// Forests are produced by [`ForestBuilder::convert`] and are immutable.
///
/// Parent links are not checked for cycles. Traversals and conversions to
/// JSON of a forest built from cyclic records do not terminate.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    /// Node storage, in the input order of the records.
    slots: Vec<Slot>,
    /// Roots, in the order they were found.
    roots: Vec<NodeId>,
    /// Whether children keep references to their parents.
    parent_references: bool,
}

impl Forest {
    /// Creates a forest of unlinked nodes, one per record.
    #[must_use]
    pub(crate) fn with_records(records: Vec<Record>, parent_references: bool) -> Self {
        let slots = records
            .into_iter()
            .map(|record| Slot {
                record,
                is_root: false,
                children: Links::default(),
                parents: parent_references.then(Links::default),
            })
            .collect();
        Self {
            slots,
            roots: Vec::new(),
            parent_references,
        }
    }

    /// Returns the slot of the node.
    ///
    /// # Panics
    ///
    /// Panics if the node does not belong to the forest.
    #[must_use]
    fn slot(&self, id: NodeId) -> &Slot {
        self.slots
            .get(id.get())
            .expect("[consistency] the node must be the part of the forest")
    }

    /// Returns the mutable slot of the node.
    ///
    /// # Panics
    ///
    /// Panics if the node does not belong to the forest.
    #[must_use]
    fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        self.slots
            .get_mut(id.get())
            .expect("[consistency] the node must be the part of the forest")
    }

    /// Appends the node to the roots.
    pub(crate) fn push_root(&mut self, id: NodeId) {
        let slot = self.slot_mut(id);
        if slot.is_root {
            return;
        }
        slot.is_root = true;
        self.roots.push(id);
    }

    /// Links a child to a parent.
    ///
    /// Does nothing for links that already exist by record id.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        let parent_record_id = self.slot(parent).record.id().clone();
        let child_record_id = self.slot(child).record.id().clone();

        let child_attached = self
            .slot_mut(parent)
            .children
            .attach(child, &child_record_id);
        let parent_attached = self
            .slot_mut(child)
            .parents
            .as_mut()
            .map(|parents| parents.attach(parent, &parent_record_id));

        trace!(
            parent = %parent_record_id,
            child = %child_record_id,
            child_attached,
            ?parent_attached,
            "linked"
        );
    }

    /// Returns true if children keep references to their parents.
    #[inline]
    #[must_use]
    pub fn tracks_parents(&self) -> bool {
        self.parent_references
    }

    /// Returns the number of nodes, including non-root nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the forest has no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the IDs of the root nodes.
    ///
    /// Declared roots come first in input order, followed by records none of
    /// whose parents exist.
    #[inline]
    #[must_use]
    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the root nodes.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = Node<'_>> + DoubleEndedIterator + '_ {
        self.roots.iter().map(move |&id| {
            Node::new(self, id).expect("[consistency] roots must be the part of the forest")
        })
    }

    /// Returns all nodes in the input order of their records.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = Node<'_>> + DoubleEndedIterator + '_ {
        (0..self.slots.len()).map(move |index| {
            Node::new(self, NodeId::from_index(index))
                .expect("[consistency] indices below the length are valid")
        })
    }

    /// Returns a [proxy object][`Node`] to the node.
    ///
    /// Returns `None` if the ID does not belong to this forest.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        Node::new(self, id)
    }

    /// Returns the first node whose record has the given id.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatforest::{ForestBuilder, RecordId};
    /// use serde_json::json;
    ///
    /// let records = json!([{ "id": 1, "parent": null }, { "id": 2, "parent": 1 }]);
    /// let forest = ForestBuilder::new(&records)?.convert();
    ///
    /// let node = forest.find(&RecordId::Whole(2)).expect("node 2 exists");
    /// assert!(!node.is_root());
    /// assert!(forest.find(&RecordId::from("2")).is_none());
    /// # Ok::<(), flatforest::ValidationError>(())
    /// ```
    #[must_use]
    pub fn find(&self, record_id: &RecordId) -> Option<Node<'_>> {
        self.nodes().find(|node| node.record_id() == record_id)
    }

    /// Returns the depth-first traversal events of the (sub)tree under the node.
    ///
    /// # Panics
    ///
    /// Panics if the node does not belong to the forest.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self, id: NodeId) -> DepthFirstTraverse<'_> {
        self.node(id)
            .expect("[precondition] the node must be the part of the forest")
            .depth_first_traverse()
    }

    /// Returns a printable tree of the (sub)tree under the node.
    ///
    /// # Panics
    ///
    /// Panics if the node does not belong to the forest.
    #[inline]
    #[must_use]
    pub fn debug_print(&self, id: NodeId) -> DebugPrint<'_> {
        self.node(id)
            .expect("[precondition] the node must be the part of the forest")
            .debug_print()
    }

    /// Renders the forest as a JSON array of root objects.
    ///
    /// Each object holds the record fields with nested `children` objects
    /// and, when parent references are tracked, a `parents` array of parent
    /// ids. A node with several parents appears under each of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatforest::ForestBuilder;
    /// use serde_json::json;
    ///
    /// let records = json!([
    ///     { "id": "a", "parent": null },
    ///     { "id": "b", "parent": "a", "name": "B" },
    /// ]);
    /// let forest = ForestBuilder::new(&records)?.convert();
    ///
    /// assert_eq!(
    ///     forest.to_value(),
    ///     json!([{
    ///         "id": "a",
    ///         "parent": null,
    ///         "children": [{ "id": "b", "parent": "a", "name": "B", "parents": ["a"] }],
    ///     }])
    /// );
    /// # Ok::<(), flatforest::ValidationError>(())
    /// ```
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(self.roots().map(|root| root.to_value()).collect())
    }
}
