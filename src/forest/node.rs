//! Node.

use serde_json::Value;

use crate::forest::{DebugPrint, DepthFirstTraverse, Forest, Slot};
use crate::id::NodeId;
use crate::record::{Record, RecordId};

/// Immutable reference to a node.
///
/// This type guarantees that the node ID belongs to the forest.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    /// Forest.
    forest: &'a Forest,
    /// Node ID.
    id: NodeId,
}

impl<'a> Node<'a> {
    /// Creates a new `Node` object.
    #[must_use]
    pub(super) fn new(forest: &'a Forest, id: NodeId) -> Option<Self> {
        if id.get() >= forest.slots.len() {
            return None;
        }
        Some(Self { forest, id })
    }

    /// Returns the slot of the node.
    #[inline]
    #[must_use]
    fn slot(&self) -> &'a Slot {
        self.forest.slot(self.id)
    }

    /// Returns the forest.
    #[inline]
    #[must_use]
    pub(super) fn forest(&self) -> &'a Forest {
        self.forest
    }

    /// Returns the node ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the record of the node.
    #[inline]
    #[must_use]
    pub fn record(&self) -> &'a Record {
        &self.slot().record
    }

    /// Returns the record id.
    #[inline]
    #[must_use]
    pub fn record_id(&self) -> &'a RecordId {
        self.record().id()
    }

    /// Returns a caller-defined field of the record.
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.record().field(name)
    }

    /// Returns true if the node is one of the roots of the forest.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.slot().is_root
    }

    /// Returns the node IDs of the children.
    #[inline]
    #[must_use]
    pub fn child_ids(&self) -> &'a [NodeId] {
        &self.slot().children.nodes
    }

    /// Returns the children.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Node<'a>> + DoubleEndedIterator + 'a {
        let forest = self.forest;
        self.child_ids().iter().map(move |&id| {
            Node::new(forest, id).expect("[consistency] the child must be the part of the forest")
        })
    }

    /// Returns the node IDs of the parents.
    ///
    /// Returns `None` if the forest does not track parent references.
    #[inline]
    #[must_use]
    pub fn parent_ids(&self) -> Option<&'a [NodeId]> {
        self.slot().parents.as_ref().map(|links| &links.nodes[..])
    }

    /// Returns the parents.
    ///
    /// Returns `None` if the forest does not track parent references.
    #[must_use]
    pub fn parents(
        &self,
    ) -> Option<impl ExactSizeIterator<Item = Node<'a>> + DoubleEndedIterator + 'a> {
        let forest = self.forest;
        self.parent_ids().map(move |ids| {
            ids.iter().map(move |&id| {
                Node::new(forest, id)
                    .expect("[consistency] the parent must be the part of the forest")
            })
        })
    }

    /// Returns the depth-first traversal events of the (sub)tree under the node.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> DepthFirstTraverse<'a> {
        DepthFirstTraverse::with_toplevel(self)
    }

    /// Returns a printable tree of the (sub)tree under the node.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatforest::ForestBuilder;
    /// use serde_json::json;
    ///
    /// let records = json!([
    ///     { "id": "root", "parent": null },
    ///     { "id": "0", "parent": "root" },
    ///     { "id": "0-0", "parent": "0" },
    ///     { "id": "1", "parent": "root" },
    /// ]);
    /// let forest = ForestBuilder::new(&records)?.convert();
    /// let root = forest.roots().next().expect("one root");
    ///
    /// let expected = "root\n|-- 0\n|   `-- 0-0\n`-- 1";
    /// assert_eq!(root.debug_print().to_string(), expected);
    /// # Ok::<(), flatforest::ValidationError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'a> {
        DebugPrint::new(*self)
    }

    /// Renders the (sub)tree under the node as a JSON object.
    ///
    /// See [`Forest::to_value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = self.record().to_map();
        let children = self.child_ids();
        if !children.is_empty() {
            let children = self.children().map(|child| child.to_value()).collect();
            map.insert("children".to_owned(), Value::Array(children));
        }
        match self.parent_ids() {
            Some(parents) if !parents.is_empty() => {
                let parents = parents
                    .iter()
                    .map(|&id| self.forest.slot(id).record.id().to_value())
                    .collect();
                map.insert("parents".to_owned(), Value::Array(parents));
            }
            _ => {}
        }
        Value::Object(map)
    }
}
