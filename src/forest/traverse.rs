//! Tree traversal.

use core::iter;

use crate::forest::{Forest, Node};
use crate::id::NodeId;

/// Depth-first traversal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DftEvent<T> {
    /// Node open.
    Open(T),
    /// Node close.
    Close(T),
}

impl<T> DftEvent<T> {
    /// Converts the internal value.
    pub fn map<F, U>(self, f: F) -> DftEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Open(v) => DftEvent::Open(f(v)),
            Self::Close(v) => DftEvent::Close(f(v)),
        }
    }

    /// Returns a reference to the internal value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Open(v) | Self::Close(v) => v,
        }
    }
}

/// Depth-first traverser over node IDs.
#[derive(Debug, Clone)]
pub(super) struct DepthFirstTraverser {
    /// Toplevel node, until it is opened.
    toplevel: Option<NodeId>,
    /// Open nodes and the index of the next child to visit.
    stack: Vec<(NodeId, usize)>,
}

impl DepthFirstTraverser {
    /// Creates a new traverser.
    #[inline]
    #[must_use]
    pub(super) fn with_toplevel(id: NodeId) -> Self {
        Self {
            toplevel: Some(id),
            stack: Vec::new(),
        }
    }

    /// Returns the next event and, for open events, whether the node is the
    /// last child of its parent.
    ///
    /// The toplevel node counts as a last child. Close events always carry `false`.
    pub(super) fn next(&mut self, forest: &Forest) -> Option<(DftEvent<NodeId>, bool)> {
        if let Some(toplevel) = self.toplevel.take() {
            self.stack.push((toplevel, 0));
            return Some((DftEvent::Open(toplevel), true));
        }

        let (current, next_child) = self.stack.last_mut()?;
        let current = *current;
        let children = &forest.slot(current).children.nodes;
        match children.get(*next_child) {
            Some(&child) => {
                *next_child += 1;
                let is_last = *next_child == children.len();
                self.stack.push((child, 0));
                Some((DftEvent::Open(child), is_last))
            }
            None => {
                self.stack.pop();
                Some((DftEvent::Close(current), false))
            }
        }
    }

    /// Returns the depth of the most recently opened node that is not closed yet.
    #[inline]
    #[must_use]
    pub(super) fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }
}

/// Iterator for depth-first traversal.
///
/// A node with several parents is visited once under each of them.
///
/// # Examples
///
/// ```
/// use flatforest::{DftEvent, ForestBuilder};
/// use serde_json::json;
///
/// let records = json!([
///     { "id": "a", "parent": null },
///     { "id": "b", "parent": "a" },
/// ]);
/// let forest = ForestBuilder::new(&records)?.convert();
/// let root = forest.root_ids()[0];
///
/// let events = forest
///     .depth_first_traverse(root)
///     .map(|ev| ev.map(|node| node.record_id().to_string()))
///     .collect::<Vec<_>>();
/// assert_eq!(
///     events,
///     [
///         DftEvent::Open("a".to_owned()),
///         DftEvent::Open("b".to_owned()),
///         DftEvent::Close("b".to_owned()),
///         DftEvent::Close("a".to_owned()),
///     ]
/// );
/// # Ok::<(), flatforest::ValidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DepthFirstTraverse<'a> {
    /// Forest.
    forest: &'a Forest,
    /// Traverser.
    traverser: DepthFirstTraverser,
}

impl<'a> DepthFirstTraverse<'a> {
    /// Creates a new iterator.
    #[inline]
    #[must_use]
    pub(super) fn with_toplevel(node: &Node<'a>) -> Self {
        Self {
            forest: node.forest(),
            traverser: DepthFirstTraverser::with_toplevel(node.id()),
        }
    }

    /// Returns the depth of the innermost open node, relative to the toplevel.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.traverser.depth()
    }
}

impl<'a> Iterator for DepthFirstTraverse<'a> {
    type Item = DftEvent<Node<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let (ev, _) = self.traverser.next(self.forest)?;
        Some(ev.map(|id| {
            self.forest
                .node(id)
                .expect("[consistency] the node must be the part of the tree")
        }))
    }
}

impl iter::FusedIterator for DepthFirstTraverse<'_> {}
