//! Debug printer.

use core::fmt;

use crate::forest::traverse::{DepthFirstTraverser, DftEvent};
use crate::forest::Node;

/// Returns the indent of an ancestor level.
#[inline]
fn ancestor_indent(is_last_item: bool) -> &'static str {
    if is_last_item {
        "    "
    } else {
        "|   "
    }
}

/// Returns the indent of the line of the item itself.
#[inline]
fn item_indent(is_last_item: bool) -> &'static str {
    if is_last_item {
        "`-- "
    } else {
        "|-- "
    }
}

/// Tree printer for debugging.
///
/// `Display` prints record ids, `Debug` prints whole records as JSON.
/// A node with several parents is printed under each of them.
///
/// This is provided mainly for debugging purpose. Note that the output format
/// is not guaranteed to be stable.
pub struct DebugPrint<'a> {
    /// Root node of the (sub)tree to print.
    node: Node<'a>,
}

impl<'a> DebugPrint<'a> {
    /// Creates a new `DebugPrint` object for the node.
    #[inline]
    #[must_use]
    pub(crate) fn new(node: Node<'a>) -> Self {
        Self { node }
    }

    /// Writes the tree, formatting each node with `write_node`.
    fn write_tree<F>(&self, f: &mut fmt::Formatter<'_>, mut write_node: F) -> fmt::Result
    where
        F: FnMut(&mut fmt::Formatter<'_>, Node<'a>) -> fmt::Result,
    {
        let forest = self.node.forest();
        let mut traverser = DepthFirstTraverser::with_toplevel(self.node.id());
        // Whether each open level below the toplevel is the last sibling.
        let mut levels: Vec<bool> = Vec::new();
        let mut is_toplevel = true;

        while let Some((ev, is_last_item)) = traverser.next(forest) {
            let id = match ev {
                DftEvent::Open(id) => id,
                DftEvent::Close(_) => {
                    levels.pop();
                    continue;
                }
            };
            let node = forest
                .node(id)
                .expect("[consistency] the node must be the part of the tree");

            if is_toplevel {
                is_toplevel = false;
            } else {
                f.write_str("\n")?;
                for &level in &levels {
                    f.write_str(ancestor_indent(level))?;
                }
                f.write_str(item_indent(is_last_item))?;
                levels.push(is_last_item);
            }
            write_node(f, node)?;
        }

        Ok(())
    }
}

impl fmt::Display for DebugPrint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, |f, node| write!(f, "{}", node.record_id()))
    }
}

impl fmt::Debug for DebugPrint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, |f, node| write!(f, "{}", node.record().to_value()))
    }
}

#[cfg(test)]
mod tests {
    use crate::forest::ForestBuilder;

    use serde_json::json;

    #[test]
    fn nested_levels() {
        let records = json!([
            { "id": "root", "parent": null },
            { "id": "0", "parent": "root" },
            { "id": "0-0", "parent": "0" },
            { "id": "0-1", "parent": "0" },
            { "id": "0-1-0", "parent": "0-1" },
            { "id": "1", "parent": "root" },
            { "id": "1-0", "parent": "1" },
        ]);
        let forest = ForestBuilder::new(&records).expect("valid records").convert();

        let expected = "\
root
|-- 0
|   |-- 0-0
|   `-- 0-1
|       `-- 0-1-0
`-- 1
    `-- 1-0";
        assert_eq!(forest.debug_print(forest.root_ids()[0]).to_string(), expected);
    }

    #[test]
    fn shared_child_printed_under_each_parent() {
        let records = json!([
            { "id": "a", "parent": null },
            { "id": "b", "parent": "a" },
            { "id": "c", "parent": ["a", "b"] },
        ]);
        let forest = ForestBuilder::new(&records).expect("valid records").convert();

        let expected = "\
a
|-- b
|   `-- c
`-- c";
        assert_eq!(forest.debug_print(forest.root_ids()[0]).to_string(), expected);
    }

    #[test]
    fn debug_prints_records() {
        let records = json!([
            { "id": 1, "parent": null },
            { "id": 2, "parent": 1 },
        ]);
        let forest = ForestBuilder::new(&records).expect("valid records").convert();

        let expected = "{\"id\":1,\"parent\":null}\n`-- {\"id\":2,\"parent\":1}";
        assert_eq!(format!("{:?}", forest.debug_print(forest.root_ids()[0])), expected);
    }
}
