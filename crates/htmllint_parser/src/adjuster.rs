//! Tree repair.
//!
//! Tree construction may attach nodes to a parent whose tags do not enclose
//! them, for instance text that the HTML algorithm moves out of a table.
//! The adjuster evicts such nodes and hands them to the nearest enclosing
//! ancestor, and splices out null placeholders.

use htmllint_ast::Node;
use tracing::debug;

/// Repairs `root` in place.
///
/// After adjustment every node with both a start and an end tag only has
/// children within `[startTag.start, endTag.end]`, and no null placeholders
/// remain. Nodes no ancestor can take are moved into the root. Running the
/// adjuster twice yields the same tree.
pub fn adjust(root: &mut Node) {
    let mut orphans = Vec::new();
    adjust_node(root, &mut orphans);

    if !orphans.is_empty() {
        debug!("Re-homing {} out-of-range nodes into the root", orphans.len());
        root.children.append(&mut orphans);
        sort_children(root);
    }
}

fn adjust_node(node: &mut Node, orphans: &mut Vec<Node>) {
    for child in &mut node.children {
        adjust_node(child, orphans);
    }

    // Only nodes that can hold children adopt or evict.
    let tag_span = node.tag_span().filter(|_| node.node_type().is_parent());

    if let Some(span) = tag_span
        && !orphans.is_empty()
    {
        let (adopted, remaining): (Vec<Node>, Vec<Node>) = orphans
            .drain(..)
            .partition(|orphan| span.encloses(&orphan.resolved_location().range));
        *orphans = remaining;
        if !adopted.is_empty() {
            node.children.extend(adopted);
            sort_children(node);
        }
    }

    if node.children.iter().any(Node::is_null) {
        let children = std::mem::take(&mut node.children);
        node.children = children
            .into_iter()
            .flat_map(|child| {
                if child.is_null() {
                    child.children
                } else {
                    vec![child]
                }
            })
            .collect();
    }

    if let Some(span) = tag_span {
        let (kept, evicted): (Vec<Node>, Vec<Node>) = std::mem::take(&mut node.children)
            .into_iter()
            .partition(|child| child.range().is_none_or(|range| span.encloses(&range)));
        node.children = kept;
        orphans.extend(evicted);
    }
}

fn sort_children(node: &mut Node) {
    node.children
        .sort_by_cached_key(|child| child.resolved_location().range.start);
}
