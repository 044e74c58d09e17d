//! Visitor keys: the child-bearing properties of every node type.
//!
//! A generic tree walker uses this table to traverse the heterogeneous node
//! shapes without knowing them in advance.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::NodeType;

/// Mapping from node type name to the ordered list of property names that
/// hold child nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisitorKeys(BTreeMap<&'static str, &'static [&'static str]>);

static VISITOR_KEYS: OnceLock<VisitorKeys> = OnceLock::new();

impl VisitorKeys {
    /// Returns the shared visitor keys table.
    pub fn get() -> &'static VisitorKeys {
        VISITOR_KEYS.get_or_init(|| {
            VisitorKeys(
                NodeType::ALL
                    .iter()
                    .map(|node_type| (node_type.as_str(), keys_for(*node_type)))
                    .collect(),
            )
        })
    }

    /// Returns the child-bearing keys for a type name.
    pub fn keys(&self, type_name: &str) -> Option<&'static [&'static str]> {
        self.0.get(type_name).copied()
    }

    /// Iterates over `(type name, keys)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + '_ {
        self.0.iter().map(|(name, keys)| (*name, *keys))
    }
}

/// Returns the child-bearing keys of a node type.
pub const fn keys_for(node_type: NodeType) -> &'static [&'static str] {
    match node_type {
        NodeType::Program => &["body"],
        NodeType::Element => &["startTag", "attrs", "children", "endTag"],
        NodeType::Text => &["lineNodes"],
        NodeType::Comment => &["startTag", "content", "lineNodes", "endTag"],
        NodeType::Null => &["children"],
        NodeType::DocumentType
        | NodeType::StartTag
        | NodeType::EndTag
        | NodeType::Attribute
        | NodeType::CommentContent
        | NodeType::Line => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_an_entry() {
        let keys = VisitorKeys::get();
        for node_type in NodeType::ALL {
            assert!(keys.keys(node_type.as_str()).is_some(), "{node_type}");
        }
        assert_eq!(keys.iter().count(), NodeType::ALL.len());
    }

    #[test]
    fn test_element_keys_follow_source_order() {
        assert_eq!(
            VisitorKeys::get().keys("Element"),
            Some(&["startTag", "attrs", "children", "endTag"][..])
        );
        assert_eq!(VisitorKeys::get().keys("Unknown"), None);
    }

    #[test]
    fn test_serializes_as_map() {
        let json = serde_json::to_value(VisitorKeys::get()).unwrap();
        assert_eq!(json["Program"], serde_json::json!(["body"]));
        assert_eq!(json["Line"], serde_json::json!([]));
    }
}
