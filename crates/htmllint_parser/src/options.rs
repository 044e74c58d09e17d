//! Parser options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::TemplateSyntax;

/// Options controlling how a document is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Template expression markers, open → close (e.g. `{{` → `}}`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_engine_syntax: Option<BTreeMap<String, String>>,

    /// Template comment markers, open → close (e.g. `{{!--` → `--}}`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_comment_syntax: Option<BTreeMap<String, String>>,

    /// Strip a leading `---` block before parsing.
    pub frontmatter: bool,

    /// Elements whose content is not scanned for template markers.
    pub raw_content_tags: Vec<String>,
}

impl ParserOptions {
    /// Returns the configured template markers.
    pub fn template_syntax(&self) -> TemplateSyntax {
        let empty = BTreeMap::new();
        TemplateSyntax::from_maps(
            self.template_engine_syntax.as_ref().unwrap_or(&empty),
            self.template_comment_syntax.as_ref().unwrap_or(&empty),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_camel_case() {
        let options: ParserOptions = serde_json::from_str(
            r##"{
                "templateEngineSyntax": { "{{": "}}", "{%": "%}" },
                "templateCommentSyntax": { "{#": "#}" },
                "frontmatter": true,
                "rawContentTags": ["script"]
            }"##,
        )
        .unwrap();

        assert!(options.frontmatter);
        assert_eq!(options.raw_content_tags, vec!["script"]);

        let syntax = options.template_syntax();
        assert_eq!(syntax.pairs().len(), 3);
        assert!(syntax.pairs().iter().any(|pair| pair.open == "{#" && pair.is_comment));
    }

    #[test]
    fn test_defaults() {
        let options: ParserOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParserOptions::default());
        assert!(options.template_syntax().is_empty());
    }
}
