//! Integration tests for the HTML parser pipeline.

mod common;

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use common::{FixedConstructor, TagSoupConstructor};
use htmllint_ast::visitor::walk_node;
use htmllint_ast::{Node, NodeData, NodeType, Position, Span, VisitResult, Visitor};
use htmllint_parser::raw::RawLocation;
use htmllint_parser::{HtmlParser, ParseError, ParseResult, Parser, ParserOptions, RawNode, adjust};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn parse(source: &str) -> ParseResult {
    HtmlParser::new(TagSoupConstructor).parse(source).unwrap()
}

fn parse_with(source: &str, options: ParserOptions) -> Result<ParseResult, ParseError> {
    HtmlParser::with_options(TagSoupConstructor, options).parse(source)
}

fn mustache() -> ParserOptions {
    ParserOptions {
        template_engine_syntax: Some(BTreeMap::from([
            ("{{".to_string(), "}}".to_string()),
            ("{{{".to_string(), "}}}".to_string()),
        ])),
        ..ParserOptions::default()
    }
}

/// Collects every node of a tree.
#[derive(Default)]
struct Collector<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> Visitor<'a> for Collector<'a> {
    fn enter_node(&mut self, node: &'a Node) -> VisitResult {
        self.nodes.push(node);
        ControlFlow::Continue(())
    }
}

fn all_nodes(result: &ParseResult) -> Vec<&Node> {
    let mut collector = Collector::default();
    for node in &result.ast.body {
        let _ = walk_node(&mut collector, node);
    }
    collector.nodes
}

const DOCUMENT: &str = "<!DOCTYPE html>
<html>
  <body class=\"main\" hidden>
    <!-- navigation -->
    <ul>
      <li><a href='/'>Home</a></li>
      <li>About<br>us</li>
    </ul>
    <p>
      multi
      line
    </p>
  </body>
</html>
";

#[test]
fn test_children_stay_within_tags() {
    let result = parse(DOCUMENT);

    for node in all_nodes(&result) {
        assert!(!node.is_null());
        let Some(span) = node.tag_span() else {
            continue;
        };
        for child in &node.children {
            let range = child.range().unwrap();
            assert!(span.encloses(&range), "{range:?} escapes {span:?}");
        }
    }
}

#[test]
fn test_text_ranges_round_trip() {
    let result = parse(DOCUMENT);

    for node in all_nodes(&result) {
        let NodeData::Text(text) = &node.data else {
            continue;
        };
        let range = node.range().unwrap();
        assert_eq!(&DOCUMENT[range.as_range()], text.value);
        for line in &text.line_nodes {
            assert_eq!(
                &DOCUMENT[line.location.range.as_range()],
                line.value.as_deref().unwrap()
            );
        }
    }
}

#[test]
fn test_element_sub_nodes_slice_source() {
    let result = parse(DOCUMENT);
    let body = all_nodes(&result)
        .into_iter()
        .find(|node| node.tag_name() == Some("body"))
        .unwrap();

    let NodeData::Element(element) = &body.data else {
        panic!("Expected element");
    };
    let start_tag = element.start_tag.as_ref().unwrap();
    assert_eq!(
        &DOCUMENT[start_tag.location.range.as_range()],
        "<body class=\"main\" hidden>"
    );
    assert_eq!(start_tag.location.loc.start, Position::new(3, 2));
    assert_eq!(
        &DOCUMENT[element.end_tag.as_ref().unwrap().location.range.as_range()],
        "</body>"
    );

    let class = element.attrs[0].location.unwrap();
    assert_eq!(&DOCUMENT[class.range.as_range()], "class=\"main\"");
    assert!(start_tag.location.range.encloses(&class.range));
    assert_eq!(element.attrs[1].name, "hidden");
    assert_eq!(element.attrs[1].value, "");
}

#[test]
fn test_comment_is_split_into_delimiters_and_content() {
    let result = parse(DOCUMENT);

    assert_eq!(result.ast.comments.len(), 1);
    let content = &result.ast.comments[0];
    assert_eq!(content.value.as_deref(), Some(" navigation "));
    assert_eq!(&DOCUMENT[content.location.range.as_range()], " navigation ");
    assert!(
        result
            .ast
            .tokens
            .iter()
            .all(|token| !token.value.contains("<!--") && !token.value.contains("-->"))
    );
}

#[test]
fn test_tokens_are_sorted_and_cover_tags() {
    let result = parse(DOCUMENT);

    let starts: Vec<u32> = result
        .ast
        .tokens
        .iter()
        .map(|token| token.location.range.start)
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);

    assert_eq!(result.ast.tokens[0].node_type, NodeType::DocumentType);
    assert_eq!(result.ast.tokens[0].value, "<!DOCTYPE html>");
    assert!(
        result
            .ast
            .tokens
            .iter()
            .any(|token| token.node_type == NodeType::Attribute && token.value == "href='/'")
    );
}

#[test]
fn test_multiline_text_lines() {
    let result = parse(DOCUMENT);
    let p = all_nodes(&result)
        .into_iter()
        .find(|node| node.tag_name() == Some("p"))
        .unwrap();
    let NodeData::Text(text) = &p.children[0].data else {
        panic!("Expected text");
    };

    let lines: Vec<(&str, u32)> = text
        .line_nodes
        .iter()
        .map(|line| (line.value.as_deref().unwrap(), line.location.loc.start.line))
        .collect();
    assert_eq!(lines, vec![("", 9), ("multi", 10), ("line", 11), ("", 12)]);
    assert_eq!(text.line_nodes[1].location.loc.start.column, 6);
}

#[test]
fn test_multibyte_offsets_are_bytes() {
    let source = "<p>日本語</p>\n<i>x</i>";
    let result = parse(source);

    assert_eq!(result.ast.body[0].range(), Some(Span::new(0, 16)));
    let i = &result.ast.body[2];
    assert_eq!(i.range(), Some(Span::new(17, 25)));
    assert_eq!(i.location.unwrap().loc.start, Position::new(2, 0));
}

#[test]
fn test_empty_document() {
    let result = parse("");

    assert!(result.ast.body.is_empty());
    assert!(result.ast.tokens.is_empty());
    assert_eq!(result.ast.location.range, Span::new(0, 0));
    assert_eq!(result.ast.location.loc.start, Position::new(1, 0));
}

#[test]
fn test_templates_found_outside_raw_content() {
    let source = "<p title=\"{{ title }}\">{{{ body }}}</p><script>var a = {{ json }};</script>";
    let options = ParserOptions {
        raw_content_tags: vec!["script".to_string()],
        ..mustache()
    };
    let result = parse_with(source, options).unwrap();

    let slices: Vec<&str> = result
        .templates
        .iter()
        .map(|template| &source[template.range().as_range()])
        .collect();
    assert_eq!(slices, vec!["{{ title }}", "{{{ body }}}"]);
}

#[rstest]
#[case::nested("<p>{{{ {{ }} }}}</p>", "{{")]
#[case::unterminated("<p>{{ name</p>", "{{")]
fn test_template_conflicts_fail_the_parse(#[case] source: &str, #[case] marker: &str) {
    let err = parse_with(source, mustache()).unwrap_err();

    assert!(err.is_structural_conflict());
    assert_eq!(err.marker(), Some(marker));
    let range = err.range().unwrap();
    assert_eq!(&source[range.as_range()], marker);
}

#[test]
fn test_frontmatter_positions_refer_to_original_text() {
    let source = "---\nlayout: page\n---\n<h1>{{ title }}</h1>\n<p>\n  text\n</p>";
    let options = ParserOptions {
        frontmatter: true,
        ..mustache()
    };
    let result = parse_with(source, options).unwrap();

    let h1 = &result.ast.body[0];
    assert_eq!(&source[h1.range().unwrap().as_range()], "<h1>{{ title }}</h1>");
    assert_eq!(h1.location.unwrap().loc.start, Position::new(4, 0));

    let p = &result.ast.body[2];
    let NodeData::Text(text) = &p.children[0].data else {
        panic!("Expected text");
    };
    let line = &text.line_nodes[1];
    assert_eq!(&source[line.location.range.as_range()], "text");
    assert_eq!(line.location.loc.start, Position::new(6, 2));

    assert_eq!(&source[result.templates[0].range().as_range()], "{{ title }}");
    for token in &result.ast.tokens {
        assert_eq!(&source[token.location.range.as_range()], token.value);
    }
}

#[test]
fn test_misplaced_nodes_are_reattached() {
    // The constructor attached the trailing text to the span.
    let source = "<div><span>a</span>b</div>";
    let loc = |start, end| RawLocation::from_offsets(source, start, end);
    let span = RawNode::element(
        "span",
        Vec::new(),
        Some(
            loc(5, 19)
                .with_start_tag(loc(5, 11).span)
                .with_end_tag(loc(12, 19).span),
        ),
        vec![RawNode::text("a", loc(11, 12)), RawNode::text("b", loc(19, 20))],
    );
    let div = RawNode::element(
        "div",
        Vec::new(),
        Some(
            loc(0, 26)
                .with_start_tag(loc(0, 5).span)
                .with_end_tag(loc(20, 26).span),
        ),
        vec![span],
    );
    let html = RawNode::element("html", Vec::new(), None, vec![div]);
    let parser = HtmlParser::new(FixedConstructor(RawNode::document(vec![html])));

    let result = parser.parse(source).unwrap();

    assert_eq!(result.ast.body.len(), 1);
    let div = &result.ast.body[0];
    let children: Vec<Span> = div.children.iter().filter_map(Node::range).collect();
    assert_eq!(children, vec![Span::new(5, 19), Span::new(19, 20)]);
    assert_eq!(div.children[0].children.len(), 1);
}

#[test]
fn test_adjusting_parsed_tree_again_changes_nothing() {
    let result = parse(DOCUMENT);

    let mut root = Node::program();
    root.children = result.ast.body.clone();
    adjust(&mut root);

    assert_eq!(root.children, result.ast.body);
}

#[test]
fn test_serialized_tree_shape() {
    let result = parse("<p id=\"a\">x</p><!--c-->");
    let json = serde_json::to_value(&result).unwrap();

    let p = &json["ast"]["body"][0];
    assert_eq!(p["type"], "Element");
    assert_eq!(p["tagName"], "p");
    assert_eq!(p["range"], serde_json::json!([0, 15]));
    assert_eq!(p["loc"]["start"], serde_json::json!({ "line": 1, "column": 0 }));
    assert_eq!(p["startTag"]["range"], serde_json::json!([0, 10]));
    assert_eq!(p["attrs"][0]["name"], "id");
    assert_eq!(p["children"][0]["lineNodes"][0]["value"], "x");

    let comment = &json["ast"]["body"][1];
    assert_eq!(comment["type"], "Comment");
    assert_eq!(comment["content"]["range"], serde_json::json!([19, 20]));
    assert_eq!(comment["endTag"]["range"], serde_json::json!([20, 23]));

    assert_eq!(
        json["visitorKeys"]["Element"],
        serde_json::json!(["startTag", "attrs", "children", "endTag"])
    );
}
