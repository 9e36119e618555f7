//! Integration tests for tree construction.

use std::io::{self, BufReader, ErrorKind, Read};

use arbor_dom::{DomTree, NodeId, NodeKind, NodeType};
use arbor_html::{InsertionMode, ParseError, Parser, TokenizerState, parse_str};
use test_case::test_case;

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_str(html).unwrap()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    tree.descendants(from).find(|&id| tree.tag_name(id) == Some(tag))
}

/// A source whose every read fails.
struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(ErrorKind::ConnectionReset, "source closed"))
    }
}

/// Tag names (or `#kind`) of the children of `id`.
fn child_names(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| match tree.tag_name(child) {
            Some(name) => name.to_string(),
            None => format!("#{}", tree.kind(child).unwrap().to_string().to_lowercase()),
        })
        .collect()
}

#[test]
fn test_document_structure() {
    let mut parser =
        Parser::from_string("<!DOCTYPE html><html><head></head><body><p>Hi</p></body></html>");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();

    assert!(matches!(tree.get(NodeId::ROOT).unwrap().node_type, NodeType::Document));
    assert_eq!(child_names(tree, NodeId::ROOT), ["#doctype", "html"]);
    let doctype = tree.as_doctype(tree.children(NodeId::ROOT)[0]).unwrap();
    assert_eq!(doctype.name, "html");
    assert!(!doctype.public);
    assert!(!doctype.system);
    assert!(doctype.identifier.is_empty());

    let html = tree.document_element().unwrap();
    assert_eq!(child_names(tree, html), ["head", "body"]);

    let body = tree.body().unwrap();
    let p = find_element(tree, body, "p").unwrap();
    assert_eq!(tree.parent(p), Some(body));
    assert_eq!(tree.text_content(p), "Hi");

    assert_eq!(parser.insertion_mode(), InsertionMode::AfterAfterBody);
    assert_eq!(parser.current_node(), NodeId::ROOT);
    assert!(parser.issues().is_empty());
}

#[test]
fn test_tree_unavailable_before_parse() {
    let parser = Parser::from_string("<p>");
    assert!(parser.tree().is_none());
}

#[test]
fn test_parse_twice_is_inert() {
    let mut parser = Parser::from_string("<p>a</p>");
    parser.parse().unwrap();
    let first = parser.tree().unwrap().clone();
    parser.parse().unwrap();
    assert_eq!(parser.tree().unwrap(), &first);
}

#[test]
fn test_paragraph_auto_close() {
    let tree = parse("<p>a<p>b");
    assert_eq!(child_names(&tree, NodeId::ROOT), ["p", "p"]);

    let second = tree.children(NodeId::ROOT)[1];
    assert_eq!(tree.text_content(second), "b");
    assert_eq!(tree.serialize(NodeId::ROOT), "<p>a</p><p>b</p>");
}

#[test]
fn test_block_closes_paragraph() {
    let tree = parse("<body><p>intro<div>block</div></body>");
    let body = tree.body().unwrap();
    assert_eq!(child_names(&tree, body), ["p", "div"]);
}

#[test_case("table" ; "table")]
#[test_case("main" ; "main")]
#[test_case("search" ; "search")]
#[test_case("xmp" ; "xmp")]
fn test_other_start_tags_nest_in_paragraph(tag: &str) {
    let tree = parse(&format!("<p>a<{tag}></{tag}></p>"));
    let p = tree.children(NodeId::ROOT)[0];
    assert_eq!(child_names(&tree, NodeId::ROOT), ["p"]);
    assert_eq!(child_names(&tree, p), ["#text", tag]);
}

#[test]
fn test_table_sections_do_not_close_each_other() {
    let tree = parse("<table><thead><tbody></tbody></thead></table>");
    let thead = find_element(&tree, NodeId::ROOT, "thead").unwrap();
    assert_eq!(child_names(&tree, thead), ["tbody"]);
}

#[test]
fn test_list_items_close_each_other() {
    let tree = parse("<ul><li>one<li>two</ul>");
    let ul = find_element(&tree, NodeId::ROOT, "ul").unwrap();
    assert_eq!(child_names(&tree, ul), ["li", "li"]);
    assert_eq!(tree.text_content(ul), "onetwo");
}

#[test]
fn test_definition_terms_close_each_other() {
    let tree = parse("<dl><dt>term<dd>first<dd>second</dl>");
    let dl = find_element(&tree, NodeId::ROOT, "dl").unwrap();
    assert_eq!(child_names(&tree, dl), ["dt", "dd", "dd"]);
}

#[test]
fn test_heading_closes_open_heading() {
    let tree = parse("<h1>title<h2>sub</h2>");
    assert_eq!(child_names(&tree, NodeId::ROOT), ["h1", "h2"]);
}

#[test]
fn test_ruby_annotations() {
    let tree = parse("<ruby>x<rt>a<rt>b</rt></ruby>");
    let ruby = find_element(&tree, NodeId::ROOT, "ruby").unwrap();
    assert_eq!(child_names(&tree, ruby), ["#text", "rt", "rt"]);
}

#[test]
fn test_options_close_each_other() {
    let tree = parse("<select><option>a<option>b<optgroup><option>c</option></optgroup></select>");
    let select = find_element(&tree, NodeId::ROOT, "select").unwrap();
    assert_eq!(child_names(&tree, select), ["option", "option", "optgroup"]);
}

#[test]
fn test_end_tag_generates_implied_end_tags() {
    let tree = parse("<div><p>unclosed</div>");
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(child_names(&tree, div), ["p"]);
    assert_eq!(tree.serialize(NodeId::ROOT), "<div><p>unclosed</p></div>");
}

#[test]
fn test_auto_close_only_checks_immediate_parent() {
    // The open <p> is the grandparent of the second <p>, so it stays open.
    let tree = parse("<p><span>a<p>b</p></span></p>");
    let span = find_element(&tree, NodeId::ROOT, "span").unwrap();
    assert_eq!(child_names(&tree, span), ["#text", "p"]);
}

#[test]
fn test_void_elements_take_no_children() {
    let tree = parse("<p>a<br>b<img src=x>c</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(child_names(&tree, p), ["#text", "br", "#text", "img", "#text"]);

    let br = find_element(&tree, p, "br").unwrap();
    assert!(tree.children(br).is_empty());
    assert_eq!(tree.serialize(p), "<p>a<br>b<img src=x>c</p>");
}

#[test]
fn test_void_end_tag_is_ignored() {
    let mut parser = Parser::from_string("<p>a</br>b</p>");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();

    let p = find_element(tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.text_content(p), "ab");
    assert_eq!(parser.issues().len(), 1);
    assert_eq!(parser.issues()[0].position, 9);
}

#[test]
fn test_self_closing_non_void_closes_immediately() {
    let tree = parse("<div/>after");
    assert_eq!(child_names(&tree, NodeId::ROOT), ["div", "#text"]);
    let div = tree.children(NodeId::ROOT)[0];
    assert!(tree.children(div).is_empty());
}

#[test]
fn test_title_returns_to_previous_mode() {
    let mut parser = Parser::from_string("<title>Hello</title>");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();

    let title = find_element(tree, NodeId::ROOT, "title").unwrap();
    assert_eq!(tree.text_content(title), "Hello");
    assert_eq!(parser.insertion_mode(), InsertionMode::BeforeHead);
    assert_eq!(parser.tokenizer_state(), TokenizerState::Data);
}

#[test]
fn test_title_in_head_returns_to_in_head() {
    let mut parser = Parser::from_string("<html><head><title>T</title>");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::InHead);
}

#[test]
fn test_head_and_body_modes() {
    let mut parser = Parser::from_string("<html><head><meta charset=utf-8></head>");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::AfterHead);

    let mut parser = Parser::from_string("<html><head></head><body><p>x</p></body>");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::AfterBody);
}

#[test]
fn test_body_content_without_head_enters_body() {
    let mut parser = Parser::from_string("<div>x</div>");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::InBody);
    let tree = parser.tree().unwrap();
    assert_eq!(child_names(tree, NodeId::ROOT), ["div"]);
}

#[test]
fn test_noscript_in_head() {
    let mut parser = Parser::from_string("<head><noscript><link rel=x></noscript>");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::InHead);
}

#[test]
fn test_table_modes() {
    let mut parser = Parser::from_string("<table><tr><td>cell");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::InCell);

    let mut parser = Parser::from_string("<body><table><tr><td>cell</td></tr></table>");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::InBody);
    let tree = parser.tree().unwrap();
    assert_eq!(
        tree.serialize(NodeId::ROOT),
        "<body><table><tr><td>cell</td></tr></table></body>"
    );
}

#[test]
fn test_start_tag_after_body_reenters_body() {
    let mut parser = Parser::from_string("<html><body></body></html><p>late</p>");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();

    assert_eq!(child_names(tree, NodeId::ROOT), ["html", "p"]);
    assert_eq!(parser.issues().len(), 1);
    assert_eq!(parser.insertion_mode(), InsertionMode::InBody);
}

#[test]
fn test_frameset_modes() {
    let mut parser = Parser::from_string("<html><frameset><frame src=a></frame></frameset></html>");
    parser.parse().unwrap();
    assert_eq!(parser.insertion_mode(), InsertionMode::AfterAfterFrameset);
}

#[test]
fn test_mismatched_end_tag() {
    let mut parser = Parser::from_string("<div>text</span>");
    let err = parser.parse().unwrap_err();

    let ParseError::MismatchedEndTag { node, open, found } = &err else {
        panic!("expected a mismatched end tag, got {err:?}");
    };
    assert_eq!(open, "div");
    assert_eq!(found, "span");

    let message = err.to_string();
    assert!(message.contains("div"));
    assert!(message.contains("span"));

    // The partial tree is still available.
    let tree = parser.tree().unwrap();
    assert_eq!(tree.tag_name(*node), Some("div"));
    assert_eq!(err.node(), Some(*node));
}

#[test]
fn test_end_tag_at_document_level() {
    let err = parse_str("</p>").unwrap_err();
    let ParseError::MismatchedEndTag { open, found, .. } = err else {
        panic!("expected a mismatched end tag");
    };
    assert_eq!(open, "#document");
    assert_eq!(found, "p");
}

#[test]
fn test_strict_mode_rejects_parse_errors() {
    let mut parser = Parser::from_string("<p>a</br>b</p>").with_strict_mode();
    let err = parser.parse().unwrap_err();
    let ParseError::Strict(issue) = err else {
        panic!("expected a strict-mode error");
    };
    assert!(issue.message.contains("br"));
}

#[test]
fn test_strict_mode_accepts_clean_input() {
    let mut parser = Parser::from_string("<!DOCTYPE html><p class=\"a\">ok</p>").with_strict_mode();
    parser.parse().unwrap();
}

#[test_case("<div></di" ; "inside end tag name")]
#[test_case("<div></" ; "after end tag open")]
#[test_case("<div></div " ; "after end tag name")]
#[test_case("<title>x</title " ; "after text end tag name")]
#[test_case("<!DOCTYPE html PUBLIC \"-//W3C" ; "inside quoted doctype identifier")]
fn test_unexpected_eof(html: &str) {
    let err = parse_str(html).unwrap_err();
    let ParseError::Io(io_err) = &err else {
        panic!("expected an I/O error, got {err:?}");
    };
    assert_eq!(io_err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn test_read_error_stops_parse() {
    let mut parser = Parser::new(BufReader::new(FailingReader));
    let Err(ParseError::Io(err)) = parser.parse() else {
        panic!("expected an I/O error");
    };
    assert_eq!(err.kind(), ErrorKind::ConnectionReset);
    assert!(parser.tree().is_some());
}

#[test_case("<div>text<", "text<" ; "dangling less-than")]
#[test_case("<title>abc</tit", "abc</tit" ; "partial text end tag")]
#[test_case("<script>a<", "a<" ; "script less-than")]
#[test_case("<p>open", "open" ; "unclosed element")]
fn test_eof_keeps_partial_text(html: &str, expected: &str) {
    let tree = parse(html);
    assert_eq!(tree.text_content(NodeId::ROOT), expected);
}

#[test]
fn test_eof_in_comment_keeps_comment() {
    let tree = parse("<!-- open");
    let comment = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.kind(comment), Some(NodeKind::Comment));
    assert_eq!(tree.data(comment), " open");
}

#[test]
fn test_less_than_before_non_letter_is_text() {
    let tree = parse("<p>1 < 2</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.as_text(tree.children(p)[0]), Some("1 < 2"));
    assert_eq!(tree.serialize(p), "<p>1 < 2</p>");
}

#[test]
fn test_dangling_less_than_continues_text() {
    let tree = parse("<div>text<");
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(tree.children(div).len(), 1);
    assert_eq!(tree.as_text(tree.children(div)[0]), Some("text<"));
}

#[test]
fn test_deeply_nested_document_round_trips() {
    let html = "<div>".repeat(200_000);
    let tree = parse(&html);
    assert_eq!(tree.len(), 200_001);

    let serialized = tree.serialize(NodeId::ROOT);
    assert!(serialized.starts_with(&html));
    assert_eq!(serialized.len(), html.len() * 2 + 200_000);
}

#[test_case("<!DOCTYPE html><html><head><title>T</title></head><body><p class=\"x\">Hi</p></body></html>" ; "full document")]
#[test_case("<div a='1' b=2 hidden><br><!-- c --></div>" ; "attribute quote styles")]
#[test_case("<ul><li>one</li><li>two</li></ul>" ; "list")]
#[test_case("<script>if (a < b) { x = \"</p>\"; }</script>" ; "script with markup in string")]
#[test_case("<p>a &amp; b</p>" ; "character reference kept")]
#[test_case("<textarea><b>bold</B></textarea>" ; "rcdata keeps markup")]
fn test_round_trip(html: &str) {
    let tree = parse(html);
    assert_eq!(tree.serialize(NodeId::ROOT), html);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let tree = arbor_html::parse(&b"<p>a\xFFb</p>"[..]).unwrap();
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.text_content(p), "a\u{FFFD}b");
}

#[test]
fn test_simple_html_file() {
    let html = "<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <!-- This is a comment -->
    <title>Test</title>
</head>
<body class=\"main\" id=\"content\">
    <div data-value='single quoted'>Hello</div>
    <input type=\"text\" disabled />
</body>
</html>";
    let tree = parse(html);

    let html_id = tree.document_element().unwrap();
    assert_eq!(tree.get_attribute(html_id, "lang"), Some("en"));

    let head = find_element(&tree, html_id, "head").unwrap();
    let meta = find_element(&tree, head, "meta").unwrap();
    assert!(tree.children(meta).is_empty());
    let comment = tree
        .children(head)
        .iter()
        .copied()
        .find(|&id| tree.kind(id) == Some(NodeKind::Comment))
        .unwrap();
    assert_eq!(tree.data(comment), " This is a comment ");

    let body = tree.body().unwrap();
    let element = tree.as_element(body).unwrap();
    assert_eq!(element.id(), Some("content"));
    assert_eq!(element.classes(), ["main"]);

    let div = find_element(&tree, body, "div").unwrap();
    assert_eq!(tree.get_attribute(div, "data-value"), Some("single quoted"));
    assert_eq!(tree.text_content(div), "Hello");

    let input = find_element(&tree, body, "input").unwrap();
    assert_eq!(tree.get_attribute(input, "disabled"), Some(""));
    assert_eq!(tree.parent(input), Some(body));
}
