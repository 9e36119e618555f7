//! Integration tests for the tokenizer states: tags, attributes, comments,
//! doctypes and text elements.

use arbor_dom::{Attribute, DomTree, NodeId, NodeKind, QuoteStyle};
use arbor_html::{Parser, parse_str};
use test_case::test_case;

fn parse(html: &str) -> DomTree {
    parse_str(html).unwrap()
}

/// First child of the document.
fn first(tree: &DomTree) -> NodeId {
    tree.first_child(NodeId::ROOT).unwrap()
}

#[test]
fn test_tag_names_are_lowercased() {
    let tree = parse("<DIV><SpAn>x</sPaN></div>");
    let div = first(&tree);
    assert_eq!(tree.tag_name(div), Some("div"));
    let span = tree.first_child(div).unwrap();
    assert_eq!(tree.tag_name(span), Some("span"));
}

#[test]
fn test_attributes_with_quote_styles() {
    let tree = parse("<a HREF=\"/Path\" Title='y' data-n=3 checked></a>");
    let a = first(&tree);
    let attrs = &tree.as_element(a).unwrap().attrs;

    assert_eq!(
        attrs,
        &[
            Attribute::with_quote("href", "/Path", QuoteStyle::Double),
            Attribute::with_quote("title", "y", QuoteStyle::Single),
            Attribute::with_quote("data-n", "3", QuoteStyle::None),
            Attribute::with_quote("checked", "", QuoteStyle::None),
        ]
    );
}

#[test]
fn test_duplicate_attributes_are_kept() {
    let tree = parse("<div id=a id=b></div>");
    let div = first(&tree);
    let attrs = &tree.as_element(div).unwrap().attrs;
    assert_eq!(attrs.len(), 2);
    // Lookup returns the first occurrence.
    assert_eq!(tree.get_attribute(div, "id"), Some("a"));
}

#[test]
fn test_attribute_value_keeps_markup_characters() {
    let tree = parse("<a title=\"1 > 0 && x < y\">t</a>");
    assert_eq!(tree.get_attribute(first(&tree), "title"), Some("1 > 0 && x < y"));
}

#[test]
fn test_missing_whitespace_between_attributes() {
    let mut parser = Parser::from_string("<a href=\"x\"title=\"y\"></a>");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();

    let a = first(tree);
    assert_eq!(tree.get_attribute(a, "href"), Some("x"));
    assert_eq!(tree.get_attribute(a, "title"), Some("y"));
    assert_eq!(parser.issues().len(), 1);
}

#[test]
fn test_whitespace_around_equals() {
    let tree = parse("<input value = \"v\" >");
    assert_eq!(tree.get_attribute(first(&tree), "value"), Some("v"));
}

#[test_case("<img src=\"a.png\"/>" ; "quoted value")]
#[test_case("<img src=a.png />" ; "unquoted value")]
#[test_case("<img/>" ; "no attributes")]
fn test_self_closing_void(html: &str) {
    let mut parser = Parser::from_string(html);
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();
    assert_eq!(tree.tag_name(first(tree)), Some("img"));
    assert_eq!(parser.current_node(), NodeId::ROOT);
}

#[test]
fn test_solidus_inside_tag() {
    let mut parser = Parser::from_string("<div / id=x></div>");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();
    assert_eq!(tree.get_attribute(first(tree), "id"), Some("x"));
    assert_eq!(parser.issues().len(), 1);
}

// ========== comments ==========

#[test_case("<!---->", "" ; "empty")]
#[test_case("<!-- text -->", " text " ; "plain")]
#[test_case("<!--a-b--c-->", "a-b--c" ; "inner dashes")]
#[test_case("<!--x--->", "x-" ; "extra dash before end")]
#[test_case("<!--<p>-->", "<p>" ; "markup inside")]
fn test_comment_data(html: &str, expected: &str) {
    let tree = parse(html);
    let comment = first(&tree);
    assert_eq!(tree.kind(comment), Some(NodeKind::Comment));
    assert_eq!(tree.data(comment), expected);
}

#[test]
fn test_abrupt_empty_comment() {
    let mut parser = Parser::from_string("<!-->after");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();
    assert_eq!(tree.kind(first(tree)), Some(NodeKind::Comment));
    assert_eq!(tree.text_content(NodeId::ROOT), "after");
    assert_eq!(parser.issues().len(), 1);
}

#[test_case("<?xml version=\"1.0\"?>", "?xml version=\"1.0\"?" ; "processing instruction")]
#[test_case("<!foo>", "foo" ; "unknown declaration")]
#[test_case("<!-x>", "-x" ; "single dash")]
#[test_case("<!DOCTYX>", "DOCTYX" ; "misspelled doctype")]
#[test_case("</3>", "3" ; "end tag starting with digit")]
#[test_case("</a\"b>", "a\"b" ; "quote in end tag name")]
fn test_bogus_comment(html: &str, expected: &str) {
    let mut parser = Parser::from_string(html);
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();

    let comment = first(tree);
    assert_eq!(tree.kind(comment), Some(NodeKind::Comment));
    assert_eq!(tree.data(comment), expected);
    assert!(!parser.issues().is_empty());
}

#[test]
fn test_empty_end_tag_is_ignored() {
    let tree = parse("<p>a</>b</p>");
    let p = first(&tree);
    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.text_content(p), "ab");
}

// ========== doctype ==========

#[test_case("<!DOCTYPE html>" ; "upper case")]
#[test_case("<!doctype HTML>" ; "lower case keyword")]
#[test_case("<!dOcTyPe html >" ; "mixed case with trailing space")]
fn test_doctype_name(html: &str) {
    let tree = parse(html);
    let doctype = tree.as_doctype(first(&tree)).unwrap();
    assert_eq!(doctype.name, "html");
    assert!(!doctype.public && !doctype.system);
}

#[test]
fn test_doctype_public_identifier() {
    let html = "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\">";
    let tree = parse(html);
    let doctype = tree.as_doctype(first(&tree)).unwrap();
    assert!(doctype.public);
    assert_eq!(doctype.identifier, "-//W3C//DTD HTML 4.01//EN");
    assert_eq!(tree.serialize(NodeId::ROOT), html);
}

#[test]
fn test_doctype_system_identifier_single_quoted() {
    let tree = parse("<!doctype html system 'about:legacy-compat'>");
    let doctype = tree.as_doctype(first(&tree)).unwrap();
    assert!(doctype.system);
    assert_eq!(doctype.identifier, "about:legacy-compat");
}

#[test]
fn test_doctype_second_identifier_is_dropped() {
    let tree = parse(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\"><p>x</p>",
    );
    let doctype = tree.as_doctype(first(&tree)).unwrap();
    assert_eq!(doctype.identifier, "-//W3C//DTD XHTML 1.0//EN");
    assert_eq!(tree.children(NodeId::ROOT).len(), 2);
}

#[test]
fn test_doctype_unknown_keyword_is_bogus() {
    let mut parser = Parser::from_string("<!DOCTYPE html FOO bar><p>x</p>");
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();

    let doctype = tree.as_doctype(first(tree)).unwrap();
    assert_eq!(doctype.name, "html");
    assert!(!doctype.public);
    assert_eq!(parser.issues().len(), 1);
    assert_eq!(tree.children(NodeId::ROOT).len(), 2);
}

#[test]
fn test_doctype_after_content() {
    let tree = parse("<p>a</p><!DOCTYPE html>");
    assert_eq!(tree.kind(tree.children(NodeId::ROOT)[1]), Some(NodeKind::Doctype));
}

// ========== text elements ==========

#[test]
fn test_script_quoted_end_tag() {
    let tree = parse("<script>var a = \"<div>\";</script>");
    let script = first(&tree);
    assert_eq!(tree.children(script).len(), 1);
    assert_eq!(tree.text_content(script), "var a = \"<div>\";");
}

#[test]
fn test_script_string_with_escaped_quote() {
    let tree = parse("<script>s = 'it\\'s </script>'; </script>");
    assert_eq!(tree.text_content(first(&tree)), "s = 'it\\'s </script>'; ");
}

#[test]
fn test_script_unterminated_string_ends_at_newline() {
    let tree = parse("<script>a = \"x\n</script><p>after</p>");
    assert_eq!(tree.text_content(first(&tree)), "a = \"x\n");
    assert_eq!(tree.children(NodeId::ROOT).len(), 2);
}

#[test_case("<script>a</b>c</script>", "a</b>c" ; "other end tag")]
#[test_case("<script>a</scripts>b</script>", "a</scripts>b" ; "longer name")]
#[test_case("<script>a < b</script>", "a < b" ; "comparison")]
#[test_case("<script>a </ b</script>", "a </ b" ; "solidus without name")]
fn test_script_text_is_literal(html: &str, expected: &str) {
    let tree = parse(html);
    assert_eq!(tree.text_content(first(&tree)), expected);
}

#[test_case("<title>a</TITLE>" ; "upper case end tag")]
#[test_case("<TITLE>a</title>" ; "upper case start tag")]
#[test_case("<title>a</title >" ; "space before close")]
#[test_case("<title>a</title/>" ; "solidus before close")]
fn test_appropriate_end_tag(html: &str) {
    let mut parser = Parser::from_string(html);
    parser.parse().unwrap();
    let tree = parser.tree().unwrap();
    assert_eq!(tree.text_content(first(tree)), "a");
    assert_eq!(parser.current_node(), NodeId::ROOT);
}

#[test]
fn test_rcdata_preserves_case_of_other_end_tags() {
    let tree = parse("<textarea>x</Div>y</textarea>");
    assert_eq!(tree.text_content(first(&tree)), "x</Div>y");
}

#[test]
fn test_style_is_raw_text() {
    let tree = parse("<style>a > b { color: red }</style>");
    let style = first(&tree);
    assert_eq!(tree.children(style).len(), 1);
    assert_eq!(tree.text_content(style), "a > b { color: red }");
}

#[test]
fn test_character_references_are_not_decoded() {
    let tree = parse("<p title=\"&lt;\">&amp;&#65;</p>");
    let p = first(&tree);
    assert_eq!(tree.get_attribute(p, "title"), Some("&lt;"));
    assert_eq!(tree.text_content(p), "&amp;&#65;");
}

#[test]
fn test_issue_positions_are_character_offsets() {
    // "é" is one character but two bytes.
    let mut parser = Parser::from_string("<p>é</br></p>");
    parser.parse().unwrap();
    assert_eq!(parser.issues()[0].position, 9);
}

#[test]
fn test_undecoded_references_are_reported() {
    let _ = parse("<p>fish &amp; chips</p>");
    assert!(arbor_common::warning::was_warned(
        "HTML parser",
        "character references are not decoded"
    ));
}
