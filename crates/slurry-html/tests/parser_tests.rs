//! Integration tests for the repairing parser.

use slurry_dom::{NodeId, NodeType};
use slurry_html::{
    ContentHandler, Error, Event, EventRecorder, HtmlParser, IssueKind, ParserOptions,
    parse_to_events, parse_to_tree,
};
use slurry_schema::Attributes;
use slurry_schema::html::HTML_NAMESPACE;

/// Render the element and character events as compact markup. Other
/// events are left out.
fn render(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            Event::StartElement {
                qname, attributes, ..
            } => {
                out.push('<');
                out.push_str(qname);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{value}\""));
                }
                out.push('>');
            }
            Event::EndElement { qname, .. } => out.push_str(&format!("</{qname}>")),
            Event::Characters { text } => out.push_str(text),
            _ => {}
        }
    }
    out
}

/// Parse with default options and render.
fn repair(html: &str) -> String {
    render(&parse_to_events(html).unwrap())
}

/// Parse with the given options and return events and issue kinds.
fn parse_with(html: &str, options: ParserOptions) -> (Vec<Event>, Vec<IssueKind>) {
    let mut recorder = EventRecorder::new();
    let issues = HtmlParser::new()
        .with_options(options)
        .parse_with_issues(html, &mut recorder)
        .unwrap();
    (
        recorder.into_events(),
        issues.into_iter().map(|issue| issue.kind).collect(),
    )
}

fn text_of(events: &[Event]) -> String {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Characters { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

// ========== Document structure ==========

#[test]
fn test_missing_ancestors_are_supplied() {
    assert_eq!(repair("<p>Hello"), "<html><body><p>Hello</p></body></html>");
}

#[test]
fn test_empty_document_still_has_root() {
    assert_eq!(repair(""), "<html><body></body></html>");
    assert_eq!(repair("  \n "), "<html><body></body></html>");
}

#[test]
fn test_document_events_bracket_everything() {
    let events = parse_to_events("<p>x").unwrap();
    assert_eq!(events.first(), Some(&Event::StartDocument));
    assert_eq!(
        events.get(1),
        Some(&Event::StartPrefixMapping {
            prefix: "html".into(),
            uri: HTML_NAMESPACE.into(),
        })
    );
    assert_eq!(
        events[events.len() - 2],
        Event::EndPrefixMapping {
            prefix: "html".into()
        }
    );
    assert_eq!(events.last(), Some(&Event::EndDocument));
}

#[test]
fn test_head_content_then_body() {
    assert_eq!(
        repair("<style>x</style><p>y"),
        "<html><head><style>x</style></head><body><p>y</p></body></html>"
    );
}

#[test]
fn test_list_items_close_each_other() {
    assert_eq!(
        repair("<ul><li>a<li>b</ul>"),
        "<html><body><ul><li>a</li><li>b</li></ul></body></html>"
    );
}

#[test]
fn test_void_elements_close_immediately() {
    assert_eq!(
        repair("<p>a<br>b"),
        "<html><body><p>a<br clear=\"none\"></br>b</p></body></html>"
    );
}

#[test]
fn test_table_cells_get_default_attributes() {
    assert_eq!(
        repair("<table><tr><td>x"),
        "<html><body><table><tr><td colspan=\"1\" rowspan=\"1\">x</td></tr></table></body></html>"
    );
}

#[test]
fn test_default_attributes_can_be_disabled() {
    let options = ParserOptions::default().with_default_attributes(false);
    let (events, _) = parse_with("<table><tr><td>x", options);
    assert_eq!(
        render(&events),
        "<html><body><table><tr><td>x</td></tr></table></body></html>"
    );
}

// ========== Restartable elements ==========

#[test]
fn test_formatting_elements_restart_after_forced_close() {
    assert_eq!(
        repair("<p>a<b>b<i>c</p>d"),
        "<html><body><p>a<b>b<i>c</i></b></p><b><i>d</i></b></body></html>"
    );
}

#[test]
fn test_restart_can_be_disabled() {
    let options = ParserOptions::default().with_restart_elements(false);
    let (events, _) = parse_with("<p>a<b>b</p>c", options);
    assert_eq!(
        render(&events),
        "<html><body><p>a<b>b</b></p>c</body></html>"
    );
}

#[test]
fn test_restarted_elements_lose_their_id() {
    let events = parse_to_events("<p><b id=x class=y>a</p>b").unwrap();
    let bolds: Vec<&Vec<(String, String)>> = events
        .iter()
        .filter_map(|event| match event {
            Event::StartElement {
                qname, attributes, ..
            } if qname == "b" => Some(attributes),
            _ => None,
        })
        .collect();
    assert_eq!(bolds.len(), 2);
    assert!(bolds[0].contains(&("id".to_string(), "x".to_string())));
    assert!(!bolds[1].iter().any(|(name, _)| name == "id"));
    assert!(bolds[1].contains(&("class".to_string(), "y".to_string())));
}

// ========== End tags ==========

#[test]
fn test_unmatched_end_tag_is_ignored() {
    let (events, issues) = parse_with("<p>a</span>b", ParserOptions::default());
    assert_eq!(render(&events), "<html><body><p>ab</p></body></html>");
    assert!(issues.contains(&IssueKind::UnmatchedEndTag));
}

#[test]
fn test_no_force_close_defers_end_tag() {
    let (events, issues) = parse_with(
        "<div><table><tr><td>x</div>y</table>z",
        ParserOptions::default().with_default_attributes(false),
    );
    assert_eq!(
        render(&events),
        "<html><body><div><table><tr><td>xy</td></tr></table></div>z</body></html>"
    );
    assert!(issues.contains(&IssueKind::PreclosedElement));
}

#[test]
fn test_document_element_is_never_closed_early() {
    assert_eq!(
        repair("<p>a</html>b"),
        "<html><body><p>ab</p></body></html>"
    );
}

// ========== CDATA elements ==========

#[test]
fn test_script_content_is_verbatim() {
    let (events, issues) = parse_with(
        r#"<script>var x = "</not a tag>";</script>"#,
        ParserOptions::default(),
    );
    assert_eq!(
        render(&events),
        r#"<html><script>var x = "</not a tag>";</script></html>"#
    );
    assert!(issues.contains(&IssueKind::LiteralEndTagInCdata));
}

#[test]
fn test_script_end_tag_is_case_insensitive() {
    assert_eq!(
        repair("<script>a<b></SCRIPT>"),
        "<html><script>a<b></script></html>"
    );
}

#[test]
fn test_script_end_tag_allows_whitespace_around_name() {
    assert_eq!(
        repair("<script>a</ script>b"),
        "<html><script>a</script><body>b</body></html>"
    );
    assert_eq!(
        repair("<style>a</ STYLE >b"),
        "<html><head><style>a</style></head><body>b</body></html>"
    );
}

#[test]
fn test_self_closed_script_does_not_swallow_markup() {
    assert_eq!(
        repair("<p><script/><b>x</b>"),
        "<html><body><p><script></script><b>x</b></p></body></html>"
    );
}

#[test]
fn test_cdata_elements_can_be_disabled() {
    let options = ParserOptions::default().with_cdata_elements(false);
    let (events, _) = parse_with("<script>a<b>c</b></script>", options);
    assert_eq!(
        render(&events),
        "<html><script>a</script><body><b>c</b></body></html>"
    );
}

// ========== Character references ==========

#[test]
fn test_numeric_references() {
    assert_eq!(repair("<p>&#65;&#x41;&#X41;"), "<html><body><p>AAA</p></body></html>");
}

#[test]
fn test_named_references() {
    assert_eq!(
        repair("<p>&lt;x&gt; &amp; &copy;"),
        "<html><body><p><x> & \u{A9}</p></body></html>"
    );
}

#[test]
fn test_astral_reference_encodes_as_surrogate_pair() {
    let text = text_of(&parse_to_events("<p>&#66615;").unwrap());
    assert_eq!(text.encode_utf16().collect::<Vec<u16>>(), [0xD801, 0xDC37]);
}

#[test]
fn test_windows_1252_references() {
    assert_eq!(
        text_of(&parse_to_events("&#147;q&#148;").unwrap()),
        "\u{201C}q\u{201D}"
    );
}

#[test]
fn test_invalid_references_are_dropped() {
    assert_eq!(text_of(&parse_to_events("a&#xD800;b&#1;c").unwrap()), "abc");
    assert_eq!(text_of(&parse_to_events("<p>x&#xFFFE;y&#65535;z").unwrap()), "xyz");
}

#[test]
fn test_unknown_reference_stays_literal() {
    assert_eq!(text_of(&parse_to_events("a&bogus;b").unwrap()), "a&bogus;b");
}

#[test]
fn test_attribute_values_expand_terminated_references() {
    let events = parse_to_events(r#"<a href="?a=1&amp;b=2&c=3&#x41;">x</a>"#).unwrap();
    let href = events.iter().find_map(|event| match event {
        Event::StartElement { attributes, .. } => attributes
            .iter()
            .find(|(name, _)| name == "href")
            .map(|(_, value)| value.clone()),
        _ => None,
    });
    assert_eq!(href.as_deref(), Some("?a=1&b=2&c=3A"));
}

// ========== Attributes ==========

#[test]
fn test_attribute_names_are_lowercased_and_valueless_repeat_name() {
    let events = parse_to_events("<input TYPE=checkbox Checked>").unwrap();
    let attributes = events.iter().find_map(|event| match event {
        Event::StartElement {
            qname, attributes, ..
        } if qname == "input" => Some(attributes.clone()),
        _ => None,
    });
    let attributes = attributes.unwrap();
    assert!(attributes.contains(&("type".to_string(), "checkbox".to_string())));
    assert!(attributes.contains(&("checked".to_string(), "checked".to_string())));
}

#[test]
fn test_token_attributes_are_normalized() {
    let events = parse_to_events("<p id='  a  ' title='  b  '>x").unwrap();
    let attributes = events.iter().find_map(|event| match event {
        Event::StartElement {
            qname, attributes, ..
        } if qname == "p" => Some(attributes.clone()),
        _ => None,
    });
    let attributes = attributes.unwrap();
    assert!(attributes.contains(&("id".to_string(), "a".to_string())));
    assert!(attributes.contains(&("title".to_string(), "  b  ".to_string())));
}

#[test]
fn test_xmlns_attributes_are_discarded() {
    assert_eq!(
        repair("<p xmlns='urn:x' xmlns:a='urn:a'>x"),
        "<html><body><p>x</p></body></html>"
    );
}

// ========== Unknown elements ==========

#[test]
fn test_unknown_root_element_is_kept() {
    let (events, issues) = parse_with("<foo>bar</foo>", ParserOptions::default());
    assert_eq!(render(&events), "<foo>bar</foo>");
    assert!(issues.contains(&IssueKind::UnknownElement));
}

#[test]
fn test_unknown_element_goes_under_html_without_root_bogons() {
    let options = ParserOptions::default().with_root_bogons(false);
    let (events, _) = parse_with("<foo>bar</foo>", options);
    assert_eq!(render(&events), "<html><foo>bar</foo></html>");
}

#[test]
fn test_unknown_elements_can_be_ignored() {
    let options = ParserOptions::default().with_ignore_bogons(true);
    let (events, issues) = parse_with("<p>a<foo>b</foo>c", options);
    assert_eq!(render(&events), "<html><body><p>abc</p></body></html>");
    assert!(issues.contains(&IssueKind::IgnoredElement));
    assert!(issues.contains(&IssueKind::UnmatchedEndTag));
}

#[test]
fn test_empty_bogons_close_immediately() {
    let options = ParserOptions::default().with_bogons_empty(true);
    let (events, _) = parse_with("<p>a<foo>b", options);
    assert_eq!(render(&events), "<html><body><p>a<foo></foo>b</p></body></html>");
}

#[test]
fn test_unknown_element_matches_end_tag_in_any_case() {
    assert_eq!(
        repair("<p><Foo>x</FOO>y"),
        "<html><body><p><Foo>x</Foo>y</p></body></html>"
    );
}

// ========== Namespaces ==========

#[test]
fn test_prefixed_elements_get_prefix_mappings() {
    let events = parse_to_events("<p><svg:rect/></p>").unwrap();
    let start = events
        .iter()
        .position(|event| matches!(event, Event::StartElement { qname, .. } if qname == "svg:rect"))
        .unwrap();
    assert_eq!(
        events[start - 1],
        Event::StartPrefixMapping {
            prefix: "svg".into(),
            uri: "urn:x-prefix:svg".into(),
        }
    );
    assert_eq!(
        events[start],
        Event::StartElement {
            uri: "urn:x-prefix:svg".into(),
            local_name: "rect".into(),
            qname: "svg:rect".into(),
            attributes: Vec::new(),
        }
    );
    assert!(matches!(&events[start + 1], Event::EndElement { qname, .. } if qname == "svg:rect"));
    assert_eq!(
        events[start + 2],
        Event::EndPrefixMapping {
            prefix: "svg".into()
        }
    );
}

#[test]
fn test_unprefixed_elements_use_schema_namespace() {
    let events = parse_to_events("<p>x").unwrap();
    assert!(events.iter().any(|event| matches!(
        event,
        Event::StartElement { uri, local_name, .. } if uri == HTML_NAMESPACE && local_name == "p"
    )));
}

#[test]
fn test_namespaces_can_be_disabled() {
    let options = ParserOptions::default().with_namespaces(false);
    let (events, _) = parse_with("<p><svg:rect/></p>", options);
    assert!(!events.iter().any(|event| matches!(
        event,
        Event::StartPrefixMapping { prefix, .. } if prefix == "svg"
    )));
    assert!(events.iter().all(|event| match event {
        Event::StartElement {
            uri, local_name, ..
        }
        | Event::EndElement {
            uri, local_name, ..
        } => uri.is_empty() && local_name.is_empty(),
        _ => true,
    }));
}

#[test]
fn test_translate_colons() {
    let options = ParserOptions::default().with_translate_colons(true);
    let (events, _) = parse_with("<p><svg:rect/></p>", options);
    assert_eq!(
        render(&events),
        "<html><body><p><svg_rect></svg_rect></p></body></html>"
    );
}

// ========== Whitespace ==========

#[test]
fn test_unplaceable_whitespace_is_dropped() {
    let (events, _) = parse_with("<ul> <li>x</li> </ul>", ParserOptions::default());
    assert_eq!(render(&events), "<html><body><ul><li>x</li></ul></body></html>");
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::IgnorableWhitespace { .. })));
}

#[test]
fn test_unplaceable_whitespace_can_be_reported() {
    let options = ParserOptions::default().with_ignorable_whitespace(true);
    let (events, _) = parse_with("<ul> <li>x</li> </ul>", options);
    let ignorable = events
        .iter()
        .filter(|event| matches!(event, Event::IgnorableWhitespace { text } if text == " "))
        .count();
    assert_eq!(ignorable, 2);
}

// ========== Comments, CDATA sections and processing instructions ==========

#[test]
fn test_comment_is_reported_with_double_dash_split() {
    let events = parse_to_events("<p>a<!-- x -- y -->b").unwrap();
    assert!(events.contains(&Event::Comment {
        text: " x - - y ".into()
    }));
    assert_eq!(render(&events), "<html><body><p>ab</p></body></html>");
}

#[test]
fn test_cdata_section_is_bracketed() {
    let events = parse_to_events("<p><![CDATA[a<b]]></p>").unwrap();
    let start = events
        .iter()
        .position(|event| *event == Event::StartCdata)
        .unwrap();
    assert_eq!(
        events[start + 1],
        Event::Characters {
            text: "a<b".into()
        }
    );
    assert_eq!(events[start + 2], Event::EndCdata);
}

#[test]
fn test_processing_instructions() {
    let events = parse_to_events(r#"<?xml version="1.0"?><?php echo 1 ?><?a:b c?><p>x"#).unwrap();
    let instructions: Vec<&Event> = events
        .iter()
        .filter(|event| matches!(event, Event::ProcessingInstruction { .. }))
        .collect();
    assert_eq!(
        instructions,
        [
            &Event::ProcessingInstruction {
                target: "php".into(),
                data: "echo 1 ".into(),
            },
            &Event::ProcessingInstruction {
                target: "a_b".into(),
                data: "c".into(),
            },
        ]
    );
}

// ========== DOCTYPE ==========

#[test]
fn test_public_doctype() {
    let events = parse_to_events(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd"><p>x"#,
    )
    .unwrap();
    assert_eq!(
        events[2],
        Event::Doctype {
            name: "html".into(),
            public_id: Some("-//W3C//DTD HTML 4.01//EN".into()),
            system_id: Some("http://www.w3.org/TR/html4/strict.dtd".into()),
        }
    );
}

#[test]
fn test_system_and_bare_doctypes() {
    let events = parse_to_events("<!doctype html system 'about:legacy-compat'>").unwrap();
    assert!(events.contains(&Event::Doctype {
        name: "html".into(),
        public_id: None,
        system_id: Some("about:legacy-compat".into()),
    }));

    let events = parse_to_events("<!DOCTYPE html>").unwrap();
    assert!(events.contains(&Event::Doctype {
        name: "html".into(),
        public_id: None,
        system_id: None,
    }));
}

#[test]
fn test_only_first_doctype_is_reported() {
    let (events, issues) = parse_with(
        "<!DOCTYPE html><!DOCTYPE other><p>x",
        ParserOptions::default(),
    );
    let doctypes = events
        .iter()
        .filter(|event| matches!(event, Event::Doctype { .. }))
        .count();
    assert_eq!(doctypes, 1);
    assert!(issues.contains(&IssueKind::DuplicateDoctype));
}

#[test]
fn test_other_declarations_are_ignored() {
    assert_eq!(repair("<!ELEMENT x ANY><p>y"), "<html><body><p>y</p></body></html>");
}

// ========== Tree building ==========

#[test]
fn test_tree_builder() {
    let tree = parse_to_tree("<!DOCTYPE html><p id=a>one<!--c-->two").unwrap();
    let children = tree.children(NodeId::ROOT);
    assert!(matches!(
        &tree.get(children[0]).unwrap().node_type,
        NodeType::Doctype { name, public_id, .. } if name == "html" && public_id.is_empty()
    ));

    let html = tree.document_element().unwrap();
    assert_eq!(tree.as_element(html).unwrap().namespace, HTML_NAMESPACE);
    let p = tree.elements_by_local_name(html, "p")[0];
    assert_eq!(tree.as_element(p).unwrap().id(), Some("a"));
    let kids = tree.children(p);
    assert_eq!(kids.len(), 3);
    assert_eq!(tree.as_text(kids[0]), Some("one"));
    assert!(matches!(
        &tree.get(kids[1]).unwrap().node_type,
        NodeType::Comment(text) if text == "c"
    ));
    assert_eq!(tree.text_content(p), "onetwo");
}

// ========== Parser API ==========

#[test]
fn test_parser_is_reusable() {
    let mut parser = HtmlParser::new();
    let mut first = EventRecorder::new();
    parser.parse("<b>x<table>", &mut first).unwrap();
    let mut second = EventRecorder::new();
    parser.parse("y", &mut second).unwrap();
    assert_eq!(render(second.events()), "<html><body>y</body></html>");
}

#[test]
fn test_parse_reader_replaces_invalid_utf8() {
    let mut recorder = EventRecorder::new();
    let _ = HtmlParser::new()
        .parse_reader(&b"<p>a\xFFb"[..], &mut recorder)
        .unwrap();
    assert_eq!(text_of(recorder.events()), "a\u{FFFD}b");
}

struct FailOnElement;

impl ContentHandler for FailOnElement {
    fn start_element(
        &mut self,
        _uri: &str,
        _local_name: &str,
        qname: &str,
        _attributes: &Attributes,
    ) -> slurry_html::Result<()> {
        Err(Error::handler(format!("refusing <{qname}>")))
    }
}

#[test]
fn test_handler_errors_abort_the_parse() {
    let err = HtmlParser::new()
        .parse("<p>x", &mut FailOnElement)
        .unwrap_err();
    assert!(matches!(err, Error::Handler(_)));
    assert_eq!(err.to_string(), "content handler failed: refusing <html>");
}

#[test]
fn test_events_serialize_with_tag() {
    let json = serde_json::to_value(Event::Comment { text: "c".into() }).unwrap();
    assert_eq!(json, serde_json::json!({ "event": "comment", "text": "c" }));
}
