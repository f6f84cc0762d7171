//! Tests for the lexical scanner, observed through a recording handler.

use slurry_html::scanner::FLUSH_THRESHOLD;
use slurry_html::{HtmlScanner, Result, ScanHandler};

/// Records every lexical event as a short `kind:payload` string.
///
/// Raw text is requested after the start tag of `script`, and requested
/// again after any end tag inside it that does not close it.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    last_tag: String,
    in_script: bool,
    raw_requested: bool,
}

impl Recorder {
    fn push(&mut self, kind: &str, payload: &str) -> Result<()> {
        self.events.push(format!("{kind}:{payload}"));
        Ok(())
    }
}

impl ScanHandler for Recorder {
    fn attribute_name(&mut self, name: &str) -> Result<()> {
        self.push("aname", name)
    }

    fn attribute_value(&mut self, value: &str) -> Result<()> {
        self.push("aval", value)
    }

    fn attribute_without_value(&mut self) -> Result<()> {
        self.push("adup", "")
    }

    fn start_tag_name(&mut self, name: &str) -> Result<()> {
        self.last_tag = name.to_string();
        self.push("gi", name)
    }

    fn start_tag_close(&mut self) -> Result<()> {
        if self.last_tag == "script" {
            self.in_script = true;
            self.raw_requested = true;
        }
        self.push("stagc", "")
    }

    fn empty_tag_close(&mut self) -> Result<()> {
        self.push("stage", "")
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        if self.in_script {
            if name.trim_end() == "script" {
                self.in_script = false;
            } else {
                self.raw_requested = true;
            }
        }
        self.push("etag", name)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.push("text", text)
    }

    fn cdata_section(&mut self, text: &str) -> Result<()> {
        self.push("cdata", text)
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        self.push("comment", text)
    }

    fn declaration(&mut self, text: &str) -> Result<()> {
        self.push("decl", text)
    }

    fn pi_target(&mut self, target: &str) -> Result<()> {
        self.push("pitarget", target)
    }

    fn pi(&mut self, data: &str) -> Result<()> {
        self.push("pi", data)
    }

    fn entity(&mut self, name: &str) -> Option<u32> {
        match name {
            "amp" => Some(38),
            "lt" => Some(60),
            _ => name.strip_prefix('#')?.parse().ok(),
        }
    }

    fn eof(&mut self) -> Result<()> {
        self.push("eof", "")
    }

    fn take_cdata_request(&mut self) -> bool {
        std::mem::take(&mut self.raw_requested)
    }
}

fn scan(input: &str) -> Vec<String> {
    let mut recorder = Recorder::default();
    HtmlScanner::new().scan(input, &mut recorder).unwrap();
    recorder.events
}

// ========== Tags and attributes ==========

#[test]
fn test_start_tag_with_attributes() {
    assert_eq!(
        scan(r#"<p class="a b" id=x checked>hi</p>"#),
        [
            "gi:p",
            "aname:class",
            "aval:a b",
            "aname:id",
            "aval:x",
            "aname:checked",
            "adup:",
            "stagc:",
            "text:hi",
            "etag:p",
            "eof:",
        ]
    );
}

#[test]
fn test_whitespace_in_quoted_value_becomes_space() {
    assert_eq!(
        scan("<a title='x\ty\nz'>"),
        ["gi:a", "aname:title", "aval:x y z", "stagc:", "eof:"]
    );
}

#[test]
fn test_empty_element_tags() {
    assert_eq!(scan("<br/>"), ["gi:br", "stage:", "eof:"]);
    assert_eq!(
        scan("<img src=a />"),
        ["gi:img", "aname:src", "aval:a", "stage:", "eof:"]
    );
}

#[test]
fn test_empty_end_tag() {
    assert_eq!(scan("</>"), ["etag:", "eof:"]);
}

// ========== Text ==========

#[test]
fn test_stray_less_than_is_text() {
    assert_eq!(scan("a < b"), ["text:a ", "text:< b", "eof:"]);
    assert_eq!(scan("x<"), ["text:x", "text:<", "eof:"]);
}

#[test]
fn test_line_endings_and_controls() {
    assert_eq!(scan("a\r\nb\rc\u{1}d"), ["text:a\nb\ncd", "eof:"]);
}

#[test]
fn test_non_characters_are_skipped() {
    assert_eq!(scan("a\u{FFFE}b\u{FFFF}c"), ["text:abc", "eof:"]);
}

#[test]
fn test_leading_byte_order_mark_is_skipped() {
    assert_eq!(scan("\u{FEFF}x"), ["text:x", "eof:"]);
}

#[test]
fn test_windows_1252_input_characters() {
    assert_eq!(scan("\u{93}q\u{94}"), ["text:\u{201C}q\u{201D}", "eof:"]);
}

#[test]
fn test_long_text_is_flushed_in_pieces() {
    let input = "a".repeat(FLUSH_THRESHOLD * 3);
    let events = scan(&input);
    let texts: Vec<&str> = events
        .iter()
        .filter_map(|event| event.strip_prefix("text:"))
        .collect();
    assert!(texts.len() > 1);
    assert!(texts.iter().all(|text| text.len() <= FLUSH_THRESHOLD));
    assert_eq!(texts.concat(), input);
}

// ========== References ==========

#[test]
fn test_references_in_text() {
    assert_eq!(
        scan("a&amp;b&#65;&bogus;c"),
        ["text:a", "text:&b", "text:A", "text:&bogus;c", "eof:"]
    );
}

#[test]
fn test_reference_without_semicolon_keeps_next_char() {
    assert_eq!(scan("&lt b"), ["text:< b", "eof:"]);
}

#[test]
fn test_unterminated_reference_at_end() {
    assert_eq!(scan("x&amp"), ["text:x", "text:&", "eof:"]);
    assert_eq!(scan("x&zz"), ["text:x", "text:&zz", "eof:"]);
}

// ========== Markup declarations ==========

#[test]
fn test_comment_double_dash_is_rewritten() {
    assert_eq!(
        scan("<!-- a -- b -->"),
        ["comment: a - - b ", "eof:"]
    );
}

#[test]
fn test_declaration() {
    assert_eq!(scan("<!DOCTYPE html>"), ["decl:DOCTYPE html", "eof:"]);
}

#[test]
fn test_cdata_section_keeps_inner_brackets() {
    assert_eq!(scan("<![CDATA[x]]y]]]>"), ["cdata:x]]y]", "eof:"]);
    assert_eq!(scan("<![CDATA[a<b>]]>"), ["cdata:a<b>", "eof:"]);
}

#[test]
fn test_processing_instructions() {
    assert_eq!(scan("<?php echo?>"), ["pitarget:php", "pi:echo?", "eof:"]);
    assert_eq!(scan("<?x>"), ["pitarget:x", "pi:", "eof:"]);
}

// ========== Raw text ==========

#[test]
fn test_raw_text_after_script_start() {
    assert_eq!(
        scan("<script>a<b>c</b >d</script>x"),
        [
            "gi:script",
            "stagc:",
            "text:a<b>c",
            "etag:b ",
            "text:d",
            "etag:script",
            "text:x",
            "eof:",
        ]
    );
}

#[test]
fn test_raw_text_less_than_runs() {
    assert_eq!(
        scan("<script>a<<b</script>"),
        ["gi:script", "stagc:", "text:a<<b", "etag:script", "eof:"]
    );
}

// ========== Locator ==========

#[test]
fn test_locator_tracks_lines() {
    let mut scanner = HtmlScanner::new();
    scanner.reset_locator(Some("-//X//Y"), Some("doc.html"));
    let mut recorder = Recorder::default();
    scanner.scan("a\nb\n<p>", &mut recorder).unwrap();
    let locator = scanner.locator();
    assert_eq!(locator.line, 3);
    assert_eq!(locator.public_id.as_deref(), Some("-//X//Y"));
    assert_eq!(locator.system_id.as_deref(), Some("doc.html"));
}

#[test]
fn test_scanner_is_reusable() {
    let mut scanner = HtmlScanner::new();
    let mut first = Recorder::default();
    scanner.scan("<p", &mut first).unwrap();
    let mut second = Recorder::default();
    scanner.scan("x", &mut second).unwrap();
    assert_eq!(second.events, ["text:x", "eof:"]);
}
