//! Document tree → TextMate property-list XML
//!
//! ## Format
//!
//! - XML declaration and the Apple plist DOCTYPE
//! - `<plist version="1.0">` wrapping an optional generator comment and the root `<dict>`
//! - Dict entries → `<key>` followed by the value element, in insertion order
//! - Strings → `<string>`, arrays → `<array>`; empty containers are written self-closing
//!
//! ## Example
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
//! <plist version="1.0">
//!   <!-- Generated by iro -->
//!   <dict>
//!     <key>name</key>
//!     <string>demo</string>
//!   </dict>
//! </plist>
//! ```
//!
//! Escaping is left to quick-xml. What escaping cannot fix, control characters that XML 1.0
//! forbids outright, fails the render.

use super::TextmateOptions;
use crate::error::CompileError;
use crate::plist::{Dict, Value};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const PLIST_DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Render a complete TextMate grammar document
pub fn render(root: &Dict, options: &TextmateOptions) -> Result<String, CompileError> {
    let mut plist = PlistWriter::new(options.indent_width);

    plist.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    plist.event(Event::DocType(BytesText::from_escaped(PLIST_DOCTYPE)))?;
    plist.event(Event::Start(
        BytesStart::new("plist").with_attributes([("version", "1.0")]),
    ))?;
    if let Some(comment) = &options.generator_comment {
        plist.comment(comment)?;
    }
    plist.dict(root)?;
    plist.event(Event::End(BytesEnd::new("plist")))?;

    let mut output = String::from_utf8(plist.writer.into_inner())
        .map_err(|e| CompileError::Format(e.to_string()))?;
    output.push('\n');
    Ok(output)
}

struct PlistWriter {
    writer: Writer<Vec<u8>>,
}

impl PlistWriter {
    fn new(indent_width: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', indent_width),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), CompileError> {
        self.writer
            .write_event(event)
            .map_err(|e| CompileError::Format(e.to_string()))
    }

    fn comment(&mut self, text: &str) -> Result<(), CompileError> {
        check_chars(text)?;
        if text.contains("--") || text.ends_with('-') {
            return Err(CompileError::Format(format!(
                "comment '{}' cannot appear in an XML comment",
                text
            )));
        }
        self.event(Event::Comment(BytesText::from_escaped(format!(" {} ", text))))
    }

    fn text_element(&mut self, tag: &str, text: &str) -> Result<(), CompileError> {
        check_chars(text)?;
        self.event(Event::Start(BytesStart::new(tag)))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.event(Event::End(BytesEnd::new(tag)))
    }

    fn value(&mut self, value: &Value) -> Result<(), CompileError> {
        match value {
            Value::String(s) => self.text_element("string", s),
            Value::Array(items) => self.array(items),
            Value::Dict(dict) => self.dict(dict),
        }
    }

    fn array(&mut self, items: &[Value]) -> Result<(), CompileError> {
        if items.is_empty() {
            return self.event(Event::Empty(BytesStart::new("array")));
        }
        self.event(Event::Start(BytesStart::new("array")))?;
        for item in items {
            self.value(item)?;
        }
        self.event(Event::End(BytesEnd::new("array")))
    }

    fn dict(&mut self, dict: &Dict) -> Result<(), CompileError> {
        if dict.is_empty() {
            return self.event(Event::Empty(BytesStart::new("dict")));
        }
        self.event(Event::Start(BytesStart::new("dict")))?;
        for (key, value) in dict.iter() {
            self.text_element("key", key)?;
            self.value(value)?;
        }
        self.event(Event::End(BytesEnd::new("dict")))
    }
}

/// Reject characters outside the XML 1.0 `Char` production
fn check_chars(text: &str) -> Result<(), CompileError> {
    let forbidden = |c: char| {
        matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
    };
    match text.chars().find(|&c| forbidden(c)) {
        Some(c) => Err(CompileError::Format(format!(
            "character U+{:04X} in '{}' is not allowed in XML",
            c as u32,
            text.escape_debug()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> TextmateOptions {
        TextmateOptions::default()
    }

    #[test]
    fn test_header() {
        let xml = render(&Dict::new().with("name", "demo"), &options()).unwrap();
        let lines: Vec<_> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<!DOCTYPE plist PUBLIC"));
        assert_eq!(lines[2], r#"<plist version="1.0">"#);
        assert_eq!(lines[3], "  <!-- Generated by iro -->");
        assert_eq!(lines[4], "  <dict>");
        assert_eq!(lines[5], "    <key>name</key>");
        assert_eq!(lines[6], "    <string>demo</string>");
        assert_eq!(lines[7], "  </dict>");
        assert_eq!(lines[8], "</plist>");
        assert!(xml.ends_with("</plist>\n"));
    }

    #[test]
    fn test_without_comment_and_custom_indent() {
        let options = TextmateOptions {
            indent_width: 4,
            generator_comment: None,
            ..TextmateOptions::default()
        };
        let xml = render(&Dict::new().with("name", "demo"), &options).unwrap();

        assert!(!xml.contains("<!--"));
        assert!(xml.contains("\n    <dict>\n        <key>name</key>"));
    }

    #[test]
    fn test_nested_values() {
        let root = Dict::new()
            .with("fileTypes", vec![Value::from("a"), Value::from("b")])
            .with("patterns", Vec::<Value>::new())
            .with("repository", Dict::new());
        let xml = render(&root, &options()).unwrap();

        assert!(xml.contains("<string>a</string>"));
        assert!(xml.contains("<string>b</string>"));
        assert!(xml.contains("<array/>"));
        assert!(xml.contains("<dict/>"));
    }

    #[test]
    fn test_escaping() {
        let root = Dict::new().with("match", r#"<a & "b">"#);
        let xml = render(&root, &options()).unwrap();

        assert!(xml.contains("&lt;a &amp; "));
        assert!(xml.contains("&gt;</string>"));
        assert!(!xml.contains("<a & "));
    }

    #[test]
    fn test_forbidden_characters() {
        let root = Dict::new().with("match", "a\u{1}b");
        match render(&root, &options()) {
            Err(CompileError::Format(msg)) => assert!(msg.contains("U+0001")),
            other => panic!("Expected format error, got {:?}", other),
        }

        let root = Dict::new().with("match", "tab\tand\nnewline are fine");
        assert!(render(&root, &options()).is_ok());
    }

    #[test]
    fn test_comment_with_double_dash() {
        let options = TextmateOptions {
            generator_comment: Some("made -- by hand".to_string()),
            ..TextmateOptions::default()
        };
        assert!(matches!(
            render(&Dict::new(), &options),
            Err(CompileError::Format(_))
        ));
    }
}
