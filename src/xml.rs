//! Minimal in-memory XML element tree and its writer.
//!
//! PAGE documents only need elements, ordered attributes and text, so the
//! tree is a plain owned structure with no namespace resolution: namespace
//! declarations are ordinary attributes (`xmlns`, `xmlns:xsi`) written in
//! insertion order. Output is deterministic: the same tree always produces
//! the same bytes for the same [`WriteOptions`].

use std::fmt::Write as _;
use std::io;

/// The prolog written when [`WriteOptions::xml_declaration`] is set.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. Re-setting an existing name replaces its value in
    /// place, keeping the original position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Builder-style [`Element::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// First child element with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Serialise the tree to a string.
    pub fn to_xml_string(&self, opts: &WriteOptions) -> String {
        let mut out = String::new();
        if opts.xml_declaration {
            out.push_str(XML_DECLARATION);
            if opts.indent.is_some() {
                out.push('\n');
            }
        }
        self.write_element(&mut out, opts.indent, 0);
        if opts.indent.is_some() {
            out.push('\n');
        }
        out
    }

    /// Serialise the tree into any writer.
    pub fn write_to<W: io::Write>(&self, w: &mut W, opts: &WriteOptions) -> io::Result<()> {
        w.write_all(self.to_xml_string(opts).as_bytes())
    }

    fn write_element(&self, out: &mut String, indent: Option<usize>, depth: usize) {
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attributes {
            // Writing into a String cannot fail.
            let _ = write!(out, " {}=\"{}\"", k, escape_attr(v));
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        // Only break lines when every child is an element; text content is
        // never re-flowed.
        let block = indent.filter(|_| self.children.iter().all(|n| matches!(n, Node::Element(_))));
        for child in &self.children {
            match child {
                Node::Element(e) => {
                    if let Some(width) = block {
                        newline(out, width, depth + 1);
                    }
                    e.write_element(out, indent, depth + 1);
                }
                Node::Text(t) => out.push_str(&escape_text(t)),
            }
        }
        if let Some(width) = block {
            newline(out, width, depth);
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit [`XML_DECLARATION`] before the root element.
    pub xml_declaration: bool,
    /// Indent width in spaces; `None` writes everything on one line.
    pub indent: Option<usize>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            indent: None,
        }
    }
}

fn newline(out: &mut String, width: usize, depth: usize) {
    out.push('\n');
    out.extend(std::iter::repeat_n(' ', width * depth));
}

/// Escape a string for use inside a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a string for use as element text.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `c` may appear in an XML 1.0 document.
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Element {
        Element::new("Root")
            .with_attr("a", "1")
            .with_child(Element::new("Name").with_text("x & y"))
            .with_child(Element::new("Empty").with_attr("v", "\"q\""))
    }

    #[test]
    fn compact_output() {
        let opts = WriteOptions {
            xml_declaration: false,
            indent: None,
        };
        assert_eq!(
            sample().to_xml_string(&opts),
            r#"<Root a="1"><Name>x &amp; y</Name><Empty v="&quot;q&quot;"/></Root>"#
        );
    }

    #[test]
    fn indented_output() {
        let opts = WriteOptions {
            xml_declaration: true,
            indent: Some(2),
        };
        let expected = format!(
            "{XML_DECLARATION}\n<Root a=\"1\">\n  <Name>x &amp; y</Name>\n  <Empty v=\"&quot;q&quot;\"/>\n</Root>\n"
        );
        assert_eq!(sample().to_xml_string(&opts), expected);
    }

    #[test]
    fn declaration_precedes_root_when_compact() {
        let out = Element::new("R").to_xml_string(&WriteOptions::default());
        assert_eq!(out, format!("{XML_DECLARATION}<R/>"));
    }

    #[test]
    fn set_attr_replaces_in_place() {
        let mut e = Element::new("E").with_attr("type", "p").with_attr("id", "r0");
        e.set_attr("type", "q");
        assert_eq!(
            e.attributes(),
            &[
                ("type".to_string(), "q".to_string()),
                ("id".to_string(), "r0".to_string())
            ]
        );
    }

    #[test]
    fn accessors() {
        let root = sample();
        assert_eq!(root.find("Name").map(Element::text).as_deref(), Some("x & y"));
        assert_eq!(root.children_named("Empty").count(), 1);
        assert_eq!(root.attr("a"), Some("1"));
        assert_eq!(root.attr("missing"), None);
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_attr("a<b>&\"c\n"), "a&lt;b&gt;&amp;&quot;c&#10;");
        assert_eq!(escape_text("<p>\"ok\"</p>"), "&lt;p&gt;\"ok\"&lt;/p&gt;");
    }

    #[test]
    fn xml_char_ranges() {
        assert!(is_xml_char('A'));
        assert!(is_xml_char('\n'));
        assert!(is_xml_char('é'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{B}'));
        assert!(!is_xml_char('\u{FFFE}'));
    }

    #[test]
    fn write_to_matches_string() {
        let opts = WriteOptions::default();
        let mut buf = Vec::new();
        sample().write_to(&mut buf, &opts).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), sample().to_xml_string(&opts));
    }
}
