//! Minimal SVG element tree. Every text node and attribute value goes through
//! [`escape`] on serialization, so callers never splice raw strings into markup.

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Numeric attribute, formatted without trailing zeros.
    pub fn num(self, name: &'static str, value: f64) -> Self {
        self.attr(name, format_number(value))
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    pub fn children(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(elements.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::Text(content.into()));
        self
    }

    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_to(out),
                Node::Text(content) => out.push_str(&escape(content)),
            }
        }
        let _ = write!(out, "</{}>", self.name);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

/// Serialize a standalone document with the XML declaration.
pub fn document(root: &Element) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    root.write_to(&mut out);
    out.push('\n');
    out
}

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let formatted = format!("{rounded:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let element = Element::new("text")
            .attr("data-title", "\"quoted\" & 'single'")
            .text("<script>alert(1)</script>");

        assert_eq!(
            element.render(),
            "<text data-title=\"&quot;quoted&quot; &amp; &apos;single&apos;\">&lt;script&gt;alert(1)&lt;/script&gt;</text>"
        );
    }

    #[test]
    fn nests_children_and_self_closes_empty_elements() {
        let group = Element::new("g")
            .child(Element::new("rect").num("x", 12.0).num("width", 96.5))
            .child(Element::new("text").text("A"));

        assert_eq!(
            group.render(),
            "<g><rect x=\"12\" width=\"96.5\"/><text>A</text></g>"
        );
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(format_number(26.0), "26");
        assert_eq!(format_number(46.4), "46.4");
        assert_eq!(format_number(31.456), "31.46");
        assert_eq!(format_number(-0.001), "0");
    }
}
