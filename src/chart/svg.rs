//! SVG element tree
//!
//! A small owned DOM for building chart markup. Elements render through
//! [`fmt::Display`]; attribute values and text are escaped.

use std::fmt;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Child of an [`Element`]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An SVG element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value for the same key
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// All descendants with the given tag name, depth-first
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect(name, found);
        }
    }

    /// Descendants whose `class` attribute contains `class`
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_class(class, &mut found);
        found
    }

    fn collect_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        for child in self.elements() {
            let matches = child
                .get_attr("class")
                .map(|c| c.split_whitespace().any(|c| c == class))
                .unwrap_or(false);
            if matches {
                found.push(child);
            }
            child.collect_class(class, found);
        }
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => out.push_str(&el.text_content()),
            }
        }
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (key, value) in &self.attrs {
            write!(f, " {}=\"{}\"", key, Escaped(value))?;
        }

        if self.children.is_empty() {
            return f.write_str("/>");
        }

        f.write_str(">")?;
        for node in &self.children {
            match node {
                Node::Element(el) => write!(f, "{}", el)?,
                Node::Text(text) => write!(f, "{}", Escaped(text))?,
            }
        }
        write!(f, "</{}>", self.name)
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// Escape `text` for use in markup text or a quoted attribute
pub fn escape(text: &str) -> String {
    Escaped(text).to_string()
}

/// Outer `<svg>` element of the given pixel size
pub fn svg_root(width: f64, height: f64) -> Element {
    Element::new("svg")
        .attr("xmlns", SVG_NAMESPACE)
        .attr("width", num(width))
        .attr("height", num(height))
        .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
}

/// `translate(x,y)` transform value
pub fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", num(x), num(y))
}

/// Format a coordinate with at most two decimals and no trailing zeros
pub fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{:.2}", rounded);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let el = Element::new("g")
            .attr("class", "bars")
            .child(Element::new("rect").attr("x", 1).attr("y", 2))
            .child(Element::new("text").text("Rain"));

        assert_eq!(
            el.to_string(),
            r#"<g class="bars"><rect x="1" y="2"/><text>Rain</text></g>"#
        );
    }

    #[test]
    fn test_escaping() {
        let el = Element::new("text")
            .attr("data-key", "a\"b")
            .text("Sleet & <Hail>");
        assert_eq!(
            el.to_string(),
            r#"<text data-key="a&quot;b">Sleet &amp; &lt;Hail&gt;</text>"#
        );
    }

    #[test]
    fn test_attr_replaces() {
        let el = Element::new("rect").attr("height", 0).attr("height", 10);
        assert_eq!(el.get_attr("height"), Some("10"));
        assert_eq!(el.to_string(), r#"<rect height="10"/>"#);
    }

    #[test]
    fn test_find_helpers() {
        let doc = svg_root(100.0, 50.0).child(
            Element::new("g")
                .child(Element::new("path").attr("class", "line line-male"))
                .child(Element::new("path").attr("class", "domain")),
        );

        assert_eq!(doc.find_all("path").len(), 2);
        assert_eq!(doc.find_by_class("line").len(), 1);
        assert_eq!(doc.find_by_class("line-male").len(), 1);
    }

    #[test]
    fn test_num_format() {
        assert_eq!(num(100.0), "100");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(0.1 + 0.2), "0.3");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(-3.456), "-3.46");
    }
}
