//! # SQL Synthesizer
//!
//! Statement bodies for the derived operations, built as a small XML element
//! tree that mirrors the host's SQL map documents. [`statements`] holds the
//! four statement builders, [`chunking`] the column layout they share.

pub mod chunking;
pub mod statements;

pub use chunking::{ChunkLayout, chunk};
pub use statements::synthesize;

use serde::Serialize;
use std::fmt::Write;

const INDENT: &str = "  ";

/// A node inside a statement element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    #[must_use]
    pub fn texts(mut self, texts: impl IntoIterator<Item = String>) -> Self {
        self.children.extend(texts.into_iter().map(XmlNode::Text));
        self
    }

    #[must_use]
    pub fn child(mut self, element: XmlElement) -> Self {
        self.children.push(XmlNode::Element(element));
        self
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The statement id used for lookup and override
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Direct text children, in order
    #[must_use]
    pub fn text_lines(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    #[must_use]
    pub fn child_element(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|node| match node {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Text of this element and its descendants on one line, indentation
    /// stripped. Pieces are separated by a space except after `(` or `,`
    /// and before `)` or `,`. Includes stay as `<include refid="..."/>`.
    #[must_use]
    pub fn flat_sql(&self) -> String {
        let mut pieces = Vec::new();
        self.collect_pieces(&mut pieces);

        let mut out = String::new();
        for piece in pieces {
            let glued = out.is_empty()
                || out.ends_with(['(', ',', ' '])
                || piece.starts_with([')', ',']);
            if !glued {
                out.push(' ');
            }
            out.push_str(&piece);
        }
        out
    }

    fn collect_pieces(&self, pieces: &mut Vec<String>) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => pieces.push(text.trim_start().to_string()),
                XmlNode::Element(element) if element.name == "include" => {
                    if let Some(refid) = element.attribute("refid") {
                        pieces.push(format!("<include refid=\"{refid}\"/>"));
                    }
                }
                XmlNode::Element(element) => element.collect_pieces(pieces),
            }
        }
    }

    /// Render with `depth` levels of two-space indentation
    #[must_use]
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, depth);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        let _ = write!(out, "{pad}<{}", self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape(value, true));
        }
        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }
        out.push_str(">\n");
        for node in &self.children {
            match node {
                XmlNode::Text(text) => {
                    let _ = writeln!(out, "{pad}{INDENT}{}", escape(text, false));
                }
                XmlNode::Element(element) => element.render_into(out, depth + 1),
            }
        }
        let _ = writeln!(out, "{pad}</{}>", self.name);
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A whole SQL map: a namespace (the mapper type) and its top-level elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlMapDocument {
    pub namespace: String,
    pub elements: Vec<XmlElement>,
}

impl SqlMapDocument {
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&XmlElement> {
        self.elements.iter().find(|e| e.id() == Some(id))
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.elements.iter().filter_map(XmlElement::id).collect()
    }

    /// Full XML text including the mapper DOCTYPE
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE mapper PUBLIC \"-//mybatis.org//DTD Mapper 3.0//EN\" \"http://mybatis.org/dtd/mybatis-3-mapper.dtd\">\n",
        );
        let _ = writeln!(out, "<mapper namespace=\"{}\">", escape(&self.namespace, true));
        let rendered: Vec<String> = self.elements.iter().map(|e| e.render(1)).collect();
        out.push_str(&rendered.join("\n"));
        out.push_str("</mapper>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_element() {
        let element = XmlElement::new("select")
            .attr("id", "listByPrimaryKey")
            .text("select")
            .child(XmlElement::new("include").attr("refid", "Base_Column_List"))
            .text("from user");

        let expected = "\
  <select id=\"listByPrimaryKey\">
    select
    <include refid=\"Base_Column_List\" />
    from user
  </select>
";
        assert_eq!(element.render(1), expected);
    }

    #[test]
    fn test_text_is_escaped() {
        let element = XmlElement::new("select").attr("test", "a \"b\"").text("x < 1");
        let rendered = element.render(0);
        assert!(rendered.contains("test=\"a &quot;b&quot;\""));
        assert!(rendered.contains("x &lt; 1"));
    }

    #[test]
    fn test_flat_sql_strips_indentation() {
        let element = XmlElement::new("insert")
            .text("insert into t (")
            .text("  a,b,")
            .text("  c")
            .text(") values ");
        assert_eq!(element.flat_sql(), "insert into t (a,b,c) values ");
    }

    #[test]
    fn test_document_lookup_and_render() {
        let mut document = SqlMapDocument::new("com.example.UserMapper");
        document.elements.push(XmlElement::new("sql").attr("id", "Base_Column_List").text("id"));
        assert!(document.element("Base_Column_List").is_some());
        assert_eq!(document.ids(), vec!["Base_Column_List"]);

        let xml = document.render();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<mapper namespace=\"com.example.UserMapper\">"));
        assert!(xml.ends_with("</mapper>\n"));
    }
}
