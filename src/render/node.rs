//! Typed presentation nodes.
//!
//! Fragments are built as a small tree of elements and text children and
//! serialized by a single writer. Text and attribute values are escaped at
//! the serialization boundary, so individual renderers never concatenate
//! markup from untrusted strings.

use super::markdown::escape_html;

/// A presentation node: an element with attributes and children, escaped
/// text, or markup already produced by a trusted renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<HtmlNode>,
    },
    /// Plain text; escaped when written.
    Text(String),
    /// Markup produced inside this module (markdown output); written as-is.
    Markup(String),
}

impl HtmlNode {
    /// Create an empty element.
    pub fn element(tag: impl Into<String>) -> Self {
        HtmlNode::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node; it is escaped when written.
    pub fn text(content: impl Into<String>) -> Self {
        HtmlNode::Text(content.into())
    }

    /// Add an attribute. No-op on non-element nodes.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let HtmlNode::Element { ref mut attrs, .. } = self {
            attrs.push((name.into(), value.into()));
        }
        self
    }

    /// Add a child node. No-op on non-element nodes.
    pub fn child(mut self, node: HtmlNode) -> Self {
        if let HtmlNode::Element { ref mut children, .. } = self {
            children.push(node);
        }
        self
    }

    /// Add a child only when `node` is Some.
    pub fn maybe_child(self, node: Option<HtmlNode>) -> Self {
        match node {
            Some(n) => self.child(n),
            None => self,
        }
    }

    /// Serialize the node tree to HTML, escaping text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        match self {
            HtmlNode::Text(text) => out.push_str(&escape_html(text)),
            HtmlNode::Markup(markup) => out.push_str(markup),
            HtmlNode::Element { tag, attrs, children } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                for child in children {
                    child.write(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
