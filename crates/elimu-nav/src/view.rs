//! Typed view tree with escaped HTML serialization.
//!
//! Views are built from [`Element`] and text nodes instead of string
//! templates. Every text node and attribute value is escaped when the tree is
//! serialized, so backend data such as resource titles can never inject markup.

use std::fmt;

/// Attribute marking the element a deferred data load fills.
pub const SLOT_ATTR: &str = "data-slot";
/// Attribute naming the view a root element belongs to.
pub const VIEW_ATTR: &str = "data-view";
/// Attribute opting an anchor into client-side navigation.
pub const NAV_ATTR: &str = "data-nav";

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in a view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    /// An element with attributes and children.
    Element(Element),
    /// Escaped text.
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<ViewNode>,
}

/// Start building an element.
#[must_use]
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

/// A text node.
#[must_use]
pub fn text(value: impl Into<String>) -> ViewNode {
    ViewNode::Text(value.into())
}

/// An anchor that the navigation controller intercepts.
#[must_use]
pub fn nav_link(href: impl Into<String>, label: impl Into<String>) -> Element {
    el("a").attr("href", href).attr(NAV_ATTR, "true").text(label)
}

impl Element {
    /// Empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value)
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ViewNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Attribute value by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child nodes.
    #[must_use]
    pub fn child_nodes(&self) -> &[ViewNode] {
        &self.children
    }

    /// Replace all children with `node`.
    pub fn replace_children(&mut self, node: ViewNode) {
        self.children.clear();
        self.children.push(node);
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for ViewNode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ViewNode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl ViewNode {
    /// Serialize to HTML, escaping text and attribute values.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(value) => escape_into(value, out),
            Self::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');

                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Element(element) => element.children.iter().map(Self::text_content).collect(),
        }
    }

    /// The element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// This node and every descendant element, in document order.
    #[must_use]
    pub fn elements(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_elements(&mut found);
        found
    }

    fn collect_elements<'a>(&'a self, found: &mut Vec<&'a Element>) {
        if let Self::Element(element) = self {
            found.push(element);
            for child in &element.children {
                child.collect_elements(found);
            }
        }
    }

    /// Elements whose attribute `name` equals `value`.
    #[must_use]
    pub fn find_by_attr(&self, name: &str, value: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|element| element.get_attr(name) == Some(value))
            .collect()
    }

    /// The element marked as slot `slot`.
    pub fn slot_mut(&mut self, slot: &str) -> Option<&mut Element> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => {
                if element.get_attr(SLOT_ATTR) == Some(slot) {
                    return Some(element);
                }
                element
                    .children
                    .iter_mut()
                    .find_map(|child| child.slot_mut(slot))
            }
        }
    }
}

impl fmt::Display for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Escape `&`, `<`, `>`, `"` and `'`.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(value, &mut out);
    out
}

fn escape_into(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}
