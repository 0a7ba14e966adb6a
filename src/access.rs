use xot::{Node, Xot};

use crate::error::Error;
use crate::filter::attribute;
use crate::nodeset::NodeSet;

/// ## Read-only access
///
/// Missing values are `None`, never errors: an empty set, a node without
/// the attribute, or a node that isn't an element all read as absent.
impl NodeSet {
    /// Value of attribute `name` on the first node.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse(r#"<doc><a id="1"/><a id="2"/></doc>"#).unwrap();
    /// let a = NodeSet::from_document(&xot, doc).children(&xot);
    /// assert_eq!(a.attr(&xot, "id"), Some("1"));
    /// assert_eq!(a.attr(&xot, "missing"), None);
    /// ```
    pub fn attr<'a>(&self, xot: &'a Xot, name: &str) -> Option<&'a str> {
        self.get(0).and_then(|node| attribute(xot, node, name))
    }

    /// Values of attribute `name`, one entry per node.
    pub fn attrs<'a>(&self, xot: &'a Xot, name: &str) -> Vec<Option<&'a str>> {
        self.iter().map(|node| attribute(xot, node, name)).collect()
    }

    /// Values of the `id` attribute, one entry per node.
    pub fn ids<'a>(&self, xot: &'a Xot) -> Vec<Option<&'a str>> {
        self.attrs(xot, "id")
    }

    /// Text content of the first node: all descendant text, concatenated.
    pub fn text(&self, xot: &Xot) -> Option<String> {
        self.get(0).map(|node| xot.string_value(node))
    }

    /// Text content of every node.
    pub fn texts(&self, xot: &Xot) -> Vec<String> {
        self.iter().map(|node| xot.string_value(node)).collect()
    }

    /// Content of the first node.
    ///
    /// If the node holds nothing but text this is that text as-is.
    /// Otherwise it is the children serialized as XML.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a>x &amp; y</a><b><c/>z</b></doc>").unwrap();
    /// let set = NodeSet::from_document(&xot, doc).children(&xot);
    /// assert_eq!(set.contents(&xot).unwrap(), vec!["x & y", "<c/>z"]);
    /// ```
    pub fn content(&self, xot: &Xot) -> Result<Option<String>, Error> {
        self.get(0).map(|node| content_of(xot, node)).transpose()
    }

    /// Content of every node.
    pub fn contents(&self, xot: &Xot) -> Result<Vec<String>, Error> {
        self.iter().map(|node| content_of(xot, node)).collect()
    }
}

fn content_of(xot: &Xot, node: Node) -> Result<String, Error> {
    let mut content = String::new();
    if xot.children(node).all(|child| xot.is_text(child)) {
        for child in xot.children(node) {
            if let Some(text) = xot.text_str(child) {
                content.push_str(text);
            }
        }
        return Ok(content);
    }
    for child in xot.children(node) {
        content.push_str(&xot.to_string(child)?);
    }
    Ok(content)
}
