//! Parsing markup fragments into free-standing nodes.
//!
//! Insertion operations such as [`NodeSet::append`](crate::NodeSet::append)
//! accept markup with any number of top-level nodes, for instance
//! `<a/>text<b/>`. The markup is parsed inside a wrapper element and the
//! wrapper's children are detached, so they can be placed anywhere in
//! another tree of the same [`Xot`].
//!
//! Markup that isn't well-formed is not an error for those operations:
//! it is inserted as literal text instead.
use tracing::{debug, trace};
use xot::{Node, Xot};

use crate::error::Error;

const WRAPPER: &str = "xot-query-fragment";

/// What to do with markup that isn't well-formed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Produce a single text node holding the markup literally.
    #[default]
    Text,
    /// Fail with [`Error::Markup`].
    Error,
}

/// Parse `markup` into detached nodes, in order.
///
/// ```rust
/// use xot_query::fragment::{parse_fragment, Fallback};
///
/// let mut xot = xot::Xot::new();
/// let nodes = parse_fragment(&mut xot, "<a/>between<b/>", Fallback::Text).unwrap();
/// assert_eq!(nodes.len(), 3);
/// assert!(xot.is_text(nodes[1]));
///
/// let nodes = parse_fragment(&mut xot, "<><aa>", Fallback::Text).unwrap();
/// assert_eq!(xot.text_str(nodes[0]), Some("<><aa>"));
///
/// assert!(parse_fragment(&mut xot, "<><aa>", Fallback::Error).is_err());
/// ```
pub fn parse_fragment(xot: &mut Xot, markup: &str, fallback: Fallback) -> Result<Vec<Node>, Error> {
    trace!(markup, "parsing fragment");
    let wrapped = format!("<{WRAPPER}>{markup}</{WRAPPER}>");
    let root = match xot.parse(&wrapped) {
        Ok(root) => root,
        Err(err) => {
            return match fallback {
                Fallback::Text => {
                    debug!(markup, "markup is not well-formed, inserting as text");
                    Ok(vec![xot.new_text(markup)])
                }
                Fallback::Error => Err(Error::Markup(err.to_string())),
            };
        }
    };
    lift(xot, root)
}

// Detach the children of the wrapper element, then drop the wrapper
// document so it doesn't linger in the arena.
fn lift(xot: &mut Xot, root: Node) -> Result<Vec<Node>, Error> {
    let wrapper = xot.document_element(root)?;
    let nodes: Vec<Node> = xot.children(wrapper).collect();
    for &node in &nodes {
        xot.detach(node)?;
    }
    xot.remove(root)?;
    Ok(nodes)
}

// Parsing can't fail with the text fallback, but detaching may in theory.
pub(crate) fn parse_lenient(xot: &mut Xot, markup: &str) -> Result<Vec<Node>, Error> {
    parse_fragment(xot, markup, Fallback::Text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element() {
        let mut xot = Xot::new();
        let nodes = parse_fragment(&mut xot, r#"<dvd id="6"/>"#, Fallback::Text).unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(xot.is_element(nodes[0]));
        assert_eq!(xot.parent(nodes[0]), None);
    }

    #[test]
    fn test_lift_releases_wrapper() {
        let mut xot = Xot::new();
        let root = xot.parse("<w><a/>t<b/></w>").unwrap();
        let wrapper = xot.document_element(root).unwrap();
        let nodes = lift(&mut xot, root).unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(xot.is_removed(root));
        assert!(xot.is_removed(wrapper));
        assert!(nodes.iter().all(|&node| !xot.is_removed(node)));
        assert!(nodes.iter().all(|&node| xot.parent(node).is_none()));
    }

    #[test]
    fn test_multiple_roots() {
        let mut xot = Xot::new();
        let nodes = parse_fragment(&mut xot, "<xx/><xx/>", Fallback::Text).unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|&n| xot.is_element(n)));
    }

    #[test]
    fn test_plain_text() {
        let mut xot = Xot::new();
        let nodes = parse_fragment(&mut xot, "a &amp; b", Fallback::Error).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(xot.text_str(nodes[0]), Some("a & b"));
    }

    #[test]
    fn test_empty_markup() {
        let mut xot = Xot::new();
        let nodes = parse_fragment(&mut xot, "", Fallback::Error).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_unbalanced_falls_back_to_text() {
        let mut xot = Xot::new();
        let nodes = parse_fragment(&mut xot, "<abc><x></abc>", Fallback::Text).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(xot.text_str(nodes[0]), Some("<abc><x></abc>"));
    }

    #[test]
    fn test_unbalanced_strict() {
        let mut xot = Xot::new();
        let err = parse_fragment(&mut xot, "<abc><x></abc>", Fallback::Error).unwrap_err();
        assert!(matches!(err, Error::Markup(_)));
    }
}
