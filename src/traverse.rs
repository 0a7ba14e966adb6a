use genawaiter::rc::gen;
use genawaiter::yield_;
use xot::{Node, Xot};

use crate::filter::Selector;
use crate::nodeset::{select, unique, NodeSet};

/// Direction of a walk from a node. Only elements are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    // excludes the node itself
    Descendant,
    // nearest first
    FollowingSibling,
    // nearest first
    PrecedingSibling,
    // nearest first, never the document node
    Ancestor,
}

fn walk(xot: &Xot, node: Node, axis: Axis) -> impl Iterator<Item = Node> + '_ {
    gen!({
        match axis {
            Axis::Child => {
                for child in xot.children(node) {
                    if xot.is_element(child) {
                        yield_!(child);
                    }
                }
            }
            Axis::Descendant => {
                for descendant in xot.descendants(node).skip(1) {
                    if xot.is_element(descendant) {
                        yield_!(descendant);
                    }
                }
            }
            Axis::FollowingSibling => {
                let mut current = xot.next_sibling(node);
                while let Some(sibling) = current {
                    if xot.is_element(sibling) {
                        yield_!(sibling);
                    }
                    current = xot.next_sibling(sibling);
                }
            }
            Axis::PrecedingSibling => {
                let mut current = xot.previous_sibling(node);
                while let Some(sibling) = current {
                    if xot.is_element(sibling) {
                        yield_!(sibling);
                    }
                    current = xot.previous_sibling(sibling);
                }
            }
            Axis::Ancestor => {
                let mut current = xot.parent(node);
                while let Some(ancestor) = current {
                    if xot.is_element(ancestor) {
                        yield_!(ancestor);
                    }
                    current = xot.parent(ancestor);
                }
            }
        }
    })
    .into_iter()
}

// Walk until the first node matching `until`, which is left out. The index
// handed to the selector is the number of steps taken so far.
fn walk_until<'a>(
    xot: &'a Xot,
    node: Node,
    axis: Axis,
    until: &'a Selector,
) -> impl Iterator<Item = Node> + 'a {
    walk(xot, node, axis)
        .enumerate()
        .take_while(move |(index, node)| !until.matches(xot, *index, *node))
        .map(|(_, node)| node)
}

// Sort nodes into document order. Nodes in different trees are ordered
// by their position within their own tree; ties keep their order.
pub(crate) fn document_order(xot: &Xot, nodes: &mut [Node]) {
    nodes.sort_by_cached_key(|&node| position_path(xot, node));
}

fn position_path(xot: &Xot, node: Node) -> Vec<usize> {
    let mut path = std::iter::successors(Some(node), |&n| xot.parent(n))
        .map(|n| std::iter::successors(xot.previous_sibling(n), |&s| xot.previous_sibling(s)).count())
        .collect::<Vec<_>>();
    path.reverse();
    path
}

/// ## Traversal
///
/// Each traversal returns a new set; the receiver is left alone. Results
/// for each node in the set are concatenated in set order, without
/// duplicates, and only ever contain elements.
///
/// The `_matching` variants filter the result with a [`Selector`] in the
/// same step. The index a filter sees is the position within the
/// unfiltered result.
impl NodeSet {
    fn along(&self, xot: &Xot, axis: Axis, selector: Selector) -> NodeSet {
        let nodes = unique(self.iter().flat_map(|node| walk(xot, node, axis)));
        select(xot, nodes, &selector)
    }

    // Sibling walks towards the start of the document are reversed per
    // node, so each node contributes its siblings in document order.
    fn along_backwards(&self, nodes_of: impl Fn(Node) -> Vec<Node>) -> Vec<Node> {
        unique(self.iter().flat_map(|node| {
            let mut nodes = nodes_of(node);
            nodes.reverse();
            nodes
        }))
    }

    /// Element children of every node.
    pub fn children(&self, xot: &Xot) -> NodeSet {
        self.children_matching(xot, Selector::Any)
    }

    /// Element children of every node, filtered by `selector`.
    pub fn children_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        self.along(xot, Axis::Child, selector.into())
    }

    /// All descendant elements of every node, in document order.
    ///
    /// The nodes in the set themselves are not included.
    pub fn find(&self, xot: &Xot) -> NodeSet {
        self.find_matching(xot, Selector::Any)
    }

    /// Descendant elements of every node, filtered by `selector`.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a><b/></a><b/></doc>").unwrap();
    /// let set = NodeSet::from_document(&xot, doc);
    /// assert_eq!(set.find_matching(&xot, "b").len(), 2);
    /// assert!(set.find_matching(&xot, "doc").is_empty());
    /// ```
    pub fn find_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        self.along(xot, Axis::Descendant, selector.into())
    }

    /// The next element sibling of every node.
    ///
    /// Text, comments and processing instructions in between are skipped.
    pub fn next(&self, xot: &Xot) -> NodeSet {
        self.next_matching(xot, Selector::Any)
    }

    /// The next element sibling of every node, filtered by `selector`.
    pub fn next_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        let nodes = unique(
            self.iter()
                .filter_map(|node| walk(xot, node, Axis::FollowingSibling).next()),
        );
        select(xot, nodes, &selector.into())
    }

    /// The previous element sibling of every node.
    pub fn prev(&self, xot: &Xot) -> NodeSet {
        self.prev_matching(xot, Selector::Any)
    }

    /// The previous element sibling of every node, filtered by `selector`.
    pub fn prev_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        let nodes = unique(
            self.iter()
                .filter_map(|node| walk(xot, node, Axis::PrecedingSibling).next()),
        );
        select(xot, nodes, &selector.into())
    }

    /// All following element siblings of every node.
    pub fn next_all(&self, xot: &Xot) -> NodeSet {
        self.next_all_matching(xot, Selector::Any)
    }

    /// All following element siblings, filtered by `selector`.
    pub fn next_all_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        self.along(xot, Axis::FollowingSibling, selector.into())
    }

    /// All preceding element siblings of every node, in document order.
    pub fn prev_all(&self, xot: &Xot) -> NodeSet {
        self.prev_all_matching(xot, Selector::Any)
    }

    /// All preceding element siblings, filtered by `selector`.
    pub fn prev_all_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        let nodes = self.along_backwards(|node| {
            walk(xot, node, Axis::PrecedingSibling).collect()
        });
        select(xot, nodes, &selector.into())
    }

    /// Following element siblings up to, but not including, the first one
    /// matching `until`. If none matches this is the same as
    /// [`NodeSet::next_all`].
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a/><b/><c/><d/></doc>").unwrap();
    /// let a = NodeSet::from_document(&xot, doc).children(&xot).first();
    /// assert_eq!(a.next_until(&xot, "d").tags(&xot), vec![Some("b"), Some("c")]);
    /// ```
    pub fn next_until(&self, xot: &Xot, until: impl Into<Selector>) -> NodeSet {
        let until = until.into();
        NodeSet::from_unique(unique(self.iter().flat_map(|node| {
            walk_until(xot, node, Axis::FollowingSibling, &until)
        })))
    }

    /// Preceding element siblings back to, but not including, the first
    /// one matching `until`. The result is in document order.
    pub fn prev_until(&self, xot: &Xot, until: impl Into<Selector>) -> NodeSet {
        let until = until.into();
        NodeSet::from_unique(self.along_backwards(|node| {
            walk_until(xot, node, Axis::PrecedingSibling, &until).collect()
        }))
    }

    /// The parent element of every node. The document node is never a
    /// parent in this sense.
    pub fn parent(&self, xot: &Xot) -> NodeSet {
        self.parent_matching(xot, Selector::Any)
    }

    /// The parent element of every node, filtered by `selector`.
    pub fn parent_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        let nodes = unique(
            self.iter()
                .filter_map(|node| xot.parent(node))
                .filter(|&parent| xot.is_element(parent)),
        );
        select(xot, nodes, &selector.into())
    }

    /// All ancestor elements of every node, nearest first.
    pub fn parents(&self, xot: &Xot) -> NodeSet {
        self.parents_matching(xot, Selector::Any)
    }

    /// All ancestor elements, filtered by `selector`.
    pub fn parents_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        self.along(xot, Axis::Ancestor, selector.into())
    }

    /// Ancestor elements up to, but not including, the first one matching
    /// `until`.
    pub fn parents_until(&self, xot: &Xot, until: impl Into<Selector>) -> NodeSet {
        let until = until.into();
        NodeSet::from_unique(unique(
            self.iter()
                .flat_map(|node| walk_until(xot, node, Axis::Ancestor, &until)),
        ))
    }

    /// All element siblings of every node, excluding the node itself
    /// unless it is the sibling of another node in the set. The result is
    /// in document order.
    pub fn siblings(&self, xot: &Xot) -> NodeSet {
        self.siblings_matching(xot, Selector::Any)
    }

    /// All element siblings, filtered by `selector`.
    pub fn siblings_matching(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        let mut nodes = unique(self.iter().flat_map(|node| {
            walk(xot, node, Axis::PrecedingSibling)
                .chain(walk(xot, node, Axis::FollowingSibling))
        }));
        document_order(xot, &mut nodes);
        select(xot, nodes, &selector.into())
    }

    /// Keep the nodes with at least one descendant element matching
    /// `selector`. The index a filter sees is the position among the
    /// descendants of the node being tested.
    pub fn has(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        let selector = selector.into();
        NodeSet::from_unique(
            self.iter()
                .filter(|&node| {
                    walk(xot, node, Axis::Descendant)
                        .enumerate()
                        .any(|(index, descendant)| selector.matches(xot, index, descendant))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_skips_non_elements() {
        let mut xot = Xot::new();
        let root = xot
            .parse("<doc>text<a/><!--c--><b/><?pi?><c/>tail</doc>")
            .unwrap();
        let doc = xot.document_element(root).unwrap();
        let children = walk(&xot, doc, Axis::Child).collect::<Vec<_>>();
        assert_eq!(children.len(), 3);
        let following = walk(&xot, children[0], Axis::FollowingSibling).collect::<Vec<_>>();
        assert_eq!(following, vec![children[1], children[2]]);
        let preceding = walk(&xot, children[2], Axis::PrecedingSibling).collect::<Vec<_>>();
        assert_eq!(preceding, vec![children[1], children[0]]);
    }

    #[test]
    fn test_walk_ancestors_stops_before_document() {
        let mut xot = Xot::new();
        let root = xot.parse("<a><b><c/></b></a>").unwrap();
        let a = xot.document_element(root).unwrap();
        let b = xot.first_child(a).unwrap();
        let c = xot.first_child(b).unwrap();
        assert_eq!(walk(&xot, c, Axis::Ancestor).collect::<Vec<_>>(), vec![b, a]);
        assert_eq!(walk(&xot, a, Axis::Ancestor).count(), 0);
    }

    #[test]
    fn test_walk_descendants_excludes_self() {
        let mut xot = Xot::new();
        let root = xot.parse("<a><b><c/></b><d/></a>").unwrap();
        let a = xot.document_element(root).unwrap();
        let b = xot.first_child(a).unwrap();
        let c = xot.first_child(b).unwrap();
        let d = xot.next_sibling(b).unwrap();
        assert_eq!(
            walk(&xot, a, Axis::Descendant).collect::<Vec<_>>(),
            vec![b, c, d]
        );
    }

    #[test]
    fn test_walk_until() {
        let mut xot = Xot::new();
        let root = xot.parse("<doc><a/><b/><c/><d/></doc>").unwrap();
        let doc = xot.document_element(root).unwrap();
        let a = xot.first_child(doc).unwrap();
        let until = Selector::from("c");
        assert_eq!(
            walk_until(&xot, a, Axis::FollowingSibling, &until).count(),
            1
        );
        let never = Selector::from("x");
        assert_eq!(
            walk_until(&xot, a, Axis::FollowingSibling, &never).count(),
            3
        );
    }

    #[test]
    fn test_document_order() {
        let mut xot = Xot::new();
        let root = xot.parse("<a><b><c/></b><d><e/></d></a>").unwrap();
        let a = xot.document_element(root).unwrap();
        let b = xot.first_child(a).unwrap();
        let c = xot.first_child(b).unwrap();
        let d = xot.next_sibling(b).unwrap();
        let e = xot.first_child(d).unwrap();
        let mut nodes = vec![e, d, c, a, b];
        document_order(&xot, &mut nodes);
        assert_eq!(nodes, vec![a, b, c, d, e]);
    }
}
