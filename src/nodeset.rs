use ahash::HashSet;
use xot::{Node, Xot};

use crate::filter::{tag_name, Selector};

/// An ordered set of nodes.
///
/// A `NodeSet` never contains the same node twice. Nodes keep the order
/// in which they were found: document order for traversals, the order of
/// arrival for [`NodeSet::add`].
///
/// A `NodeSet` doesn't own the tree it points into. Operations that only
/// read take a `&Xot` and return a new set, leaving the receiver alone.
/// Operations that change the tree take a `&mut Xot`; see the
/// manipulation methods.
///
/// ```rust
/// use xot_query::NodeSet;
///
/// let mut xot = xot::Xot::new();
/// let doc = xot.parse("<doc><a/><b/><a/></doc>").unwrap();
/// let set = NodeSet::from_document(&xot, doc);
///
/// assert_eq!(set.tag(&xot), Some("doc"));
/// assert_eq!(set.children(&xot).len(), 3);
/// assert_eq!(set.children_matching(&xot, "a").len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: Vec<Node>,
}

impl NodeSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single node.
    pub fn from_node(node: Node) -> Self {
        NodeSet { nodes: vec![node] }
    }

    /// A set holding `nodes`, in order, without duplicates.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        NodeSet {
            nodes: unique(nodes),
        }
    }

    /// A set holding the document element of `document`.
    ///
    /// If `document` is not a document node it is taken as-is.
    pub fn from_document(xot: &Xot, document: Node) -> Self {
        if xot.is_document(document) {
            match xot.document_element(document) {
                Ok(element) => Self::from_node(element),
                Err(_) => Self::new(),
            }
        } else {
            Self::from_node(document)
        }
    }

    // Build a set from nodes known to be unique already.
    pub(crate) fn from_unique(nodes: Vec<Node>) -> Self {
        NodeSet { nodes }
    }

    /// Number of nodes in the set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `position`, or `None` when out of range.
    pub fn get(&self, position: usize) -> Option<Node> {
        self.nodes.get(position).copied()
    }

    /// All nodes, in order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate over the nodes, in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Node> + ExactSizeIterator + '_ {
        self.nodes.iter().copied()
    }

    /// Take the nodes out of the set.
    pub fn into_vec(self) -> Vec<Node> {
        self.nodes
    }

    /// Whether `node` is in the set.
    pub fn contains(&self, node: Node) -> bool {
        self.nodes.contains(&node)
    }

    /// Tag name of the first node.
    ///
    /// `None` if the set is empty or the first node isn't an element.
    pub fn tag<'a>(&self, xot: &'a Xot) -> Option<&'a str> {
        self.tag_at(xot, 0)
    }

    /// Tag name of the node at `position`.
    pub fn tag_at<'a>(&self, xot: &'a Xot, position: usize) -> Option<&'a str> {
        self.get(position).and_then(|node| tag_name(xot, node))
    }

    /// Tag names of all nodes, one entry per node.
    pub fn tags<'a>(&self, xot: &'a Xot) -> Vec<Option<&'a str>> {
        self.iter().map(|node| tag_name(xot, node)).collect()
    }

    /// Call `f` for each `(index, node)`, in order.
    pub fn each(&self, mut f: impl FnMut(usize, Node)) -> &Self {
        for (index, node) in self.iter().enumerate() {
            f(index, node);
        }
        self
    }

    /// Apply `mapper` to each `(index, node)` and collect the results.
    ///
    /// See [`mapper`](crate::mapper) for ready-made mappers.
    pub fn map<T>(&self, xot: &Xot, mapper: impl Fn(&Xot, usize, Node) -> T) -> Vec<T> {
        self.iter()
            .enumerate()
            .map(|(index, node)| mapper(xot, index, node))
            .collect()
    }

    /// A set with just the first node; empty if this set is empty.
    pub fn first(&self) -> NodeSet {
        Self::from_unique(self.nodes.first().copied().into_iter().collect())
    }

    /// A set with just the last node; empty if this set is empty.
    pub fn last(&self) -> NodeSet {
        Self::from_unique(self.nodes.last().copied().into_iter().collect())
    }

    /// A set with just the node at `position`; empty when out of range.
    ///
    /// A negative position counts from the end, so `-1` is the last node.
    pub fn eq(&self, position: isize) -> NodeSet {
        let index = if position < 0 {
            self.len().checked_sub(position.unsigned_abs())
        } else {
            Some(position.unsigned_abs())
        };
        Self::from_unique(index.and_then(|i| self.get(i)).into_iter().collect())
    }

    /// The nodes from `start` up to but not including `end`.
    ///
    /// Negative positions count from the end. Positions out of range are
    /// clamped, so this never fails; without `end` the slice runs to the
    /// end of the set.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a/><b/><c/><d/></doc>").unwrap();
    /// let set = NodeSet::from_document(&xot, doc).children(&xot);
    /// assert_eq!(set.slice(1, Some(-1)).len(), 2);
    /// assert_eq!(set.slice(-1, None).tag(&xot), Some("d"));
    /// assert!(set.slice(10, None).is_empty());
    /// ```
    pub fn slice(&self, start: isize, end: Option<isize>) -> NodeSet {
        let len = self.len();
        let start = clamp(start, len);
        let end = end.map_or(len, |end| clamp(end, len));
        if start >= end {
            return NodeSet::new();
        }
        Self::from_unique(self.nodes[start..end].to_vec())
    }

    /// This set followed by the nodes in `other` that aren't in it yet.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a/><b/></doc>").unwrap();
    /// let children = NodeSet::from_document(&xot, doc).children(&xot);
    /// let b = children.last();
    /// let set = b.add(children.iter());
    /// assert_eq!(set.tags(&xot), vec![Some("b"), Some("a")]);
    /// ```
    pub fn add(&self, other: impl IntoIterator<Item = Node>) -> NodeSet {
        Self::from_nodes(self.iter().chain(other))
    }

    /// This set followed by `node`, unless it is already in it.
    pub fn add_node(&self, node: Node) -> NodeSet {
        self.add([node])
    }

    /// Keep the nodes matching `selector`.
    ///
    /// The index a filter sees is the position within this set.
    pub fn filter(&self, xot: &Xot, selector: impl Into<Selector>) -> NodeSet {
        select(xot, self.nodes.clone(), &selector.into())
    }

    /// Whether any node matches `selector`.
    pub fn is(&self, xot: &Xot, selector: impl Into<Selector>) -> bool {
        let selector = selector.into();
        self.iter()
            .enumerate()
            .any(|(index, node)| selector.matches(xot, index, node))
    }
}

impl IntoIterator for NodeSet {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl FromIterator<Node> for NodeSet {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        NodeSet::from_nodes(iter)
    }
}

impl From<Node> for NodeSet {
    fn from(node: Node) -> Self {
        NodeSet::from_node(node)
    }
}

// Remove duplicates, keeping the first occurrence.
pub(crate) fn unique(nodes: impl IntoIterator<Item = Node>) -> Vec<Node> {
    let mut seen = HashSet::default();
    nodes.into_iter().filter(|node| seen.insert(*node)).collect()
}

// Keep the nodes matching `selector`, indexed by position in `nodes`.
pub(crate) fn select(xot: &Xot, nodes: Vec<Node>, selector: &Selector) -> NodeSet {
    if matches!(selector, Selector::Any) {
        return NodeSet::from_unique(nodes);
    }
    NodeSet::from_unique(
        nodes
            .into_iter()
            .enumerate()
            .filter(|(index, node)| selector.matches(xot, *index, *node))
            .map(|(_, node)| node)
            .collect(),
    )
}

fn clamp(position: isize, len: usize) -> usize {
    if position < 0 {
        len.saturating_sub(position.unsigned_abs())
    } else {
        position.unsigned_abs().min(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children(xot: &mut Xot, xml: &str) -> NodeSet {
        let root = xot.parse(xml).unwrap();
        let doc_el = xot.document_element(root).unwrap();
        NodeSet::from_nodes(xot.children(doc_el))
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(0, 8), 0);
        assert_eq!(clamp(3, 8), 3);
        assert_eq!(clamp(9, 8), 8);
        assert_eq!(clamp(-1, 8), 7);
        assert_eq!(clamp(-8, 8), 0);
        assert_eq!(clamp(-9, 8), 0);
        assert_eq!(clamp(-1, 0), 0);
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let mut xot = Xot::new();
        let set = children(&mut xot, "<doc><a/><b/><c/></doc>");
        let (a, b, c) = (set.nodes[0], set.nodes[1], set.nodes[2]);
        assert_eq!(unique([b, a, b, c, a]), vec![b, a, c]);
    }

    #[test]
    fn test_eq_negative() {
        let mut xot = Xot::new();
        let set = children(&mut xot, "<doc><a/><b/><c/></doc>");
        assert_eq!(set.eq(-1).tag(&xot), Some("c"));
        assert_eq!(set.eq(-3).tag(&xot), Some("a"));
        assert!(set.eq(-4).is_empty());
        assert!(set.eq(3).is_empty());
    }

    #[test]
    fn test_empty_set_accessors() {
        let xot = Xot::new();
        let set = NodeSet::new();
        assert_eq!(set.get(0), None);
        assert_eq!(set.tag(&xot), None);
        assert!(set.first().is_empty());
        assert!(set.last().is_empty());
        assert!(set.slice(0, None).is_empty());
        assert!(!set.is(&xot, "*"));
    }

    #[test]
    fn test_select_skips_filter_on_empty() {
        let xot = Xot::new();
        let exploding = crate::filter::Filter::new(|_, _, _| panic!("evaluated"));
        assert!(select(&xot, Vec::new(), &exploding.into()).is_empty());
    }
}
