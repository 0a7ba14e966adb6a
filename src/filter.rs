//! Filters and selectors.
//!
//! A [`Filter`] is a predicate over a node and its zero-based index within
//! the set being filtered. Filters are built from the primitives in this
//! module ([`all`], [`none`], [`even`], [`odd`], [`tag`], [`ids`],
//! [`attr`]) and combined with [`and`], [`or`] and [`not`].
//!
//! Every traversal that narrows its result takes a [`Selector`], which is
//! either nothing at all, a tag name, or a filter. Strings convert into a
//! tag selector, with `"*"` meaning any element.
//!
//! ```rust
//! use xot_query::{filter, NodeSet};
//!
//! let mut xot = xot::Xot::new();
//! let doc = xot.parse("<doc><a/><b/><a/><a/></doc>").unwrap();
//! let set = NodeSet::from_document(&xot, doc);
//!
//! assert_eq!(set.children_matching(&xot, "a").len(), 3);
//! let even_a = filter::and([filter::tag("a"), filter::even()]);
//! assert_eq!(set.children_matching(&xot, even_a).len(), 2);
//! ```
use std::fmt;

use ahash::HashSet;
use xot::{Node, Xot};

/// A predicate over `(index, node)`.
///
/// The tree is passed along so a filter can look at a node's name,
/// attributes or even run a nested query from it.
pub struct Filter(Box<dyn Fn(&Xot, usize, Node) -> bool>);

impl Filter {
    /// Lift a closure into a filter.
    ///
    /// ```rust
    /// use xot_query::{filter::Filter, NodeSet};
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a>x</a><a>y</a></doc>").unwrap();
    /// let set = NodeSet::from_document(&xot, doc);
    /// let has_y = Filter::new(|xot, _, node| xot.string_value(node) == "y");
    /// assert_eq!(set.children_matching(&xot, has_y).len(), 1);
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Xot, usize, Node) -> bool + 'static,
    {
        Filter(Box::new(f))
    }

    /// Evaluate the filter.
    #[inline]
    pub fn matches(&self, xot: &Xot, index: usize, node: Node) -> bool {
        (self.0)(xot, index, node)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter")
    }
}

/// Matches every node.
pub fn all() -> Filter {
    Filter::new(|_, _, _| true)
}

/// Matches no node.
pub fn none() -> Filter {
    Filter::new(|_, _, _| false)
}

/// Matches nodes at an even index.
pub fn even() -> Filter {
    Filter::new(|_, index, _| index % 2 == 0)
}

/// Matches nodes at an odd index.
pub fn odd() -> Filter {
    Filter::new(|_, index, _| index % 2 != 0)
}

/// Matches elements with the given local name. Comparison is exact and
/// case-sensitive.
///
/// Prefixes and namespaces are ignored: both `<book>` and `<ns:book>`
/// match `tag("book")`, and `tag("ns:book")` matches neither.
pub fn tag(name: impl Into<String>) -> Filter {
    let name = name.into();
    Filter::new(move |xot, _, node| tag_name(xot, node) == Some(name.as_str()))
}

/// Matches elements whose `id` attribute is one of `ids`.
pub fn ids<I, S>(ids: I) -> Filter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let ids: HashSet<String> = ids.into_iter().map(Into::into).collect();
    Filter::new(move |xot, _, node| {
        attribute(xot, node, "id").is_some_and(|value| ids.contains(value))
    })
}

/// Matches elements that carry attribute `name`, and if `value` is given,
/// only when the attribute has exactly that value.
pub fn attr(name: impl Into<String>, value: Option<&str>) -> Filter {
    let name = name.into();
    let value = value.map(str::to_string);
    Filter::new(move |xot, _, node| match (attribute(xot, node, &name), &value) {
        (Some(found), Some(expected)) => found == expected,
        (Some(_), None) => true,
        (None, _) => false,
    })
}

/// Matches when every filter matches. Stops at the first filter that
/// doesn't. Without filters this matches everything.
pub fn and(filters: impl IntoIterator<Item = Filter>) -> Filter {
    let filters: Vec<Filter> = filters.into_iter().collect();
    Filter::new(move |xot, index, node| filters.iter().all(|f| f.matches(xot, index, node)))
}

/// Matches when any filter matches. Stops at the first filter that does.
/// Without filters this matches nothing.
pub fn or(filters: impl IntoIterator<Item = Filter>) -> Filter {
    let filters: Vec<Filter> = filters.into_iter().collect();
    Filter::new(move |xot, index, node| filters.iter().any(|f| f.matches(xot, index, node)))
}

/// Negate a filter.
pub fn not(filter: Filter) -> Filter {
    Filter::new(move |xot, index, node| !filter.matches(xot, index, node))
}

/// What a traversal keeps.
#[derive(Debug, Default)]
pub enum Selector {
    /// Keep everything.
    #[default]
    Any,
    /// Keep elements with this local name, ignoring any prefix. See
    /// [`tag`].
    Tag(String),
    /// Keep nodes for which the filter holds.
    Filter(Filter),
}

impl Selector {
    /// Check whether the node at `index` is selected.
    pub fn matches(&self, xot: &Xot, index: usize, node: Node) -> bool {
        match self {
            Selector::Any => true,
            Selector::Tag(name) => tag_name(xot, node) == Some(name.as_str()),
            Selector::Filter(filter) => filter.matches(xot, index, node),
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        if name == "*" {
            Selector::Any
        } else {
            Selector::Tag(name.to_string())
        }
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Selector::from(name.as_str())
    }
}

impl From<Filter> for Selector {
    fn from(filter: Filter) -> Self {
        Selector::Filter(filter)
    }
}

pub(crate) fn tag_name(xot: &Xot, node: Node) -> Option<&str> {
    xot.element(node)
        .map(|element| xot.local_name_str(element.name()))
}

pub(crate) fn attribute<'a>(xot: &'a Xot, node: Node, name: &str) -> Option<&'a str> {
    // a name that was never interned can't be on any element
    let name_id = xot.name(name)?;
    if !xot.is_element(node) {
        return None;
    }
    xot.attributes(node).get(name_id).map(String::as_str)
}
