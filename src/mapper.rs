//! Mappers for [`NodeSet::map`](crate::NodeSet::map).
//!
//! A mapper projects `(index, node)` to a value. These are the common
//! ones; any closure of the same shape works too.
use xot::{Node, Xot};

use crate::filter::{attribute, tag_name};

/// The `id` attribute of each node.
pub fn ids() -> impl Fn(&Xot, usize, Node) -> Option<String> {
    attrs("id")
}

/// The value of attribute `name` of each node.
pub fn attrs(name: impl Into<String>) -> impl Fn(&Xot, usize, Node) -> Option<String> {
    let name = name.into();
    move |xot, _, node| attribute(xot, node, &name).map(str::to_string)
}

/// The tag name of each node.
pub fn tags() -> impl Fn(&Xot, usize, Node) -> Option<String> {
    |xot, _, node| tag_name(xot, node).map(str::to_string)
}

/// The text content of each node.
pub fn texts() -> impl Fn(&Xot, usize, Node) -> String {
    |xot, _, node| xot.string_value(node)
}
