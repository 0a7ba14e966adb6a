use tracing::debug;
use xot::{Node, Xot};

use crate::error::Error;
use crate::filter::Selector;
use crate::fragment::parse_lenient;
use crate::nodeset::NodeSet;

/// ## Manipulation
///
/// These methods change the tree and so take a `&mut Xot`. The returned
/// set is meant for chaining; unless documented otherwise it holds the
/// same nodes as the receiver.
///
/// Markup arguments are parsed separately for every node in the set, so
/// each node gets its own copy. Markup that isn't well-formed is inserted
/// as literal text, see [`fragment`](crate::fragment).
///
/// Nodes taken out of the tree are detached, never freed: sets that still
/// hold them, or their descendants, keep working on the detached subtrees.
///
/// Operations that fail stop at the failing node. Changes already made to
/// earlier nodes in the set stay in place.
impl NodeSet {
    /// Set attribute `name` on every element in the set. `None` removes it.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a/><a/></doc>").unwrap();
    /// let set = NodeSet::from_document(&xot, doc).children(&xot);
    /// let set = set.set_attr(&mut xot, "x", Some("y"));
    /// assert_eq!(set.attrs(&xot, "x"), vec![Some("y"), Some("y")]);
    /// let set = set.set_attr(&mut xot, "x", None);
    /// assert_eq!(set.attrs(&xot, "x"), vec![None, None]);
    /// ```
    pub fn set_attr(&self, xot: &mut Xot, name: &str, value: Option<&str>) -> NodeSet {
        let Some(value) = value else {
            return self.remove_attr(xot, name);
        };
        debug!(targets = self.len(), name, "set attribute");
        let name_id = xot.add_name(name);
        for node in self.iter().filter(|&node| xot.is_element(node)).collect::<Vec<_>>() {
            xot.attributes_mut(node).insert(name_id, value.to_string());
        }
        self.clone()
    }

    /// Remove attribute `name` from every element in the set.
    pub fn remove_attr(&self, xot: &mut Xot, name: &str) -> NodeSet {
        debug!(targets = self.len(), name, "remove attribute");
        if let Some(name_id) = xot.name(name) {
            for node in self.iter().filter(|&node| xot.is_element(node)).collect::<Vec<_>>() {
                xot.attributes_mut(node).remove(name_id);
            }
        }
        self.clone()
    }

    /// Replace the content of every node with a single text node holding
    /// `text`. The text is taken literally, markup included.
    pub fn set_text(&self, xot: &mut Xot, text: &str) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "set text");
        for node in self.iter() {
            clear(xot, node)?;
            if !text.is_empty() {
                let text_node = xot.new_text(text);
                xot.append(node, text_node)?;
            }
        }
        Ok(self.clone())
    }

    /// Replace the content of every node with the parsed `markup`.
    pub fn set_content(&self, xot: &mut Xot, markup: &str) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "set content");
        for node in self.iter() {
            clear(xot, node)?;
            for child in parse_lenient(xot, markup)? {
                xot.append(node, child)?;
            }
        }
        Ok(self.clone())
    }

    /// Remove all children of every node. The nodes stay in the set.
    pub fn empty(&self, xot: &mut Xot) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "empty");
        for node in self.iter() {
            clear(xot, node)?;
        }
        Ok(self.clone())
    }

    /// Detach every node from its parent.
    ///
    /// Returns what remains of the set once the removed nodes are gone,
    /// which for this method is always an empty set. Removing the document
    /// element leaves its document without one.
    pub fn remove(&self, xot: &mut Xot) -> Result<NodeSet, Error> {
        self.remove_matching(xot, Selector::Any)
    }

    /// Detach the nodes matching `selector` from their parents.
    ///
    /// Returns the nodes that were kept.
    ///
    /// ```rust
    /// use xot_query::{filter, NodeSet};
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse(r#"<doc><a id="1"/><a id="2"/><a id="3"/></doc>"#).unwrap();
    /// let set = NodeSet::from_document(&xot, doc);
    /// let kept = set.children(&xot).remove_matching(&mut xot, filter::ids(["2"])).unwrap();
    /// assert_eq!(kept.ids(&xot), vec![Some("1"), Some("3")]);
    /// assert_eq!(set.children(&xot).len(), 2);
    /// ```
    pub fn remove_matching(
        &self,
        xot: &mut Xot,
        selector: impl Into<Selector>,
    ) -> Result<NodeSet, Error> {
        let selector = selector.into();
        let (removed, kept): (Vec<_>, Vec<_>) = self
            .iter()
            .enumerate()
            .partition(|(index, node)| selector.matches(xot, *index, *node));
        debug!(targets = removed.len(), "remove");
        for (_, node) in removed {
            if xot.parent(node).is_some() {
                xot.detach(node)?;
            }
        }
        Ok(NodeSet::from_unique(
            kept.into_iter().map(|(_, node)| node).collect(),
        ))
    }

    /// Insert the parsed `markup` as the last children of every node.
    pub fn append(&self, xot: &mut Xot, markup: &str) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "append");
        for node in self.iter() {
            for child in parse_lenient(xot, markup)? {
                xot.append(node, child)?;
            }
        }
        Ok(self.clone())
    }

    /// Insert the parsed `markup` as the first children of every node.
    pub fn prepend(&self, xot: &mut Xot, markup: &str) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "prepend");
        for node in self.iter() {
            for child in parse_lenient(xot, markup)?.into_iter().rev() {
                xot.prepend(node, child)?;
            }
        }
        Ok(self.clone())
    }

    /// Insert the parsed `markup` right after every node.
    ///
    /// Returns this set followed by the inserted elements. Fails with
    /// [`Error::DocumentSibling`] on reaching the document element; nodes
    /// before it in the set have their siblings inserted by then.
    pub fn after(&self, xot: &mut Xot, markup: &str) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "after");
        let mut inserted = Vec::new();
        for node in self.iter() {
            check_sibling(xot, node)?;
            let siblings = parse_lenient(xot, markup)?;
            inserted.extend(elements(xot, &siblings));
            // inserting in reverse right after the node keeps fragment order
            for sibling in siblings.into_iter().rev() {
                xot.insert_after(node, sibling)?;
            }
        }
        Ok(self.add(inserted))
    }

    /// Insert the parsed `markup` right before every node.
    ///
    /// Returns this set followed by the inserted elements. Like
    /// [`NodeSet::after`], this refuses the document element and keeps the
    /// insertions made before it.
    pub fn before(&self, xot: &mut Xot, markup: &str) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "before");
        let mut inserted = Vec::new();
        for node in self.iter() {
            check_sibling(xot, node)?;
            let siblings = parse_lenient(xot, markup)?;
            inserted.extend(elements(xot, &siblings));
            for sibling in siblings {
                xot.insert_before(node, sibling)?;
            }
        }
        Ok(self.add(inserted))
    }

    /// Replace every node with the parsed `markup`.
    ///
    /// The replaced nodes are detached. Returns the elements that took
    /// their place; text replacements don't show up in the result. On error
    /// the nodes before the failing one are already replaced.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let doc = xot.parse("<doc><a/><b/></doc>").unwrap();
    /// let set = NodeSet::from_document(&xot, doc);
    /// let x = set.children_matching(&xot, "a").replace_with(&mut xot, "<x>V</x>").unwrap();
    /// assert_eq!(x.tag(&xot), Some("x"));
    /// assert_eq!(set.children(&xot).tags(&xot), vec![Some("x"), Some("b")]);
    /// ```
    pub fn replace_with(&self, xot: &mut Xot, markup: &str) -> Result<NodeSet, Error> {
        debug!(targets = self.len(), "replace");
        let mut replacements = Vec::new();
        for node in self.iter() {
            let nodes = parse_lenient(xot, markup)?;
            replacements.extend(elements(xot, &nodes));
            for replacement in nodes {
                xot.insert_before(node, replacement)?;
            }
            xot.detach(node)?;
        }
        Ok(NodeSet::from_nodes(replacements))
    }
}

// Detach all children of a node. Always taking the first child means no
// text is merged, so every old child survives as it was.
fn clear(xot: &mut Xot, node: Node) -> Result<(), Error> {
    while let Some(child) = xot.first_child(node) {
        xot.detach(child)?;
    }
    Ok(())
}

fn check_sibling(xot: &Xot, node: Node) -> Result<(), Error> {
    match xot.parent(node) {
        Some(parent) if xot.is_document(parent) => Err(Error::DocumentSibling),
        _ => Ok(()),
    }
}

// Text nodes may be merged into neighbouring text once inserted, so
// elements are picked out before insertion.
fn elements(xot: &Xot, nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .copied()
        .filter(|&node| xot.is_element(node))
        .collect()
}
