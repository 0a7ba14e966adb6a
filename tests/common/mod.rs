#![allow(dead_code)]

use xot::Xot;
use xot_query::{Filter, NodeSet};

pub const LIBRARY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document>
  <library name="Amazon">
    <books>
      <book id="1">
        <name>1984</name>
        <authors>
          <author>George Orwell</author>
        </authors>
      </book>
      <book id="2">
        <name>Animal Farm</name>
        <authors>
          <author>George Orwell</author>
        </authors>
      </book>
      <book id="3">
        <name>O Alquimista</name>
        <authors>
          <author>Paulo Coelho</author>
        </authors>
      </book>
      <book id="4">
        <name>Brida</name>
        <authors>
          <author>Paulo Coelho</author>
        </authors>
      </book>
    </books>
    <dvds>
      <dvd id="5">
        <name>Once Upon a Time in the West</name>
        <directors>
          <director>Sergio Leone</director>
        </directors>
        <actors>
          <actor>Charles Bronson</actor>
          <actor>Jason Robards</actor>
          <actor>Claudia Cardinale</actor>
        </actors>
      </dvd>
    </dvds>
  </library>
  <library name="Rösslitor">
    <books>
      <book id="1">
        <name>1984</name>
        <authors>
          <author>George Orwell</author>
        </authors>
      </book>
      <book id="3">
        <name>O Alquimista</name>
        <authors>
          <author>Paulo Coelho</author>
        </authors>
      </book>
    </books>
  </library>
  <library name="Orell Füssli">
    <books>
      <book id="1">
        <name>1984</name>
        <authors>
          <author>George Orwell</author>
        </authors>
      </book>
      <book id="2">
        <name>Animal Farm</name>
        <authors>
          <author>George Orwell</author>
        </authors>
      </book>
    </books>
  </library>
</document>"#;

/// Elements below the document element.
pub const ELEMENTS: usize = 47;

/// Parse the library document and select its document element.
pub fn library(xot: &mut Xot) -> NodeSet {
    NodeSet::parse(xot, LIBRARY).unwrap()
}

/// Books whose author is Paulo Coelho.
pub fn by_coelho() -> Filter {
    Filter::new(|xot, _, node| {
        NodeSet::from_node(node)
            .find_matching(xot, "author")
            .text(xot)
            .as_deref()
            == Some("Paulo Coelho")
    })
}

pub fn tags(xot: &Xot, set: &NodeSet) -> Vec<String> {
    set.tags(xot)
        .into_iter()
        .map(|tag| tag.unwrap_or_default().to_string())
        .collect()
}
