use xot::Xot;

use crate::encoding::decode;
use crate::error::Error;
use crate::nodeset::NodeSet;

/// ## Documents
impl NodeSet {
    /// Parse `xml` into a new document and select its document element.
    ///
    /// ```rust
    /// use xot_query::NodeSet;
    ///
    /// let mut xot = xot::Xot::new();
    /// let set = NodeSet::parse(&mut xot, "<doc><a/></doc>").unwrap();
    /// assert_eq!(set.tag(&xot), Some("doc"));
    /// ```
    pub fn parse(xot: &mut Xot, xml: &str) -> Result<NodeSet, Error> {
        let root = xot.parse(xml).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(NodeSet::from_document(xot, root))
    }

    /// Like [`NodeSet::parse`], but from raw bytes.
    ///
    /// The encoding is detected from a byte order mark or the XML
    /// declaration, and defaults to UTF-8.
    pub fn parse_bytes(xot: &mut Xot, data: &[u8]) -> Result<NodeSet, Error> {
        let xml = decode(data)?;
        Self::parse(xot, &xml)
    }
}
