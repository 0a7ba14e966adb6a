use thiserror::Error;

/// Errors raised by query operations.
///
/// Reads never produce errors: a missing node, tag or attribute is `None`
/// or an empty [`NodeSet`](crate::NodeSet). Errors come from the tree itself
/// (structural violations during manipulation, serialization problems) or
/// from parsing whole documents.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying tree refused an operation.
    #[error(transparent)]
    Xot(#[from] xot::Error),
    /// Inserting a sibling next to the document element would give the
    /// document a second root.
    #[error("cannot insert a sibling next to the document element")]
    DocumentSibling,
    /// A document could not be parsed.
    #[error("cannot parse document: {0}")]
    Parse(String),
    /// A markup fragment is not well-formed. Only produced when parsing
    /// with [`Fallback::Error`](crate::fragment::Fallback::Error).
    #[error("markup is not well-formed: {0}")]
    Markup(String),
    /// The encoding of byte input could not be determined.
    #[error("cannot determine document encoding")]
    UnknownEncoding,
}
