#![forbid(unsafe_code)]

//! Chained selection, traversal and manipulation of [Xot](xot) trees.
//!
//! A [`NodeSet`] is an ordered, duplicate-free set of nodes. Traversal
//! methods such as [`NodeSet::children`] or [`NodeSet::find`] map every
//! node in the set to related elements and collect the results into a new
//! set, so calls can be chained. Most traversals have a `_matching` form
//! that narrows the result with a [`Selector`]: a tag name or a
//! [`Filter`].
//!
//! The tree itself lives in a [`Xot`](xot::Xot). Reading takes a `&Xot`,
//! changing the tree takes a `&mut Xot`.
//!
//! ```rust
//! use xot_query::{filter, NodeSet};
//!
//! let mut xot = xot::Xot::new();
//! let library = NodeSet::parse(
//!     &mut xot,
//!     r#"<library><book id="1"/><book id="2"/><dvd id="3"/></library>"#,
//! )
//! .unwrap();
//!
//! let books = library.children_matching(&xot, "book");
//! assert_eq!(books.ids(&xot), vec![Some("1"), Some("2")]);
//! assert_eq!(books.eq(0).next(&xot).attr(&xot, "id"), Some("2"));
//!
//! let odd = library.find_matching(&xot, filter::odd());
//! assert_eq!(odd.tag(&xot), Some("book"));
//!
//! books.remove(&mut xot).unwrap();
//! library.append(&mut xot, "<cd/>").unwrap();
//! assert_eq!(xot.to_string(library.get(0).unwrap()).unwrap(),
//!     r#"<library><dvd id="3"/><cd/></library>"#);
//! ```

mod access;
mod document;
mod encoding;
mod error;
pub mod filter;
pub mod fragment;
mod manipulation;
pub mod mapper;
mod nodeset;
mod traverse;

pub use error::Error;
pub use filter::{Filter, Selector};
pub use nodeset::NodeSet;
