//! Live visual tree.
//!
//! The document is the shared resource peers mutate in place. Every element a
//! peer creates belongs to that peer until the peer is disposed.

mod document;

pub use document::*;
