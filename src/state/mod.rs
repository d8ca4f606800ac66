//! State Module - Runtime interaction state.
//!
//! - **Focus** - Tab / Shift+Tab traversal between focusable peers

mod focus;

pub use focus::*;
