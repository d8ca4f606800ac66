//! Abstract component tree and its update tracking.
//!
//! - `ComponentTree`: arena of components keyed by `RenderId`
//! - `UpdateManager`: folds mutations into per-parent `ComponentUpdate` records
//! - `Application`: owns both, plus the focused-component signal

mod application;
mod component;
mod update;

pub use application::*;
pub use component::*;
pub use update::*;
