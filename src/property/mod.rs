//! Property Renderers - Apply typed component properties to element styles.
//!
//! Each submodule converts one property kind into style text:
//!
//! - [`extent`] - lengths to whole pixels
//! - [`insets`] - four-sided pixel shorthand (`"1px 2px 3px 4px"`)
//! - [`border`] - border shorthand (`"2px solid #ff0000"`)
//! - [`color`] - colors, including the foreground/background pair
//! - [`fill_image`] - background images, positions and repeat modes
//!
//! An absent value clears the corresponding style property, except for fill
//! images, which leave the element untouched.

pub mod border;
pub mod color;
pub mod extent;
pub mod fill_image;
pub mod insets;

pub use fill_image::FillImageFlags;
pub use insets::PixelInsets;
