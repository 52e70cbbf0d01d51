//! Draw stream recorded by the application each frame.
//!
//! Only solid rectangles exist; ordering is z-index first, then insertion order.

mod list;
mod z_index;

pub use list::{DrawList, RectCmd};
pub use z_index::ZIndex;
