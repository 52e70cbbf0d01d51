//! Geometry shared by the renderer, widgets and game code.
//!
//! Canonical space:
//! - logical pixels (DPI-aware)
//! - origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
