//! Colour model shared between widgets and the renderer.

mod color;

pub use color::Color;
