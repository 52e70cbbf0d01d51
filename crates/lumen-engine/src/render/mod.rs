//! GPU rendering.
//!
//! Renderers consume a `scene::DrawList` and record wgpu commands. Geometry stays in
//! logical pixels on the CPU; the vertex shader converts to NDC with a viewport
//! uniform.

mod ctx;
mod rect;

pub use ctx::{RenderCtx, RenderTarget};
pub use rect::RectRenderer;
