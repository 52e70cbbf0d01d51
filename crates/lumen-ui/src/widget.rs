use lumen_engine::coords::Rect;

use crate::painter::Painter;

/// The trait every drawable UI component implements.
///
/// Widgets are laid out by their owner (usually a screen), which assigns bounds
/// directly; there is no measuring pass.
pub trait Widget {
    /// Area the widget occupies, in logical pixels.
    fn bounds(&self) -> Rect;

    /// Draws the widget into `painter`.
    fn paint(&self, painter: &mut Painter<'_>);
}
