use lumen_engine::coords::Rect;
use lumen_engine::paint::Color;

use crate::painter::Painter;
use crate::widget::Widget;

/// A non-interactive horizontal progress bar.
///
/// # Example
/// ```rust,ignore
/// let bar = ProgressBar::new(Rect::new(20.0, 20.0, 300.0, 12.0))
///     .value(0.7)
///     .fill_color(Color::from_straight(0.1, 0.8, 0.5, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    bounds: Rect,
    /// Current progress in [0, 1].
    value: f32,
    track_color: Color,
    fill_color: Color,
}

impl ProgressBar {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            value: 0.0,
            track_color: Color::from_straight(0.15, 0.2, 0.3, 1.0),
            fill_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
        }
    }

    pub fn value(mut self, v: f32) -> Self { self.set_value(v); self }
    pub fn track_color(mut self, v: Color) -> Self { self.track_color = v; self }
    pub fn fill_color(mut self, v: Color) -> Self { self.fill_color = v; self }

    /// Sets the progress, clamped to [0, 1]. NaN reads as empty.
    pub fn set_value(&mut self, v: f32) {
        self.value = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    }

    pub fn get_value(&self) -> f32 {
        self.value
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Filled portion of the track.
    pub fn fill_rect(&self) -> Rect {
        self.bounds.left_fraction(self.value)
    }
}

impl Widget for ProgressBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, painter: &mut Painter<'_>) {
        painter.fill_rect(self.bounds, self.track_color);
        // Empty fills are dropped by the draw list.
        painter.fill_rect(self.fill_rect(), self.fill_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::scene::DrawList;

    fn bar() -> ProgressBar {
        ProgressBar::new(Rect::new(0.0, 0.0, 200.0, 10.0))
    }

    #[test]
    fn value_is_clamped() {
        assert_eq!(bar().value(1.5).get_value(), 1.0);
        assert_eq!(bar().value(-0.5).get_value(), 0.0);
        assert_eq!(bar().value(f32::NAN).get_value(), 0.0);
        assert_eq!(bar().value(0.25).get_value(), 0.25);
    }

    #[test]
    fn fill_covers_the_value_fraction() {
        let b = bar().value(0.25);
        assert_eq!(b.fill_rect(), Rect::new(0.0, 0.0, 50.0, 10.0));
    }

    #[test]
    fn empty_bar_paints_only_the_track() {
        let mut list = DrawList::new();
        bar().paint(&mut Painter::new(&mut list));
        assert_eq!(list.len(), 1);

        let mut list = DrawList::new();
        bar().value(0.5).paint(&mut Painter::new(&mut list));
        assert_eq!(list.len(), 2);
    }
}
