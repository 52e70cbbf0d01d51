use lumen_engine::coords::Rect;
use lumen_engine::paint::Color;
use lumen_engine::scene::{DrawList, ZIndex};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList`. Every primitive gets the next z-index above
/// the previous one, so later calls draw on top.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self::with_base(draw_list, ZIndex::default())
    }

    /// Starts numbering primitives at `base` (e.g. `ZIndex::OVERLAY` for a HUD).
    pub fn with_base(draw_list: &'a mut DrawList, base: ZIndex) -> Self {
        Self { draw_list, z: base.0 }
    }

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, color);
    }

    /// Rectangle outline of `width` drawn inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        if width <= 0.0 || rect.is_empty() {
            return;
        }

        let w = width.min(rect.size.x / 2.0);
        let h = width.min(rect.size.y / 2.0);
        let (x, y) = (rect.origin.x, rect.origin.y);
        let (sx, sy) = (rect.size.x, rect.size.y);

        // One z for the whole outline; the edges never overlap.
        let z = self.next_z();
        self.draw_list.push_rect(z, Rect::new(x, y, sx, h), color);
        self.draw_list.push_rect(z, Rect::new(x, y + sy - h, sx, h), color);
        self.draw_list.push_rect(z, Rect::new(x, y + h, w, sy - 2.0 * h), color);
        self.draw_list.push_rect(z, Rect::new(x + sx - w, y + h, w, sy - 2.0 * h), color);
    }

    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex(self.z);
        self.z = self.z.saturating_add(1);
        z
    }
}
