use crate::coords::Rect;
use crate::paint::Color;

use super::ZIndex;

/// Solid rectangle draw command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectCmd {
    pub z: ZIndex,
    pub rect: Rect,
    pub color: Color,
    order: u32,
}

/// Rectangles recorded for one frame.
///
/// `push_rect` is O(1); `sorted` orders in place once per frame and keeps the
/// allocation for reuse.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<RectCmd>,
    next_order: u32,
    sorted: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded commands, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
        self.next_order = 0;
        self.sorted = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Records a rectangle. Empty rectangles and fully transparent colors are dropped.
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        if rect.is_empty() || color.a <= 0.0 {
            return;
        }

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.cmds.push(RectCmd { z, rect, color, order });
        self.sorted = false;
    }

    /// Commands in insertion order.
    #[inline]
    pub fn items(&self) -> &[RectCmd] {
        &self.cmds
    }

    /// Commands back-to-front: by z-index, then insertion order.
    pub fn sorted(&mut self) -> &[RectCmd] {
        if !self.sorted {
            self.cmds.sort_by_key(|c| (c.z, c.order));
            self.sorted = true;
        }
        &self.cmds
    }
}
