use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x / 2.0, self.origin.y + self.size.y / 2.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Self {
        Self { origin: self.origin + by, size: self.size }
    }

    /// Shrinks the rectangle by `amount` on every side. Never produces a negative size.
    #[inline]
    pub fn inset(self, amount: f32) -> Self {
        Self::new(
            self.origin.x + amount,
            self.origin.y + amount,
            (self.size.x - 2.0 * amount).max(0.0),
            (self.size.y - 2.0 * amount).max(0.0),
        )
    }

    /// Left part of the rectangle covering `fraction` of its width (clamped to [0, 1]).
    #[inline]
    pub fn left_fraction(self, fraction: f32) -> Self {
        Self { origin: self.origin, size: Vec2::new(self.size.x * fraction.clamp(0.0, 1.0), self.size.y) }
    }

    /// Moves the rectangle the least amount needed to lie inside `bounds`.
    ///
    /// If it is larger than `bounds` on an axis, it is aligned to the bounds' origin.
    pub fn clamped_within(self, bounds: Rect) -> Self {
        let max_x = (bounds.max().x - self.size.x).max(bounds.origin.x);
        let max_y = (bounds.max().y - self.size.y).max(bounds.origin.y);
        Self {
            origin: Vec2::new(
                self.origin.x.clamp(bounds.origin.x, max_x),
                self.origin.y.clamp(bounds.origin.y, max_y),
            ),
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.9, 9.9)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(-0.1, 5.0)));
    }

    #[test]
    fn centered_round_trips_center() {
        let rect = Rect::centered(Vec2::new(50.0, 20.0), Vec2::new(10.0, 4.0));
        assert_eq!(rect, r(45.0, 18.0, 10.0, 4.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn inset_never_goes_negative() {
        assert_eq!(r(0.0, 0.0, 10.0, 4.0).inset(3.0), r(3.0, 3.0, 4.0, 0.0));
        assert!(r(0.0, 0.0, 10.0, 4.0).inset(3.0).is_empty());
    }

    #[test]
    fn left_fraction_clamps() {
        let rect = r(10.0, 0.0, 200.0, 8.0);
        assert_eq!(rect.left_fraction(0.25).size.x, 50.0);
        assert_eq!(rect.left_fraction(3.0).size.x, 200.0);
        assert!(rect.left_fraction(-1.0).is_empty());
    }

    #[test]
    fn clamped_within_pushes_back_inside() {
        let bounds = r(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r(-5.0, 10.0, 10.0, 10.0).clamped_within(bounds), r(0.0, 10.0, 10.0, 10.0));
        assert_eq!(r(95.0, 45.0, 10.0, 10.0).clamped_within(bounds), r(90.0, 40.0, 10.0, 10.0));
        assert_eq!(r(20.0, 20.0, 10.0, 10.0).clamped_within(bounds), r(20.0, 20.0, 10.0, 10.0));
    }

    #[test]
    fn clamped_within_aligns_oversized_rect_to_origin() {
        let bounds = r(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r(5.0, 5.0, 20.0, 20.0).clamped_within(bounds), r(0.0, 0.0, 20.0, 20.0));
    }
}
