/// Axis-aligned integer rectangle in whole-image pixel coordinates.
///
/// `x`/`y` is the top-left corner; the right and bottom edges are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Closed-interval intersection.
    ///
    /// Rectangles that only share an edge yield a zero-width (or zero-height)
    /// strip rather than `None`, so two fragments separated by exactly the
    /// expansion margin still meet.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x1 > x2 || y1 > y2 {
            return None;
        }
        Some(Rect::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1)))
    }

    /// Grows the rectangle by `margin` on every side.
    ///
    /// The origin is clamped at zero; the far edges still move outward by
    /// the full margin.
    pub fn expand(&self, margin: i32) -> Rect {
        let x = self.x.saturating_sub(margin).max(0);
        let y = self.y.saturating_sub(margin).max(0);
        let right = self.right().saturating_add(margin);
        let bottom = self.bottom().saturating_add(margin);
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Strict open-interval overlap of the vertical extents.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    /// Expresses `self` relative to the origin of `frame`.
    pub fn relative_to(&self, frame: &Rect) -> Rect {
        Rect::new(
            self.x.saturating_sub(frame.x),
            self.y.saturating_sub(frame.y),
            self.width,
            self.height,
        )
    }
}
