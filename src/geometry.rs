// =============================================================================
// GEOMETRY.RS: screen-space rectangles for widget layout and hit-testing
//
// All coordinates are logical pixels with the origin at the top-left corner
// and Y pointing down.  Containment is half-open: a point on the right or
// bottom edge is outside.
// =============================================================================

pub use glam::Vec2;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(top_left: Vec2, size: Vec2) -> Self {
        Self::new(top_left.x, top_left.y, size.x, size.y)
    }

    /// Rectangle of `size` centred on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::from_size(center - size * 0.5, size)
    }

    /// Rectangle of `size` whose bottom edge is centred on `midbottom`.
    pub fn from_midbottom(midbottom: Vec2, size: Vec2) -> Self {
        Self::new(midbottom.x - size.x * 0.5, midbottom.y - size.y, size.x, size.y)
    }

    #[inline] pub fn left(&self) -> f32 { self.x }
    #[inline] pub fn right(&self) -> f32 { self.x + self.w }
    #[inline] pub fn top(&self) -> f32 { self.y }
    #[inline] pub fn bottom(&self) -> f32 { self.y + self.h }

    pub fn top_left(&self) -> Vec2 { Vec2::new(self.x, self.y) }
    pub fn size(&self) -> Vec2 { Vec2::new(self.w, self.h) }
    pub fn center(&self) -> Vec2 { Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5) }

    /// Half-open containment test.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Same rectangle shifted by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Keep the top-left corner, replace the width.
    pub fn with_width(&self, w: f32) -> Self {
        Self::new(self.x, self.y, w, self.h)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        Self::new(x, y, r - x, b - y)
    }
}
