pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(w: f64, h: f64) -> Size {
    euclid::size2(w, h)
}

pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    euclid::rect(x, y, w, h)
}

/// Camera transform: `screen = translation + scene * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    pub fn translation(&self) -> Vector {
        vector(self.x, self.y)
    }

    pub fn apply(&self, p: Point) -> Point {
        point(self.x + p.x * self.k, self.y + p.y * self.k)
    }

    /// Inverse of [`ViewTransform::apply`]. `k` is never zero for a clamped viewport.
    pub fn invert(&self, p: Point) -> Point {
        point((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }
}
