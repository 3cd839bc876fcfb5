#![forbid(unsafe_code)]

//! Geometric primitives for world-space panel math.
//!
//! Coordinates are f32 world units with origin at the scene center. The
//! camera is orthographic, so vertical extent is the only quantity that
//! matters for framing: [`Bounds::half_height`] maps directly onto the
//! camera's orthographic size.

/// A 2D vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    /// The unit-scale vector (1, 1).
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    /// Create a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Uniform vector with both components equal to `v`.
    #[inline]
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Component-wise multiplication.
    #[inline]
    #[must_use]
    pub fn mul(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    /// Scale both components by a scalar.
    #[inline]
    #[must_use]
    pub fn scale(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    /// Linear interpolation from `self` to `other` at parameter `t`.
    ///
    /// `t` is not clamped; callers pass eased progress already in [0, 1].
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Scalar linear interpolation.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// An axis-aligned rectangle in world space, stored as center + size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Center of the rectangle in world units.
    pub center: Vec2,
    /// Full width and height in world units.
    pub size: Vec2,
}

impl Bounds {
    /// Create bounds from a center point and full extent.
    #[inline]
    #[must_use]
    pub const fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Half of the vertical extent — the orthographic camera size that
    /// exactly frames these bounds.
    #[inline]
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.size.y / 2.0
    }

    /// Whether the rectangle encloses zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Check if a point lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        let hw = self.size.x / 2.0;
        let hh = self.size.y / 2.0;
        p.x >= self.center.x - hw
            && p.x <= self.center.x + hw
            && p.y >= self.center.y - hh
            && p.y <= self.center.y + hh
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
