use std::ops::{Add, Div, Mul, Sub};

/// A point or direction in the plot plane, in kilometres.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(self, m: f64) -> Self {
        Self::new(self.x * m, self.y * m)
    }

    pub fn divide(self, m: f64) -> Self {
        self.multiply(1.0 / m)
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rescale to `length` keeping the direction.
    /// The zero vector has no direction and stays zero.
    pub fn scale(self, length: f64) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Self::ZERO;
        }
        self.multiply(length / magnitude)
    }

    /// Counter-clockwise rotation by `theta` radians.
    pub fn rotate(self, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    #[cfg(test)]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product; positive when `other` is
    /// counter-clockwise of `self`.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn distance(self, other: Self) -> f64 {
        self.subtract(other).magnitude()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vec2::add(self, rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.multiply(rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.divide(rhs)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn arithmetic_matches_components() {
        let a = Vec2::new(3.0, -4.0);
        let b = Vec2::new(1.5, 2.0);
        assert_eq!(a + b, Vec2::new(4.5, -2.0));
        assert_eq!(a - b, Vec2::new(1.5, -6.0));
        assert_eq!(a * 2.0, Vec2::new(6.0, -8.0));
        assert_eq!(a / 2.0, Vec2::new(1.5, -2.0));
        assert_eq!(a.magnitude(), 5.0);
    }

    #[test]
    fn scale_keeps_direction() {
        let v = Vec2::new(3.0, 4.0).scale(10.0);
        assert!(close(v, Vec2::new(6.0, 8.0)));
        assert!((v.magnitude() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn scale_of_zero_vector_is_zero() {
        let v = Vec2::ZERO.scale(100.0);
        assert_eq!(v, Vec2::ZERO);
        assert!(v.is_finite());
    }

    #[test]
    fn rotate_quarter_turn() {
        assert!(close(Vec2::new(1.0, 0.0).rotate(FRAC_PI_2), Vec2::new(0.0, 1.0)));
        assert!(close(Vec2::new(0.0, 2.0).rotate(PI), Vec2::new(0.0, -2.0)));
    }

    #[test]
    fn rotate_preserves_magnitude() {
        let v = Vec2::new(-7.0, 11.0);
        for i in 0..16 {
            let r = v.rotate(i as f64 * 0.37);
            assert!((r.magnitude() - v.magnitude()).abs() < 1e-9);
        }
    }

    #[test]
    fn cross_sign_follows_orientation() {
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 1.0);
        assert!(x.cross(y) > 0.0);
        assert!(y.cross(x) < 0.0);
    }
}
