/// Screen-space point or offset in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Cartesian point on (or near) the unit sphere.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns `None` for (near) zero-length vectors.
    pub fn normalized(self) -> Option<Self> {
        let n = self.length();
        (n > 1e-12).then(|| self * n.recip())
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, k: f64) -> Self::Output {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

#[cfg(test)]
mod tests {
    use super::{Vec2, Vec3};

    #[test]
    fn vec2_offsets_add() {
        let center = Vec2::new(250.0, 250.0);
        assert_eq!(center + Vec2::new(-10.0, 4.0), Vec2::new(240.0, 254.0));
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn vec3_normalize() {
        let v = Vec3::new(0.0, 3.0, 4.0).normalized().expect("non-zero");
        assert!((v.length() - 1.0).abs() < 1e-15);
        assert!((v.y - 0.6).abs() < 1e-15);
        assert!(Vec3::default().normalized().is_none());
        assert_eq!(Vec3::new(1.0, 2.0, -1.0).dot(Vec3::new(0.5, -2.0, 3.0)), -6.5);
        assert_eq!(Vec3::new(1.0, 0.0, -2.0) * 0.5, Vec3::new(0.5, 0.0, -1.0));
    }
}
