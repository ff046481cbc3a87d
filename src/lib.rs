pub mod vector {
    use std::ops::{Add, Mul, Sub};

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Vec2 {
        pub x: f64,
        pub y: f64,
    }

    impl Vec2 {
        pub fn new(x: f64, y: f64) -> Vec2 {
            Vec2 { x, y }
        }

        pub fn magnitude(&self) -> f64 {
            (self.x * self.x + self.y * self.y).sqrt()
        }

        /// Angle from the positive x axis in radians, range (-pi, pi].
        pub fn angle(&self) -> f64 {
            self.y.atan2(self.x)
        }

        pub fn angle_degrees(&self) -> f64 {
            self.angle().to_degrees()
        }

        pub fn normalize(&self) -> Vec2 {
            let mag = self.magnitude();
            if mag == 0.0 {
                return Vec2::new(0.0, 0.0);
            }
            Vec2::new(self.x / mag, self.y / mag)
        }

        pub fn dot(&self, other: Vec2) -> f64 {
            self.x * other.x + self.y * other.y
        }
    }

    impl Add for Vec2 {
        type Output = Vec2;
        fn add(self, other: Vec2) -> Vec2 {
            Vec2::new(self.x + other.x, self.y + other.y)
        }
    }

    impl Sub for Vec2 {
        type Output = Vec2;
        fn sub(self, other: Vec2) -> Vec2 {
            Vec2::new(self.x - other.x, self.y - other.y)
        }
    }

    impl Mul<f64> for Vec2 {
        type Output = Vec2;
        fn mul(self, scalar: f64) -> Vec2 {
            Vec2::new(self.x * scalar, self.y * scalar)
        }
    }

    /// Distance from `p` to the segment `a`-`b`. The projection parameter
    /// clamps exactly at 0 and 1, so both endpoints count as part of the
    /// segment; a zero-length segment degenerates to point distance.
    pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f64 {
        let ab = b - a;
        let len_sq = ab.dot(ab);
        if len_sq == 0.0 {
            return (p - a).magnitude();
        }
        let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
        (p - (a + ab * t)).magnitude()
    }

}
