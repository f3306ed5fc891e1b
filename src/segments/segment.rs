use serde::{Deserialize, Serialize};

/// Line segment with integer pixel endpoints, as produced by the Hough stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl Segment {
    pub fn new(p0: [i32; 2], p1: [i32; 2]) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        (self.p1[0] - self.p0[0]) as f64
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        (self.p1[1] - self.p0[1]) as f64
    }

    pub fn midpoint(&self) -> [f64; 2] {
        [
            (self.p0[0] + self.p1[0]) as f64 * 0.5,
            (self.p0[1] + self.p1[1]) as f64 * 0.5,
        ]
    }

    /// Euclidean endpoint distance.
    pub fn length(&self) -> f64 {
        self.dx().hypot(self.dy())
    }

    /// Signed orientation `atan2(dy, dx)` in degrees, range (-180, 180].
    pub fn angle_deg(&self) -> f64 {
        self.dy().atan2(self.dx()).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_angle() {
        let s = Segment::new([0, 0], [3, 4]);
        assert!((s.length() - 5.0).abs() < 1e-12);
        let h = Segment::new([10, 5], [60, 5]);
        assert_eq!(h.angle_deg(), 0.0);
        let v = Segment::new([0, 0], [0, -7]);
        assert!((v.angle_deg() + 90.0).abs() < 1e-12);
        assert_eq!(h.midpoint(), [35.0, 5.0]);
    }
}
