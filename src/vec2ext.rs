use glam::Vec2;

/// Extra vector ops the steering code leans on.
///
/// All of these are total: zero-length inputs degrade to the zero vector
/// instead of producing NaNs, so callers never have to pre-check magnitudes.
pub trait Vec2Ext {
    /// Clamp magnitude to `max`. Shorter vectors pass through unchanged.
    fn limit(self, max: f32) -> Vec2;

    /// Rescale to exactly `len`. The zero vector stays zero.
    fn with_length(self, len: f32) -> Vec2;

    /// Toroidal wrap into `[0, w) x [0, h)`.
    fn wrap(self, w: f32, h: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    fn limit(self, max: f32) -> Vec2 {
        self.clamp_length_max(max)
    }

    fn with_length(self, len: f32) -> Vec2 {
        self.normalize_or_zero() * len
    }

    fn wrap(self, w: f32, h: f32) -> Vec2 {
        Vec2::new(self.x.rem_euclid(w), self.y.rem_euclid(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_clamps_long_vectors() {
        let v = Vec2::new(30.0, 40.0).limit(5.0);
        assert!((v.length() - 5.0).abs() < 1e-5);

        let short = Vec2::new(1.0, 0.0).limit(5.0);
        assert_eq!(short, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn with_length_is_zero_safe() {
        assert_eq!(Vec2::ZERO.with_length(10.0), Vec2::ZERO);
        let v = Vec2::new(0.0, 2.0).with_length(10.0);
        assert!((v - Vec2::new(0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn wrap_reenters_opposite_edge() {
        let v = Vec2::new(105.0, -3.0).wrap(100.0, 50.0);
        assert!((v.x - 5.0).abs() < 1e-5);
        assert!((v.y - 47.0).abs() < 1e-5);

        // Already in bounds: untouched.
        let u = Vec2::new(10.0, 10.0).wrap(100.0, 50.0);
        assert_eq!(u, Vec2::new(10.0, 10.0));
    }
}
