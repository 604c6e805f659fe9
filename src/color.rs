/// An 8-bit RGBA color sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Alpha below this is treated as fully transparent.
pub const TRANSPARENT_CUTOFF: u8 = 10;
/// Alpha above this is treated as fully opaque.
pub const OPAQUE_CUTOFF: u8 = 245;

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Canonicalize near-transparent and near-opaque alpha.
    ///
    /// Nearly transparent pixels collapse to the single (0,0,0,0) color so
    /// they all land in one cluster; nearly opaque pixels are forced fully
    /// opaque. Partial transparency in between passes through unchanged.
    /// Idempotent.
    pub fn normalize(self) -> Self {
        if self.a < TRANSPARENT_CUTOFF {
            Self::new(0, 0, 0, 0)
        } else if self.a > OPAQUE_CUTOFF {
            Self::new(self.r, self.g, self.b, 255)
        } else {
            self
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

/// True when every channel's signed difference lies in [-2, 2].
///
/// The subtraction widens to i16 so channel extremes never wrap: 0 and
/// 255 are far apart, not one step. Symmetric but not transitive, so
/// chains of near-enough colors can drift apart.
pub fn near_enough(c1: Color, c2: Color) -> bool {
    fn channel(x: u8, y: u8) -> bool {
        (i16::from(x) - i16::from(y)).abs() <= 2
    }
    channel(c1.r, c2.r) && channel(c1.g, c2.g) && channel(c1.b, c2.b) && channel(c1.a, c2.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_alpha_extremes() {
        assert_eq!(Color::new(50, 60, 70, 9).normalize(), Color::new(0, 0, 0, 0));
        assert_eq!(Color::new(50, 60, 70, 0).normalize(), Color::new(0, 0, 0, 0));
        assert_eq!(Color::new(50, 60, 70, 246).normalize(), Color::new(50, 60, 70, 255));
        assert_eq!(Color::new(50, 60, 70, 255).normalize(), Color::new(50, 60, 70, 255));
    }

    #[test]
    fn normalize_preserves_partial_alpha() {
        let c = Color::new(50, 60, 70, 128);
        assert_eq!(c.normalize(), c);
        assert_eq!(Color::new(1, 2, 3, 10).normalize(), Color::new(1, 2, 3, 10));
        assert_eq!(Color::new(1, 2, 3, 245).normalize(), Color::new(1, 2, 3, 245));
    }

    #[test]
    fn normalize_is_idempotent() {
        for a in 0..=255u8 {
            let c = Color::new(17, 130, 201, a);
            assert_eq!(c.normalize(), c.normalize().normalize());
        }
    }

    #[test]
    fn near_enough_window_is_two_per_channel() {
        let base = Color::new(100, 100, 100, 255);
        for d in -2i16..=2 {
            let c = Color::new((100 + d) as u8, 100, 100, 255);
            assert!(near_enough(base, c), "offset {d} should match");
        }
        assert!(!near_enough(base, Color::new(103, 100, 100, 255)));
        assert!(!near_enough(base, Color::new(97, 100, 100, 255)));
        assert!(!near_enough(base, Color::new(100, 100, 100, 250)));
    }

    #[test]
    fn channel_extremes_never_match() {
        // 0 and 255 differ by 1 mod 256; the widened subtraction must see
        // the true distance of 255.
        assert!(!near_enough(Color::new(0, 0, 0, 255), Color::new(255, 0, 0, 255)));
        assert!(!near_enough(Color::new(255, 0, 0, 255), Color::new(0, 255, 0, 255)));
        // Opaque colors never fold into the transparent cluster.
        assert!(!near_enough(Color::new(0, 0, 0, 0), Color::new(1, 1, 1, 255)));
        assert!(near_enough(Color::new(0, 0, 0, 255), Color::new(2, 1, 0, 255)));
    }

    #[test]
    fn near_enough_is_symmetric() {
        let samples = [
            Color::new(0, 0, 0, 0),
            Color::new(1, 2, 3, 255),
            Color::new(2, 3, 4, 255),
            Color::new(254, 255, 0, 255),
            Color::new(128, 128, 128, 128),
            Color::new(130, 126, 129, 130),
        ];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(near_enough(a, b), near_enough(b, a));
            }
        }
    }
}
