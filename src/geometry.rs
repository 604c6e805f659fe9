//! Tests for whether a color is reconstructable by blending palette colors.

use crate::color::{Color, near_enough};

/// Channels this far outside the span can still pass the final
/// near-enough comparison, so the box must not reject them early.
const BOX_SLACK: i16 = 2;

/// True when `v` lies more than the tolerance outside the interval
/// spanned by `a`/`b` (in either order).
fn outside_pair(v: u8, a: u8, b: u8) -> bool {
    let v = i16::from(v);
    let (a, b) = (i16::from(a), i16::from(b));
    v > a.max(b) + BOX_SLACK || v < a.min(b) - BOX_SLACK
}

fn outside_triple(v: u8, a: u8, b: u8, c: u8) -> bool {
    let v = i16::from(v);
    let hi = i16::from(a).max(i16::from(b)).max(i16::from(c));
    let lo = i16::from(a).min(i16::from(b)).min(i16::from(c));
    v > hi + BOX_SLACK || v < lo - BOX_SLACK
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + f64::from(i32::from(b) - i32::from(a)) * t) as u8
}

/// Is `p` on the line between `c1` and `c2` in RGB space?
///
/// The interpolation parameter is anchored on the channel where c1 and c2
/// are furthest apart, then the other channels are checked against the
/// linear blend at that position with the near-enough tolerance. Alpha is
/// never interpolated; the comparison reuses p's own alpha.
pub fn between_pair(p: Color, c1: Color, c2: Color) -> bool {
    // Any component beyond tolerance of the range of c1 to c2?
    if outside_pair(p.r, c1.r, c2.r)
        || outside_pair(p.g, c1.g, c2.g)
        || outside_pair(p.b, c1.b, c2.b)
    {
        return false;
    }

    // Find the component where c1 and c2 differ most.
    let rd = (i32::from(c1.r) - i32::from(c2.r)).abs();
    let gd = (i32::from(c1.g) - i32::from(c2.g)).abs();
    let bd = (i32::from(c1.b) - i32::from(c2.b)).abs();

    // From 0.0 at c1 to 1.0 at c2. The chosen axis has the widest
    // separation, so the divisor is only zero when c1 == c2 in RGB.
    let position = if rd >= gd && rd >= bd {
        f64::from(i32::from(p.r) - i32::from(c1.r)) / f64::from(i32::from(c2.r) - i32::from(c1.r))
    } else if gd >= rd && gd >= bd {
        f64::from(i32::from(p.g) - i32::from(c1.g)) / f64::from(i32::from(c2.g) - i32::from(c1.g))
    } else {
        f64::from(i32::from(p.b) - i32::from(c1.b)) / f64::from(i32::from(c2.b) - i32::from(c1.b))
    };

    let expected = Color::new(
        lerp_channel(c1.r, c2.r, position),
        lerp_channel(c1.g, c2.g, position),
        lerp_channel(c1.b, c2.b, position),
        p.a,
    );
    near_enough(p, expected)
}

/// Is `p` on a plane between `c1`, `c2`, and `c3` in RGB space?
///
/// Only the bounding-box rejection is performed; planar containment is
/// never positively detected. Kept as its own function so a barycentric
/// implementation could replace it without touching the selector.
pub fn between_triple(p: Color, c1: Color, c2: Color, c3: Color) -> bool {
    if outside_triple(p.r, c1.r, c2.r, c3.r)
        || outside_triple(p.g, c1.g, c2.g, c3.g)
        || outside_triple(p.b, c1.b, c2.b, c3.b)
    {
        return false;
    }
    false
}
