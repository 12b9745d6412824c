//! Brush-stamp rasterization of stroke segments and shape outlines.
//!
//! Everything here paints by walking a path and stamping a filled disc of
//! the stroke width at each step, which gives round caps and joins like an
//! immediate-mode canvas stroke. Clipping is handled by
//! [`Surface::composite`], so callers can pass out-of-bounds geometry.

use crate::surface::{CompositeOp, Surface};
use kurbo::Point;
use peniko::Color;

/// Stamp a filled disc of diameter `width` centered at `(cx, cy)`.
fn stamp(surface: &mut Surface, cx: i32, cy: i32, width: f64, color: Color, op: CompositeOp) {
    let radius = (width / 2.0).max(0.5);
    let ri = radius.ceil() as i32;
    let r2 = radius * radius;
    for dy in -ri..=ri {
        for dx in -ri..=ri {
            if (dx * dx + dy * dy) as f64 <= r2 {
                surface.composite(cx + dx, cy + dy, color, op);
            }
        }
    }
}

/// Composite a straight segment from `a` to `b` at the given stroke width.
///
/// Walks the segment with Bresenham and stamps the brush at every step.
pub fn stroke_segment(
    surface: &mut Surface,
    a: Point,
    b: Point,
    width: f64,
    color: Color,
    op: CompositeOp,
) {
    let (mut x0, mut y0) = (a.x.round() as i32, a.y.round() as i32);
    let (x1, y1) = (b.x.round() as i32, b.y.round() as i32);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp(surface, x0, y0, width, color, op);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Composite an axis-aligned rectangle outline with corners at `anchor`
/// and `corner`.
///
/// Negative extents (the pointer moved left/up of the anchor) are valid and
/// paint the flipped rectangle.
pub fn stroke_rect(
    surface: &mut Surface,
    anchor: Point,
    corner: Point,
    width: f64,
    color: Color,
    op: CompositeOp,
) {
    let x0 = anchor.x.min(corner.x);
    let x1 = anchor.x.max(corner.x);
    let y0 = anchor.y.min(corner.y);
    let y1 = anchor.y.max(corner.y);

    let tl = Point::new(x0, y0);
    let tr = Point::new(x1, y0);
    let br = Point::new(x1, y1);
    let bl = Point::new(x0, y1);

    stroke_segment(surface, tl, tr, width, color, op);
    stroke_segment(surface, tr, br, width, color, op);
    stroke_segment(surface, br, bl, width, color, op);
    stroke_segment(surface, bl, tl, width, color, op);
}

/// Composite an axis-aligned ellipse outline centered at `center` with the
/// given radii (rotation 0, full sweep).
///
/// Degenerate radii collapse to a segment or a single brush stamp.
pub fn stroke_ellipse(
    surface: &mut Surface,
    center: Point,
    radius_x: f64,
    radius_y: f64,
    width: f64,
    color: Color,
    op: CompositeOp,
) {
    let rx = radius_x.abs();
    let ry = radius_y.abs();

    if rx < 0.5 && ry < 0.5 {
        stamp(
            surface,
            center.x.round() as i32,
            center.y.round() as i32,
            width,
            color,
            op,
        );
        return;
    }

    // Sample the parametric outline densely enough that consecutive points
    // are at most ~2px apart, then connect them with stroked segments so
    // the outline has no gaps.
    let steps = (std::f64::consts::PI * (rx + ry)).ceil().max(8.0) as usize;
    let mut prev = Point::new(center.x + rx, center.y);
    for i in 1..=steps {
        let t = i as f64 / steps as f64 * std::f64::consts::TAU;
        let p = Point::new(center.x + rx * t.cos(), center.y + ry * t.sin());
        stroke_segment(surface, prev, p, width, color, op);
        prev = p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        Surface::new(100, 100).unwrap()
    }

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }

    fn painted(surface: &Surface, x: i32, y: i32) -> bool {
        surface.pixel(x, y).map(|p| p[3] > 0).unwrap_or(false)
    }

    #[test]
    fn test_segment_covers_endpoints() {
        let mut s = surface();
        stroke_segment(&mut s, Point::new(10.0, 10.0), Point::new(40.0, 30.0), 1.0, red(), CompositeOp::SourceOver);
        assert!(painted(&s, 10, 10));
        assert!(painted(&s, 40, 30));
        assert!(painted(&s, 25, 20));
    }

    #[test]
    fn test_segment_width_grows_coverage() {
        let mut thin = surface();
        let mut thick = surface();
        stroke_segment(&mut thin, Point::new(20.0, 20.0), Point::new(60.0, 20.0), 1.0, red(), CompositeOp::SourceOver);
        stroke_segment(&mut thick, Point::new(20.0, 20.0), Point::new(60.0, 20.0), 10.0, red(), CompositeOp::SourceOver);

        let count = |s: &Surface| s.data().chunks_exact(4).filter(|p| p[3] > 0).count();
        assert!(count(&thick) > count(&thin));
        // Width 10 reaches ~5px above the path; width 1 does not.
        assert!(painted(&thick, 40, 16));
        assert!(!painted(&thin, 40, 16));
    }

    #[test]
    fn test_rect_outline_leaves_interior_untouched() {
        let mut s = surface();
        stroke_rect(&mut s, Point::new(10.0, 10.0), Point::new(50.0, 40.0), 2.0, red(), CompositeOp::SourceOver);
        assert!(painted(&s, 10, 10));
        assert!(painted(&s, 50, 40));
        assert!(painted(&s, 30, 10));
        assert!(painted(&s, 10, 25));
        assert!(!painted(&s, 30, 25));
    }

    #[test]
    fn test_rect_negative_extents_equivalent() {
        let mut forward = surface();
        let mut backward = surface();
        stroke_rect(&mut forward, Point::new(10.0, 10.0), Point::new(50.0, 40.0), 3.0, red(), CompositeOp::SourceOver);
        stroke_rect(&mut backward, Point::new(50.0, 40.0), Point::new(10.0, 10.0), 3.0, red(), CompositeOp::SourceOver);
        assert_eq!(forward.data(), backward.data());
    }

    #[test]
    fn test_ellipse_passes_through_extremes() {
        let mut s = surface();
        stroke_ellipse(&mut s, Point::new(50.0, 50.0), 20.0, 10.0, 2.0, red(), CompositeOp::SourceOver);
        assert!(painted(&s, 70, 50));
        assert!(painted(&s, 30, 50));
        assert!(painted(&s, 50, 60));
        assert!(painted(&s, 50, 40));
        // Center stays clear for an outline.
        assert!(!painted(&s, 50, 50));
    }

    #[test]
    fn test_degenerate_ellipse_is_a_stamp() {
        let mut s = surface();
        stroke_ellipse(&mut s, Point::new(50.0, 50.0), 0.0, 0.0, 4.0, red(), CompositeOp::SourceOver);
        assert!(painted(&s, 50, 50));
        assert!(!painted(&s, 60, 50));
    }

    #[test]
    fn test_out_of_bounds_geometry_is_clipped() {
        let mut s = surface();
        stroke_segment(&mut s, Point::new(-50.0, -50.0), Point::new(-10.0, -10.0), 5.0, red(), CompositeOp::SourceOver);
        assert!(s.data().iter().all(|&b| b == 0));

        // Partially off-surface geometry paints the visible part.
        stroke_segment(&mut s, Point::new(-10.0, 5.0), Point::new(10.0, 5.0), 1.0, red(), CompositeOp::SourceOver);
        assert!(painted(&s, 5, 5));
    }
}
