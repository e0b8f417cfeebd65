//! Scanline triangle fill

use core::mem::swap;

use super::fallback::hrun;
use crate::color::Color565;
use crate::geometry::Coord;
use crate::traits::Device;

fn span<D: Device + ?Sized>(d: &mut D, a: i64, b: i64, y: i64, color: Color565) {
    // Edge x stays between the vertex x values, so these fit in i32.
    let (a, b) = (a.min(b) as i32, a.max(b) as i32);
    hrun(d, a, b, y as i32, color);
}

/// Fill the triangle spanned by three vertices
///
/// Vertices are sorted by y, then the upper part (down to the middle
/// vertex) and the lower part are scan-converted separately. Edge x
/// positions come from a running numerator over a fixed per-edge
/// denominator, so no edge with zero height is ever divided by. The
/// numerators grow to the product of a width and a height, hence `i64`.
pub fn fill<D: Device + ?Sized>(d: &mut D, vertices: [(Coord, Coord); 3], color: Color565) {
    let [mut p0, mut p1, mut p2] = vertices.map(|(x, y)| (i64::from(x), i64::from(y)));

    if p0.1 > p1.1 {
        swap(&mut p0, &mut p1);
    }
    if p1.1 > p2.1 {
        swap(&mut p1, &mut p2);
    }
    if p0.1 > p1.1 {
        swap(&mut p0, &mut p1);
    }
    let ((x0, y0), (x1, y1), (x2, y2)) = (p0, p1, p2);

    if y0 == y2 {
        let a = x0.min(x1).min(x2);
        let b = x0.max(x1).max(x2);
        span(d, a, b, y0, color);
        return;
    }

    let (dx01, dy01) = (x1 - x0, y1 - y0);
    let (dx02, dy02) = (x2 - x0, y2 - y0);
    let (dx12, dy12) = (x2 - x1, y2 - y1);

    // A flat-bottom triangle owns the middle row in the upper part; otherwise
    // the middle row belongs to the lower part.
    let last = if y1 == y2 { y1 } else { y1 - 1 };

    let mut sa = 0;
    let mut sb = 0;
    let mut y = y0;
    while y <= last {
        let a = x0 + sa / dy01;
        let b = x0 + sb / dy02;
        sa += dx01;
        sb += dx02;
        span(d, a, b, y, color);
        y += 1;
    }

    let mut sa = dx12 * (y - y1);
    let mut sb = dx02 * (y - y0);
    while y <= y2 {
        let a = x1 + sa / dy12;
        let b = x0 + sb / dy02;
        sa += dx12;
        sb += dx02;
        span(d, a, b, y, color);
        y += 1;
    }
}
