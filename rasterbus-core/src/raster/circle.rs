//! Midpoint circle algorithms

use super::fallback::vrun;
use super::{corner, half};
use crate::color::Color565;
use crate::geometry::Coord;
use crate::traits::Device;

/// Midpoint circle state, stepping `x` up from 0 until it meets `y`
struct Midpoint {
    f: i32,
    ddf_x: i32,
    ddf_y: i32,
    x: i32,
    y: i32,
}

impl Midpoint {
    fn new(r: Coord) -> Self {
        let r = i32::from(r);
        Self {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }
}

impl Iterator for Midpoint {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.x >= self.y {
            return None;
        }
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
        Some((self.x, self.y))
    }
}

fn plot<D: Device + ?Sized>(d: &mut D, x: i32, y: i32, color: Color565) {
    if let (Ok(x), Ok(y)) = (Coord::try_from(x), Coord::try_from(y)) {
        d.draw_pixel(x, y, color);
    }
}

fn vline<D: Device + ?Sized>(d: &mut D, x: i32, y: i32, h: i32, color: Color565) {
    if h > 0 {
        vrun(d, x, y, y + h - 1, color);
    }
}

pub fn outline<D: Device + ?Sized>(d: &mut D, x0: Coord, y0: Coord, r: Coord, color: Color565) {
    if r < 0 {
        return;
    }
    let (cx, cy, r32) = (i32::from(x0), i32::from(y0), i32::from(r));

    plot(d, cx, cy + r32, color);
    plot(d, cx, cy - r32, color);
    plot(d, cx + r32, cy, color);
    plot(d, cx - r32, cy, color);

    for (x, y) in Midpoint::new(r) {
        plot(d, cx + x, cy + y, color);
        plot(d, cx - x, cy + y, color);
        plot(d, cx + x, cy - y, color);
        plot(d, cx - x, cy - y, color);
        plot(d, cx + y, cy + x, color);
        plot(d, cx - y, cy + x, color);
        plot(d, cx + y, cy - x, color);
        plot(d, cx - y, cy - x, color);
    }
}

/// Quarter arcs around a center given in widened coordinates
pub fn arcs<D: Device + ?Sized>(
    d: &mut D,
    cx: i32,
    cy: i32,
    r: Coord,
    corners: u8,
    color: Color565,
) {
    for (x, y) in Midpoint::new(r) {
        if corners & corner::BOTTOM_RIGHT != 0 {
            plot(d, cx + x, cy + y, color);
            plot(d, cx + y, cy + x, color);
        }
        if corners & corner::TOP_RIGHT != 0 {
            plot(d, cx + x, cy - y, color);
            plot(d, cx + y, cy - x, color);
        }
        if corners & corner::BOTTOM_LEFT != 0 {
            plot(d, cx - y, cy + x, color);
            plot(d, cx - x, cy + y, color);
        }
        if corners & corner::TOP_LEFT != 0 {
            plot(d, cx - y, cy - x, color);
            plot(d, cx - x, cy - y, color);
        }
    }
}

pub fn fill_halves<D: Device + ?Sized>(
    d: &mut D,
    cx: i32,
    cy: i32,
    r: Coord,
    halves: u8,
    delta: i32,
    color: Color565,
) {
    for (x, y) in Midpoint::new(r) {
        if halves & half::RIGHT != 0 {
            vline(d, cx + x, cy - y, 2 * y + 1 + delta, color);
            vline(d, cx + y, cy - x, 2 * x + 1 + delta, color);
        }
        if halves & half::LEFT != 0 {
            vline(d, cx - x, cy - y, 2 * y + 1 + delta, color);
            vline(d, cx - y, cy - x, 2 * x + 1 + delta, color);
        }
    }
}
