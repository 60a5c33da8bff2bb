//! Primitive rasterization functions.
//!
//! Implements rasterization algorithms for the shapes charts are made of:
//! axis lines, bars, and annular sectors for pie and sunburst slices.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

/// Trait for drawable primitives.
pub trait Drawable {
    /// Draw this primitive to a framebuffer.
    fn draw(&self, fb: &mut Framebuffer, color: Rgba);
}

/// Draw a line using Bresenham's algorithm (non-antialiased).
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `x0`, `y0` - Start coordinates
/// * `x1`, `y1` - End coordinates
/// * `color` - Line color
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;
    fb.fill_rect(x, y, width, height, color);
}

impl Drawable for Rect {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        draw_rect(
            fb,
            self.x.round() as i32,
            self.y.round() as i32,
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
            color,
        );
    }
}

/// Annular sector: the shape of a pie slice (`inner == 0`) or sunburst arc.
///
/// Angles run clockwise from 12 o'clock, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    /// Center of the circle.
    pub center: Point,
    /// Inner radius (0 for a pie slice).
    pub inner: f32,
    /// Outer radius.
    pub outer: f32,
    /// Start angle.
    pub start: f32,
    /// End angle (`end > start`).
    pub end: f32,
}

impl Wedge {
    /// Whether a pixel center falls inside the wedge.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let r = self.center.distance(point);
        if r < self.inner || r > self.outer {
            return false;
        }
        let angle = self.center.angle_to(point);
        angle >= self.start && angle < self.end
    }
}

/// Fill an annular sector by scanning its bounding box.
pub fn draw_wedge(fb: &mut Framebuffer, wedge: &Wedge, color: Rgba) {
    let x0 = (wedge.center.x - wedge.outer).floor().max(0.0) as u32;
    let y0 = (wedge.center.y - wedge.outer).floor().max(0.0) as u32;
    let x1 = ((wedge.center.x + wedge.outer).ceil().max(0.0) as u32).min(fb.width());
    let y1 = ((wedge.center.y + wedge.outer).ceil().max(0.0) as u32).min(fb.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel_center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if wedge.contains(pixel_center) {
                fb.set_pixel(x, y, color);
            }
        }
    }
}

impl Drawable for Wedge {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        draw_wedge(fb, self, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);

        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);

        draw_line(&mut fb, 10, 10, 90, 90, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 90), Some(Rgba::BLACK));
    }

    #[test]
    fn test_line_out_of_bounds() {
        let mut fb = Framebuffer::new(10, 10).expect("framebuffer creation should succeed");
        draw_line(&mut fb, -5, -5, 20, 20, Rgba::RED);
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::RED));
    }

    #[test]
    fn test_drawable_rect() {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);

        Rect::new(20.0, 20.0, 30.0, 30.0).draw(&mut fb, Rgba::RED);

        assert_eq!(fb.get_pixel(25, 25), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_full_wedge_is_a_disc() {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        let wedge = Wedge {
            center: Point::new(50.0, 50.0),
            inner: 0.0,
            outer: 40.0,
            start: 0.0,
            end: TAU,
        };
        wedge.draw(&mut fb, Rgba::BLUE);

        // Area of a disc of radius 40 in a 100x100 buffer.
        let expected = PI * 40.0 * 40.0 / 10_000.0;
        assert!((fb.coverage(Rgba::BLUE) - expected).abs() < 0.01);
        assert_eq!(fb.get_pixel(2, 2), Some(Rgba::WHITE));
    }

    #[test]
    fn test_half_wedge_is_right_side() {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        draw_wedge(
            &mut fb,
            &Wedge {
                center: Point::new(50.0, 50.0),
                inner: 0.0,
                outer: 40.0,
                start: 0.0,
                end: PI,
            },
            Rgba::RED,
        );

        // Clockwise from 12 o'clock for half a turn covers the right half.
        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(30, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_annulus_leaves_hole() {
        let wedge = Wedge {
            center: Point::new(0.0, 0.0),
            inner: 10.0,
            outer: 20.0,
            start: 0.0,
            end: TAU,
        };
        assert!(!wedge.contains(Point::new(5.0, 0.0)));
        assert!(wedge.contains(Point::new(15.0, 0.0)));
        assert!(!wedge.contains(Point::new(25.0, 0.0)));
    }
}
