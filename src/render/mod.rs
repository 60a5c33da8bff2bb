//! Rasterization of chart primitives.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: Fast non-antialiased line drawing for axes
//! - **Scanline wedge fill**: Pie slices and sunburst arcs tested per pixel center
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{draw_line, draw_rect, draw_wedge, Drawable, Wedge};
