//! High-level chart types.
//!
//! Provides ready-to-use chart builders that render to SVG and, for the
//! shape-only charts, to a raster framebuffer.

mod bar;
mod pie;
mod sunburst;
mod word_cloud;

pub use bar::{Bar, BarChart};
pub use pie::{PieChart, PieSlice};
pub use sunburst::{BranchValues, Sunburst, SunburstArc};
pub use word_cloud::{PlacedWord, WordCloud};

use crate::color::Rgba;

pub(crate) const TEXT_COLOR: Rgba = Rgba::rgb(42, 63, 95);
pub(crate) const GRID_COLOR: Rgba = Rgba::rgb(229, 236, 246);
pub(crate) const AXIS_COLOR: Rgba = Rgba::rgb(120, 130, 150);

/// Format a data value the way chart labels show it: integers without a
/// fractional part, everything else with up to two decimals.
#[must_use]
pub fn format_value(value: f32) -> String {
    if (value - value.round()).abs() < 1e-4 {
        format!("{}", value.round() as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Format a fraction in `[0, 1]` as a percentage label.
#[must_use]
pub fn format_percent(fraction: f32) -> String {
    let pct = fraction * 100.0;
    if (pct - pct.round()).abs() < 0.05 {
        format!("{}%", pct.round() as i64)
    } else {
        format!("{pct:.1}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(7.5), "7.5");
        assert_eq!(format_value(2.25), "2.25");
        assert_eq!(format_value(12.5), "12.5");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.2), "20%");
        assert_eq!(format_percent(0.153), "15.3%");
        assert_eq!(format_percent(1.0), "100%");
    }
}
