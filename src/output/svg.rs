//! SVG output encoder.
//!
//! Vector output for charts; the dashboard inlines the rendered `<svg>`
//! directly into its HTML cards.

use crate::color::Rgba;
use crate::error::Result;
use crate::render::Wedge;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Scale to the container width instead of fixed pixels
    responsive: bool,
    /// Accessible name emitted as the first `<title>` child
    title: Option<String>,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Path (SVG path data)
    Path {
        d: String,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Text, optionally rotated (degrees) about its anchor point
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    },
    /// Any element wrapped in a group carrying a hover tooltip
    Titled {
        title: String,
        element: Box<SvgElement>,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            responsive: false,
            title: None,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Stretch to the container width, keeping the aspect ratio of the viewBox.
    #[must_use]
    pub fn responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Set the accessible title of the drawing.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add a rectangle.
    #[must_use]
    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
            stroke_width: 1.0,
        });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(
        mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    ) -> Self {
        self.elements.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        });
        self
    }

    /// Add text.
    #[must_use]
    pub fn text(mut self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor: TextAnchor::Start,
            rotate: 0.0,
        });
        self
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text_anchored(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate: 0.0,
        });
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        if self.responsive {
            let _ = writeln!(
                svg,
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet" role="img">"#,
                self.width, self.height
            );
        } else {
            let _ = writeln!(
                svg,
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" role="img">"#,
                self.width, self.height, self.width, self.height
            );
        }

        if let Some(title) = &self.title {
            let _ = writeln!(svg, "  <title>{}</title>", escape_xml(title));
        }

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// SVG path data for an annular sector.
///
/// A zero inner radius yields a pie slice closed through the center. A
/// full turn is split into two half arcs because a single arc with
/// identical endpoints draws nothing.
#[must_use]
pub fn wedge_path(wedge: &Wedge) -> String {
    let sweep = wedge.end - wedge.start;
    if sweep >= std::f32::consts::TAU - 1e-4 {
        let mid = Wedge {
            end: wedge.start + std::f32::consts::PI,
            ..*wedge
        };
        let rest = Wedge {
            start: mid.end,
            end: wedge.start + std::f32::consts::TAU,
            ..*wedge
        };
        // Two halves drawn as one path keep fill rules consistent.
        return format!("{} {}", wedge_path(&mid), wedge_path(&rest));
    }

    let large_arc = u8::from(sweep > std::f32::consts::PI);
    let outer_start = wedge.center.polar(wedge.outer, wedge.start);
    let outer_end = wedge.center.polar(wedge.outer, wedge.end);
    let r = wedge.outer;

    let mut d = format!(
        "M {:.2} {:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {:.2} {:.2}",
        outer_start.x, outer_start.y, outer_end.x, outer_end.y
    );

    if wedge.inner > 0.0 {
        let inner_end = wedge.center.polar(wedge.inner, wedge.end);
        let inner_start = wedge.center.polar(wedge.inner, wedge.start);
        let ri = wedge.inner;
        let _ = write!(
            d,
            " L {:.2} {:.2} A {ri:.2} {ri:.2} 0 {large_arc} 0 {:.2} {:.2} Z",
            inner_end.x, inner_end.y, inner_start.x, inner_start.y
        );
    } else {
        let _ = write!(d, " L {:.2} {:.2} Z", wedge.center.x, wedge.center.y);
    }
    d
}

/// Escape XML special characters.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            stroke_width,
        } => {
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{}""#, s.to_css(), stroke_width))
                .unwrap_or_default();
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{stroke_attr}/>"#,
                fill.to_css()
            )
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Path {
            d,
            fill,
            stroke,
            stroke_width,
        } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), Rgba::to_css);
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{}""#, s.to_css(), stroke_width))
                .unwrap_or_default();
            format!(r#"<path d="{d}" fill="{fill_attr}"{stroke_attr}/>"#)
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            rotate,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = if rotate.abs() > f32::EPSILON {
                format!(r#" transform="rotate({rotate} {x} {y})""#)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}" font-family="sans-serif"{transform}>{}</text>"#,
                fill.to_css(),
                escape_xml(text)
            )
        }
        SvgElement::Titled { title, element } => {
            format!(
                "<g><title>{}</title>{}</g>",
                escape_xml(title),
                element_to_svg(element)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_svg_encoder_new() {
        let encoder = SvgEncoder::new(800, 600);
        let svg = encoder.render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_responsive_drops_fixed_height() {
        let svg = SvgEncoder::new(640, 400).responsive(true).render();
        assert!(svg.contains("width=\"100%\""));
        assert!(svg.contains("viewBox=\"0 0 640 400\""));
        assert!(!svg.contains("height=\"400\""));
    }

    #[test]
    fn test_svg_title_is_escaped() {
        let svg = SvgEncoder::new(10, 10).title("Parts & segments").render();
        assert!(svg.contains("<title>Parts &amp; segments</title>"));
    }

    #[test]
    fn test_svg_rect() {
        let svg = SvgEncoder::new(100, 100)
            .rect(10.0, 20.0, 30.0, 40.0, Rgba::RED)
            .render();

        assert!(svg.contains("<rect"));
        assert!(svg.contains("x=\"10\""));
        assert!(svg.contains("y=\"20\""));
        assert!(svg.contains("width=\"30\""));
        assert!(svg.contains("height=\"40\""));
        assert!(svg.contains("rgb(255,0,0)"));
    }

    #[test]
    fn test_svg_line() {
        let svg = SvgEncoder::new(100, 100)
            .line(0.0, 0.0, 100.0, 100.0, Rgba::BLACK, 2.0)
            .render();

        assert!(svg.contains("<line"));
        assert!(svg.contains("x2=\"100\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text(10.0, 50.0, "<script>alert('xss')</script>", 12.0, Rgba::BLACK)
            .render();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_svg_text_anchored_middle() {
        let svg = SvgEncoder::new(100, 100)
            .text_anchored(50.0, 50.0, "Centered", 12.0, Rgba::BLACK, TextAnchor::Middle)
            .render();

        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(!svg.contains("transform"));
    }

    #[test]
    fn test_svg_rotated_text() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Text {
            x: 10.0,
            y: 90.0,
            text: "Cat 25".to_string(),
            font_size: 10.0,
            fill: Rgba::BLACK,
            anchor: TextAnchor::End,
            rotate: -45.0,
        });
        let svg = encoder.render();
        assert!(svg.contains(r#"transform="rotate(-45 10 90)""#));
    }

    #[test]
    fn test_svg_titled_wraps_in_group() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Titled {
            title: "Cat 1: 10".to_string(),
            element: Box::new(SvgElement::Rect {
                x: 0.0,
                y: 0.0,
                width: 5.0,
                height: 5.0,
                fill: Rgba::BLUE,
                stroke: None,
                stroke_width: 1.0,
            }),
        });
        let svg = encoder.render();
        assert!(svg.contains("<g><title>Cat 1: 10</title><rect"));
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_svg_path_no_stroke() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Path {
            d: "M 10 10 L 90 90".to_string(),
            fill: Some(Rgba::RED),
            stroke: None,
            stroke_width: 0.0,
        });
        let svg = encoder.render();

        assert!(svg.contains("<path"));
        assert!(svg.contains("fill=\"rgb(255,0,0)\""));
        assert!(!svg.contains("stroke="));
    }

    #[test]
    fn test_wedge_path_pie_slice_closes_through_center() {
        let d = wedge_path(&Wedge {
            center: Point::new(50.0, 50.0),
            inner: 0.0,
            outer: 40.0,
            start: 0.0,
            end: PI / 2.0,
        });
        assert!(d.starts_with("M 50.00 10.00 A 40.00 40.00 0 0 1 90.00 50.00"));
        assert!(d.ends_with("L 50.00 50.00 Z"));
    }

    #[test]
    fn test_wedge_path_large_arc_flag() {
        let d = wedge_path(&Wedge {
            center: Point::new(0.0, 0.0),
            inner: 10.0,
            outer: 20.0,
            start: 0.0,
            end: 1.5 * PI,
        });
        assert!(d.contains(" 0 1 1 "));
        assert!(d.contains(" 0 1 0 "));
    }

    #[test]
    fn test_wedge_path_full_turn_splits() {
        let d = wedge_path(&Wedge {
            center: Point::new(50.0, 50.0),
            inner: 0.0,
            outer: 40.0,
            start: 0.0,
            end: TAU,
        });
        assert_eq!(d.matches('M').count(), 2);
    }

    #[test]
    fn test_svg_write_to_file() {
        let encoder = SvgEncoder::new(100, 100).rect(10.0, 10.0, 80.0, 80.0, Rgba::BLUE);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        encoder.write_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("</svg>"));
    }
}
