//! Pie chart.
//!
//! Slices start at 12 o'clock and run clockwise in input order, each
//! labelled with its share of the total. A legend lists the labels on the
//! right.

use std::f32::consts::TAU;

use crate::color::{Rgba, PALETTE};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::output::{wedge_path, SvgElement, SvgEncoder, TextAnchor};
use crate::render::{Drawable, Wedge};

use super::{format_percent, format_value, TEXT_COLOR};

/// Width reserved for the legend column.
const LEGEND_WIDTH: f32 = 130.0;

/// Slices thinner than this share get no inside label.
const MIN_LABELLED_FRACTION: f32 = 0.04;

/// One slice of the pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Segment label.
    pub label: String,
    /// Raw value.
    pub value: f32,
    /// Share of the total, in `[0, 1]`.
    pub fraction: f32,
    /// Start angle (radians, clockwise from 12 o'clock).
    pub start: f32,
    /// End angle.
    pub end: f32,
    /// Fill color.
    pub color: Rgba,
}

/// Builder for creating pie charts.
#[derive(Debug, Clone)]
pub struct PieChart {
    labels: Vec<String>,
    values: Vec<f32>,
    title: Option<String>,
    palette: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl Default for PieChart {
    fn default() -> Self {
        Self::new()
    }
}

impl PieChart {
    /// Create a new pie chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
            title: None,
            palette: PALETTE.to_vec(),
            width: 640,
            height: 400,
        }
    }

    /// Set the segment labels.
    #[must_use]
    pub fn labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.labels = labels.iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    /// Set the segment values.
    #[must_use]
    pub fn values(mut self, values: &[f32]) -> Self {
        self.values = values.to_vec();
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the slice colors; they repeat when there are more slices.
    #[must_use]
    pub fn palette(mut self, palette: &[Rgba]) -> Self {
        if !palette.is_empty() {
            self.palette = palette.to_vec();
        }
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build and validate the chart.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no data, if labels and values differ in
    /// length, or if values are negative or sum to zero.
    pub fn build(self) -> Result<Self> {
        if self.values.is_empty() {
            return Err(Error::EmptyData);
        }
        if self.labels.len() != self.values.len() {
            return Err(Error::DataLengthMismatch {
                labels: self.labels.len(),
                values: self.values.len(),
            });
        }
        if self.values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::ScaleDomain(
                "pie values must be finite and non-negative".to_string(),
            ));
        }
        if self.total() <= 0.0 {
            return Err(Error::ScaleDomain("pie values sum to zero".to_string()));
        }
        if self.radius() <= 0.0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Sum of all values.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Pie center.
    #[must_use]
    pub fn center(&self) -> Point {
        let top = self.top_margin();
        let pie_width = self.width as f32 - LEGEND_WIDTH;
        Point::new(pie_width / 2.0, top + (self.height as f32 - top) / 2.0)
    }

    /// Pie radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        let top = self.top_margin();
        let pie_width = self.width as f32 - LEGEND_WIDTH;
        (pie_width.min(self.height as f32 - top) / 2.0) - 12.0
    }

    fn top_margin(&self) -> f32 {
        if self.title.is_some() {
            40.0
        } else {
            8.0
        }
    }

    /// Slices in input order.
    #[must_use]
    pub fn slices(&self) -> Vec<PieSlice> {
        let total = self.total();
        let mut start = 0.0;
        self.labels
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (label, &value))| {
                let fraction = value / total;
                let end = if i + 1 == self.values.len() {
                    TAU
                } else {
                    start + fraction * TAU
                };
                let slice = PieSlice {
                    label: label.clone(),
                    value,
                    fraction,
                    start,
                    end,
                    color: self.palette[i % self.palette.len()],
                };
                start = end;
                slice
            })
            .collect()
    }

    fn wedge(&self, slice: &PieSlice) -> Wedge {
        Wedge {
            center: self.center(),
            inner: 0.0,
            outer: self.radius(),
            start: slice.start,
            end: slice.end,
        }
    }

    /// Render as vector SVG.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let mut svg = SvgEncoder::new(self.width, self.height);
        if let Some(title) = &self.title {
            svg = svg.title(title).text(16.0, 26.0, title, 16.0, TEXT_COLOR);
        }

        let center = self.center();
        let radius = self.radius();
        let slices = self.slices();

        for slice in &slices {
            if slice.fraction <= 0.0 {
                continue;
            }
            svg.add_element(SvgElement::Titled {
                title: format!(
                    "{}: {} ({})",
                    slice.label,
                    format_value(slice.value),
                    format_percent(slice.fraction)
                ),
                element: Box::new(SvgElement::Path {
                    d: wedge_path(&self.wedge(slice)),
                    fill: Some(slice.color),
                    stroke: Some(Rgba::WHITE),
                    stroke_width: 1.0,
                }),
            });
        }

        for slice in slices.iter().filter(|s| s.fraction >= MIN_LABELLED_FRACTION) {
            let at = center.polar(radius * 0.65, (slice.start + slice.end) / 2.0);
            svg = svg.text_anchored(
                at.x,
                at.y + 4.0,
                &format_percent(slice.fraction),
                12.0,
                Rgba::WHITE,
                TextAnchor::Middle,
            );
        }

        let legend_x = self.width as f32 - LEGEND_WIDTH + 8.0;
        for (i, slice) in slices.iter().enumerate() {
            let y = self.top_margin() + 12.0 + i as f32 * 20.0;
            svg = svg
                .rect(legend_x, y - 10.0, 12.0, 12.0, slice.color)
                .text(legend_x + 18.0, y, &slice.label, 12.0, TEXT_COLOR);
        }

        svg
    }

    /// Rasterize the slices (no text).
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        for slice in self.slices() {
            self.wedge(&slice).draw(&mut fb, slice.color);
        }
        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for PieChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
