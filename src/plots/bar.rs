//! Categorical bar chart.
//!
//! Bars grow from a zero baseline in category order. The value axis ends
//! on a round tick, and `text_auto` prints each value above its bar.

use crate::color::{palette_color, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::{SvgElement, SvgEncoder, TextAnchor};
use crate::render::{draw_line, Drawable};
use crate::scale::{LinearScale, Scale};

use super::{format_value, AXIS_COLOR, GRID_COLOR, TEXT_COLOR};

/// Category labels rotate once a chart holds more than this many bars.
const ROTATE_LABELS_ABOVE: usize = 12;

/// Fraction of each band left empty between bars.
const BAR_GAP: f32 = 0.2;

/// One laid-out bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label.
    pub category: String,
    /// Data value.
    pub value: f32,
    /// Bar rectangle in chart coordinates.
    pub rect: Rect,
}

/// Builder for creating bar charts.
#[derive(Debug, Clone)]
pub struct BarChart {
    categories: Vec<String>,
    values: Vec<f32>,
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    color: Rgba,
    width: u32,
    height: u32,
    text_auto: bool,
}

impl Default for BarChart {
    fn default() -> Self {
        Self::new()
    }
}

impl BarChart {
    /// Create a new bar chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            values: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            color: palette_color(0),
            width: 640,
            height: 400,
            text_auto: false,
        }
    }

    /// Set the category labels, in display order.
    #[must_use]
    pub fn categories<S: AsRef<str>>(mut self, categories: &[S]) -> Self {
        self.categories = categories.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    /// Set the values, one per category.
    #[must_use]
    pub fn values(mut self, values: &[f32]) -> Self {
        self.values = values.to_vec();
        self
    }

    /// Set the title drawn above the plot area.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the axis titles.
    #[must_use]
    pub fn axis_labels(mut self, x: &str, y: &str) -> Self {
        self.x_label = Some(x.to_string());
        self.y_label = Some(y.to_string());
        self
    }

    /// Set the bar color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Print each value above its bar.
    #[must_use]
    pub fn text_auto(mut self, enabled: bool) -> Self {
        self.text_auto = enabled;
        self
    }

    /// Build and validate the chart.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no data, if labels and values differ in
    /// length, if any value is negative or not finite, or if the dimensions
    /// leave no room for a plot area.
    pub fn build(self) -> Result<Self> {
        if self.values.is_empty() {
            return Err(Error::EmptyData);
        }
        if self.categories.len() != self.values.len() {
            return Err(Error::DataLengthMismatch {
                labels: self.categories.len(),
                values: self.values.len(),
            });
        }
        if let Some(bad) = self.values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(Error::ScaleDomain(format!(
                "bar values must be finite and non-negative, got {bad}"
            )));
        }
        let plot = self.plot_area();
        if plot.width <= 0.0 || plot.height <= 0.0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Category labels, in display order.
    #[must_use]
    pub fn category_labels(&self) -> &[String] {
        &self.categories
    }

    /// Values, in display order.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.values
    }

    /// Whether category labels are drawn rotated.
    #[must_use]
    pub fn rotates_labels(&self) -> bool {
        self.categories.len() > ROTATE_LABELS_ABOVE
    }

    /// Region inside the margins where bars are drawn.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        let top = if self.title.is_some() { 40.0 } else { 16.0 };
        let left = if self.y_label.is_some() { 56.0 } else { 40.0 };
        let mut bottom = if self.rotates_labels() { 64.0 } else { 28.0 };
        if self.x_label.is_some() {
            bottom += 20.0;
        }
        let right = 16.0;
        Rect::new(
            left,
            top,
            self.width as f32 - left - right,
            self.height as f32 - top - bottom,
        )
    }

    /// Value axis mapping data values to y pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart holds no values.
    pub fn value_scale(&self) -> Result<LinearScale> {
        let plot = self.plot_area();
        LinearScale::zero_based(&self.values, (plot.bottom(), plot.y)).ok_or(Error::EmptyData)
    }

    /// Lay out one rectangle per category.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart holds no values.
    pub fn bars(&self) -> Result<Vec<Bar>> {
        let scale = self.value_scale()?;
        let plot = self.plot_area();
        let band = plot.width / self.values.len() as f32;
        let bar_width = band * (1.0 - BAR_GAP);

        Ok(self
            .categories
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (category, &value))| {
                let top = scale.scale(value);
                Bar {
                    category: category.clone(),
                    value,
                    rect: Rect::new(
                        plot.x + band * i as f32 + band * BAR_GAP / 2.0,
                        top,
                        bar_width,
                        plot.bottom() - top,
                    ),
                }
            })
            .collect())
    }

    /// Render as vector SVG.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart holds no values.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        let scale = self.value_scale()?;
        let plot = self.plot_area();
        let mut svg = SvgEncoder::new(self.width, self.height);

        if let Some(title) = &self.title {
            svg = svg
                .title(title)
                .text(plot.x, 26.0, title, 16.0, TEXT_COLOR);
        }

        for tick in scale.nice_ticks() {
            let y = scale.scale(tick);
            svg = svg
                .line(plot.x, y, plot.right(), y, GRID_COLOR, 1.0)
                .text_anchored(plot.x - 6.0, y + 4.0, &format_value(tick), 11.0, TEXT_COLOR, TextAnchor::End);
        }
        svg = svg.line(plot.x, plot.bottom(), plot.right(), plot.bottom(), AXIS_COLOR, 1.0);

        let rotate = self.rotates_labels();
        for bar in self.bars()? {
            let label = format_value(bar.value);
            svg.add_element(SvgElement::Titled {
                title: format!("{}: {label}", bar.category),
                element: Box::new(SvgElement::Rect {
                    x: bar.rect.x,
                    y: bar.rect.y,
                    width: bar.rect.width,
                    height: bar.rect.height,
                    fill: self.color,
                    stroke: None,
                    stroke_width: 0.0,
                }),
            });

            let cx = bar.rect.center().x;
            if self.text_auto {
                svg = svg.text_anchored(cx, bar.rect.y - 4.0, &label, 11.0, TEXT_COLOR, TextAnchor::Middle);
            }

            svg.add_element(SvgElement::Text {
                x: cx,
                y: plot.bottom() + if rotate { 10.0 } else { 16.0 },
                text: bar.category,
                font_size: 11.0,
                fill: TEXT_COLOR,
                anchor: if rotate { TextAnchor::End } else { TextAnchor::Middle },
                rotate: if rotate { -45.0 } else { 0.0 },
            });
        }

        if let Some(x_label) = &self.x_label {
            svg = svg.text_anchored(
                plot.center().x,
                self.height as f32 - 6.0,
                x_label,
                12.0,
                TEXT_COLOR,
                TextAnchor::Middle,
            );
        }
        if let Some(y_label) = &self.y_label {
            let (x, y) = (14.0, plot.center().y);
            svg.add_element(SvgElement::Text {
                x,
                y,
                text: y_label.clone(),
                font_size: 12.0,
                fill: TEXT_COLOR,
                anchor: TextAnchor::Middle,
                rotate: -90.0,
            });
        }

        Ok(svg)
    }

    /// Rasterize bars and baseline (no text).
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);

        for bar in self.bars()? {
            bar.rect.draw(&mut fb, self.color);
        }

        let plot = self.plot_area();
        let baseline = plot.bottom().round() as i32;
        draw_line(
            &mut fb,
            plot.x.round() as i32,
            baseline,
            plot.right().round() as i32,
            baseline,
            AXIS_COLOR,
        );

        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for BarChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
