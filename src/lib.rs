//! # Trueno-Dash
//!
//! Static chart-card dashboard rendered to a single self-contained HTML page.
//!
//! A [`dashboard::Page`] describes a title, a sidebar, dropdown selectors and
//! a grid of collapsible cards. Each card holds a bar chart, pie chart,
//! sunburst, word cloud or text block. [`dashboard::render_page`] turns the
//! page into HTML with inline SVG charts; bar, pie and sunburst charts also
//! rasterize to PNG through the [`framebuffer::Framebuffer`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trueno_dash::prelude::*;
//!
//! let page = catalog::demo_page()?;
//! let html = render_page(&page, &Selection::new(), &RenderOptions::default())?;
//! std::fs::write("dashboard.html", html)?;
//! ```
//!
//! ## Charts
//!
//! ```rust,ignore
//! use trueno_dash::prelude::*;
//!
//! let chart = BarChart::new()
//!     .categories(&["Cat 1", "Cat 2", "Cat 3"])
//!     .values(&[10.0, 23.0, 45.0])
//!     .text_auto(true)
//!     .build()?;
//!
//! chart.to_svg()?.write_to_file("bars.svg")?;
//! PngEncoder::write_to_file(&chart.to_framebuffer()?, "bars.png")?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types, hex/CSS conversions and the chart palette.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Visualization Modules
// ============================================================================

/// High-level chart types (bar, pie, sunburst, word cloud).
pub mod plots;

/// Card-grid dashboard model and HTML renderer.
pub mod dashboard;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization of lines, rectangles and wedges.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Configuration
// ============================================================================

/// YAML configuration with CLI/ENV/file precedence.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-dash operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trueno_dash::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::color::{palette_color, Hsla, Rgba, PALETTE};
    pub use crate::config::Config;
    pub use crate::dashboard::{
        catalog, export, render_page, CardSpec, ChartKind, Dataset, ExportFormat, Layout, Page,
        RenderOptions, Row, Selection, Selector,
    };
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::plots::{BarChart, PieChart, Sunburst, WordCloud};
    pub use crate::scale::{LinearScale, Scale};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
