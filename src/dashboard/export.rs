//! Writing each chart card of a page to its own image file.

use std::path::Path;

use crate::error::Result;
use crate::output::PngEncoder;

use super::page::Page;
use super::render::{chart_svg, rasterize, slug, RenderOptions};

/// Image format for [`export`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Raster image; cards without a raster form are skipped.
    #[default]
    Png,
    /// Vector image; every chart card is written.
    Svg,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Write one image per chart card into `dir`, named after the card's
/// [`slug`]. Returns the number of files written.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created, a chart cannot be built,
/// or a file cannot be written.
pub fn export(page: &Page, options: &RenderOptions, dir: &Path, format: ExportFormat) -> Result<usize> {
    std::fs::create_dir_all(dir)?;

    let mut written = 0;
    for card in page.cards() {
        let path = dir.join(format!("{}.{}", slug(card.title()), format.extension()));
        match format {
            ExportFormat::Png => {
                let Some(fb) = rasterize(card, options)? else {
                    tracing::warn!(card = card.title(), kind = %card.kind(), "no raster form, skipped");
                    continue;
                };
                PngEncoder::write_to_file(&fb, &path)?;
                let (min, max, mean) = fb.luminance_stats();
                if max - min < f32::EPSILON {
                    tracing::warn!(path = %path.display(), "exported chart is blank");
                }
                tracing::debug!(path = %path.display(), mean_luminance = mean, "raster written");
            }
            ExportFormat::Svg => {
                let Some(svg) = chart_svg(card, options)? else {
                    tracing::warn!(card = card.title(), kind = %card.kind(), "no chart, skipped");
                    continue;
                };
                svg.write_to_file(&path)?;
                tracing::debug!(path = %path.display(), "vector written");
            }
        }
        written += 1;
    }
    tracing::info!(dir = %dir.display(), charts = written, "export finished");
    Ok(written)
}
