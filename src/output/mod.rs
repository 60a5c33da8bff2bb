//! Output encoders (SVG, PNG).

mod png_encoder;
mod svg;

pub use png_encoder::PngEncoder;
pub use svg::{wedge_path, SvgElement, SvgEncoder, TextAnchor};
