//! Card-grid dashboard: page model, demo catalog and HTML renderer.
//!
//! ```rust
//! use trueno_dash::dashboard::{catalog, render_page, RenderOptions, Selection};
//!
//! let page = catalog::demo_page().unwrap();
//! let html = render_page(&page, &Selection::new(), &RenderOptions::default()).unwrap();
//! assert!(html.contains("Camembert : Part des segments"));
//! ```

mod card;
pub mod catalog;
mod export;
mod layout;
mod page;
mod render;
mod selector;

pub use card::{CardSpec, ChartKind, Dataset, HierarchyNode};
pub use export::{export, ExportFormat};
pub use layout::{percentages, Cell, Layout, Row};
pub use page::{Page, Sidebar};
pub use render::{chart_svg, rasterize, render_card, render_page, slug, RenderOptions};
pub use selector::{Selection, Selector};
