//! HTML rendering of a [`Page`].
//!
//! Produces one self-contained document: inline SVG charts inside
//! `<details>` panels, no scripts and no external assets. Rendering is a
//! pure function of its inputs, so the same page and selection always give
//! byte-identical output.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::color::{palette_color, Rgba};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{PngEncoder, SvgEncoder};
use crate::plots::{BarChart, PieChart, Sunburst, WordCloud};

use super::card::{CardSpec, ChartKind, Dataset};
use super::page::Page;
use super::selector::Selection;

const STYLESHEET: &str = "
body { margin: 0; display: flex; font-family: 'Source Sans Pro', sans-serif; color: #31333f; background: var(--background); }
aside.sidebar { flex: 0 0 240px; min-height: 100vh; padding: 24px 16px; background: #f0f2f6; }
aside.sidebar p { margin: 4px 0; font-family: monospace; }
main { flex: 1; padding: 24px 32px; }
h1 { margin-top: 0; }
.selectors, .row { display: flex; gap: 16px; margin-bottom: 16px; }
.selectors label { flex: 1; display: flex; flex-direction: column; gap: 4px; }
.cell { box-sizing: border-box; min-width: 0; }
details.card { border: 1px solid #d6d6d9; border-radius: 6px; padding: 8px 12px; }
details.card summary { cursor: pointer; font-weight: 600; }
details.card h3 { color: var(--accent); }
figure.chart { margin: 8px 0 0; }
a.download { font-size: 0.85em; color: var(--accent); }
pre.summary { white-space: pre-wrap; font-size: 0.9em; }
";

/// Rendering settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Chart canvas width in pixels.
    pub chart_width: u32,
    /// Chart canvas height in pixels.
    pub chart_height: u32,
    /// Attach a PNG download link to each rasterizable chart.
    pub download_links: bool,
    /// Accent color for bars and headings.
    pub accent: Rgba,
    /// Page background.
    pub background: Rgba,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_width: 640,
            chart_height: 400,
            download_links: true,
            accent: palette_color(0),
            background: Rgba::WHITE,
        }
    }
}

impl RenderOptions {
    /// Options taken from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for malformed theme colors.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            chart_width: config.charts.width,
            chart_height: config.charts.height,
            download_links: config.output.download_links,
            accent: config.theme.accent_color()?,
            background: config.theme.background_color()?,
        })
    }
}

/// Render the whole page to an HTML document.
///
/// `selection` only decides which dropdown options are marked selected.
///
/// # Errors
///
/// Returns an error if a chart cannot be built from its card's data or if
/// PNG encoding of a download link fails.
pub fn render_page(page: &Page, selection: &Selection, options: &RenderOptions) -> Result<String> {
    tracing::info!(title = page.title(), cards = page.cards().count(), "rendering dashboard");

    let mut rows = Vec::with_capacity(page.layout().rows().len());
    for row in page.layout().rows() {
        let mut cells = Vec::with_capacity(row.cells().len());
        for (width, cell) in row.widths().into_iter().zip(row.cells()) {
            cells.push((width, render_card(&cell.card, options)?));
        }
        rows.push(cells);
    }

    let root_style = format!(
        ":root {{ --accent: {}; --background: {}; }}",
        options.accent.to_hex(),
        options.background.to_hex()
    );

    let markup = html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title()) }
                style { (PreEscaped(&root_style)) (PreEscaped(STYLESHEET)) }
            }
            body {
                aside.sidebar {
                    h2 { (page.sidebar().header) }
                    @for line in &page.sidebar().lines {
                        p { (line) }
                    }
                }
                main {
                    h1 { (page.title()) }
                    div.selectors {
                        @for (i, selector) in page.selectors().iter().enumerate() {
                            @let chosen = selection.index(selector);
                            label {
                                (selector.label())
                                select name=(format!("selector-{i}")) {
                                    @for (j, option) in selector.options().iter().enumerate() {
                                        option selected[j == chosen] { (option) }
                                    }
                                }
                            }
                        }
                    }
                    @for cells in &rows {
                        div.row {
                            @for (width, card) in cells {
                                div.cell style=(format!("flex: 0 0 calc({width}% - 16px)")) {
                                    (card)
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    Ok(markup.into_string())
}

/// Render one card as a collapsible panel.
///
/// # Errors
///
/// Returns an error if the chart cannot be built or encoded.
pub fn render_card(card: &CardSpec, options: &RenderOptions) -> Result<Markup> {
    tracing::debug!(card = card.title(), kind = %card.kind(), "rendering card");

    let body = match (card.kind(), card.dataset()) {
        (ChartKind::Text, Dataset::Text(text)) => html! { pre.summary { (text) } },
        _ => {
            let svg = chart_svg(card, options)?.map(|s| s.render()).unwrap_or_default();
            let download = if options.download_links {
                rasterize(card, options)?
                    .map(|fb| PngEncoder::to_data_uri(&fb))
                    .transpose()?
            } else {
                None
            };
            html! {
                figure.chart {
                    (PreEscaped(svg))
                    @if let Some(uri) = download {
                        a.download href=(uri) download=(format!("{}.png", slug(card.title()))) {
                            "Download plot as PNG"
                        }
                    }
                }
            }
        }
    };

    Ok(html! {
        details.card {
            summary { (card.title()) }
            @if let Some(subheader) = card.subheader() {
                h3 { (subheader) }
            }
            p.description { (card.description()) }
            (body)
        }
    })
}

fn mismatch(card: &CardSpec) -> Error {
    Error::DatasetMismatch {
        title: card.title().to_string(),
        kind: card.kind().name(),
        dataset: card.dataset().shape(),
    }
}

fn bar_chart(card: &CardSpec, options: &RenderOptions) -> Result<BarChart> {
    let (labels, values) = card.dataset().columns().ok_or_else(|| mismatch(card))?;
    let mut chart = BarChart::new()
        .categories(&labels)
        .values(&values)
        .color(options.accent)
        .text_auto(true)
        .dimensions(options.chart_width, options.chart_height);
    if let Some(title) = card.chart_title() {
        chart = chart.title(title);
    }
    if let Some((x, y)) = card.axis_labels() {
        chart = chart.axis_labels(x, y);
    }
    chart.build()
}

fn pie_chart(card: &CardSpec, options: &RenderOptions) -> Result<PieChart> {
    let (labels, values) = card.dataset().columns().ok_or_else(|| mismatch(card))?;
    let mut chart = PieChart::new()
        .labels(&labels)
        .values(&values)
        .dimensions(options.chart_width, options.chart_height);
    if let Some(title) = card.chart_title() {
        chart = chart.title(title);
    }
    chart.build()
}

fn sunburst(card: &CardSpec, options: &RenderOptions) -> Result<Sunburst> {
    let Dataset::Hierarchy(nodes) = card.dataset() else {
        return Err(mismatch(card));
    };
    let labels: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
    let parents: Vec<&str> = nodes.iter().map(|n| n.parent.as_str()).collect();
    let values: Vec<f32> = nodes.iter().map(|n| n.value).collect();
    let mut chart = Sunburst::new()
        .labels(&labels)
        .parents(&parents)
        .values(&values)
        .dimensions(options.chart_width, options.chart_height);
    if let Some(title) = card.chart_title() {
        chart = chart.title(title);
    }
    chart.build()
}

fn word_cloud(card: &CardSpec, options: &RenderOptions) -> Result<WordCloud> {
    let Dataset::Text(text) = card.dataset() else {
        return Err(mismatch(card));
    };
    WordCloud::new()
        .text(text)
        .dimensions(options.chart_width, options.chart_height)
        .background(options.background)
        .build()
}

/// Vector rendering of a card's chart; `None` for text cards.
///
/// # Errors
///
/// Returns an error if the chart cannot be built from the card's data.
pub fn chart_svg(card: &CardSpec, options: &RenderOptions) -> Result<Option<SvgEncoder>> {
    let svg = match card.kind() {
        ChartKind::Bar => bar_chart(card, options)?.to_svg()?,
        ChartKind::Pie => pie_chart(card, options)?.to_svg(),
        ChartKind::Hierarchical => sunburst(card, options)?.to_svg(),
        ChartKind::WordFrequency => word_cloud(card, options)?.to_svg(),
        ChartKind::Text => return Ok(None),
    };
    Ok(Some(svg.responsive(true)))
}

/// Raster rendering of a card's chart; `None` when the kind has no raster
/// form.
///
/// # Errors
///
/// Returns an error if the chart cannot be built or rasterized.
pub fn rasterize(card: &CardSpec, options: &RenderOptions) -> Result<Option<Framebuffer>> {
    let fb = match card.kind() {
        ChartKind::Bar => bar_chart(card, options)?.to_framebuffer()?,
        ChartKind::Pie => pie_chart(card, options)?.to_framebuffer()?,
        ChartKind::Hierarchical => sunburst(card, options)?.to_framebuffer()?,
        ChartKind::WordFrequency | ChartKind::Text => return Ok(None),
    };
    Ok(Some(fb))
}

/// File-name stem for a card title: lowercase words joined by `-`.
#[must_use]
pub fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::catalog;
    use crate::dashboard::card::HierarchyNode;

    fn quiet() -> RenderOptions {
        RenderOptions {
            download_links: false,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Histogramme 1 : Répartition des catégories"), "histogramme-1-répartition-des-catégories");
        assert_eq!(slug("Résumé texte"), "résumé-texte");
    }

    #[test]
    fn test_card_panel_structure() {
        let card = catalog::category_histogram().unwrap();
        let html = render_card(&card, &quiet()).unwrap().into_string();
        assert!(html.starts_with("<details class=\"card\"><summary>Histogramme 1 : Répartition des catégories</summary>"));
        assert!(html.contains("<p class=\"description\">Cet histogramme montre"));
        assert!(html.contains("<svg"));
        assert!(!html.contains("<h3>"));
        assert!(!html.contains("download="));
    }

    #[test]
    fn test_subheader_rendered() {
        let card = catalog::wide_histogram().unwrap();
        let html = render_card(&card, &quiet()).unwrap().into_string();
        assert!(html.contains("<h3>Histogramme large : 25 entrées</h3>"));
    }

    #[test]
    fn test_text_card_is_preformatted() {
        let card = catalog::text_summary().unwrap();
        let html = render_card(&card, &quiet()).unwrap().into_string();
        assert!(html.contains("<pre class=\"summary\">1. Les histogrammes"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_download_link_embeds_png() {
        let card = catalog::segment_pie().unwrap();
        let html = render_card(&card, &RenderOptions::default()).unwrap().into_string();
        assert!(html.contains("href=\"data:image/png;base64,"));
        assert!(html.contains("download=\"camembert-part-des-segments.png\""));
    }

    #[test]
    fn test_word_cloud_has_no_download_link() {
        let card = catalog::word_cloud().unwrap();
        let html = render_card(&card, &RenderOptions::default()).unwrap().into_string();
        assert!(html.contains("<svg"));
        assert!(!html.contains("download="));
    }

    #[test]
    fn test_dispatch_table() {
        let options = quiet();
        let kinds: Vec<(ChartKind, bool, bool)> = catalog::demo_page()
            .unwrap()
            .cards()
            .map(|c| {
                (
                    c.kind(),
                    chart_svg(c, &options).unwrap().is_some(),
                    rasterize(c, &options).unwrap().is_some(),
                )
            })
            .collect();
        for (kind, has_svg, has_png) in kinds {
            assert_eq!(has_svg, kind != ChartKind::Text, "{kind}");
            assert_eq!(has_png, kind.exports_png(), "{kind}");
        }
    }

    #[test]
    fn test_invalid_hierarchy_surfaces_as_error() {
        let card = CardSpec::new(
            "Broken",
            "",
            ChartKind::Hierarchical,
            Dataset::Hierarchy(vec![
                HierarchyNode::new("a", "", 1.0),
                HierarchyNode::new("b", "missing", 1.0),
            ]),
        )
        .unwrap();
        assert!(matches!(render_card(&card, &quiet()), Err(Error::InvalidHierarchy(_))));
    }

    #[test]
    fn test_oversized_raster_is_an_error() {
        let card = catalog::segment_pie().unwrap();
        let options = RenderOptions {
            chart_width: 200_000,
            chart_height: 200_000,
            ..RenderOptions::default()
        };
        assert!(matches!(
            render_card(&card, &options),
            Err(Error::InvalidDimensions { width: 200_000, .. })
        ));
    }

    #[test]
    fn test_selected_option_marked() {
        let page = catalog::demo_page().unwrap();
        let mut selection = Selection::new();
        selection.select(&page.selectors()[1], "Métrique B").unwrap();
        let html = render_page(&page, &selection, &quiet()).unwrap();
        assert!(html.contains("<option selected>Métrique B</option>"));
        assert!(html.contains("<option>Métrique A</option>"));
        assert!(html.contains("<option selected>Option 1</option>"));
    }

    #[test]
    fn test_options_from_config() {
        let config = Config::parse("theme:\n  accent: \"#00cc96\"\noutput:\n  download_links: false\n").unwrap();
        let options = RenderOptions::from_config(&config).unwrap();
        assert_eq!(options.accent, Rgba::rgb(0, 204, 150));
        assert!(!options.download_links);
    }
}
