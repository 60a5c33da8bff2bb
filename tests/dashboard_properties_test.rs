//! Dashboard Falsification Tests
//!
//! Each test is a falsifiable claim about the rendered demo page.
//!
//! Run: cargo test --test dashboard_properties_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;

use trueno_dash::dashboard::{
    catalog, percentages, render_card, render_page, CardSpec, ChartKind, Dataset, Page,
    RenderOptions, Selection,
};
use trueno_dash::plots::{BarChart, PieChart, Sunburst, WordCloud};

fn options() -> RenderOptions {
    RenderOptions {
        download_links: false,
        ..RenderOptions::default()
    }
}

fn page() -> Page {
    catalog::demo_page().unwrap()
}

/// Text as the HTML renderer escapes it.
fn escaped(text: &str) -> String {
    maud::html! { (text) }.into_string()
}

/// Everything after the dropdowns: the card grid.
fn grid(html: &str) -> &str {
    let start = html.find("<div class=\"row\">").unwrap();
    &html[start..]
}

fn bar_chart(card: &CardSpec) -> BarChart {
    let (labels, values) = card.dataset().columns().unwrap();
    BarChart::new().categories(&labels).values(&values).build().unwrap()
}

// ============================================================================
// CONTENT CLAIMS
// ============================================================================

/// Claim 1: all seven titles and descriptions appear verbatim.
#[test]
fn claim_01_titles_and_descriptions_verbatim() {
    let page = page();
    let html = render_page(&page, &Selection::new(), &options()).unwrap();

    let expected = [
        (
            "Histogramme 1 : Répartition des catégories",
            "Cet histogramme montre la répartition des catégories pour un ensemble de données fictives.",
        ),
        (
            "Histogramme 2 : Comparaison des valeurs",
            "Cet histogramme compare les valeurs entre différents groupes fictifs.",
        ),
        (
            "Camembert : Part des segments",
            "Ce camembert illustre la répartition des segments dans l'ensemble de données.",
        ),
        (
            "Radial Tree : Visualisation hiérarchique",
            "Ce graphique montre une hiérarchie fictive dans les données.",
        ),
        (
            "Nuage de mots : Fréquence des mots",
            "Ce nuage montre les mots les plus fréquents dans un corpus fictif.",
        ),
        (
            "Histogramme large : 25 entrées",
            "Ce graphique illustre un histogramme large avec 25 catégories fictives.",
        ),
        (
            "Résumé texte",
            "Voici un résumé fictif de 15 lignes expliquant les résultats du tableau de bord.",
        ),
    ];

    let titles: Vec<&str> = page.cards().map(CardSpec::title).collect();
    assert_eq!(titles, expected.map(|(t, _)| t));

    for (title, description) in expected {
        let card = page.card(title).unwrap();
        assert_eq!(card.description(), description);
        assert!(
            html.contains(&format!("<summary>{}</summary>", escaped(title))),
            "Claim 1 FALSIFIED: missing title {title}"
        );
        assert!(
            html.contains(&format!("<p class=\"description\">{}</p>", escaped(description))),
            "Claim 1 FALSIFIED: missing description for {title}"
        );
    }
}

/// Claim 2: page chrome (title, sidebar, selectors) is present.
#[test]
fn claim_02_page_chrome() {
    let html = render_page(&page(), &Selection::new(), &options()).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Maquette de tableau de bord avec cartes zoomables</h1>"));
    assert!(html.contains("<h2>Connexion et navigation</h2>"));
    assert!(html.contains("<p>Interface de connexion utilisateur</p>"));
    assert!(html.contains("<p>Navigation dans les projets</p>"));
    assert!(html.contains(&escaped(catalog::CATEGORY_SELECTOR)));
    assert!(html.contains(&escaped(catalog::METRIC_SELECTOR)));
    assert_eq!(html.matches("<option").count(), 6);
    assert_eq!(html.matches("<details class=\"card\">").count(), 7);
}

/// Claim 3: "Histogramme 1" has Cat 1..Cat 8 with the fixed values, in order.
#[test]
fn claim_03_histogram_one_data() {
    let page = page();
    let chart = bar_chart(page.card("Histogramme 1 : Répartition des catégories").unwrap());

    let labels: Vec<String> = (1..=8).map(|i| format!("Cat {i}")).collect();
    assert_eq!(chart.category_labels(), labels.as_slice());
    assert_eq!(chart.data(), &[10.0, 23.0, 45.0, 12.0, 34.0, 56.0, 27.0, 30.0]);

    let bars = chart.bars().unwrap();
    assert_eq!(bars.len(), 8);
    assert!(bars.windows(2).all(|w| w[0].rect.x < w[1].rect.x));
}

/// Claim 4: the pie has five segments summing to 100.
#[test]
fn claim_04_pie_segments() {
    let page = page();
    let card = page.card("Camembert : Part des segments").unwrap();
    let (labels, values) = card.dataset().columns().unwrap();
    assert_eq!(values, vec![20.0, 15.0, 25.0, 30.0, 10.0]);
    assert_eq!(values.iter().sum::<f32>(), 100.0);

    let slices = PieChart::new().labels(&labels).values(&values).build().unwrap().slices();
    assert_eq!(slices.len(), 5);
    let percents: Vec<f32> = slices.iter().map(|s| (s.fraction * 100.0).round()).collect();
    assert_eq!(percents, vec![20.0, 15.0, 25.0, 30.0, 10.0]);
}

/// Claim 5: the hierarchy has seven nodes with the fixed parent links.
#[test]
fn claim_05_hierarchy_links() {
    let page = page();
    let card = page.card("Radial Tree : Visualisation hiérarchique").unwrap();
    let Dataset::Hierarchy(nodes) = card.dataset() else {
        panic!("Claim 5 FALSIFIED: radial tree card holds {}", card.dataset().shape());
    };
    assert_eq!(nodes.len(), 7);

    let labels: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
    let parents: Vec<&str> = nodes.iter().map(|n| n.parent.as_str()).collect();
    let values: Vec<f32> = nodes.iter().map(|n| n.value).collect();
    let tree = Sunburst::new().labels(&labels).parents(&parents).values(&values).build().unwrap();

    assert_eq!(tree.root(), Some("Root"));
    assert_eq!(tree.children("Root"), vec!["Branch 1", "Branch 2"]);
    assert_eq!(tree.children("Branch 1"), vec!["Leaf 1", "Leaf 2"]);
    assert_eq!(tree.children("Branch 2"), vec!["Leaf 3", "Leaf 4"]);
    for leaf in ["Leaf 1", "Leaf 2", "Leaf 3", "Leaf 4"] {
        assert!(tree.children(leaf).is_empty());
    }
}

/// Claim 6: the wide chart has 25 categories with value[i] = (i*10 mod 40) + 10.
#[test]
fn claim_06_wide_histogram() {
    let page = page();
    let chart = bar_chart(page.card("Histogramme large : 25 entrées").unwrap());

    assert_eq!(chart.category_labels().len(), 25);
    for (i, &value) in chart.data().iter().enumerate() {
        assert_eq!(value, ((i * 10) % 40 + 10) as f32, "Claim 6 FALSIFIED at index {i}");
    }
    assert!(chart.rotates_labels());
}

/// Claim 7: the word cloud counts the demo corpus exactly.
#[test]
fn claim_07_word_cloud_frequencies() {
    let cloud = WordCloud::new().text(&catalog::word_cloud_text()).build().unwrap();
    let total: usize = cloud.frequencies().iter().map(|(_, n)| n).sum();
    // Ten repeats of six words, with the last and first words of adjacent
    // repeats fused nine times.
    assert_eq!(total, 60 - 9);
    assert_eq!(cloud.frequencies()[0], ("Data".to_string(), 10));

    let placed = cloud.placed_words();
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(!a.rect.intersects(&b.rect), "Claim 7 FALSIFIED: {} overlaps {}", a.text, b.text);
        }
    }
}

/// Claim 8: the text summary has fifteen lines, rendered preformatted.
#[test]
fn claim_08_text_summary() {
    let page = page();
    let card = page.card("Résumé texte").unwrap();
    assert_eq!(card.kind(), ChartKind::Text);
    let Dataset::Text(text) = card.dataset() else {
        panic!("Claim 8 FALSIFIED: summary card holds no text");
    };
    assert_eq!(text.lines().count(), 15);

    let html = render_card(card, &options()).unwrap().into_string();
    assert!(html.contains(&format!("<pre class=\"summary\">{}</pre>", escaped(text))));
}

// ============================================================================
// STATELESSNESS CLAIMS
// ============================================================================

/// Claim 9: no dropdown choice changes any card.
#[test]
fn claim_09_selection_does_not_alter_cards() {
    let page = page();
    let baseline = render_page(&page, &Selection::new(), &options()).unwrap();

    for category in ["Option 1", "Option 2", "Option 3"] {
        for metric in ["Métrique A", "Métrique B", "Métrique C"] {
            let mut selection = Selection::new();
            selection.select(&page.selectors()[0], category).unwrap();
            selection.select(&page.selectors()[1], metric).unwrap();
            let html = render_page(&page, &selection, &options()).unwrap();
            assert_eq!(
                grid(&html),
                grid(&baseline),
                "Claim 9 FALSIFIED: {category}/{metric} changed the cards"
            );
        }
    }
}

/// Claim 10: rendering twice gives byte-identical output.
#[test]
fn claim_10_render_is_deterministic() {
    let page = page();
    let options = RenderOptions::default();
    let first = render_page(&page, &Selection::new(), &options).unwrap();
    let second = render_page(&page, &Selection::new(), &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.matches("data:image/png;base64,").count(), 5);
}

/// Claim 11: choosing a value outside the option list is rejected.
#[test]
fn claim_11_unknown_option_rejected() {
    let page = page();
    let mut selection = Selection::new();
    assert!(selection.select(&page.selectors()[0], "Option 4").is_err());
}

// ============================================================================
// LAYOUT CLAIMS
// ============================================================================

/// Claim 12: the grid is [3 cards], [2 cards], [wide bar], [text].
#[test]
fn claim_12_grid_order() {
    let page = page();
    let rows: Vec<Vec<ChartKind>> = page
        .layout()
        .rows()
        .iter()
        .map(|r| r.cells().iter().map(|c| c.card.kind()).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec![ChartKind::Bar, ChartKind::Bar, ChartKind::Pie],
            vec![ChartKind::Hierarchical, ChartKind::WordFrequency],
            vec![ChartKind::Bar],
            vec![ChartKind::Text],
        ]
    );
    for row in page.layout().rows() {
        assert_eq!(row.widths().iter().sum::<u32>(), 100);
    }
}

proptest! {
    /// Claim 13: any positive weights split to exactly 100%.
    #[test]
    fn claim_13_row_widths_sum_to_100(weights in prop::collection::vec(1u32..1000, 1..12)) {
        let widths = percentages(&weights);
        prop_assert_eq!(widths.len(), weights.len());
        prop_assert_eq!(widths.iter().sum::<u32>(), 100);
    }

    /// Claim 14: equal weights never differ by more than one point.
    #[test]
    fn claim_14_equal_weights_are_balanced(n in 1usize..20) {
        let widths = percentages(&vec![1; n]);
        let max = widths.iter().max().copied().unwrap_or(0);
        let min = widths.iter().min().copied().unwrap_or(0);
        prop_assert!(max - min <= 1);
    }
}
