//! The built-in demo dashboard.
//!
//! Every string and number here is fixed content of the demo page.

use crate::error::Result;

use super::card::{CardSpec, ChartKind, Dataset, HierarchyNode};
use super::layout::{Layout, Row};
use super::page::{Page, Sidebar};
use super::selector::Selector;

/// Page heading.
pub const PAGE_TITLE: &str = "Maquette de tableau de bord avec cartes zoomables";

/// Category selector prompt.
pub const CATEGORY_SELECTOR: &str = "Sélectionnez une catégorie :";

/// Metric selector prompt.
pub const METRIC_SELECTOR: &str = "Sélectionnez une métrique :";

/// Source text of the word cloud. The words run together at each repeat.
pub fn word_cloud_text() -> String {
    "Streamlit Data Visualization Python Dashboard Interactive".repeat(10)
}

const SUMMARY: [&str; 15] = [
    "1. Les histogrammes montrent une répartition variée des catégories et groupes.",
    "2. Le camembert illustre les parts relatives des segments étudiés.",
    "3. Les catégories Cat 3 et Cat 6 se démarquent par leurs valeurs élevées.",
    "4. Le Groupe 6 possède le score le plus élevé, suivi du Groupe 5.",
    "5. La répartition des segments est globalement équilibrée.",
    "6. Le Segment 4 représente la part la plus importante.",
    "7. Des variations significatives sont visibles entre les catégories.",
    "8. Les données sont fictives et utilisées à titre d'exemple.",
    "9. L'interface est conçue pour une navigation intuitive.",
    "10. L'agencement compact facilite la visualisation des résultats.",
    "11. Le radial tree fournit une vue hiérarchique des données.",
    "12. Les valeurs extrêmes méritent une analyse plus approfondie.",
    "13. Les histogrammes mettent en évidence les contrastes clés.",
    "14. Le camembert simplifie la compréhension des proportions.",
    "15. Ce tableau de bord est une démonstration des capacités de Streamlit.",
];

/// The fifteen-line text summary.
pub fn summary_text() -> String {
    SUMMARY.join("\n")
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix} {i}")).collect()
}

/// "Histogramme 1": eight categories.
pub fn category_histogram() -> Result<CardSpec> {
    let card = CardSpec::new(
        "Histogramme 1 : Répartition des catégories",
        "Cet histogramme montre la répartition des catégories pour un ensemble de données fictives.",
        ChartKind::Bar,
        Dataset::series(&numbered("Cat", 8), &[10.0, 23.0, 45.0, 12.0, 34.0, 56.0, 27.0, 30.0]),
    )?;
    Ok(card
        .with_chart_title("Histogramme 1")
        .with_axis_labels("Catégorie", "Valeur"))
}

/// "Histogramme 2": eight groups.
pub fn group_histogram() -> Result<CardSpec> {
    let card = CardSpec::new(
        "Histogramme 2 : Comparaison des valeurs",
        "Cet histogramme compare les valeurs entre différents groupes fictifs.",
        ChartKind::Bar,
        Dataset::series(&numbered("Groupe", 8), &[15.0, 28.0, 34.0, 20.0, 40.0, 50.0, 25.0, 35.0]),
    )?;
    Ok(card
        .with_chart_title("Histogramme 2")
        .with_axis_labels("Groupe", "Score"))
}

/// Pie chart of five segments.
pub fn segment_pie() -> Result<CardSpec> {
    let card = CardSpec::new(
        "Camembert : Part des segments",
        "Ce camembert illustre la répartition des segments dans l'ensemble de données.",
        ChartKind::Pie,
        Dataset::series(&numbered("Segment", 5), &[20.0, 15.0, 25.0, 30.0, 10.0]),
    )?;
    Ok(card.with_chart_title("Camembert"))
}

/// Seven-node sunburst.
pub fn radial_tree() -> Result<CardSpec> {
    let nodes = [
        ("Root", "", 10.0),
        ("Branch 1", "Root", 20.0),
        ("Branch 2", "Root", 30.0),
        ("Leaf 1", "Branch 1", 5.0),
        ("Leaf 2", "Branch 1", 5.0),
        ("Leaf 3", "Branch 2", 10.0),
        ("Leaf 4", "Branch 2", 10.0),
    ];
    CardSpec::new(
        "Radial Tree : Visualisation hiérarchique",
        "Ce graphique montre une hiérarchie fictive dans les données.",
        ChartKind::Hierarchical,
        Dataset::Hierarchy(
            nodes
                .iter()
                .map(|&(label, parent, value)| HierarchyNode::new(label, parent, value))
                .collect(),
        ),
    )
}

/// Word cloud of the demo corpus.
pub fn word_cloud() -> Result<CardSpec> {
    CardSpec::new(
        "Nuage de mots : Fréquence des mots",
        "Ce nuage montre les mots les plus fréquents dans un corpus fictif.",
        ChartKind::WordFrequency,
        Dataset::Text(word_cloud_text()),
    )
}

/// Full-width bar chart with 25 categories.
pub fn wide_histogram() -> Result<CardSpec> {
    let values: Vec<f32> = (0..25u16).map(|i| f32::from(i * 10 % 40 + 10)).collect();
    let card = CardSpec::new(
        "Histogramme large : 25 entrées",
        "Ce graphique illustre un histogramme large avec 25 catégories fictives.",
        ChartKind::Bar,
        Dataset::series(&numbered("Cat", 25), &values),
    )?;
    Ok(card
        .with_subheader("Histogramme large : 25 entrées")
        .with_chart_title("Histogramme large")
        .with_axis_labels("Catégorie", "Valeur"))
}

/// Full-width text summary.
pub fn text_summary() -> Result<CardSpec> {
    let card = CardSpec::new(
        "Résumé texte",
        "Voici un résumé fictif de 15 lignes expliquant les résultats du tableau de bord.",
        ChartKind::Text,
        Dataset::Text(summary_text()),
    )?;
    Ok(card.with_subheader("Résumé texte"))
}

/// The complete demo page.
///
/// # Errors
///
/// Fails only if the fixed content above is edited into an invalid shape.
pub fn demo_page() -> Result<Page> {
    let sidebar = Sidebar {
        header: "Connexion et navigation".to_string(),
        lines: vec![
            "Interface de connexion utilisateur".to_string(),
            "Navigation dans les projets".to_string(),
        ],
    };
    let selectors = vec![
        Selector::new(CATEGORY_SELECTOR, &["Option 1", "Option 2", "Option 3"])?,
        Selector::new(METRIC_SELECTOR, &["Métrique A", "Métrique B", "Métrique C"])?,
    ];
    let layout = Layout::new(vec![
        Row::weighted(vec![
            (1, category_histogram()?),
            (1, group_histogram()?),
            (1, segment_pie()?),
        ]),
        Row::equal(vec![radial_tree()?, word_cloud()?]),
        Row::full(wide_histogram()?),
        Row::full(text_summary()?),
    ])?;
    Ok(Page::new(PAGE_TITLE, sidebar, selectors, layout))
}
