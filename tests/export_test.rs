//! Export Falsification Tests
//!
//! Claims about writing the demo page's charts to image files and about the
//! command-line inputs that feed the renderer.
//!
//! Run: cargo test --test export_test

#![allow(clippy::unwrap_used)]

use std::path::Path;

use trueno_dash::dashboard::{catalog, export, ExportFormat, Page, RenderOptions, Selection};
use trueno_dash::Error;

fn page() -> Page {
    catalog::demo_page().unwrap()
}

fn files_with_extension(dir: &Path, extension: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == extension))
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Claim 1: PNG export writes one valid PNG per rasterizable chart card.
#[test]
fn claim_01_png_export_writes_five_charts() {
    let dir = tempfile::tempdir().unwrap();
    let written = export(&page(), &RenderOptions::default(), dir.path(), ExportFormat::Png).unwrap();

    assert_eq!(written, 5);
    let names = files_with_extension(dir.path(), "png");
    assert_eq!(names.len(), 5, "Claim 1 FALSIFIED: {names:?}");
    for name in &names {
        let bytes = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "Claim 1 FALSIFIED: {name} is not a PNG");
    }
}

/// Claim 2: PNG export skips the word cloud and the text summary.
#[test]
fn claim_02_png_export_skips_unrasterizable_cards() {
    let dir = tempfile::tempdir().unwrap();
    export(&page(), &RenderOptions::default(), dir.path(), ExportFormat::Png).unwrap();

    assert!(!dir.path().join("nuage-de-mots-fréquence-des-mots.png").exists());
    assert!(!dir.path().join("résumé-texte.png").exists());
    assert!(dir.path().join("radial-tree-visualisation-hiérarchique.png").is_file());
}

/// Claim 3: SVG export covers every chart card, word cloud included.
#[test]
fn claim_03_svg_export_includes_word_cloud() {
    let dir = tempfile::tempdir().unwrap();
    let written = export(&page(), &RenderOptions::default(), dir.path(), ExportFormat::Svg).unwrap();

    assert_eq!(written, 6);
    assert_eq!(files_with_extension(dir.path(), "svg").len(), 6);
    let cloud = std::fs::read_to_string(dir.path().join("nuage-de-mots-fréquence-des-mots.svg")).unwrap();
    assert!(cloud.contains("<svg"));
    assert!(cloud.contains("Data"));
    assert!(!dir.path().join("résumé-texte.svg").exists());
}

/// Claim 4: an oversized canvas fails with an error instead of allocating.
#[test]
fn claim_04_oversized_export_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let options = RenderOptions {
        chart_width: 200_000,
        chart_height: 200_000,
        ..RenderOptions::default()
    };
    let err = export(&page(), &options, dir.path(), ExportFormat::Png).unwrap_err();
    assert!(matches!(err, Error::InvalidDimensions { .. }), "{err}");
}

/// Claim 5: dropdown flags map onto the page's selectors in order.
#[test]
fn claim_05_flags_select_options() {
    let page = page();
    let selection =
        Selection::from_values(page.selectors(), &[Some("Option 2"), Some("Métrique C")]).unwrap();
    assert_eq!(selection.value(&page.selectors()[0]), "Option 2");
    assert_eq!(selection.value(&page.selectors()[1]), "Métrique C");

    let defaults = Selection::from_values(page.selectors(), &[None, None]).unwrap();
    assert_eq!(defaults, Selection::new());
}

/// Claim 6: a category outside the option list is rejected.
#[test]
fn claim_06_unknown_category_rejected() {
    let page = page();
    let err = Selection::from_values(page.selectors(), &[Some("Option 4"), None]).unwrap_err();
    assert!(
        matches!(err, Error::UnknownOption { ref value, .. } if value == "Option 4"),
        "Claim 6 FALSIFIED: {err}"
    );
}

/// Claim 7: the card listing follows the grid, one line per card.
#[test]
fn claim_07_outline_lists_cards_in_grid_order() {
    let outline = page().outline();
    assert_eq!(outline.len(), 7);
    assert!(outline[0].starts_with("row 1   34%  bar"));
    assert!(outline[0].ends_with("Histogramme 1 : Répartition des catégories"));
    assert!(outline[2].contains("pie"));
    assert!(outline[3].starts_with("row 2   50%  hierarchical"));
    assert!(outline[5].starts_with("row 3  100%  bar"));
    assert!(outline[6].ends_with("Résumé texte"));
}
