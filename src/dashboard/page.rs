//! Whole-page description.

use super::card::CardSpec;
use super::layout::Layout;
use super::selector::Selector;

/// Static side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    /// Panel heading.
    pub header: String,
    /// Plain text lines below the heading.
    pub lines: Vec<String>,
}

/// A dashboard page: title, sidebar, selectors and card grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    title: String,
    sidebar: Sidebar,
    selectors: Vec<Selector>,
    layout: Layout,
}

impl Page {
    /// Assemble a page.
    #[must_use]
    pub fn new(title: &str, sidebar: Sidebar, selectors: Vec<Selector>, layout: Layout) -> Self {
        Self {
            title: title.to_string(),
            sidebar,
            selectors,
            layout,
        }
    }

    /// Page heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Side panel.
    #[must_use]
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Dropdowns above the grid.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Card grid.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Every card, in display order.
    pub fn cards(&self) -> impl Iterator<Item = &CardSpec> {
        self.layout.cards()
    }

    /// One line per card in display order: row, width, kind and title.
    #[must_use]
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (r, row) in self.layout.rows().iter().enumerate() {
            for (width, cell) in row.widths().into_iter().zip(row.cells()) {
                lines.push(format!(
                    "row {}  {:>3}%  {:<14}  {}",
                    r + 1,
                    width,
                    cell.card.kind().name(),
                    cell.card.title()
                ));
            }
        }
        lines
    }

    /// Look a card up by title.
    #[must_use]
    pub fn card(&self, title: &str) -> Option<&CardSpec> {
        self.cards().find(|c| c.title() == title)
    }
}
