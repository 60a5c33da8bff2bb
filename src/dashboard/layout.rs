//! Row/column grid of cards.
//!
//! Each row splits the page width among its cells by integer weight. Widths
//! are emitted as whole percentages that always sum to exactly 100.

use crate::error::{Error, Result};

use super::card::CardSpec;

/// A card placed in a row with a relative width.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Relative width.
    pub weight: u32,
    /// Card shown in the cell.
    pub card: CardSpec,
}

/// One row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Cells with explicit weights, e.g. `[1, 1, 1]` or `[2, 1]`.
    #[must_use]
    pub fn weighted(cells: Vec<(u32, CardSpec)>) -> Self {
        Self {
            cells: cells
                .into_iter()
                .map(|(weight, card)| Cell { weight, card })
                .collect(),
        }
    }

    /// Cells of equal width.
    #[must_use]
    pub fn equal(cards: Vec<CardSpec>) -> Self {
        Self::weighted(cards.into_iter().map(|c| (1, c)).collect())
    }

    /// A single full-width card.
    #[must_use]
    pub fn full(card: CardSpec) -> Self {
        Self::weighted(vec![(1, card)])
    }

    /// Cells in display order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell widths as percentages of the page width.
    #[must_use]
    pub fn widths(&self) -> Vec<u32> {
        let weights: Vec<u32> = self.cells.iter().map(|c| c.weight).collect();
        percentages(&weights)
    }
}

/// Ordered rows of cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    rows: Vec<Row>,
}

impl Layout {
    /// Create a layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`] for an empty row or a zero weight.
    pub fn new(rows: Vec<Row>) -> Result<Self> {
        for (index, row) in rows.iter().enumerate() {
            if row.cells.is_empty() {
                return Err(Error::Layout {
                    row: index,
                    message: "row has no cards".to_string(),
                });
            }
            if let Some(cell) = row.cells.iter().find(|c| c.weight == 0) {
                return Err(Error::Layout {
                    row: index,
                    message: format!("card '{}' has zero weight", cell.card.title()),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Every card, row by row.
    pub fn cards(&self) -> impl Iterator<Item = &CardSpec> {
        self.rows.iter().flat_map(|r| r.cells.iter().map(|c| &c.card))
    }
}

/// Split 100% among `weights` by largest-remainder rounding.
///
/// Every share is the floor of its exact percentage; the points still
/// missing go to the largest fractional parts, earlier cells first on ties.
/// Returns an empty vector for empty or all-zero input.
#[must_use]
pub fn percentages(weights: &[u32]) -> Vec<u32> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<u32> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(u64, usize)> = Vec::with_capacity(weights.len());
    for (i, &w) in weights.iter().enumerate() {
        let scaled = u64::from(w) * 100;
        shares.push((scaled / total) as u32);
        remainders.push((scaled % total, i));
    }

    let missing = 100 - shares.iter().sum::<u32>() as usize;
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(missing) {
        shares[i] += 1;
    }
    shares
}
