//! Error types for trueno-dash operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a dashboard.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or chart.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Data length mismatch between labels and values.
    #[error("Data length mismatch: {labels} labels, {values} values")]
    DataLengthMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of values.
        values: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., degenerate extent).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Hierarchical data does not form a single rooted tree.
    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// A card's dataset does not fit its chart kind.
    #[error("card '{title}': {kind} chart cannot display {dataset} data")]
    DatasetMismatch {
        /// Card title.
        title: String,
        /// Requested chart kind.
        kind: &'static str,
        /// Dataset shape that was supplied.
        dataset: &'static str,
    },

    /// Layout rows violate the width invariant.
    #[error("Invalid layout at row {row}: {message}")]
    Layout {
        /// Zero-based row index.
        row: usize,
        /// Description of the violation.
        message: String,
    },

    /// A selection names a value that is not among the selector's options.
    #[error("'{value}' is not an option of selector '{selector}'")]
    UnknownOption {
        /// Selector label.
        selector: String,
        /// Rejected value.
        value: String,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}
