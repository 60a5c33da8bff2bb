//! Card specifications: what one collapsible panel shows.

use std::fmt;

use crate::error::{Error, Result};

/// Chart drawn inside a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Vertical bar chart.
    Bar,
    /// Pie chart.
    Pie,
    /// Sunburst over a labelled hierarchy.
    Hierarchical,
    /// Word-frequency cloud.
    WordFrequency,
    /// Preformatted text block.
    Text,
}

impl ChartKind {
    /// Every kind, in dispatch-table order.
    pub const ALL: [Self; 5] = [
        Self::Bar,
        Self::Pie,
        Self::Hierarchical,
        Self::WordFrequency,
        Self::Text,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Hierarchical => "hierarchical",
            Self::WordFrequency => "word_frequency",
            Self::Text => "text",
        }
    }

    /// Whether the chart can be rasterized for PNG export.
    #[must_use]
    pub const fn exports_png(self) -> bool {
        matches!(self, Self::Bar | Self::Pie | Self::Hierarchical)
    }

    fn accepts(self, dataset: &Dataset) -> bool {
        matches!(
            (self, dataset),
            (Self::Bar | Self::Pie, Dataset::Series(_))
                | (Self::Hierarchical, Dataset::Hierarchy(_))
                | (Self::WordFrequency | Self::Text, Dataset::Text(_))
        )
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of a hierarchical dataset. An empty `parent` marks the root.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    /// Node label.
    pub label: String,
    /// Parent label.
    pub parent: String,
    /// Node value.
    pub value: f32,
}

impl HierarchyNode {
    /// Create a node.
    #[must_use]
    pub fn new(label: &str, parent: &str, value: f32) -> Self {
        Self {
            label: label.to_string(),
            parent: parent.to_string(),
            value,
        }
    }
}

/// Data behind a card.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Ordered `(label, value)` pairs.
    Series(Vec<(String, f32)>),
    /// `(label, parent, value)` triples.
    Hierarchy(Vec<HierarchyNode>),
    /// Raw text.
    Text(String),
}

impl Dataset {
    /// Pair labels with values, in order.
    #[must_use]
    pub fn series<S: AsRef<str>>(labels: &[S], values: &[f32]) -> Self {
        Self::Series(
            labels
                .iter()
                .zip(values)
                .map(|(l, &v)| (l.as_ref().to_string(), v))
                .collect(),
        )
    }

    /// Name of the dataset shape, for error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Series(_) => "series",
            Self::Hierarchy(_) => "hierarchy",
            Self::Text(_) => "text",
        }
    }

    /// Series labels and values as parallel columns.
    #[must_use]
    pub fn columns(&self) -> Option<(Vec<&str>, Vec<f32>)> {
        match self {
            Self::Series(pairs) => Some(pairs.iter().map(|(l, v)| (l.as_str(), *v)).unzip()),
            _ => None,
        }
    }
}

/// Immutable description of one dashboard card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSpec {
    title: String,
    description: String,
    kind: ChartKind,
    dataset: Dataset,
    subheader: Option<String>,
    chart_title: Option<String>,
    axis_labels: Option<(String, String)>,
}

impl CardSpec {
    /// Create a card, checking that the dataset suits the chart kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetMismatch`] when bar/pie cards get anything
    /// but a series, hierarchical cards anything but a hierarchy, or
    /// word-frequency/text cards anything but raw text.
    pub fn new(title: &str, description: &str, kind: ChartKind, dataset: Dataset) -> Result<Self> {
        if !kind.accepts(&dataset) {
            return Err(Error::DatasetMismatch {
                title: title.to_string(),
                kind: kind.name(),
                dataset: dataset.shape(),
            });
        }
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            kind,
            dataset,
            subheader: None,
            chart_title: None,
            axis_labels: None,
        })
    }

    /// Add a heading shown inside the panel above the description.
    #[must_use]
    pub fn with_subheader(mut self, subheader: &str) -> Self {
        self.subheader = Some(subheader.to_string());
        self
    }

    /// Add a title drawn inside the chart.
    #[must_use]
    pub fn with_chart_title(mut self, title: &str) -> Self {
        self.chart_title = Some(title.to_string());
        self
    }

    /// Name the category and value axes.
    #[must_use]
    pub fn with_axis_labels(mut self, x: &str, y: &str) -> Self {
        self.axis_labels = Some((x.to_string(), y.to_string()));
        self
    }

    /// Panel title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Caption text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Chart kind.
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Underlying data.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Heading inside the panel, if any.
    #[must_use]
    pub fn subheader(&self) -> Option<&str> {
        self.subheader.as_deref()
    }

    /// Title inside the chart, if any.
    #[must_use]
    pub fn chart_title(&self) -> Option<&str> {
        self.chart_title.as_deref()
    }

    /// Axis names, if any.
    #[must_use]
    pub fn axis_labels(&self) -> Option<(&str, &str)> {
        self.axis_labels.as_ref().map(|(x, y)| (x.as_str(), y.as_str()))
    }
}
