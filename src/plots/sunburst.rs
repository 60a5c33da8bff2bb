//! Sunburst (radial hierarchy) chart.
//!
//! Data comes as parallel `labels` / `parents` / `values` columns; a parent
//! of `""` marks the root. The root is drawn as a center disc and each
//! deeper level as a concentric ring, children sweeping the angle of their
//! parent in input order.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::TAU;

use crate::color::{palette_color, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::output::{wedge_path, SvgElement, SvgEncoder, TextAnchor};
use crate::render::{Drawable, Wedge};

use super::{format_value, GRID_COLOR, TEXT_COLOR};

/// How node values relate to their children's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BranchValues {
    /// A node's value covers only itself; its arc spans its value plus all
    /// descendant values.
    #[default]
    Remainder,
    /// A node's value is the total of its subtree; children must not
    /// exceed it.
    Total,
}

/// A computed ring segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SunburstArc {
    /// Node label.
    pub label: String,
    /// Ring depth, 0 for the root.
    pub depth: usize,
    /// Start angle (radians, clockwise from 12 o'clock).
    pub start: f32,
    /// End angle.
    pub end: f32,
    /// Subtree total the arc represents.
    pub value: f32,
    /// Fill color.
    pub color: Rgba,
}

#[derive(Debug, Clone)]
struct Node {
    label: String,
    parent: Option<usize>,
    value: f32,
    children: Vec<usize>,
}

/// Builder for creating sunburst charts.
#[derive(Debug, Clone)]
pub struct Sunburst {
    labels: Vec<String>,
    parents: Vec<String>,
    values: Vec<f32>,
    branch_values: BranchValues,
    title: Option<String>,
    width: u32,
    height: u32,
    nodes: Vec<Node>,
    root: usize,
}

impl Default for Sunburst {
    fn default() -> Self {
        Self::new()
    }
}

impl Sunburst {
    /// Create a new sunburst builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            parents: Vec::new(),
            values: Vec::new(),
            branch_values: BranchValues::default(),
            title: None,
            width: 640,
            height: 400,
            nodes: Vec::new(),
            root: 0,
        }
    }

    /// Set node labels.
    #[must_use]
    pub fn labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.labels = labels.iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    /// Set the parent label of each node (`""` for the root).
    #[must_use]
    pub fn parents<S: AsRef<str>>(mut self, parents: &[S]) -> Self {
        self.parents = parents.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }

    /// Set node values.
    #[must_use]
    pub fn values(mut self, values: &[f32]) -> Self {
        self.values = values.to_vec();
        self
    }

    /// Set how branch values are interpreted.
    #[must_use]
    pub fn branch_values(mut self, mode: BranchValues) -> Self {
        self.branch_values = mode;
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build the tree and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error unless the columns have equal non-zero length and
    /// describe a single rooted tree with unique labels and non-negative
    /// values.
    pub fn build(mut self) -> Result<Self> {
        if self.labels.is_empty() {
            return Err(Error::EmptyData);
        }
        for len in [self.parents.len(), self.values.len()] {
            if len != self.labels.len() {
                return Err(Error::DataLengthMismatch {
                    labels: self.labels.len(),
                    values: len,
                });
            }
        }
        if self.values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::ScaleDomain(
                "sunburst values must be finite and non-negative".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(self.labels.len());
        for (i, label) in self.labels.iter().enumerate() {
            if index.insert(label.as_str(), i).is_some() {
                return Err(Error::InvalidHierarchy(format!("duplicate label '{label}'")));
            }
        }

        let mut nodes: Vec<Node> = self
            .labels
            .iter()
            .zip(&self.values)
            .map(|(label, &value)| Node {
                label: label.clone(),
                parent: None,
                value,
                children: Vec::new(),
            })
            .collect();

        let mut roots = Vec::new();
        for (i, parent) in self.parents.iter().enumerate() {
            if parent.is_empty() {
                roots.push(i);
                continue;
            }
            let Some(&p) = index.get(parent.as_str()) else {
                return Err(Error::InvalidHierarchy(format!(
                    "'{}' refers to unknown parent '{parent}'",
                    self.labels[i]
                )));
            };
            nodes[i].parent = Some(p);
            nodes[p].children.push(i);
        }
        let root = match roots.as_slice() {
            [root] => *root,
            [] => return Err(Error::InvalidHierarchy("no root node".to_string())),
            _ => {
                return Err(Error::InvalidHierarchy(format!(
                    "{} root nodes, expected one",
                    roots.len()
                )))
            }
        };

        // Anything not reachable from the root sits on a parent cycle.
        let mut seen = vec![false; nodes.len()];
        let mut queue = VecDeque::from([root]);
        while let Some(i) = queue.pop_front() {
            seen[i] = true;
            queue.extend(nodes[i].children.iter().copied());
        }
        if let Some(i) = seen.iter().position(|s| !s) {
            return Err(Error::InvalidHierarchy(format!(
                "'{}' is not reachable from the root",
                nodes[i].label
            )));
        }

        if self.branch_values == BranchValues::Total {
            for node in &nodes {
                let sum: f32 = node.children.iter().map(|&c| nodes[c].value).sum();
                if sum > node.value * (1.0 + 1e-6) {
                    return Err(Error::InvalidHierarchy(format!(
                        "children of '{}' sum to {} but its total is {}",
                        node.label,
                        format_value(sum),
                        format_value(node.value)
                    )));
                }
            }
        }

        if self.radius() <= 0.0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        self.nodes = nodes;
        self.root = root;
        Ok(self)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node labels in input order.
    #[must_use]
    pub fn nodes(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }

    /// Label of the root node.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.nodes.get(self.root).map(|n| n.label.as_str())
    }

    /// Parent label of a node, `None` for the root or unknown labels.
    #[must_use]
    pub fn parent_of(&self, label: &str) -> Option<&str> {
        let node = self.find(label)?;
        node.parent.map(|p| self.nodes[p].label.as_str())
    }

    /// Child labels of a node, in input order.
    #[must_use]
    pub fn children(&self, label: &str) -> Vec<&str> {
        self.find(label)
            .map(|n| n.children.iter().map(|&c| self.nodes[c].label.as_str()).collect())
            .unwrap_or_default()
    }

    /// Depth of a node (root = 0).
    #[must_use]
    pub fn depth(&self, label: &str) -> Option<usize> {
        let mut node = self.find(label)?;
        let mut depth = 0;
        while let Some(p) = node.parent {
            node = &self.nodes[p];
            depth += 1;
        }
        Some(depth)
    }

    /// Value an arc represents: own value plus descendants in
    /// [`BranchValues::Remainder`] mode, the given value in
    /// [`BranchValues::Total`] mode.
    #[must_use]
    pub fn total(&self, label: &str) -> Option<f32> {
        let index = self.nodes.iter().position(|n| n.label == label)?;
        Some(self.subtree_total(index))
    }

    fn find(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    fn subtree_total(&self, index: usize) -> f32 {
        let node = &self.nodes[index];
        match self.branch_values {
            BranchValues::Total => node.value,
            BranchValues::Remainder => {
                node.value
                    + node
                        .children
                        .iter()
                        .map(|&c| self.subtree_total(c))
                        .sum::<f32>()
            }
        }
    }

    fn max_depth(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|n| self.depth(&n.label))
            .max()
            .unwrap_or(0)
    }

    fn top_margin(&self) -> f32 {
        if self.title.is_some() {
            40.0
        } else {
            10.0
        }
    }

    /// Chart center.
    #[must_use]
    pub fn center(&self) -> Point {
        let top = self.top_margin();
        Point::new(
            self.width as f32 / 2.0,
            top + (self.height as f32 - top - 10.0) / 2.0,
        )
    }

    /// Outer radius of the deepest ring.
    #[must_use]
    pub fn radius(&self) -> f32 {
        let top = self.top_margin();
        (self.width as f32 - 20.0).min(self.height as f32 - top - 10.0) / 2.0
    }

    fn ring_width(&self) -> f32 {
        self.radius() / (self.max_depth() + 1) as f32
    }

    /// All arcs, root first, then depth-first in input order.
    #[must_use]
    pub fn arcs(&self) -> Vec<SunburstArc> {
        let mut arcs = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return arcs;
        }
        let root_total = self.subtree_total(self.root);
        arcs.push(SunburstArc {
            label: self.nodes[self.root].label.clone(),
            depth: 0,
            start: 0.0,
            end: TAU,
            value: root_total,
            color: GRID_COLOR,
        });
        self.push_children(self.root, 0.0, TAU, 1, None, &mut arcs);
        arcs
    }

    fn push_children(
        &self,
        parent: usize,
        start: f32,
        end: f32,
        depth: usize,
        base: Option<Rgba>,
        arcs: &mut Vec<SunburstArc>,
    ) {
        let total = self.subtree_total(parent);
        if total <= 0.0 {
            return;
        }
        let mut cursor = start;
        for (i, &child) in self.nodes[parent].children.iter().enumerate() {
            let value = self.subtree_total(child);
            let sweep = (end - start) * value / total;
            let color = match base {
                None => palette_color(i),
                Some(c) => c.lerp(Rgba::WHITE, 0.3),
            };
            arcs.push(SunburstArc {
                label: self.nodes[child].label.clone(),
                depth,
                start: cursor,
                end: cursor + sweep,
                value,
                color,
            });
            self.push_children(child, cursor, cursor + sweep, depth + 1, Some(color), arcs);
            cursor += sweep;
        }
    }

    fn wedge(&self, arc: &SunburstArc) -> Wedge {
        let ring = self.ring_width();
        Wedge {
            center: self.center(),
            inner: if arc.depth == 0 { 0.0 } else { arc.depth as f32 * ring },
            outer: (arc.depth + 1) as f32 * ring,
            start: arc.start,
            end: arc.end,
        }
    }

    /// Render as vector SVG.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let mut svg = SvgEncoder::new(self.width, self.height);
        if let Some(title) = &self.title {
            svg = svg.title(title).text(16.0, 26.0, title, 16.0, TEXT_COLOR);
        }

        let center = self.center();
        let ring = self.ring_width();
        let arcs = self.arcs();

        for arc in arcs.iter().filter(|a| a.end > a.start) {
            svg.add_element(SvgElement::Titled {
                title: format!("{}: {}", arc.label, format_value(arc.value)),
                element: Box::new(SvgElement::Path {
                    d: wedge_path(&self.wedge(arc)),
                    fill: Some(arc.color),
                    stroke: Some(Rgba::WHITE),
                    stroke_width: 1.0,
                }),
            });
        }

        for arc in &arcs {
            let (at, room) = if arc.depth == 0 {
                (center, 2.0 * ring)
            } else {
                let mid_radius = (arc.depth as f32 + 0.5) * ring;
                let mid_angle = (arc.start + arc.end) / 2.0;
                (center.polar(mid_radius, mid_angle), (arc.end - arc.start) * mid_radius)
            };
            // Skip labels that would spill out of their segment.
            if room < arc.label.chars().count() as f32 * 6.5 {
                continue;
            }
            svg = svg.text_anchored(at.x, at.y + 4.0, &arc.label, 11.0, TEXT_COLOR, TextAnchor::Middle);
        }

        svg
    }

    /// Rasterize the rings (no text).
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        for arc in self.arcs() {
            self.wedge(&arc).draw(&mut fb, arc.color);
        }
        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for Sunburst {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
