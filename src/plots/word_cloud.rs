//! Word-frequency cloud.
//!
//! Counts words in a raw text and lays them out on an Archimedean spiral,
//! largest first. Layout is fully deterministic: the same text always
//! yields the same positions, sizes and colors.
//!
//! Counts are of single words only: two-word phrases are not detected and
//! plural forms are not merged, so "Data" and "Datas" count separately.

use std::collections::HashMap;

use crate::color::{Hsla, Rgba};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::output::{SvgElement, SvgEncoder, TextAnchor};

/// Common English words left out of the counts.
const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "but", "by", "can", "do", "for", "from",
    "had", "has", "have", "he", "her", "his", "i", "if", "in", "into", "is", "it", "its", "me",
    "my", "no", "not", "of", "on", "or", "our", "she", "so", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "to", "too", "was", "we", "were",
    "what", "when", "which", "who", "will", "with", "you", "your",
];

/// Approximate glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.6;

const SPIRAL_STEP: f32 = 0.1;
const SPIRAL_GROWTH: f32 = 1.5;
const SHRINK: f32 = 0.9;

/// A word positioned in the cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    /// Display form of the word.
    pub text: String,
    /// Occurrences in the source text.
    pub count: usize,
    /// Final font size in pixels.
    pub font_size: f32,
    /// Bounding box.
    pub rect: Rect,
    /// Fill color.
    pub color: Rgba,
}

/// Builder for creating word clouds.
#[derive(Debug, Clone)]
pub struct WordCloud {
    text: String,
    width: u32,
    height: u32,
    max_words: usize,
    relative_scaling: f32,
    min_font_size: f32,
    background: Rgba,
    frequencies: Vec<(String, usize)>,
}

impl Default for WordCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl WordCloud {
    /// Create a new word cloud builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            width: 800,
            height: 400,
            max_words: 200,
            relative_scaling: 0.5,
            min_font_size: 10.0,
            background: Rgba::WHITE,
            frequencies: Vec::new(),
        }
    }

    /// Set the source text.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Set the canvas dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Keep at most this many distinct words.
    #[must_use]
    pub fn max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Weight of word frequency in font size: 0 sizes by rank only, 1 sizes
    /// proportionally to frequency.
    #[must_use]
    pub fn relative_scaling(mut self, scaling: f32) -> Self {
        self.relative_scaling = scaling;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Count the words and validate the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when the text has no countable words,
    /// and an error for zero dimensions or a scaling outside `[0, 1]`.
    pub fn build(mut self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.relative_scaling) {
            return Err(Error::ScaleDomain(format!(
                "relative scaling {} outside [0, 1]",
                self.relative_scaling
            )));
        }
        self.frequencies = count_words(&self.text, self.max_words);
        if self.frequencies.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(self)
    }

    /// Word counts, most frequent first; ties keep first-appearance order.
    #[must_use]
    pub fn frequencies(&self) -> &[(String, usize)] {
        &self.frequencies
    }

    fn font_size_for(&self, count: usize, max_count: usize) -> f32 {
        let max_font = self.height as f32 / 4.0;
        let norm = count as f32 / max_count as f32;
        let rs = self.relative_scaling;
        (max_font * ((1.0 - rs) + rs * norm)).max(self.min_font_size)
    }

    fn spiral(&self, step: usize) -> Point {
        let angle = step as f32 * SPIRAL_STEP;
        let r = SPIRAL_GROWTH * angle;
        let aspect = self.height as f32 / self.width as f32;
        Point::new(
            self.width as f32 / 2.0 + r * angle.cos(),
            self.height as f32 / 2.0 + r * angle.sin() * aspect,
        )
    }

    fn spiral_steps(&self) -> usize {
        let reach = self.width.max(self.height) as f32 * 0.6;
        (reach / (SPIRAL_GROWTH * SPIRAL_STEP)) as usize
    }

    /// Position every word that fits; words that cannot be placed even at
    /// the minimum font size are dropped.
    #[must_use]
    pub fn placed_words(&self) -> Vec<PlacedWord> {
        let bounds = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let max_count = self.frequencies.first().map_or(1, |(_, c)| *c);
        let steps = self.spiral_steps();
        let mut placed: Vec<PlacedWord> = Vec::with_capacity(self.frequencies.len());

        for (i, (word, count)) in self.frequencies.iter().enumerate() {
            let chars = word.chars().count() as f32;
            let mut font_size = self.font_size_for(*count, max_count);

            let spot = loop {
                let (w, h) = (GLYPH_WIDTH * font_size * chars, font_size);
                let found = (0..steps)
                    .map(|step| Rect::centered(self.spiral(step), w, h))
                    .find(|rect| {
                        bounds.contains_rect(rect) && !placed.iter().any(|p| p.rect.intersects(rect))
                    });
                if found.is_some() || font_size * SHRINK < self.min_font_size {
                    break found;
                }
                font_size *= SHRINK;
            };

            let Some(rect) = spot else {
                tracing::debug!(word = %word, "word cloud has no room left");
                continue;
            };
            placed.push(PlacedWord {
                text: word.clone(),
                count: *count,
                font_size,
                rect,
                color: Hsla::hsl((i as f32 * 137.5) % 360.0, 0.65, 0.4).into(),
            });
        }
        placed
    }

    /// Render as vector SVG.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let mut svg = SvgEncoder::new(self.width, self.height).background(Some(self.background));
        for word in self.placed_words() {
            let baseline = word.rect.y + word.font_size * 0.8;
            svg.add_element(SvgElement::Titled {
                title: format!("{}: {}", word.text, word.count),
                element: Box::new(SvgElement::Text {
                    x: word.rect.center().x,
                    y: baseline,
                    text: word.text,
                    font_size: word.font_size.round(),
                    fill: word.color,
                    anchor: TextAnchor::Middle,
                    rotate: 0.0,
                }),
            });
        }
        svg
    }
}

impl batuta_common::display::WithDimensions for WordCloud {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// Tokenize on non-alphanumeric characters and count case-insensitively.
///
/// Each word is reported in its most frequent spelling.
fn count_words(text: &str, max_words: usize) -> Vec<(String, usize)> {
    struct Entry<'a> {
        first_seen: usize,
        total: usize,
        spellings: Vec<(&'a str, usize)>,
    }

    let mut entries: HashMap<String, Entry<'_>> = HashMap::new();
    let tokens = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 1);

    for (position, token) in tokens.enumerate() {
        let key = token.to_lowercase();
        if STOPWORDS.contains(&key.as_str()) {
            continue;
        }
        let entry = entries.entry(key).or_insert_with(|| Entry {
            first_seen: position,
            total: 0,
            spellings: Vec::new(),
        });
        entry.total += 1;
        match entry.spellings.iter_mut().find(|(s, _)| *s == token) {
            Some((_, n)) => *n += 1,
            None => entry.spellings.push((token, 1)),
        }
    }

    let mut counted: Vec<(usize, String, usize)> = entries
        .into_values()
        .map(|entry| {
            // max_by_key keeps the last maximum; reverse so the first
            // spelling wins ties.
            let display = entry
                .spellings
                .iter()
                .rev()
                .max_by_key(|(_, n)| *n)
                .map_or_else(String::new, |(s, _)| (*s).to_string());
            (entry.first_seen, display, entry.total)
        })
        .collect();
    counted.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    counted.truncate(max_words);
    counted.into_iter().map(|(_, word, n)| (word, n)).collect()
}
