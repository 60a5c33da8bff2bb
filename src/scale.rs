//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, size).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a zero-based scale whose domain ends at the nice ceiling of `data`.
    ///
    /// This is the value axis of a bar chart: bars grow from zero and the
    /// top of the axis lands on a round tick.
    #[must_use]
    pub fn zero_based(data: &[f32], range: (f32, f32)) -> Option<Self> {
        let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if !max.is_finite() {
            return None;
        }
        Self::new((0.0, nice_ceiling(max)), range).ok()
    }

    /// Round tick values for a zero-based domain: four to six intervals of a
    /// 1-2-5 step, falling back to five equal intervals.
    #[must_use]
    pub fn nice_ticks(&self) -> Vec<f32> {
        let extent = self.domain_max - self.domain_min;
        let magnitude = 10f32.powi(extent.abs().log10().floor() as i32);
        let count = [0.1, 0.2, 0.5, 1.0, 2.0, 5.0]
            .into_iter()
            .map(|mult| extent / (mult * magnitude))
            .find(|n| (3.99..=6.01).contains(n) && (n - n.round()).abs() < 1e-3)
            .map_or(5, |n| n.round() as usize);
        self.ticks(count)
    }

    /// Evenly spaced tick values across the domain, both ends included.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let count = count.max(1);
        let step = (self.domain_max - self.domain_min) / count as f32;
        (0..=count).map(|i| self.domain_min + step * i as f32).collect()
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Smallest "nice" number (1, 2, 2.5, 3, 4, 5, 6 or 8 times a power of ten) at or above `value`.
///
/// Non-positive input maps to 1 so an all-zero series still gets an axis.
#[must_use]
pub fn nice_ceiling(value: f32) -> f32 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }

    let magnitude = 10f32.powi(value.log10().floor() as i32);
    let normalized = value / magnitude;
    let nice = [1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0]
        .into_iter()
        .find(|&n| normalized <= n + f32::EPSILON * 4.0)
        .unwrap_or(10.0);
    nice * magnitude
}
