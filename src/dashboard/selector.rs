//! Dropdown selectors.
//!
//! Selections only decide which `<option>` is marked `selected`; no card
//! reads them.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A dropdown with a fixed, ordered option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    label: String,
    options: Vec<String>,
}

impl Selector {
    /// Create a selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `options` is empty.
    pub fn new<S: AsRef<str>>(label: &str, options: &[S]) -> Result<Self> {
        if options.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(Self {
            label: label.to_string(),
            options: options.iter().map(|o| o.as_ref().to_string()).collect(),
        })
    }

    /// Prompt shown above the dropdown.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Options in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Position of `value` among the options.
    #[must_use]
    pub fn position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o == value)
    }
}

/// Chosen option per selector; unset selectors show their first option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    chosen: BTreeMap<String, usize>,
}

impl Selection {
    /// Selection with every selector on its first option.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose `value` on `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] when `value` is not one of the
    /// selector's options.
    pub fn select(&mut self, selector: &Selector, value: &str) -> Result<()> {
        let index = selector.position(value).ok_or_else(|| Error::UnknownOption {
            selector: selector.label.clone(),
            value: value.to_string(),
        })?;
        self.chosen.insert(selector.label.clone(), index);
        Ok(())
    }

    /// Selection from optional values, paired with `selectors` in order.
    /// `None` leaves that selector on its first option.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] for the first value that is not an
    /// option of its selector.
    pub fn from_values(selectors: &[Selector], values: &[Option<&str>]) -> Result<Self> {
        let mut selection = Self::new();
        for (selector, value) in selectors.iter().zip(values) {
            if let Some(value) = value {
                selection.select(selector, value)?;
            }
        }
        Ok(selection)
    }

    /// Index of the option currently chosen on `selector`.
    #[must_use]
    pub fn index(&self, selector: &Selector) -> usize {
        self.chosen
            .get(&selector.label)
            .copied()
            .filter(|&i| i < selector.options.len())
            .unwrap_or(0)
    }

    /// Value currently chosen on `selector`.
    #[must_use]
    pub fn value<'a>(&self, selector: &'a Selector) -> &'a str {
        &selector.options[self.index(selector)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric() -> Selector {
        Selector::new("Metric", &["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_default_is_first_option() {
        assert_eq!(Selection::new().value(&metric()), "A");
    }

    #[test]
    fn test_select_known_option() {
        let selector = metric();
        let mut selection = Selection::new();
        selection.select(&selector, "C").unwrap();
        assert_eq!(selection.index(&selector), 2);
        assert_eq!(selection.value(&selector), "C");
    }

    #[test]
    fn test_select_unknown_option() {
        let mut selection = Selection::new();
        let err = selection.select(&metric(), "D").unwrap_err();
        assert_eq!(err.to_string(), "'D' is not an option of selector 'Metric'");
        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn test_from_values() {
        let category = Selector::new("Category", &["x", "y"]).unwrap();
        let selectors = [category, metric()];
        let selection = Selection::from_values(&selectors, &[None, Some("B")]).unwrap();
        assert_eq!(selection.value(&selectors[0]), "x");
        assert_eq!(selection.value(&selectors[1]), "B");

        let err = Selection::from_values(&selectors, &[Some("z"), Some("B")]).unwrap_err();
        assert!(matches!(err, Error::UnknownOption { ref value, .. } if value == "z"));
    }

    #[test]
    fn test_selector_needs_options() {
        let none: [&str; 0] = [];
        assert!(matches!(Selector::new("x", &none), Err(Error::EmptyData)));
    }
}
