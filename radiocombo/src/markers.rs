//! Marker vocabulary used to discover radio combos in a tree.

use serde::Deserialize;

use crate::element::Element;
use crate::error::Result;

/// Class names that identify groups, entries and controlled text inputs.
///
/// Defaults match the stock markup:
///
/// ```text
/// .radioCombo
///   .radioComboEntry
///     input[type=radio]
///     .text input
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Marks a group container.
    pub group: String,
    /// Marks one entry within a group.
    pub entry: String,
    /// Marks a text input, or a wrapper around text inputs, inside an entry.
    pub text: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            group: "radioCombo".to_string(),
            entry: "radioComboEntry".to_string(),
            text: "text".to_string(),
        }
    }
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse markers from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn group(mut self, class: impl Into<String>) -> Self {
        self.group = class.into();
        self
    }

    pub fn entry(mut self, class: impl Into<String>) -> Self {
        self.entry = class.into();
        self
    }

    pub fn text(mut self, class: impl Into<String>) -> Self {
        self.text = class.into();
        self
    }

    pub fn is_group(&self, element: &Element) -> bool {
        element.has_class(&self.group)
    }

    pub fn is_entry(&self, element: &Element) -> bool {
        element.has_class(&self.entry)
    }

    pub fn is_text(&self, element: &Element) -> bool {
        element.has_class(&self.text)
    }
}
