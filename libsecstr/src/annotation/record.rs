use serde::{Deserialize, Serialize};

use crate::alphabet::BLANK_SYMBOL;

/// One column's worth of annotation in an alignment annotation row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotationRecord {
    /// The text shown for this position
    pub label: String,
    /// A longer description, usually shown as a tooltip
    pub description: String,
    /// The secondary structure symbol for this position, or a blank
    pub secondary_structure: char,
    /// The value plotted for this position
    pub score: f32,
}

impl AnnotationRecord {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        secondary_structure: char,
        score: f32,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            secondary_structure,
            score,
        }
    }

    /// A record that carries only a label: no description,
    /// a blank structure symbol and a zero score.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new(label, "", BLANK_SYMBOL, 0.0)
    }
}

impl Default for AnnotationRecord {
    fn default() -> Self {
        Self::placeholder("")
    }
}
