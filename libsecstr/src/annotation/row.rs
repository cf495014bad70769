use serde::{Deserialize, Serialize};

use crate::alphabet::BLANK_SYMBOL;
use crate::structs::{helix_map, Helix, StructureParseError};

use super::AnnotationRecord;

/// Symbols that mark a row as carrying RNA secondary structure. The
/// letters that double as protein secondary structure codes
/// (e.g. H, E, G, T, S) are left out.
const RNA_STRUCTURE_MARKERS: [char; 21] = [
    '(', '[', '<', '{', 'A', 'D', 'F', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'U', 'V', 'W',
    'Y', 'Z',
];

/// Anything that can be displayed as an alignment annotation row:
/// a titled, described, ordered sequence of per-column records.
pub trait AnnotationRow {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn records(&self) -> &[AnnotationRecord];

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// A general purpose annotation row that owns its records.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AlignmentAnnotation {
    pub title: String,
    pub description: String,
    pub records: Vec<AnnotationRecord>,
    /// A score for the whole row, set by `mark_helices()`
    pub score: Option<f32>,
}

impl AlignmentAnnotation {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        records: Vec<AnnotationRecord>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            records,
            score: None,
        }
    }

    pub fn from_row<R: AnnotationRow + ?Sized>(row: &R) -> Self {
        Self::new(row.title(), row.description(), row.records().to_vec())
    }

    /// Renders one character per record: a blank where there is no structure
    /// symbol, otherwise the first character of the label, or the structure
    /// symbol itself when the label is empty.
    pub fn structure_string(&self) -> String {
        self.records
            .iter()
            .map(|r| {
                if r.secondary_structure <= BLANK_SYMBOL {
                    BLANK_SYMBOL
                } else {
                    r.label.chars().next().unwrap_or(r.secondary_structure)
                }
            })
            .collect()
    }

    pub fn is_rna(&self) -> bool {
        self.records
            .iter()
            .any(|r| RNA_STRUCTURE_MARKERS.contains(&r.secondary_structure))
    }

    /// The numbered helices of this row's structure string,
    /// or None if the row doesn't carry RNA structure.
    pub fn rna_helices(&self) -> Result<Option<Vec<Helix>>, StructureParseError> {
        if !self.is_rna() {
            return Ok(None);
        }
        Ok(Some(helix_map(&self.structure_string())?))
    }

    /// Sets the score of every paired record to the number of its helix and
    /// the row score to the largest helix number. Returns that number, or
    /// None if the row has no base pairs.
    pub fn mark_helices(&mut self) -> Result<Option<usize>, StructureParseError> {
        let helices = match self.rna_helices()? {
            Some(helices) if !helices.is_empty() => helices,
            _ => return Ok(None),
        };

        let mut max_helix = 0usize;
        for helix in helices.iter() {
            self.records[helix.pair.five_prime].score = helix.number as f32;
            self.records[helix.pair.three_prime].score = helix.number as f32;
            max_helix = max_helix.max(helix.number);
        }

        self.score = Some(max_helix as f32);
        Ok(Some(max_helix))
    }
}

impl AnnotationRow for AlignmentAnnotation {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }
}
