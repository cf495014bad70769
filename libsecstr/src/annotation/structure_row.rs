use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::structs::FoldedStructure;

use super::{AlignmentAnnotation, AnnotationRecord, AnnotationRow};

pub const STRUCTURE_ROW_TITLE: &str = "Secondary Structure";
pub const STRUCTURE_ROW_DESCRIPTION: &str = "Un-used";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no folded structure was supplied")]
pub struct MissingStructureError;

/// Builds one record per structural position. Every record is labelled with
/// the structure notation of the whole structure, with no description,
/// a blank structure symbol and a zero score.
pub fn derive_annotation_records<S: FoldedStructure + ?Sized>(
    structure: &S,
) -> Vec<AnnotationRecord> {
    let size = structure.size();
    // the representation doesn't change for a given structure
    let notation = structure.representation(true);

    (0..size)
        .map(|_| AnnotationRecord::placeholder(notation.as_str()))
        .collect()
}

/// Like `derive_annotation_records()`, but fails before producing anything
/// when no structure is given.
pub fn try_derive_annotation_records<S: FoldedStructure + ?Sized>(
    structure: Option<&S>,
) -> Result<Vec<AnnotationRecord>, MissingStructureError> {
    match structure {
        Some(structure) => Ok(derive_annotation_records(structure)),
        None => Err(MissingStructureError),
    }
}

/// The "Secondary Structure" annotation row of a folded RNA structure.
///
/// The row keeps a shared handle to the structure it was built from, so
/// `structure()` hands back that same instance. Rows are immutable once built.
pub struct StructureAnnotationRow<S: FoldedStructure + ?Sized> {
    structure: Arc<S>,
    annotation: AlignmentAnnotation,
}

impl<S: FoldedStructure + ?Sized> StructureAnnotationRow<S> {
    pub fn new(structure: Arc<S>) -> Self {
        let records = derive_annotation_records(structure.as_ref());

        log::debug!(
            "built {} row with {} records",
            STRUCTURE_ROW_TITLE,
            records.len()
        );

        Self {
            structure,
            annotation: AlignmentAnnotation::new(
                STRUCTURE_ROW_TITLE,
                STRUCTURE_ROW_DESCRIPTION,
                records,
            ),
        }
    }

    pub fn from_optional(structure: Option<Arc<S>>) -> Result<Self, MissingStructureError> {
        match structure {
            Some(structure) => Ok(Self::new(structure)),
            None => Err(MissingStructureError),
        }
    }

    /// The structure this row was built from.
    pub fn structure(&self) -> &Arc<S> {
        &self.structure
    }

    pub fn annotation(&self) -> &AlignmentAnnotation {
        &self.annotation
    }

    pub fn into_annotation(self) -> AlignmentAnnotation {
        self.annotation
    }
}

impl<S: FoldedStructure + ?Sized> AnnotationRow for StructureAnnotationRow<S> {
    fn title(&self) -> &str {
        &self.annotation.title
    }

    fn description(&self) -> &str {
        &self.annotation.description
    }

    fn records(&self) -> &[AnnotationRecord] {
        &self.annotation.records
    }
}

impl<S: FoldedStructure + ?Sized> Clone for StructureAnnotationRow<S> {
    fn clone(&self) -> Self {
        Self {
            structure: Arc::clone(&self.structure),
            annotation: self.annotation.clone(),
        }
    }
}

impl<S: FoldedStructure + ?Sized> Debug for StructureAnnotationRow<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureAnnotationRow")
            .field("structure", &self.structure.representation(true))
            .field("annotation", &self.annotation)
            .finish()
    }
}

impl<S: FoldedStructure + ?Sized> Serialize for StructureAnnotationRow<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        let mut state = serializer.serialize_struct("StructureAnnotationRow", 4)?;
        state.serialize_field("title", self.title())?;
        state.serialize_field("description", self.description())?;
        state.serialize_field("structure", &self.structure.representation(true))?;
        state.serialize_field("records", self.records())?;
        state.end()
    }
}
