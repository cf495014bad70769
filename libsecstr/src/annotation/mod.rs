mod record;
pub use record::AnnotationRecord;

mod row;
pub use row::{AlignmentAnnotation, AnnotationRow};

mod structure_row;
pub use structure_row::{
    derive_annotation_records, try_derive_annotation_records, MissingStructureError,
    StructureAnnotationRow, STRUCTURE_ROW_DESCRIPTION, STRUCTURE_ROW_TITLE,
};
