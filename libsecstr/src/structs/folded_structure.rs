/// A solved RNA secondary structure, as produced by a folding tool.
///
/// Implementors are treated as read-only by everything in this crate.
pub trait FoldedStructure {
    /// The number of structural positions
    fn size(&self) -> usize;

    /// A linear rendering of the whole structure. When `use_structure_notation`
    /// is true this is the structure notation (e.g. dot-bracket), otherwise it
    /// is left to the implementor (usually the folded sequence).
    fn representation(&self, use_structure_notation: bool) -> String;
}
