pub mod base_pair;
pub use base_pair::{helix_map, parse_base_pairs, BasePair, Helix, StructureParseError};

pub mod dot_bracket;
pub use dot_bracket::DotBracketStructure;

mod folded_structure;
pub use folded_structure::FoldedStructure;
