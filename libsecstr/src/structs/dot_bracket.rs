use std::fmt::{Display, Formatter};
use std::path::Path;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use seq_io::fasta::{Reader, Record};
use thiserror::Error;

use crate::alphabet::{is_canonical_or_wobble_pair, UTF8_SPACE};

use super::base_pair::{helix_map, parse_base_pairs, BasePair, Helix};
use super::FoldedStructure;

lazy_static! {
    // a structure line, optionally followed by a free energy: "((..)) ( -1.20)"
    static ref STRUCTURE_LINE_REGEX: Regex =
        Regex::new(r"^(\S+)(?:\s+\(\s*(-?\d+(?:\.\d+)?)\s*\))?\s*$")
            .expect("structure line regex is valid");
}

#[derive(Error, Debug)]
#[error("sequence length {sequence_length} does not match structure length {structure_length}")]
pub struct SequenceLengthMismatchError {
    sequence_length: usize,
    structure_length: usize,
}

#[derive(Error, Debug)]
#[error("record {name} has no structure line")]
pub struct MissingStructureLineError {
    name: String,
}

#[derive(Error, Debug)]
#[error("malformed structure line in record {name}: {line}")]
pub struct MalformedStructureLineError {
    name: String,
    line: String,
}

/// This holds a folded RNA structure in dot-bracket (or WUSS) notation.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DotBracketStructure {
    /// The name of the structure. If it was read from a Vienna
    /// file, this is the first word of the header
    pub name: String,
    // the sequence, notation, pairs and partners all describe the same
    // positions, so they are only set through the constructors
    sequence: Option<String>,
    notation: String,
    /// The minimum free energy reported by the folding tool (kcal/mol)
    pub free_energy: Option<f32>,
    pairs: Vec<BasePair>,
    #[serde(skip)]
    partners: Vec<Option<usize>>,
}

impl DotBracketStructure {
    pub fn new(notation: impl Into<String>) -> Result<Self> {
        let notation = notation.into();
        let pairs = parse_base_pairs(&notation)
            .with_context(|| format!("failed to parse structure notation: {notation}"))?;

        let mut partners = vec![None; notation.chars().count()];
        for pair in pairs.iter() {
            partners[pair.five_prime] = Some(pair.three_prime);
            partners[pair.three_prime] = Some(pair.five_prime);
        }

        Ok(Self {
            name: "".to_string(),
            sequence: None,
            notation,
            free_energy: None,
            pairs,
            partners,
        })
    }

    /// The folded nucleotide sequence, if known
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    /// The structure notation string
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// The base pairs of the structure, in closing order
    pub fn pairs(&self) -> &[BasePair] {
        &self.pairs
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_sequence(mut self, sequence: impl Into<String>) -> Result<Self> {
        let sequence = sequence.into();
        let sequence_length = sequence.chars().count();

        if sequence_length != self.size() {
            return Err(SequenceLengthMismatchError {
                sequence_length,
                structure_length: self.size(),
            }
            .into());
        }

        self.sequence = Some(sequence);
        Ok(self)
    }

    pub fn with_free_energy(mut self, free_energy: f32) -> Self {
        self.free_energy = Some(free_energy);
        self
    }

    /// Reads every record of a Vienna (RNAfold) output file.
    ///
    /// Each record is a FASTA style header followed by the sequence and then
    /// a final structure line, which may carry the free energy in parentheses.
    pub fn from_vienna_file<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let mut structures: Vec<Self> = vec![];

        let mut reader = Reader::from_path(&path).with_context(|| {
            format!(
                "failed to open structure file: {}",
                path.as_ref().to_string_lossy()
            )
        })?;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "failed to read structure record")?;
            let header_bytes = record.head();

            let name_bytes: Vec<u8> = header_bytes
                .iter()
                .take_while(|&&b| b != UTF8_SPACE)
                .cloned()
                .collect();

            let name = String::from_utf8(name_bytes)
                .with_context(|| "failed to create String from record header bytes")?;

            let mut lines: Vec<String> = record
                .seq_lines()
                .map(|line| String::from_utf8(line.to_vec()))
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("non UTF8 bytes in record {name}"))?;

            // blank lines carry nothing, and would otherwise shadow the structure line
            lines.retain(|line| !line.trim().is_empty());

            let structure_line = match lines.pop() {
                Some(line) => line,
                None => return Err(MissingStructureLineError { name }.into()),
            };

            let captures = match STRUCTURE_LINE_REGEX.captures(structure_line.trim()) {
                Some(captures) => captures,
                None => {
                    return Err(MalformedStructureLineError {
                        name,
                        line: structure_line,
                    }
                    .into())
                }
            };

            let mut structure = Self::new(&captures[1])
                .with_context(|| format!("invalid structure in record {name}"))?;

            if let Some(energy) = captures.get(2) {
                let energy: f32 = energy
                    .as_str()
                    .parse()
                    .with_context(|| format!("invalid free energy in record {name}"))?;
                structure = structure.with_free_energy(energy);
            }

            if !lines.is_empty() {
                let sequence: String = lines.iter().map(|line| line.trim()).collect();
                structure = structure
                    .with_sequence(sequence)
                    .with_context(|| format!("invalid sequence in record {name}"))?;
            }

            log::debug!(
                "read structure {name}: {} positions, {} pairs",
                structure.size(),
                structure.pairs().len()
            );

            structures.push(structure.with_name(name));
        }
        Ok(structures)
    }

    /// The position paired with `position`, if any.
    pub fn paired_position(&self, position: usize) -> Option<usize> {
        self.partners.get(position).copied().flatten()
    }

    pub fn helices(&self) -> Result<Vec<Helix>> {
        Ok(helix_map(&self.notation)?)
    }

    /// The pairs that are neither Watson-Crick nor G:U wobble pairs.
    /// Returns None when the structure has no sequence.
    pub fn non_canonical_pairs(&self) -> Option<Vec<BasePair>> {
        let residues: Vec<char> = self.sequence.as_ref()?.chars().collect();

        Some(
            self.pairs
                .iter()
                .filter(|p| {
                    match (residues.get(p.five_prime), residues.get(p.three_prime)) {
                        (Some(&first), Some(&second)) => !is_canonical_or_wobble_pair(first, second),
                        _ => false,
                    }
                })
                .copied()
                .collect(),
        )
    }
}

impl FoldedStructure for DotBracketStructure {
    fn size(&self) -> usize {
        self.partners.len()
    }

    fn representation(&self, use_structure_notation: bool) -> String {
        match (use_structure_notation, &self.sequence) {
            (false, Some(sequence)) => sequence.clone(),
            _ => self.notation.clone(),
        }
    }
}

impl Display for DotBracketStructure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, ">{}", self.name)?;

        if let Some(ref sequence) = self.sequence {
            writeln!(f, "{sequence}")?;
        }

        write!(f, "{}", self.notation)?;

        if let Some(energy) = self.free_energy {
            write!(f, " ({energy:6.2})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vienna_file(contents: &str) -> anyhow::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_new_and_partners() -> anyhow::Result<()> {
        let structure = DotBracketStructure::new("((..))..")?;
        check!(structure.size() == 8);
        check!(structure.paired_position(0) == Some(5));
        check!(structure.paired_position(4) == Some(1));
        check!(structure.paired_position(2) == None);
        check!(structure.paired_position(100) == None);
        check!(structure.representation(true) == "((..))..");
        Ok(())
    }

    #[test]
    fn test_new_rejects_unbalanced_notation() {
        let_assert!(Err(err) = DotBracketStructure::new("((.)"));
        let_assert!(Some(parse_err) = err.downcast_ref::<crate::structs::StructureParseError>());
        check!(parse_err.position() == 4);
    }

    #[test]
    fn test_representation_without_notation() -> anyhow::Result<()> {
        let structure = DotBracketStructure::new("(((...)))")?;
        check!(structure.representation(false) == "(((...)))");

        let structure = structure.with_sequence("GGGAAACCC")?;
        check!(structure.representation(false) == "GGGAAACCC");
        check!(structure.representation(true) == "(((...)))");
        Ok(())
    }

    #[test]
    fn test_sequence_length_mismatch() -> anyhow::Result<()> {
        let structure = DotBracketStructure::new("(((...)))")?;
        let_assert!(Err(err) = structure.clone().with_sequence("GGGAAA"));
        check!(err.downcast_ref::<SequenceLengthMismatchError>().is_some());

        // a rejected sequence leaves the structure without one
        check!(structure.sequence() == None);
        check!(structure.size() == structure.notation().chars().count());
        check!(structure.non_canonical_pairs() == None);
        Ok(())
    }

    #[test]
    fn test_non_canonical_pairs() -> anyhow::Result<()> {
        let structure = DotBracketStructure::new("(((...)))")?;
        check!(structure.non_canonical_pairs() == None);

        let structure = structure.with_sequence("GGAAAAUCA")?;
        // G:A at (0, 8) is the only pair that isn't canonical or wobble
        check!(structure.non_canonical_pairs() == Some(vec![BasePair::new(0, 8)]));
        Ok(())
    }

    #[test]
    fn test_non_canonical_pairs_short_sequence() -> anyhow::Result<()> {
        let mut structure = DotBracketStructure::new("(((...)))")?;
        structure.sequence = Some("GA".to_string());

        // pairs that run past the end of the sequence are never flagged
        check!(structure.non_canonical_pairs() == Some(vec![]));
        check!(structure.size() == 9);
        Ok(())
    }

    #[test]
    fn test_display() -> anyhow::Result<()> {
        let structure = DotBracketStructure::new("((...))")?
            .with_name("hairpin")
            .with_sequence("GGAAACC")?
            .with_free_energy(-1.2);
        check!(structure.to_string() == ">hairpin\nGGAAACC\n((...)) ( -1.20)");
        Ok(())
    }

    #[test]
    fn test_from_vienna_file() -> anyhow::Result<()> {
        let file = vienna_file(concat!(
            ">first some details\n",
            "GGGAAACCC\n",
            "(((...))) ( -3.40)\n",
            ">second\n",
            "..((....))\n",
            "\n",
        ))?;

        let structures = DotBracketStructure::from_vienna_file(file.path())?;

        check!(structures.len() == 2);

        check!(structures[0].name == "first");
        check!(structures[0].sequence() == Some("GGGAAACCC"));
        check!(structures[0].notation() == "(((...)))");
        check!(structures[0].free_energy == Some(-3.4));
        check!(structures[0].pairs().len() == 3);

        check!(structures[1].name == "second");
        check!(structures[1].sequence() == None);
        check!(structures[1].free_energy == None);
        check!(structures[1].size() == 10);
        Ok(())
    }

    #[test]
    fn test_from_vienna_file_reports_bad_structure() -> anyhow::Result<()> {
        let file = vienna_file(">broken\nGGGAAACCC\n(((...)).\n")?;

        let_assert!(Err(err) = DotBracketStructure::from_vienna_file(file.path()));
        check!(format!("{err:#}").contains("broken"));
        Ok(())
    }

    #[test]
    fn test_from_vienna_file_missing_structure_line() -> anyhow::Result<()> {
        let file = vienna_file(">a\n>b\n")?;

        let_assert!(Err(err) = DotBracketStructure::from_vienna_file(file.path()));
        let_assert!(Some(missing) = err.downcast_ref::<MissingStructureLineError>());
        check!(missing.name == "a");
        Ok(())
    }

    #[test]
    fn test_from_vienna_file_malformed_structure_line() -> anyhow::Result<()> {
        let file = vienna_file(">a\n((..)) junk\n")?;

        let_assert!(Err(err) = DotBracketStructure::from_vienna_file(file.path()));
        let_assert!(Some(malformed) = err.downcast_ref::<MalformedStructureLineError>());
        check!(malformed.name == "a");
        check!(malformed.line == "((..)) junk");
        Ok(())
    }

    #[test]
    fn test_from_vienna_file_missing_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let_assert!(Err(err) = DotBracketStructure::from_vienna_file(dir.path().join("none.fold")));
        check!(format!("{err}").contains("failed to open structure file"));
        Ok(())
    }
}
