use std::io::Write;

use anyhow::Context;
use colored::Colorize;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use libsecstr::structs::DotBracketStructure;

use crate::args::PairsArgs;
use crate::util::output_writer;

/// Formats the pair lines of one structure.
fn pair_lines(structure: &DotBracketStructure) -> anyhow::Result<Vec<String>> {
    let helices = structure
        .helices()
        .context(format!("failed to map helices of: {}", structure.name))?;

    let non_canonical = structure.non_canonical_pairs().unwrap_or_default();
    let residues: Option<Vec<char>> = structure.sequence().map(|s| s.chars().collect());

    log::debug!(
        "{}: {} pairs, {} non-canonical",
        structure.name,
        helices.len(),
        non_canonical.len()
    );

    helices
        .iter()
        .map(|helix| {
            let pair = helix.pair;
            let residue_string = match residues {
                Some(ref residues) => {
                    let five_prime = residues.get(pair.five_prime);
                    let three_prime = residues.get(pair.three_prime);
                    let (Some(five_prime), Some(three_prime)) = (five_prime, three_prime) else {
                        anyhow::bail!("pair {pair} of {} is outside its sequence", structure.name);
                    };

                    let residue_pair = format!("{five_prime}:{three_prime}");
                    if non_canonical.contains(&pair) {
                        format!("{residue_pair}*").red().to_string()
                    } else {
                        residue_pair
                    }
                }
                None => "-".to_string(),
            };

            Ok(format!(
                "{}\t{}\t{}\t{}\t{}",
                structure.name,
                pair.five_prime + 1,
                pair.three_prime + 1,
                helix.number,
                residue_string
            ))
        })
        .collect()
}

/// Writes one line per base pair: the structure name, the 1-based pair
/// positions, the helix number, and the paired residues when the sequence
/// is known. Pairs that are neither canonical nor wobble are starred.
pub fn pairs(args: &PairsArgs) -> anyhow::Result<()> {
    let structures = DotBracketStructure::from_vienna_file(&args.structures_path).context(
        format!(
            "failed to read structures from: {}",
            args.structures_path.to_string_lossy()
        ),
    )?;

    // structures are formatted on the pool, then written in file order
    let lines: Vec<Vec<String>> = structures
        .par_iter()
        .map(pair_lines)
        .collect::<anyhow::Result<_>>()?;

    let mut writer = output_writer(&args.common_args)?;

    writeln!(writer, "# name\tfive_prime\tthree_prime\thelix\tresidues")?;

    for line in lines.iter().flatten() {
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}
