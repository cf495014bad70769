use std::sync::Arc;

use anyhow::Context;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use libsecstr::annotation::StructureAnnotationRow;
use libsecstr::structs::DotBracketStructure;

use crate::args::AnnotateArgs;
use crate::output_step::{NamedRow, OutputStep};

pub fn annotate(args: &AnnotateArgs) -> anyhow::Result<()> {
    let structures = DotBracketStructure::from_vienna_file(&args.structures_path).context(
        format!(
            "failed to read structures from: {}",
            args.structures_path.to_string_lossy()
        ),
    )?;

    log::info!(
        "read {} structures from {}",
        structures.len(),
        args.structures_path.to_string_lossy()
    );

    let rows: Vec<StructureAnnotationRow<DotBracketStructure>> = structures
        .into_par_iter()
        .map(|structure| StructureAnnotationRow::new(Arc::new(structure)))
        .collect();

    let named_rows: Vec<NamedRow<'_, _>> = rows
        .iter()
        .map(|row| NamedRow {
            name: &row.structure().name,
            row,
        })
        .collect();

    let mut output = OutputStep::new(&args.common_args, args.format)?;
    output.write(&named_rows)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{CommonArgs, OutputFormat};
    use assert2::{check, let_assert};
    use std::path::Path;

    const VIENNA: &str = concat!(
        ">hairpin folded by RNAfold\n",
        "GGGAAACCC\n",
        "(((...))) ( -1.20)\n",
        ">open\n",
        "....\n",
    );

    fn annotate_args(dir: &Path, format: OutputFormat) -> anyhow::Result<AnnotateArgs> {
        let structures_path = dir.join("structures.fold");
        std::fs::write(&structures_path, VIENNA)?;

        Ok(AnnotateArgs {
            structures_path,
            format,
            common_args: CommonArgs {
                num_threads: 1,
                output_path: Some(dir.join("rows.out")),
                allow_overwrite: false,
            },
        })
    }

    #[test]
    fn test_annotate_json() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let args = annotate_args(dir.path(), OutputFormat::Json)?;
        annotate(&args)?;

        let output = std::fs::read_to_string(dir.path().join("rows.out"))?;
        let value: serde_json::Value = serde_json::from_str(&output)?;

        let_assert!(Some(rows) = value.as_array());
        check!(rows.len() == 2);

        check!(rows[0]["name"] == "hairpin");
        check!(rows[0]["title"] == "Secondary Structure");
        check!(rows[0]["structure"] == "(((...)))");
        let_assert!(Some(records) = rows[0]["records"].as_array());
        check!(records.len() == 9);
        check!(records
            .iter()
            .all(|r| r["label"] == "(((...)))" && r["description"] == ""));

        check!(rows[1]["name"] == "open");
        check!(rows[1]["records"].as_array().map(|r| r.len()) == Some(4));
        Ok(())
    }

    #[test]
    fn test_annotate_table() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let args = annotate_args(dir.path(), OutputFormat::Table)?;
        annotate(&args)?;

        let output = std::fs::read_to_string(dir.path().join("rows.out"))?;
        let lines: Vec<&str> = output.lines().collect();

        check!(lines[0] == ">hairpin Secondary Structure: Un-used (9 positions)");
        check!(lines[1].starts_with('#'));
        check!(lines[4] == "0                    0.00  (((...)))");
        check!(output.contains(">open Secondary Structure: Un-used (4 positions)"));
        Ok(())
    }

    #[test]
    fn test_annotate_refuses_overwrite() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let args = annotate_args(dir.path(), OutputFormat::Json)?;
        annotate(&args)?;

        let_assert!(Err(_) = annotate(&args));
        Ok(())
    }
}
