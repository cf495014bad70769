use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use libsecstr::annotation::AnnotationRow;
use libsecstr::output::output_tabular::{TableFormat, DEFAULT_FIELDS};

use crate::args::{CommonArgs, OutputFormat};
use crate::util::output_writer;

/// A row paired with the name of the structure it was built from.
#[derive(Serialize)]
pub struct NamedRow<'a, R: AnnotationRow + Serialize> {
    pub name: &'a str,
    #[serde(flatten)]
    pub row: &'a R,
}

pub struct OutputStep {
    writer: Box<dyn Write + Send>,
    table_format: TableFormat,
    format: OutputFormat,
}

impl OutputStep {
    pub fn new(args: &CommonArgs, format: OutputFormat) -> anyhow::Result<Self> {
        Ok(Self {
            writer: output_writer(args)?,
            table_format: TableFormat::new(&DEFAULT_FIELDS)?,
            format,
        })
    }

    pub fn write<R: AnnotationRow + Serialize>(
        &mut self,
        rows: &[NamedRow<'_, R>],
    ) -> anyhow::Result<()> {
        log::debug!("writing {} rows as {}", rows.len(), self.format);

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, rows)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Table => {
                for named in rows {
                    self.write_table(named)?;
                }
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    fn write_table<R: AnnotationRow + Serialize>(
        &mut self,
        named: &NamedRow<'_, R>,
    ) -> anyhow::Result<()> {
        let row = named.row;

        self.table_format.reset_widths();
        self.table_format.update_widths(row.records());

        let title = format!(
            ">{} {}: {} ({} positions)",
            named.name,
            row.title(),
            row.description(),
            row.len()
        );
        writeln!(self.writer, "{}", title.bold())?;

        let header = self.table_format.header()?;
        writeln!(self.writer, "{header}")?;

        for (position, record) in row.records().iter().enumerate() {
            writeln!(
                self.writer,
                "{}",
                self.table_format.row_string(position, record)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}
