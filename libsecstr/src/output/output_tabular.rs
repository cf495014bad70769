use crate::annotation::AnnotationRecord;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Position,
    Label,
    Description,
    StructureSymbol,
    Score,
}

impl Field {
    /// Pulls the display value of this field out of the record at `position`.
    pub fn extract_from(&self, position: usize, record: &AnnotationRecord) -> String {
        match self {
            Field::Position => position.to_string(),
            Field::Label => record.label.clone(),
            Field::Description => record.description.clone(),
            Field::StructureSymbol => record.secondary_structure.to_string(),
            Field::Score => format!("{:.2}", record.score),
        }
    }
}

pub const DEFAULT_FIELDS: [Field; 5] = [
    Field::Position,
    Field::StructureSymbol,
    Field::Score,
    Field::Label,
    Field::Description,
];

#[derive(Debug, Clone)]
pub struct TableFormat {
    pub fields: Vec<Field>,
    pub labels: Vec<Vec<String>>,
    pub min_widths: Vec<usize>,
    pub widths: Vec<usize>,
}

impl TableFormat {
    pub fn new(fields: &[Field]) -> anyhow::Result<Self> {
        let mut labels = vec![];
        let mut min_widths = vec![];
        let mut widths = vec![];

        // this regex matches CamelCaseWords
        let label_regex =
            regex::Regex::new(r"[A-Z][a-z]*").context("failed to build field label regex")?;

        // this closure extracts the words & minimum column width for a field
        let label_fn = |field: &Field| -> anyhow::Result<(Vec<_>, usize), anyhow::Error> {
            // the Debug string for an enum produces the variant name
            let field_name = format!("{:?}", field);

            // grab each word and its length in the variant name
            let (label_words, lengths): (Vec<_>, Vec<_>) = label_regex
                .find_iter(&field_name)
                .map(|m| (m.as_str().to_string().to_lowercase(), m.len()))
                .unzip();

            // the length of the longest word
            // is the min width of the column
            let min_width = *lengths
                .iter()
                .max()
                .context("failed to produce max field label width")?;
            Ok((label_words, min_width))
        };

        let first = fields.first().context("a table needs at least one field")?;

        // we need to process the first field differently
        // because it needs to have at least +2 to
        // its minimum width to accomodate the "# " prefix
        let (mut label_words, mut min_width) = label_fn(first)?;
        labels.push(label_words);
        widths.push(min_width + 2);
        min_widths.push(min_width + 2);

        for field in fields.iter().skip(1) {
            (label_words, min_width) = label_fn(field)?;
            labels.push(label_words);
            widths.push(min_width);
            min_widths.push(min_width);
        }

        Ok(Self {
            fields: fields.to_vec(),
            labels,
            min_widths,
            widths,
        })
    }

    /// Grows the column widths to fit every record of a row.
    pub fn update_widths(&mut self, records: &[AnnotationRecord]) {
        records.iter().enumerate().for_each(|(position, record)| {
            self.fields.iter().enumerate().for_each(|(idx, field)| {
                let width = field.extract_from(position, record).chars().count();
                self.widths[idx] = self.widths[idx].max(width);
            });
        });
    }

    pub fn reset_widths(&mut self) {
        self.widths
            .iter_mut()
            .zip(self.min_widths.iter())
            .for_each(|(width, min_width)| *width = *min_width);
    }

    pub fn header(&self) -> anyhow::Result<String> {
        // the number of rows in the header is
        // the max number of words in a field
        let num_rows = self
            // each entry in labels is
            // a vector of label words
            .labels
            .iter()
            .map(|l| l.len())
            .max()
            .context("field headers are empty")?;

        let mut header_row_strings: Vec<String> = vec!["# ".to_string(); num_rows + 1];

        // this function appends the field labels to the header
        let header_append_fn =
            |words: &Vec<String>, width: usize, header_row_strings: &mut Vec<String>| {
                let offset = num_rows - words.len();
                let mut words_padded = vec![""; offset];
                words.iter().for_each(|w| words_padded.push(w));

                words_padded.iter().enumerate().for_each(|(row, token)| {
                    let row_string = &mut header_row_strings[row];
                    *row_string = format!("{row_string}{:width$} ", token, width = width);
                });
                if let Some(last_row_string) = header_row_strings.last_mut() {
                    *last_row_string = format!("{last_row_string}{} ", "-".repeat(width));
                }
            };

        // the first column gets -2 to it's width to account for the "# "
        header_append_fn(&self.labels[0], self.widths[0] - 2, &mut header_row_strings);

        self.labels
            .iter()
            // skip the first column
            .skip(1)
            .zip(self.widths.iter().skip(1))
            .for_each(|(words, &width)| {
                header_append_fn(words, width, &mut header_row_strings);
            });

        // drop the trailing column separator
        header_row_strings
            .iter_mut()
            .for_each(|row| *row = row.trim_end().to_string());

        Ok(header_row_strings.join("\n"))
    }

    pub fn row_string(&self, position: usize, record: &AnnotationRecord) -> String {
        let mut row_string = String::new();

        self.fields
            .iter()
            .zip(self.widths.iter())
            .for_each(|(field, width)| {
                let val = field.extract_from(position, record);
                row_string = format!("{row_string}{val:width$} ", width = width)
            });

        row_string.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_labels_and_widths() -> anyhow::Result<()> {
        let format = TableFormat::new(&DEFAULT_FIELDS)?;
        check!(format.labels[0] == vec!["position".to_string()]);
        check!(format.labels[1] == vec!["structure".to_string(), "symbol".to_string()]);
        check!(format.widths == vec![10, 9, 5, 5, 11]);
        check!(format.widths == format.min_widths);
        Ok(())
    }

    #[test]
    fn test_empty_fields() {
        let_assert!(Err(_) = TableFormat::new(&[]));
    }

    #[test]
    fn test_header() -> anyhow::Result<()> {
        let format = TableFormat::new(&[Field::Position, Field::StructureSymbol])?;
        let header = format.header()?;
        let lines: Vec<&str> = header.lines().collect();
        check!(lines.len() == 3);
        check!(lines[0] == "#          structure");
        check!(lines[1] == "# position symbol");
        check!(lines[2] == "# -------- ---------");
        Ok(())
    }

    #[test]
    fn test_update_and_reset_widths() -> anyhow::Result<()> {
        let mut format = TableFormat::new(&[Field::Score, Field::Label])?;
        let records = vec![
            AnnotationRecord::placeholder("((((....))))"),
            AnnotationRecord::new("(", "", '(', 12345.0),
        ];

        format.update_widths(&records);
        check!(format.widths == vec![8, 12]);
        check!(format.row_string(1, &records[1]) == "12345.00 (");

        format.reset_widths();
        check!(format.widths == vec![7, 5]);
        Ok(())
    }
}
