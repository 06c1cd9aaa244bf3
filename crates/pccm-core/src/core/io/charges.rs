use super::error::{CsvIoError, parse_float, record_line};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads one partial-charge vector per line.
///
/// Every line must carry the same number of charges as the first one.
pub fn read_charges(reader: impl Read, has_header: bool) -> Result<Vec<Vec<f64>>, CsvIoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = record_line(&record, row);
        let charges = record
            .iter()
            .enumerate()
            .map(|(column, field)| parse_float(field, line, column))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = rows.first() {
            if first.len() != charges.len() {
                return Err(CsvIoError::parse(
                    line,
                    format!(
                        "expected {} charges (as on the first line), found {}",
                        first.len(),
                        charges.len()
                    ),
                ));
            }
        }
        rows.push(charges);
    }
    Ok(rows)
}

pub fn read_charges_from_path<P: AsRef<Path>>(
    path: P,
    has_header: bool,
) -> Result<Vec<Vec<f64>>, CsvIoError> {
    let file = File::open(path)?;
    read_charges(BufReader::new(file), has_header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_charge_rows() {
        let input = "0.12,-0.12,0.0\n0.2,-0.1,-0.1\n";
        let rows = read_charges(input.as_bytes(), false).unwrap();
        assert_eq!(rows, vec![vec![0.12, -0.12, 0.0], vec![0.2, -0.1, -0.1]]);
    }

    #[test]
    fn header_line_is_skipped_when_requested() {
        let input = "q1,q2\n1.0,-1.0\n";
        let rows = read_charges(input.as_bytes(), true).unwrap();
        assert_eq!(rows, vec![vec![1.0, -1.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let input = "1.0,-1.0\n1.0\n";
        let result = read_charges(input.as_bytes(), false);
        assert!(matches!(result, Err(CsvIoError::Parse { line: 2, .. })));
    }

    #[test]
    fn non_numeric_charge_is_rejected() {
        let result = read_charges("1.0,abc\n".as_bytes(), false);
        assert!(matches!(result, Err(CsvIoError::Parse { line: 1, .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_charges_from_path(dir.path().join("none.csv"), false);
        assert!(matches!(result, Err(CsvIoError::Io(_))));
    }
}
