use super::error::{CsvIoError, parse_float, record_line};
use crate::core::models::sample::{FlatField, Sample};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// How many energy columns trail each geometry record, and how they become a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyColumns {
    /// No energies; labels are supplied separately.
    None,
    /// One energy column, used as the label directly.
    Single,
    /// Two energies at different levels of theory; the label is `first - second`.
    #[default]
    Difference,
}

impl EnergyColumns {
    pub fn count(self) -> usize {
        match self {
            EnergyColumns::None => 0,
            EnergyColumns::Single => 1,
            EnergyColumns::Difference => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryCsvOptions {
    pub has_header: bool,
    pub index_column: bool,
    pub energy_columns: EnergyColumns,
}

impl Default for GeometryCsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            index_column: true,
            energy_columns: EnergyColumns::Difference,
        }
    }
}

/// Samples read from a geometry file, with labels when the file carries energies.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryTable {
    pub samples: Vec<Sample>,
    pub labels: Option<Vec<f64>>,
}

/// Reads geometry records of the form `[index,]label,x,y,z,...[,e1[,e2]]`.
///
/// # Errors
///
/// Returns [`CsvIoError::Parse`] naming the line of the first malformed record.
pub fn read_geometries(
    reader: impl Read,
    options: GeometryCsvOptions,
) -> Result<GeometryTable, CsvIoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let skip_front = usize::from(options.index_column);
    let n_energies = options.energy_columns.count();

    let mut samples = Vec::new();
    let mut labels = Vec::new();

    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = record_line(&record, row);
        let fields: Vec<&str> = record.iter().collect();

        if fields.len() < skip_front + n_energies {
            return Err(CsvIoError::parse(
                line,
                format!(
                    "expected at least {} fields, found {}",
                    skip_front + n_energies,
                    fields.len()
                ),
            ));
        }
        let geometry_end = fields.len() - n_energies;
        let geometry = &fields[skip_front..geometry_end];

        let flat = geometry
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if i % 4 == 0 {
                    Ok(FlatField::Label(field.to_string()))
                } else {
                    parse_float(field, line, skip_front + i).map(FlatField::Value)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let sample = Sample::from_flat(&flat).map_err(|e| CsvIoError::parse(line, e.to_string()))?;
        samples.push(sample);

        let energies = fields[geometry_end..]
            .iter()
            .enumerate()
            .map(|(i, field)| parse_float(field, line, geometry_end + i))
            .collect::<Result<Vec<_>, _>>()?;
        match options.energy_columns {
            EnergyColumns::None => {}
            EnergyColumns::Single => labels.push(energies[0]),
            EnergyColumns::Difference => labels.push(energies[0] - energies[1]),
        }
    }

    debug!(samples = samples.len(), "Read geometry records.");

    Ok(GeometryTable {
        samples,
        labels: (options.energy_columns != EnergyColumns::None).then_some(labels),
    })
}

pub fn read_geometries_from_path<P: AsRef<Path>>(
    path: P,
    options: GeometryCsvOptions,
) -> Result<GeometryTable, CsvIoError> {
    let file = File::open(path)?;
    read_geometries(BufReader::new(file), options)
}

/// Reads a single-column label file.
pub fn read_labels(reader: impl Read, has_header: bool) -> Result<Vec<f64>, CsvIoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .records()
        .enumerate()
        .map(|(row, result)| {
            let record = result?;
            let line = record_line(&record, row);
            if record.len() != 1 {
                return Err(CsvIoError::parse(
                    line,
                    format!("expected a single label, found {} fields", record.len()),
                ));
            }
            parse_float(&record[0], line, 0)
        })
        .collect()
}

pub fn read_labels_from_path<P: AsRef<Path>>(
    path: P,
    has_header: bool,
) -> Result<Vec<f64>, CsvIoError> {
    let file = File::open(path)?;
    read_labels(BufReader::new(file), has_header)
}
