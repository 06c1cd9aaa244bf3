use super::error::CsvIoError;
use crate::core::models::error::ShapeError;
use nalgebra::{DMatrix, DVector};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes descriptor rows with their labels as `f0,...,f{k-1},label`.
pub fn write_descriptors(
    writer: impl Write,
    descriptors: &DMatrix<f64>,
    labels: &DVector<f64>,
) -> Result<(), CsvIoError> {
    if descriptors.nrows() != labels.len() {
        return Err(ShapeError::LabelCount {
            expected: descriptors.nrows(),
            found: labels.len(),
        }
        .into());
    }

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = (0..descriptors.ncols()).map(|j| format!("f{}", j)).collect();
    header.push("label".to_string());
    csv_writer.write_record(&header)?;

    for (row, label) in descriptors.row_iter().zip(labels.iter()) {
        let record = row
            .iter()
            .chain(std::iter::once(label))
            .map(|v| v.to_string());
        csv_writer.write_record(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_descriptors_to_path<P: AsRef<Path>>(
    path: P,
    descriptors: &DMatrix<f64>,
    labels: &DVector<f64>,
) -> Result<(), CsvIoError> {
    let file = File::create(path)?;
    write_descriptors(BufWriter::new(file), descriptors, labels)
}
