use super::atom::Atom;
use super::error::ShapeError;
use nalgebra::Point3;

/// One field of a flat geometry record `[label, x, y, z, label, x, y, z, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatField {
    Label(String),
    Value(f64),
}

impl From<&str> for FlatField {
    fn from(label: &str) -> Self {
        FlatField::Label(label.to_string())
    }
}

impl From<f64> for FlatField {
    fn from(value: f64) -> Self {
        FlatField::Value(value)
    }
}

/// An ordered sequence of atoms making up one geometry record.
///
/// Atom order is significant: partial charges and the rows/columns of the
/// interaction matrix are aligned to it by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    atoms: Vec<Atom>,
}

impl Sample {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Builds a sample from a flat record of alternating labels and coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::FlatLength`] if the record length is not a multiple of four,
    /// and [`ShapeError::FlatField`] if a label appears where a coordinate is expected
    /// or vice versa.
    pub fn from_flat(fields: &[FlatField]) -> Result<Self, ShapeError> {
        if fields.len() % 4 != 0 {
            return Err(ShapeError::FlatLength(fields.len()));
        }

        let coordinate = |index: usize| match &fields[index] {
            FlatField::Value(v) => Ok(*v),
            FlatField::Label(_) => Err(ShapeError::FlatField {
                index,
                expected: "coordinate",
            }),
        };

        let atoms = fields
            .chunks_exact(4)
            .enumerate()
            .map(|(atom, chunk)| {
                let base = atom * 4;
                let label = match &chunk[0] {
                    FlatField::Label(label) => label.as_str(),
                    FlatField::Value(_) => {
                        return Err(ShapeError::FlatField {
                            index: base,
                            expected: "label",
                        });
                    }
                };
                let position = Point3::new(
                    coordinate(base + 1)?,
                    coordinate(base + 2)?,
                    coordinate(base + 3)?,
                );
                Ok(Atom::new(label, position))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { atoms })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|a| a.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_dihydrogen() -> Vec<FlatField> {
        vec![
            "H".into(),
            0.0.into(),
            0.0.into(),
            0.0.into(),
            "H".into(),
            1.0.into(),
            0.0.into(),
            0.0.into(),
        ]
    }

    #[test]
    fn from_flat_parses_alternating_labels_and_coordinates() {
        let sample = Sample::from_flat(&flat_dihydrogen()).unwrap();
        assert_eq!(sample.n_atoms(), 2);
        assert_eq!(sample.labels().collect::<Vec<_>>(), vec!["H", "H"]);
        assert_eq!(sample.atoms()[1].position, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn from_flat_rejects_truncated_record() {
        let mut fields = flat_dihydrogen();
        fields.pop();
        assert_eq!(Sample::from_flat(&fields), Err(ShapeError::FlatLength(7)));
    }

    #[test]
    fn from_flat_rejects_coordinate_in_label_slot() {
        let mut fields = flat_dihydrogen();
        fields[4] = FlatField::Value(3.0);
        assert_eq!(
            Sample::from_flat(&fields),
            Err(ShapeError::FlatField {
                index: 4,
                expected: "label"
            })
        );
    }

    #[test]
    fn from_flat_rejects_label_in_coordinate_slot() {
        let mut fields = flat_dihydrogen();
        fields[2] = "C".into();
        assert_eq!(
            Sample::from_flat(&fields),
            Err(ShapeError::FlatField {
                index: 2,
                expected: "coordinate"
            })
        );
    }

    #[test]
    fn empty_record_yields_empty_sample() {
        let sample = Sample::from_flat(&[]).unwrap();
        assert!(sample.is_empty());
        assert_eq!(sample.n_atoms(), 0);
    }
}
