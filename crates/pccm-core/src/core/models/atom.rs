use nalgebra::Point3;

/// Represents one atom of a parsed geometry record.
///
/// An atom carries only what descriptor generation needs: the element label used
/// for table lookups and its Cartesian position. Partial charges are kept apart,
/// aligned by index, because they come from a different collaborator than the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "H", "C", "N").
    pub label: String,
    /// The 3D coordinates of the atom.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from its element label and position.
    ///
    /// # Arguments
    ///
    /// * `label` - The element symbol of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(label: &str, position: Point3<f64>) -> Self {
        Self {
            label: label.to_string(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_stores_label_and_position() {
        let atom = Atom::new("C", Point3::new(0.5, -1.0, 2.0));
        assert_eq!(atom.label, "C");
        assert_eq!(atom.position, Point3::new(0.5, -1.0, 2.0));
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("N", Point3::origin());
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
        assert_ne!(atom1, Atom::new("H", Point3::origin()));
    }
}
