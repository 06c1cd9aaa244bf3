use nalgebra::Point3;

/// Euclidean distance between two positions.
#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean_norm_of_difference() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(distance(&b, &a), 5.0);
    }

    #[test]
    fn coincident_points_have_zero_distance() {
        let p = Point3::new(1.5, -2.0, 0.25);
        assert_eq!(distance(&p, &p), 0.0);
    }
}
