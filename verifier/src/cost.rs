use crate::instance::Position;

/// Euclidean distance rounded half up to the nearest integer
pub fn rounded_distance(a: &Position, b: &Position) -> i64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (f64::sqrt(dx * dx + dy * dy) + 0.5).floor() as i64
}

/// Compares two costs at cent precision.
///
/// Both values are formatted with two fractional digits and the resulting
/// strings are compared, which absorbs the error accumulated by summing many
/// small holding costs.
pub fn approx_equal(expected: f64, actual: f64) -> bool {
    format!("{:.2}", expected) == format!("{:.2}", actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rounded_distance {
        use super::*;

        #[test]
        fn is_exact_for_pythagorean_triple() {
            let a = Position::new(0.0, 0.0);
            let b = Position::new(3.0, 4.0);
            assert_eq!(rounded_distance(&a, &b), 5);
        }

        #[test]
        fn rounds_down_below_half() {
            let a = Position::new(0.0, 0.0);
            let b = Position::new(4.49, 0.0);
            assert_eq!(rounded_distance(&a, &b), 4);
        }

        #[test]
        fn rounds_half_up() {
            let a = Position::new(0.0, 0.0);
            assert_eq!(rounded_distance(&a, &Position::new(4.5, 0.0)), 5);
            assert_eq!(rounded_distance(&a, &Position::new(2.5, 0.0)), 3);
        }

        #[test]
        fn is_zero_for_same_position() {
            let a = Position::new(-7.25, 3.0);
            assert_eq!(rounded_distance(&a, &a), 0);
        }
    }

    mod approx_equal {
        use super::*;

        #[test]
        fn differs_when_cents_differ() {
            assert!(!approx_equal(10.005, 10.004));
        }

        #[test]
        fn matches_when_cents_agree() {
            assert!(approx_equal(10.004, 10.0044));
            assert!(approx_equal(138.0, 137.99999999999997));
        }

        #[test]
        fn differs_by_one_cent() {
            assert!(!approx_equal(8.0, 8.01));
        }
    }
}
