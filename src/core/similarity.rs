/// Positional similarity of two answer sequences (0.0 to 1.0)
///
/// Counts positions where both sequences hold the same token, up to the
/// shorter length, and divides by the longer length. Either side empty
/// yields 0.
#[inline]
pub fn trait_match<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let equal = a.iter().zip(b).filter(|(x, y)| x == y).count();

    equal as f64 / a.len().max(b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sides_score_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(trait_match(&empty, &["a"]), 0.0);
        assert_eq!(trait_match(&["a"], &empty), 0.0);
        assert_eq!(trait_match(&empty, &empty), 0.0);
    }

    #[test]
    fn test_half_match() {
        assert_eq!(trait_match(&["a", "b"], &["a", "c"]), 0.5);
    }

    #[test]
    fn test_length_mismatch_divides_by_longer() {
        let score = trait_match(&["a"], &["a", "b", "c"]);
        assert!((score - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_order_matters() {
        assert_eq!(trait_match(&["a", "b"], &["b", "a"]), 0.0);
    }
}
