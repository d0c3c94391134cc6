/// Cosine similarity: dot product over the product of Euclidean norms.
///
/// Returns 0.0 when either vector has zero norm, never NaN. Both vectors must
/// have the same length; the ranker checks this before calling.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must share dimensionality");

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identical_vectors() {
        let v = [0.3, -1.2, 4.5, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < EPS);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < EPS);
    }

    #[test]
    fn test_opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_symmetric() {
        let a = [0.2, 0.7, -0.1];
        let b = [0.9, -0.3, 0.4];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < EPS);
    }

    #[test]
    fn test_scale_invariant() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 4.0, 6.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_is_zero_not_nan() {
        let zero = [0.0, 0.0, 0.0];
        let v = [1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }
}
