//! Similarity kernels over `f32` slices.
//!
//! Stored corpus vectors come from the embedder already L2-normalized, so the
//! dense index ranks by plain dot product.

/// Dot product of equal-length slices. Extra elements of the longer slice are ignored.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    let mut chunks_a = a.chunks_exact(4);
    let mut chunks_b = b.chunks_exact(4);
    let mut acc = [0.0f32; 4];
    for (ca, cb) in (&mut chunks_a).zip(&mut chunks_b) {
        for i in 0..4 { acc[i] += ca[i] * cb[i]; }
    }
    let tail: f32 = chunks_a.remainder().iter().zip(chunks_b.remainder()).map(|(x, y)| x * y).sum();
    acc.iter().sum::<f32>() + tail
}

pub fn l2_norm(a: &[f32]) -> f32 { dot_product(a, a).sqrt() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_matches_naive() {
        let a: Vec<f32> = (0..11).map(|i| i as f32 * 0.5).collect();
        let b: Vec<f32> = (0..11).map(|i| 1.0 - i as f32 * 0.1).collect();
        let naive: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert!((dot_product(&a, &b) - naive).abs() < 1e-4);
    }

    #[test]
    fn dot_of_opposites_is_negative() {
        assert!(dot_product(&[1.0, 0.0], &[-1.0, 0.0]) < 0.0);
        assert_eq!(dot_product(&[], &[]), 0.0);
    }

    #[test]
    fn norm_of_unit() {
        assert!((l2_norm(&[0.6, 0.8]) - 1.0).abs() < 1e-6);
    }
}
