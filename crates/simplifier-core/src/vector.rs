//! Numeric kernels over equal-length `f64` slices.
//!
//! Callers guarantee equal lengths. A shorter second operand panics on the
//! out-of-range index, a longer one is silently truncated to the first.

/// Sum of pairwise products.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..a.len() {
        sum += a[i] * b[i];
    }
    sum
}

/// Euclidean norm: √(a·a).
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Sum of squared differences. Ranks identically to [`dist`] without the sqrt.
pub fn sq_dist(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..a.len() {
        let d = a[i] - b[i];
        sum += d * d;
    }
    sum
}

/// Euclidean distance.
pub fn dist(a: &[f64], b: &[f64]) -> f64 {
    sq_dist(a, b).sqrt()
}

/// Cosine similarity: (a·b) / (‖a‖·‖b‖). Range: [-1, +1].
///
/// Returns NaN when either vector is all-zero. The selector ranks NaN as
/// least similar, so a zero vector never wins a replacement slot.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let mut ab = 0.0;
    let mut aa = 0.0;
    let mut bb = 0.0;
    for i in 0..a.len() {
        ab += a[i] * b[i];
        aa += a[i] * a[i];
        bb += b[i] * b[i];
    }
    ab / (aa.sqrt() * bb.sqrt())
}
