use itertools::multizip;

/// Computes the Euclidean distance between `a` and `b`.
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Moves `weights` a `rate` fraction of the way toward `target`, in place.
#[inline]
pub fn move_toward(weights: &mut [f64], target: &[f64], rate: f64) {
    assert_eq!(weights.len(), target.len());
    for (w, s) in multizip((weights.iter_mut(), target.iter())) {
        *w += rate * (s - *w);
    }
}
