//! Column-wise min-max feature scaling.

/// Rescale every column to [0, 1] using the min/max observed in `data`
/// itself. A degenerate column (max == min) divides by 1 instead of 0 and so
/// maps entirely to 0.
///
/// Callers normalize train and test splits separately, each by its own
/// statistics. That asymmetry (versus reusing train statistics for the test
/// split) is intentional and pinned by tests.
pub fn min_max_normalize(data: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let Some(first) = data.first() else {
        return Vec::new();
    };
    let num_features = first.len();
    let mut mins = vec![f64::INFINITY; num_features];
    let mut maxs = vec![f64::NEG_INFINITY; num_features];
    for row in data {
        for (j, &v) in row.iter().enumerate() {
            if v < mins[j] {
                mins[j] = v;
            }
            if v > maxs[j] {
                maxs[j] = v;
            }
        }
    }
    data.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &v)| {
                    let range = maxs[j] - mins[j];
                    (v - mins[j]) / if range == 0.0 { 1.0 } else { range }
                })
                .collect()
        })
        .collect()
}
