use crate::analysis::signature::Signature;

/// Euclidean distance between two signatures
///
/// Both histograms are treated as flat vectors of `HISTOGRAM_BINS³` cells.
/// The result is zero exactly when the signatures are identical.
pub fn distance(a: &Signature, b: &Signature) -> f64 {
    a.histogram()
        .iter()
        .zip(b.histogram().iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Index of the signature closest to `target`
///
/// Scans the whole catalog linearly. On exact ties the first index wins, so
/// repeated runs pick the same tile. Returns `None` for an empty catalog.
pub fn nearest_tile(signatures: &[Signature], target: &Signature) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in signatures.iter().enumerate() {
        let candidate_distance = distance(candidate, target);
        match best {
            Some((_, best_distance)) if candidate_distance >= best_distance => {}
            _ => best = Some((index, candidate_distance)),
        }
    }

    best.map(|(index, _)| index)
}
