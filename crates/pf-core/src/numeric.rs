/// Floating point type used throughout the workspace.
pub type Real = f64;

/// Series (harmonic) combination of conductances: `(sum 1/g)^-1`.
///
/// An infinite conductance adds no resistance, a zero conductance blocks the
/// path entirely and yields zero.
pub fn series<I>(conductances: I) -> Real
where
    I: IntoIterator<Item = Real>,
{
    let resistance: Real = conductances.into_iter().map(|g| 1.0 / g).sum();
    1.0 / resistance
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<Real>
where
    I: IntoIterator<Item = Real>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as Real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_of_equal_resistors() {
        assert!((series([2.0, 2.0]) - 1.0).abs() < 1e-15);
        assert!((series([3.0, 3.0, 3.0]) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn series_handles_degenerate_segments() {
        assert_eq!(series([Real::INFINITY, 4.0, Real::INFINITY]), 4.0);
        assert_eq!(series([0.0, 4.0, 1.0]), 0.0);
        assert_eq!(series([Real::INFINITY; 3]), Real::INFINITY);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
    }
}
