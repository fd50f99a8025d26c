// NonNan numbers Floating point numbers cannot be sorted because they
// can be Nan.  We introduce a new type of number guaranteed not to be
// an NaN to allow floats to be sorted or the maximum found.

use std::cmp::Ordering;

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct NonNan(f64);

impl NonNan {
    pub fn new(val: f64) -> Option<NonNan> {
        if val.is_nan() {
            None
        } else {
            Some(NonNan(val))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for NonNan {}
impl Ord for NonNan {
    fn cmp(&self, other: &NonNan) -> Ordering {
        // neither side can be NaN so the comparison always succeeds
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for NonNan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Smallest and largest finite-or-infinite values in the data, ignoring NaNs.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let mut lo: Option<NonNan> = None;
    let mut hi: Option<NonNan> = None;

    for v in values.into_iter().filter_map(NonNan::new) {
        lo = Some(lo.map_or(v, |l| l.min(v)));
        hi = Some(hi.map_or(v, |h| h.max(v)));
    }

    match (lo, hi) {
        (Some(lo), Some(hi)) => Some((lo.value(), hi.value())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_rejected() {
        assert!(NonNan::new(f64::NAN).is_none());
        assert!(NonNan::new(1.0).is_some());
    }

    #[test]
    fn extent_skips_nans() {
        let (lo, hi) = extent(vec![3.0, f64::NAN, -2.0, 7.5]).unwrap();
        assert!((lo + 2.0).abs() <= f64::EPSILON);
        assert!((hi - 7.5).abs() <= f64::EPSILON);
    }

    #[test]
    fn extent_of_nothing_is_none() {
        assert!(extent(Vec::new()).is_none());
        assert!(extent(vec![f64::NAN]).is_none());
    }
}
