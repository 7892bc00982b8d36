//! Index bisection over the sorted timestamp sequence.
//!
//! All searches assume the slice is sorted ascending; the dataset validates
//! this invariant once on ingestion so the hot paths can stay branch-light.

/// Leftmost insertion point for `query` that keeps `values` sorted.
#[must_use]
pub fn bisect_left(values: &[i64], query: i64) -> usize {
    values.partition_point(|&value| value < query)
}

/// Rightmost insertion point for `query` that keeps `values` sorted.
#[must_use]
pub fn bisect_right(values: &[i64], query: i64) -> usize {
    values.partition_point(|&value| value <= query)
}

/// Nearest-neighbor search: returns the index whose value minimizes
/// `|values[i] - query|`. On an exact distance tie the lower index wins.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn bisect_center(values: &[i64], query: i64) -> Option<usize> {
    if values.is_empty() {
        return None;
    }

    let insertion = bisect_left(values, query);
    if insertion == 0 {
        return Some(0);
    }
    if insertion >= values.len() {
        return Some(values.len() - 1);
    }

    let left = insertion - 1;
    let left_distance = (query - values[left]).unsigned_abs();
    let right_distance = (values[insertion] - query).unsigned_abs();
    if left_distance <= right_distance {
        Some(left)
    } else {
        Some(insertion)
    }
}

/// Nearest-neighbor search against a fractional query, used when inverting
/// pointer pixels to timestamps. Ties resolve to the lower index.
#[must_use]
pub fn bisect_center_f64(values: &[i64], query: f64) -> Option<usize> {
    if values.is_empty() || !query.is_finite() {
        return None;
    }

    let insertion = values.partition_point(|&value| (value as f64) < query);
    if insertion == 0 {
        return Some(0);
    }
    if insertion >= values.len() {
        return Some(values.len() - 1);
    }

    let left = insertion - 1;
    let left_distance = query - values[left] as f64;
    let right_distance = values[insertion] as f64 - query;
    if left_distance <= right_distance {
        Some(left)
    } else {
        Some(insertion)
    }
}

#[cfg(test)]
mod tests {
    use super::{bisect_center, bisect_center_f64, bisect_left, bisect_right};

    #[test]
    fn left_and_right_bracket_duplicates() {
        let values = [10, -20, 30, 30, 30, 40].map(i64::from);
        let sorted = {
            let mut v = values.to_vec();
            v.sort_unstable();
            v
        };
        assert_eq!(bisect_left(&sorted, 30), 2);
        assert_eq!(bisect_right(&sorted, 30), 5);
        assert_eq!(bisect_left(&sorted, 100), sorted.len());
        assert_eq!(bisect_right(&sorted, -100), 0);
    }

    #[test]
    fn center_picks_nearest_value() {
        let values: Vec<i64> = vec![0, 60_000, 120_000, 180_000];
        assert_eq!(bisect_center(&values, 29_999), Some(0));
        assert_eq!(bisect_center(&values, 30_001), Some(1));
        assert_eq!(bisect_center(&values, 150_001), Some(3));
    }

    #[test]
    fn center_tie_prefers_lower_index() {
        let values: Vec<i64> = vec![0, 100];
        assert_eq!(bisect_center(&values, 50), Some(0));
    }

    #[test]
    fn center_clamps_out_of_range_queries() {
        let values: Vec<i64> = vec![10, 20, 30];
        assert_eq!(bisect_center(&values, -1_000), Some(0));
        assert_eq!(bisect_center(&values, 1_000), Some(2));
    }

    #[test]
    fn center_on_empty_slice_is_none() {
        assert_eq!(bisect_center(&[], 5), None);
        assert_eq!(bisect_center_f64(&[], 5.0), None);
    }

    #[test]
    fn fractional_query_resolves_nearest() {
        let values: Vec<i64> = vec![0, 60_000, 120_000];
        assert_eq!(bisect_center_f64(&values, 29_999.5), Some(0));
        assert_eq!(bisect_center_f64(&values, 30_000.5), Some(1));
        assert_eq!(bisect_center_f64(&values, 30_000.0), Some(0));
        assert_eq!(bisect_center_f64(&values, f64::NAN), None);
    }
}
