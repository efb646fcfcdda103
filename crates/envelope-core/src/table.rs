//! Empirical (distance → probability) lookup tables.
//!
//! Tables arrive unsorted from external data and are sorted once at
//! construction. Evaluation between two entries follows an explicit
//! [`InterpolationPolicy`]; the engine uses [`InterpolationPolicy::NeighborMidpoint`],
//! which averages the two bracketing probabilities without distance
//! weighting. [`InterpolationPolicy::Linear`] is available on request.

use serde::{Deserialize, Serialize};

/// How a query falling strictly between two table entries is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationPolicy {
    /// Unweighted mean of the two bracketing values.
    #[default]
    NeighborMidpoint,
    /// Distance-weighted linear interpolation.
    Linear,
}

/// A table of `(x, y)` pairs sorted by `x`.
///
/// Serialized as `[[x, y], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct LookupTable {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LookupTable {
    /// Build a table, sorting by `x`. Entries with equal `x` keep their input order.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut points: Vec<(f64, f64)> = points.into_iter().collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xs, ys) = points.into_iter().unzip();
        Self { xs, ys }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Smallest `x` in the table.
    pub fn first_x(&self) -> Option<f64> {
        self.xs.first().copied()
    }

    /// Iterate over the sorted `(x, y)` entries.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Evaluate at `query` with the engine's default policy.
    pub fn evaluate(&self, query: f64) -> Option<f64> {
        self.evaluate_with(query, InterpolationPolicy::default())
    }

    /// Evaluate at `query`.
    ///
    /// Clamps to the first entry at or below the smallest `x` and to the last
    /// entry at or above the largest `x`. Returns `None` for an empty table
    /// or a NaN query.
    pub fn evaluate_with(&self, query: f64, policy: InterpolationPolicy) -> Option<f64> {
        if self.xs.is_empty() || query.is_nan() {
            return None;
        }

        // Left insertion point: first index whose x is not below the query.
        let pos = self.xs.partition_point(|&x| x < query);

        if pos == 0 {
            return Some(self.ys[0]);
        }
        if pos == self.xs.len() {
            return self.ys.last().copied();
        }
        if self.xs[pos] == query {
            return Some(self.ys[pos]);
        }

        let (x0, y0) = (self.xs[pos - 1], self.ys[pos - 1]);
        let (x1, y1) = (self.xs[pos], self.ys[pos]);
        let value = match policy {
            InterpolationPolicy::NeighborMidpoint => (y0 + y1) / 2.0,
            InterpolationPolicy::Linear => y0 + (y1 - y0) * (query - x0) / (x1 - x0),
        };
        Some(value)
    }

    /// True when every probability in the table lies in `[0, 1]`.
    pub fn is_probability_table(&self) -> bool {
        self.ys.iter().all(|y| (0.0..=1.0).contains(y))
    }
}

impl From<Vec<(f64, f64)>> for LookupTable {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}

impl From<LookupTable> for Vec<(f64, f64)> {
    fn from(table: LookupTable) -> Self {
        table.xs.into_iter().zip(table.ys).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_table() -> LookupTable {
        LookupTable::new([(100.0, 0.9), (200.0, 0.7), (300.0, 0.5)])
    }

    #[test]
    fn test_exact_match_returns_entry() {
        assert_eq!(reference_table().evaluate(200.0), Some(0.7));
    }

    #[test]
    fn test_between_entries_returns_midpoint() {
        let value = reference_table().evaluate(150.0).unwrap();
        assert!((value - 0.8).abs() < 1e-12, "midpoint of 0.9 and 0.7, got {value}");

        // Midpoint policy ignores where the query sits inside the bracket.
        let near_left = reference_table().evaluate(101.0).unwrap();
        assert!((near_left - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_clamps_outside_range() {
        let table = reference_table();
        assert_eq!(table.evaluate(50.0), Some(0.9));
        assert_eq!(table.evaluate(100.0), Some(0.9));
        assert_eq!(table.evaluate(350.0), Some(0.5));
        assert_eq!(table.evaluate(-1.0e9), Some(0.9));
    }

    #[test]
    fn test_empty_table_and_nan_query_have_no_value() {
        assert_eq!(LookupTable::default().evaluate(100.0), None);
        assert_eq!(reference_table().evaluate(f64::NAN), None);
    }

    #[test]
    fn test_first_x_is_smallest_after_sorting() {
        let table = LookupTable::new([(300.0, 0.5), (100.0, 0.9), (200.0, 0.7)]);
        assert_eq!(table.first_x(), Some(100.0));
        assert_eq!(LookupTable::default().first_x(), None);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let table = LookupTable::new([(300.0, 0.5), (100.0, 0.9), (200.0, 0.7)]);
        let xs: Vec<f64> = table.points().map(|(x, _)| x).collect();
        assert_eq!(xs, vec![100.0, 200.0, 300.0]);
        assert_eq!(table.evaluate(150.0), reference_table().evaluate(150.0));
    }

    #[test]
    fn test_duplicate_x_keeps_input_order() {
        let table = LookupTable::new([(200.0, 0.6), (100.0, 0.9), (200.0, 0.4)]);
        let ys: Vec<f64> = table.points().map(|(_, y)| y).collect();
        assert_eq!(ys, vec![0.9, 0.6, 0.4]);
        // Exact match resolves to the first of the duplicates.
        assert_eq!(table.evaluate(200.0), Some(0.6));
    }

    #[test]
    fn test_linear_policy_weights_by_distance() {
        let table = reference_table();
        let value = table
            .evaluate_with(125.0, InterpolationPolicy::Linear)
            .unwrap();
        assert!((value - 0.85).abs() < 1e-12, "got {value}");
        let mid = table
            .evaluate_with(125.0, InterpolationPolicy::NeighborMidpoint)
            .unwrap();
        assert!((mid - 0.8).abs() < 1e-12, "got {mid}");
    }

    #[test]
    fn test_single_entry_table() {
        let table = LookupTable::new([(1000.0, 0.42)]);
        assert_eq!(table.evaluate(10.0), Some(0.42));
        assert_eq!(table.evaluate(1000.0), Some(0.42));
        assert_eq!(table.evaluate(5000.0), Some(0.42));
    }

    #[test]
    fn test_serializes_as_pairs() {
        let json = serde_json::to_string(&reference_table()).unwrap();
        assert_eq!(json, "[[100.0,0.9],[200.0,0.7],[300.0,0.5]]");
        let back: LookupTable = serde_json::from_str("[[300, 0.5], [100, 0.9]]").unwrap();
        assert_eq!(back.evaluate(50.0), Some(0.9));
    }
}
