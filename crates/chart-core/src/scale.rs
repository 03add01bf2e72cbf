// File: crates/chart-core/src/scale.rs
// Summary: Value-axis domain resolution with headroom, and pie totals.

use crate::config::{ChartKind, Series};

/// Fallback domain when there is nothing to scale.
pub const DEFAULT_DOMAIN: Domain = Domain { min: 0.0, max: 10.0 };

/// Span used when every value is zero.
const FALLBACK_SPAN: f64 = 10.0;
/// Fraction of the data range added above (and, when floating, below) the data.
const HEADROOM: f64 = 0.1;

/// Numeric range mapped onto the value axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a baseline value (usually zero) into the domain.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Min/max over the `y` component of every value in every series.
pub fn value_extent(series: &[Series]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for s in series {
        for v in &s.values {
            let y = v.y();
            if y.is_finite() {
                lo = lo.min(y);
                hi = hi.max(y);
            }
        }
    }
    if lo.is_finite() && hi.is_finite() { Some((lo, hi)) } else { None }
}

/// Resolve the vertical domain for bar/line/scatter charts.
///
/// - Non-negative bar data starts at zero; line/scatter data (and any data dipping below
///   zero) floats with 10% headroom below the minimum.
/// - The top always gets 10% headroom.
/// - A flat series uses `|max|` as its range, or 10 when everything is zero.
pub fn resolve_domain(kind: ChartKind, series: &[Series]) -> Domain {
    let Some((lo, hi)) = value_extent(series) else {
        return DEFAULT_DOMAIN;
    };

    let mut range = hi - lo;
    if range == 0.0 {
        range = if hi != 0.0 { hi.abs() } else { FALLBACK_SPAN };
    }

    let floating = matches!(kind, ChartKind::Line | ChartKind::Scatter) || lo < 0.0;
    let min = if floating { lo - range * HEADROOM } else { 0.0 };
    let max = hi + range * HEADROOM;
    Domain { min, max }
}

/// Weight of one pie value; negative and non-finite values count as zero.
pub fn pie_weight(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Sum of the first series' slice weights. Radial charts have no vertical domain.
pub fn pie_total(series: &[Series]) -> f64 {
    series.first().map(|s| s.values.iter().map(|v| pie_weight(v.y())).sum()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(values: &[f64]) -> Vec<Series> {
        vec![Series::from_numbers(values)]
    }

    #[test]
    fn bar_starts_at_zero() {
        let d = resolve_domain(ChartKind::Bar, &series(&[10.0, 20.0, 5.0]));
        assert_eq!(d.min, 0.0);
        assert_relative_eq!(d.max, 21.5);
    }

    #[test]
    fn line_floats_below_min() {
        let d = resolve_domain(ChartKind::Line, &series(&[0.0, 10.0, 0.0, 10.0]));
        assert_relative_eq!(d.min, -1.0);
        assert_relative_eq!(d.max, 11.0);
    }

    #[test]
    fn negative_bar_data_floats() {
        let d = resolve_domain(ChartKind::Bar, &series(&[-5.0, 5.0]));
        assert_relative_eq!(d.min, -6.0);
        assert_relative_eq!(d.max, 6.0);
    }

    #[test]
    fn flat_series_uses_value_as_range() {
        let d = resolve_domain(ChartKind::Line, &series(&[4.0, 4.0]));
        assert_relative_eq!(d.min, 3.6);
        assert_relative_eq!(d.max, 4.4);

        let d = resolve_domain(ChartKind::Line, &series(&[-4.0, -4.0]));
        assert!(d.max > d.min);
    }

    #[test]
    fn all_zero_uses_fallback_span() {
        let d = resolve_domain(ChartKind::Bar, &series(&[0.0, 0.0]));
        assert_eq!(d.min, 0.0);
        assert_relative_eq!(d.max, 1.0);
    }

    #[test]
    fn empty_series_falls_back() {
        assert_eq!(resolve_domain(ChartKind::Bar, &series(&[])), DEFAULT_DOMAIN);
        assert_eq!(resolve_domain(ChartKind::Line, &[]), DEFAULT_DOMAIN);
    }

    #[test]
    fn pie_total_ignores_negatives_and_extra_series() {
        let mut s = series(&[1.0, -3.0, f64::NAN, 2.0]);
        s.push(Series::from_numbers(&[100.0]));
        assert_eq!(pie_total(&s), 3.0);
        assert_eq!(pie_total(&[]), 0.0);
    }
}
