// File: crates/chart-core/src/grid.rs
// Summary: Tick and label layout helpers for the chart frame.

use crate::scale::Domain;

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// `intervals + 1` evenly spaced tick values from `domain.min` to `domain.max`.
pub fn value_ticks(domain: Domain, intervals: usize) -> Vec<f64> {
    linspace(domain.min, domain.max, intervals.max(1) + 1)
}

/// Tick label text: one decimal place.
pub fn format_tick(value: f64) -> String {
    let s = format!("{value:.1}");
    if s == "-0.0" { "0.0".to_string() } else { s }
}

/// Keep every n-th category label so at most about `max_labels` are drawn.
pub fn label_stride(count: usize, max_labels: usize) -> usize {
    if count <= max_labels || max_labels == 0 {
        1
    } else {
        count.div_ceil(max_labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_cover_domain() {
        let t = value_ticks(Domain { min: 0.0, max: 21.5 }, 5);
        assert_eq!(t.len(), 6);
        assert_eq!(t[0], 0.0);
        assert!((t[5] - 21.5).abs() < 1e-12);
        assert_eq!(format_tick(t[1]), "4.3");
    }

    #[test]
    fn negative_zero_is_not_printed() {
        assert_eq!(format_tick(-0.04), "0.0");
    }

    #[test]
    fn stride_thins_long_axes() {
        assert_eq!(label_stride(8, 10), 1);
        assert_eq!(label_stride(10, 10), 1);
        assert_eq!(label_stride(11, 10), 2);
        assert_eq!(label_stride(35, 10), 4);
    }
}
