//! BMI computation, classification and history analysis

use crate::entities::measurement::{BmiCategory, MeasurementRecord, StatsSummary};

use super::units::round_to;

/// Default window size for trend smoothing
pub const DEFAULT_TREND_WINDOW: usize = 3;

/// Compute the body mass index from canonical values, rounded to one
/// decimal place.
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> f64 {
    round_to(weight_kg / (height_m * height_m), 1)
}

/// Classify an already-rounded BMI value.
///
/// Boundary values belong to the higher band: a BMI of exactly 18.5 is
/// Normal and exactly 25.0 is Overweight.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Trailing moving average over a series.
///
/// When the series is shorter than the window (or the window is zero) the
/// series comes back unchanged, each value wrapped in `Some`. Otherwise the
/// first `window - 1` positions are `None` and every later position holds
/// the mean of the `window` values ending there.
pub fn moving_average(series: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || series.len() < window {
        return series.iter().copied().map(Some).collect();
    }

    let mut smoothed = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        if i + 1 < window {
            smoothed.push(None);
        } else {
            let sum: f64 = series[i + 1 - window..=i].iter().sum();
            smoothed.push(Some(sum / window as f64));
        }
    }
    smoothed
}

/// Summary statistics over an ascending measurement history
pub fn summarize(history: &[MeasurementRecord]) -> StatsSummary {
    if history.is_empty() {
        return StatsSummary {
            total: 0,
            avg_bmi: 0.0,
            min_bmi: 0.0,
            max_bmi: 0.0,
            trend: "N/A".to_string(),
        };
    }

    let bmis: Vec<f64> = history.iter().map(|record| record.bmi).collect();
    let total = bmis.len();
    let avg_bmi = round_to(bmis.iter().sum::<f64>() / total as f64, 1);
    let min_bmi = bmis.iter().copied().fold(f64::INFINITY, f64::min);
    let max_bmi = bmis.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    StatsSummary {
        total,
        avg_bmi,
        min_bmi,
        max_bmi,
        trend: trend_description(&bmis),
    }
}

/// Describe the first-to-last BMI change as display text
fn trend_description(bmis: &[f64]) -> String {
    if bmis.len() < 2 {
        return "Need more data".to_string();
    }

    let diff = round_to(bmis[bmis.len() - 1] - bmis[0], 1);
    if diff > 0.0 {
        format!("Increasing (+{:.1})", diff)
    } else if diff < 0.0 {
        format!("Decreasing ({:.1})", diff)
    } else {
        "Stable".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_bmi(bmi: f64, timestamp: &str) -> MeasurementRecord {
        MeasurementRecord {
            id: format!("record-{}", timestamp),
            user_id: "user-1".to_string(),
            timestamp: timestamp.to_string(),
            weight_kg: 70.0,
            height_m: 1.75,
            bmi,
            category: classify_bmi(bmi),
        }
    }

    #[test]
    fn test_compute_bmi_reference_values() {
        assert_eq!(compute_bmi(70.0, 1.75), 22.9);
        assert_eq!(compute_bmi(100.0, 1.80), 30.9);
    }

    #[test]
    fn test_classify_bmi_boundaries() {
        assert_eq!(classify_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
        assert_eq!(classify_bmi(24.9), BmiCategory::Normal);
        assert_eq!(classify_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(29.9), BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_moving_average_window_three() {
        let smoothed = moving_average(&[20.0, 21.0, 22.0, 23.0], 3);
        assert_eq!(smoothed, vec![None, None, Some(21.0), Some(22.0)]);
    }

    #[test]
    fn test_moving_average_short_series_unchanged() {
        let smoothed = moving_average(&[20.0, 21.0], 3);
        assert_eq!(smoothed, vec![Some(20.0), Some(21.0)]);
    }

    #[test]
    fn test_moving_average_zero_window_unchanged() {
        let smoothed = moving_average(&[20.0, 21.0, 22.0], 0);
        assert_eq!(smoothed, vec![Some(20.0), Some(21.0), Some(22.0)]);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let smoothed = moving_average(&[20.0, 21.0, 22.0], 1);
        assert_eq!(smoothed, vec![Some(20.0), Some(21.0), Some(22.0)]);
    }

    #[test]
    fn test_summarize_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_bmi, 0.0);
        assert_eq!(summary.min_bmi, 0.0);
        assert_eq!(summary.max_bmi, 0.0);
        assert_eq!(summary.trend, "N/A");
    }

    #[test]
    fn test_summarize_single_record() {
        let history = vec![record_with_bmi(22.9, "2024-01-01T10:00:00Z")];
        let summary = summarize(&history);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.avg_bmi, 22.9);
        assert_eq!(summary.min_bmi, 22.9);
        assert_eq!(summary.max_bmi, 22.9);
        assert_eq!(summary.trend, "Need more data");
    }

    #[test]
    fn test_summarize_increasing_history() {
        let history = vec![
            record_with_bmi(22.0, "2024-01-01T10:00:00Z"),
            record_with_bmi(22.5, "2024-01-02T10:00:00Z"),
            record_with_bmi(23.4, "2024-01-03T10:00:00Z"),
        ];
        let summary = summarize(&history);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.avg_bmi, 22.6);
        assert_eq!(summary.min_bmi, 22.0);
        assert_eq!(summary.max_bmi, 23.4);
        assert_eq!(summary.trend, "Increasing (+1.4)");
    }

    #[test]
    fn test_summarize_decreasing_history() {
        let history = vec![
            record_with_bmi(25.0, "2024-01-01T10:00:00Z"),
            record_with_bmi(24.2, "2024-01-02T10:00:00Z"),
        ];
        let summary = summarize(&history);
        assert_eq!(summary.trend, "Decreasing (-0.8)");
    }

    #[test]
    fn test_summarize_stable_history() {
        let history = vec![
            record_with_bmi(22.9, "2024-01-01T10:00:00Z"),
            record_with_bmi(23.5, "2024-01-02T10:00:00Z"),
            record_with_bmi(22.9, "2024-01-03T10:00:00Z"),
        ];
        let summary = summarize(&history);
        assert_eq!(summary.trend, "Stable");
    }
}
