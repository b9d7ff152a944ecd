//! Integration tests for dataset analysis

use analysis::{analyze, analyze_with, AnalysisConfig, SeasonalityVerdict, TrendDirection};
use chrono::NaiveDate;
use data_spi::{Dataset, GroundwaterRecord};

fn monthly(levels: &[f64]) -> Dataset {
    Dataset::from_records(
        levels
            .iter()
            .enumerate()
            .map(|(i, &l)| {
                let date =
                    NaiveDate::from_ymd_opt(2015 + (i / 12) as i32, (i % 12) as u32 + 1, 1).unwrap();
                GroundwaterRecord::new(date, l)
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_declining_aquifer() {
    // About one unit lower every month, i.e. roughly -0.033 per day
    let levels: Vec<f64> = (0..30).map(|i| 50.0 - i as f64).collect();
    let report = analyze(&monthly(&levels));

    assert_eq!(report.trend.direction, TrendDirection::Downward);
    assert_eq!(report.stats.data_points, 30);
    assert_eq!(report.stats.max_level, 50.0);
    assert!(report.insights.contains("decreasing trend"));
}

#[test]
fn test_short_record_skips_seasonality() {
    let report = analyze(&monthly(&[5.0, 5.0, 5.0]));
    assert_eq!(report.trend.direction, TrendDirection::Stable);
    assert_eq!(report.seasonality.verdict, SeasonalityVerdict::NoneDetected);
    assert_eq!(report.seasonality.threshold, None);
}

#[test]
fn test_custom_thresholds() {
    let levels: Vec<f64> = (0..6).map(|i| 10.0 + i as f64 * 0.5).collect();
    let dataset = monthly(&levels);

    assert_eq!(analyze(&dataset).trend.direction, TrendDirection::Upward);

    let lenient = AnalysisConfig {
        trend_threshold: 1.0,
        ..Default::default()
    };
    assert_eq!(
        analyze_with(&dataset, &lenient).trend.direction,
        TrendDirection::Stable
    );
}

#[test]
fn test_report_serializes() {
    let report = analyze(&monthly(&[1.0, 2.0]));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["trend"]["direction"], "upward");
    assert_eq!(json["stats"]["start_date"], "2015-01-01");
    assert_eq!(json["seasonality"]["verdict"], "none_detected");
}
