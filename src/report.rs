//! Renderings of analysis reports for the console.

use std::fmt::Write;

use crate::pipeline::AnalysisReport;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Multi-line human-readable summary of one report.
pub fn render_text(report: &AnalysisReport) -> String {
    let unit = report.unit.symbol();
    let s = &report.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Temperature Analysis for {}", report.label);
    let _ = writeln!(out, "Samples: {}", s.count);
    let _ = writeln!(out, "Mean temperature: {:.2}{unit}", s.mean);
    let _ = writeln!(out, "Median temperature: {:.2}{unit}", s.median);
    let _ = writeln!(out, "Standard deviation: {:.2}{unit}", s.std_dev);
    let _ = writeln!(out, "Temperature range: {:.2}{unit}", s.range);
    let _ = writeln!(
        out,
        "Min temperature: {:.2}{unit} on {}",
        report.min_extremum.value,
        report.min_extremum.timestamp.format(TIMESTAMP_FORMAT)
    );
    let _ = writeln!(
        out,
        "Max temperature: {:.2}{unit} on {}",
        report.max_extremum.value,
        report.max_extremum.timestamp.format(TIMESTAMP_FORMAT)
    );
    out
}

/// One-line `{label=min/mean/max, ...}` overview, sorted by label.
pub fn render_compact(reports: &[AnalysisReport]) -> String {
    let mut results = reports
        .iter()
        .map(|report| {
            format!(
                "{}={:.1}/{:.1}/{:.1}",
                report.label, report.summary.min, report.summary.mean, report.summary.max
            )
        })
        .collect::<Vec<String>>();
    results.sort_unstable();
    format!("{{{}}}", results.join(", "))
}

pub fn render_json(reports: &[AnalysisReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::convert::Unit;
    use crate::pipeline::analyze;
    use crate::series::TemperatureSeries;

    fn report(label: &str, values: &[f64]) -> AnalysisReport {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let series = TemperatureSeries::from_pairs(
            Unit::Celsius,
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start + Duration::days(i as i64), v)),
        )
        .unwrap();
        analyze(&series, label).unwrap()
    }

    #[test]
    fn text_lists_every_field() {
        let text = render_text(&report("Alpha", &[20.0, 25.0, 18.0]));
        assert!(text.starts_with("Temperature Analysis for Alpha\n"));
        assert!(text.contains("Mean temperature: 21.00°C"));
        assert!(text.contains("Median temperature: 20.00°C"));
        assert!(text.contains("Temperature range: 7.00°C"));
        assert!(text.contains("Min temperature: 18.00°C on 2023-06-03 00:00"));
        assert!(text.contains("Max temperature: 25.00°C on 2023-06-02 00:00"));
    }

    #[test]
    fn compact_is_sorted() {
        let reports = [report("Oslo", &[1.0, 3.0]), report("Athens", &[20.0])];
        assert_eq!(
            render_compact(&reports),
            "{Athens=20.0/20.0/20.0, Oslo=1.0/2.0/3.0}"
        );
    }

    #[test]
    fn json_carries_field_names() {
        let json = render_json(&[report("Alpha", &[1.0, 2.0])]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["label"], "Alpha");
        assert_eq!(value[0]["unit"], "celsius");
        assert_eq!(value[0]["summary"]["range"], 1.0);
        assert_eq!(value[0]["max_extremum"]["index"], 1);
    }
}
