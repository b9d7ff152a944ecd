//! Fixed-width text tables of readings and forecasts.

use data_spi::GroundwaterRecord;
use forecast_spi::ForecastPoint;

/// Rows shown in document samples
pub const SAMPLE_ROWS: usize = 10;

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| format!("{:>width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
}

fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = line(headers.iter().copied(), &widths);
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn history_rows(records: &[GroundwaterRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| vec![r.date.to_string(), format!("{:.3}", r.level)])
        .collect()
}

fn forecast_rows(points: &[ForecastPoint]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let banded = points.iter().any(|p| p.interval().is_some());
    let headers = if banded {
        vec!["date", "level", "lower", "upper"]
    } else {
        vec!["date", "level"]
    };
    let fmt = |v: Option<f64>| v.map(|x| format!("{:.3}", x)).unwrap_or_else(|| "-".into());
    let rows = points
        .iter()
        .map(|p| {
            let mut row = vec![p.date.to_string(), format!("{:.3}", p.value)];
            if banded {
                row.push(fmt(p.lower));
                row.push(fmt(p.upper));
            }
            row
        })
        .collect();
    (headers, rows)
}

/// Every reading as a `date  level` table.
pub fn history_table(records: &[GroundwaterRecord]) -> String {
    render(&["date", "level"], &history_rows(records))
}

/// Every forecast step, with bounds when the forecast has them.
pub fn forecast_table(points: &[ForecastPoint]) -> String {
    let (headers, rows) = forecast_rows(points);
    render(&headers, &rows)
}

fn with_remainder(table: String, total: usize, limit: usize) -> String {
    if total > limit {
        format!("{}\n... and {} more rows", table, total - limit)
    } else {
        table
    }
}

/// The first `limit` readings, noting how many were left out.
pub fn history_sample(records: &[GroundwaterRecord], limit: usize) -> String {
    let shown = &records[..records.len().min(limit)];
    with_remainder(history_table(shown), records.len(), limit)
}

/// The first `limit` forecast steps, noting how many were left out.
pub fn forecast_sample(points: &[ForecastPoint], limit: usize) -> String {
    let shown = &points[..points.len().min(limit)];
    with_remainder(forecast_table(shown), points.len(), limit)
}
