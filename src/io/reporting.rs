// src/io/reporting.rs

use crate::error::SimResult;
use crate::simulation::engine::RunResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One CSV row: the end-of-day state of one site.
#[derive(Debug, Serialize)]
struct SeriesRow<'a> {
    scenario: &'static str,
    site: &'a str,
    day: u32,
    demand: u64,
    stock: u64,
    lost_sales_total: f64,
    cost_total: f64,
    order_in_transit: bool,
}

/// Writes every site's daily series in long format. Returns the row count.
pub fn write_daily_series<W: Write>(writer: W, result: &RunResult) -> SimResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut rows = 0;

    let tagged = result
        .decentralized
        .iter()
        .map(|site| ("decentralized", site))
        .chain(std::iter::once(("centralized", &result.centralized)));

    for (scenario, site) in tagged {
        for record in &site.ledger {
            wtr.serialize(SeriesRow {
                scenario,
                site: &site.name,
                day: record.day,
                demand: record.demand,
                stock: record.stock,
                lost_sales_total: record.lost_sales_total,
                cost_total: record.cost_total,
                order_in_transit: record.order_in_transit,
            })?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}

/// Writes the daily series to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `result` - The finished run.
pub fn write_simulation_log<P: AsRef<Path>>(file_path: P, result: &RunResult) -> SimResult<()> {
    let path = file_path.as_ref();
    let rows = write_daily_series(File::create(path)?, result)?;
    info!(rows, path = %path.display(), "exported daily series");
    Ok(())
}

/// Writes the run summary (per-site scalars, totals, verdict) as pretty JSON.
pub fn write_summary<W: Write>(writer: W, result: &RunResult) -> SimResult<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

pub fn write_summary_file<P: AsRef<Path>>(file_path: P, result: &RunResult) -> SimResult<()> {
    let path = file_path.as_ref();
    let mut file = File::create(path)?;
    write_summary(&mut file, result)?;
    file.flush()?;
    info!(path = %path.display(), "exported summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::ScenarioConfig;
    use crate::simulation::engine::run;

    fn short_run() -> RunResult {
        let mut config = ScenarioConfig::three_region(15.0, 4.0, 1.0);
        config.horizon_days = 10;
        config.seed = Some(3);
        run(&config).unwrap()
    }

    #[test]
    fn csv_has_one_row_per_site_and_day() {
        let result = short_run();
        let mut buffer = Vec::new();
        let rows = write_daily_series(&mut buffer, &result).unwrap();
        assert_eq!(rows, 40);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("scenario,site,day,demand,stock,lost_sales_total,cost_total,order_in_transit")
        );
        assert_eq!(lines.count(), 40);
        assert!(text.contains("centralized,Centralized,9,"));
    }

    #[test]
    fn summary_is_valid_json_without_series() {
        let result = short_run();
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &result).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["seed"], 3);
        assert_eq!(value["decentralized"].as_array().unwrap().len(), 3);
        assert!(value["totals"]["total_cost_centralized"].is_number());
        assert!(value["centralized"].get("ledger").is_none());
    }
}
