use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, warn};

use crate::config::Config;
use crate::services::{formatter, normalizer, Aggregator, Fetcher};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a processing date: well-formed and within the supported window.
fn validate_date(input: &str) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        format!("invalid date format: {input:?}. Expected YYYY-MM-DD, e.g. 2024-01-15")
    })?;
    let min = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let max = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    if date < min || date > max {
        return Err(format!(
            "date out of range: {input}. Must be between 2024-01-01 and 2024-12-31"
        ));
    }
    Ok(date)
}

/// Aggregate supplier invoice amounts by month for one day's data
#[derive(Parser)]
#[command(name = "invsum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Date to process, YYYY-MM-DD (must fall within 2024)
    #[arg(value_parser = validate_date)]
    date: NaiveDate,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let date = self.date.format(DATE_FORMAT).to_string();
        let config = Config::from_env()?;

        let fetcher = Fetcher::new(&config)?;
        let payload = fetcher.fetch(&date)?;

        let batch = normalizer::normalize(&payload)?;
        if batch.rejected > 0 {
            warn!(rejected = batch.rejected, "rows excluded from aggregation");
        }

        let groups = Aggregator::by_supplier_month(batch.records);
        info!(groups = groups.len(), rejected = batch.rejected, "aggregation complete");

        // stdout carries only the data lines; everything else goes to stderr
        let lines = formatter::render(&groups);
        if !lines.is_empty() {
            println!("{}", lines.join("\n"));
        }
        Ok(())
    }
}
