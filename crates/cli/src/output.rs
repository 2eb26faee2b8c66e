//! Rendering of a load time for stdout

use clap::ValueEnum;
use colored::Colorize;
use loadtime_core::LoadTime;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bare millisecond count
    Plain,
    /// `{"loadTime": ..., "utc": ...}`
    Json,
    /// Human-readable table
    Table,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadTimeJson {
    load_time: LoadTime,
    utc: Option<String>,
}

#[derive(Tabled)]
struct LoadTimeRow {
    #[tabled(rename = "Load time (ms)")]
    millis: u64,
    #[tabled(rename = "UTC")]
    utc: String,
}

fn utc_string(load_time: LoadTime) -> Option<String> {
    load_time.to_datetime().map(|dt| dt.to_rfc3339())
}

pub fn render(load_time: LoadTime, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Plain => load_time.to_string(),
        OutputFormat::Json => serde_json::to_string(&LoadTimeJson {
            load_time,
            utc: utc_string(load_time),
        })?,
        OutputFormat::Table => {
            let row = LoadTimeRow {
                millis: load_time.as_millis(),
                utc: utc_string(load_time).unwrap_or_else(|| "-".to_string()),
            };
            format!("{}\n{}", "Load time".bold(), Table::new(vec![row]))
        }
    };
    Ok(rendered)
}
