//! Command implementations for the weather anomaly CLI.
//!
//! Provides subcommands for listing cities, summarizing a date range and
//! exporting chart view-models as JSON.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use wx_chart::brush::BrushSelection;
use wx_core::record::IngestPolicy;
use wx_utils::dates::parse_date;

pub mod chart;
pub mod cities;
pub mod loader;
pub mod summary;

/// Where city data lives and how strictly it is parsed.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory holding one `<CODE>.csv` file per city
    #[arg(long, env = "WX_DATA_DIR", default_value = "weather-data")]
    pub data_dir: PathBuf,

    /// Reject rows with unparseable temperatures instead of carrying NaN through
    #[arg(long)]
    pub strict: bool,
}

impl DataArgs {
    pub fn policy(&self) -> IngestPolicy {
        if self.strict {
            IngestPolicy::Strict
        } else {
            IngestPolicy::Permissive
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the configured cities
    Cities,

    /// Summarize the temperature anomaly over a date range
    Summary {
        /// City code (e.g. KSEA) or ALL
        #[arg(short = 'c', long, default_value = "ALL")]
        city: String,

        /// First day of the range, YYYY-MM-DD (defaults to the first day of data)
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// Last day of the range, YYYY-MM-DD (defaults to the last day of data)
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Export chart view-models as JSON for a renderer
    Chart {
        /// City code (e.g. KSEA) or ALL
        #[arg(short = 'c', long, default_value = "ALL")]
        city: String,

        /// Brushed pixel extent "X0,X1" within the plotting cell (omit for the whole year)
        #[arg(short = 'b', long, allow_hyphen_values = true)]
        brush: Option<BrushSelection>,

        /// JSON file overriding the default chart layout
        #[arg(short = 'l', long)]
        layout: Option<PathBuf>,

        /// Output path (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Cities => cities::run_cities(),
        Command::Summary {
            city,
            start,
            end,
            json,
            data,
        } => summary::run_summary(&data, &city, start, end, json).await,
        Command::Chart {
            city,
            brush,
            layout,
            output,
            data,
        } => {
            chart::run_chart(
                &data,
                &city,
                brush.unwrap_or_default(),
                layout.as_deref(),
                output.as_deref(),
            )
            .await
        }
    }
}
