//! Command implementations for the AQD CLI.
//!
//! Provides subcommands for binning measurement files into temporal
//! coverage, loading a project through the fetch lifecycle, and rewriting
//! dashboard URLs for a date range.

use clap::Subcommand;

pub mod coverage;
pub mod project;
pub mod query;

#[derive(Subcommand)]
pub enum Command {
    /// Bin a measurements JSON file by hour of day, day of week and month
    Coverage {
        /// Measurements file (`{"results": [...]}` or a bare array)
        #[arg(short, long)]
        input: String,

        /// Parameter id to bin (e.g. `pm25`)
        #[arg(short, long)]
        parameter: String,

        /// Only keep measurements inside `YYYY-MM-DD/YYYY-MM-DD`
        #[arg(short, long)]
        date_range: Option<String>,

        /// Report every bucket, including empty ones, in calendar order
        #[arg(long)]
        fill: bool,

        /// Write `histogram,bucket,count` rows to this CSV instead of printing JSON
        #[arg(long)]
        csv: Option<String>,
    },

    /// Load a project from the OpenAQ API and print the resulting state
    Project {
        /// Project id
        #[arg(long)]
        id: String,

        /// API base URL
        #[arg(long, env = "AQD_API_URL", default_value = aqd_openaq::DEFAULT_API_URL)]
        api_url: String,

        /// Issue a second load after the first one settles
        #[arg(long)]
        refetch: bool,
    },

    /// Rewrite a dashboard URL's `dateRange` query key
    Query {
        /// Page URL, e.g. `/projects/22?tab=day`
        #[arg(short, long)]
        url: String,

        /// New range as `YYYY-MM-DD/YYYY-MM-DD`, or `none` to clear it
        #[arg(short, long)]
        date_range: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Coverage {
            input,
            parameter,
            date_range,
            fill,
            csv,
        } => coverage::run_coverage(&input, &parameter, date_range.as_deref(), fill, csv.as_deref()),
        Command::Project {
            id,
            api_url,
            refetch,
        } => project::run_project(&id, &api_url, refetch).await,
        Command::Query { url, date_range } => {
            println!("{}", query::rewrite_url(&url, &date_range)?);
            Ok(())
        }
    }
}
