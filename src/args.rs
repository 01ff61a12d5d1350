use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Format of the `--date` value and of the day keys in a cookie log.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Parser, Debug)]
#[command(
    name = "most-active-cookie",
    about = "Find the most active cookies on a given day in a cookie log",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the cookie log CSV (header: cookie,timestamp)
    pub path: PathBuf,

    /// Day to query, as YYYY-MM-DD; matched verbatim against the log's days
    #[arg(short, long, value_parser = parse_day)]
    pub date: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The queried day, as typed, to look up in the cookie log.
    pub fn query_day(&self) -> Result<String, clap::Error> {
        match &self.date {
            Some(date) => Ok(date.clone()),
            None => Err(Args::command().error(
                ErrorKind::MissingRequiredArgument,
                "Please add -d followed by a date",
            )),
        }
    }
}

/// Rejects values that are not calendar dates but keeps the text as given,
/// since day keys are compared as exact strings.
fn parse_day(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map(|_| value.to_string())
        .map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", value, e))
}
