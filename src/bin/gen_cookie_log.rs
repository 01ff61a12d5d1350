use anyhow::Result;
use clap::Parser;
use most_active_cookie::{utils, Fixture, FixtureConfig};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "gen-cookie-log",
    about = "Generate a random cookie log together with its most-active-cookie answer",
    version,
    long_about = None
)]
struct GenArgs {
    /// Where to write the cookie log CSV
    #[arg(short, long, default_value = "test.csv")]
    output: PathBuf,

    /// Number of distinct cookies
    #[arg(long, default_value_t = 20)]
    unique_cookies: usize,

    /// Total number of rows
    #[arg(long, default_value_t = 100)]
    total_records: usize,

    /// Number of distinct dates
    #[arg(long, default_value_t = 10)]
    dates: usize,

    /// Cookie length (maximum length with --variable-length)
    #[arg(long, default_value_t = 16)]
    cookie_len: usize,

    /// Draw each cookie length between 1 and --cookie-len
    #[arg(long)]
    variable_length: bool,

    /// Make several cookies share the maximum on the query date
    #[arg(long)]
    multiple_max: bool,

    /// Query a date that is absent from the log
    #[arg(long)]
    missing_date: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = GenArgs::parse();
    utils::setup_logging(args.verbose);

    let config = FixtureConfig {
        unique_cookies: args.unique_cookies,
        total_records: args.total_records,
        dates: args.dates,
        cookie_len: args.cookie_len,
        uniform_length: !args.variable_length,
        multiple_max: args.multiple_max,
        query_exists: !args.missing_date,
        seed: args.seed.unwrap_or_else(rand::random),
    };

    let fixture = match Fixture::generate(&config).and_then(|f| {
        f.write_csv_path(&args.output)?;
        Ok(f)
    }) {
        Ok(fixture) => fixture,
        Err(e) => {
            error!(action = "fail", component = "main", error = %format!("{:#}", e), "Fixture generation failed");
            std::process::exit(1);
        }
    };

    println!(
        "Wrote {} records to {} (seed {})",
        utils::format_number(fixture.records.len() as u64),
        args.output.display(),
        config.seed
    );
    println!("Query date: {}", fixture.query_day);
    println!("{}", fixture.expected);
    Ok(())
}
