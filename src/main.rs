use anyhow::Result;
use clap::Parser;
use most_active_cookie::{find_most_active_cookies, print_activity, utils, Args};
use tracing::error;

fn main() -> Result<()> {
    let args = Args::parse();
    let day = args.query_day().unwrap_or_else(|e| e.exit());
    utils::setup_logging(args.verbose);

    match find_most_active_cookies(&args.path, &day) {
        Ok(activity) => {
            print_activity(&activity)?;
            Ok(())
        }
        Err(e) => {
            error!(action = "fail", component = "main", error = %format!("{:#}", e), "Cookie log analysis failed");
            std::process::exit(1);
        }
    }
}
