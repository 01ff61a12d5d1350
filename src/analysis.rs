use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::aggregator::FrequencyTable;
use crate::stats::Activity;

/// Loads the cookie log at `path` and answers the query for `day`.
pub fn find_most_active_cookies(path: &Path, day: &str) -> Result<Activity> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", file_path = ?path, day, "Starting cookie log analysis");

    let table = FrequencyTable::from_path(path)?;
    let stats = table.stats();
    let activity = table.most_active(day);

    info!(
        action = "complete",
        component = "analysis",
        records = stats.records,
        days = stats.days,
        max_count = ?activity.count(),
        matches = activity.cookies().map_or(0, |c| c.len()),
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed"
    );
    Ok(activity)
}

pub fn write_activity<W: Write>(out: &mut W, activity: &Activity) -> io::Result<()> {
    writeln!(out, "{}", activity)
}

pub fn print_activity(activity: &Activity) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_activity(&mut out, activity)?;
    out.flush()
}
