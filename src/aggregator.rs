use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::record::{day_of, CookieRecord, COOKIE_COLUMN, TIMESTAMP_COLUMN};
use crate::stats::{Activity, LoadStats};

type CookieCounts = HashMap<String, u32>;

/// Builds the per-day cookie counts.
///
/// Ingestion needs `&mut self`; once every source is consumed, [`finish`]
/// freezes the counts into a read-only [`FrequencyTable`].
///
/// [`finish`]: Aggregator::finish
#[derive(Debug, Default)]
pub struct Aggregator {
    days: HashMap<String, CookieCounts>,
    records: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `cookie` on `day`.
    pub fn record(&mut self, cookie: &str, day: &str) {
        *self
            .days
            .entry(day.to_string())
            .or_default()
            .entry(cookie.to_string())
            .or_insert(0) += 1;
        self.records += 1;
    }

    /// Folds counts staged from a fully consumed source into `self`.
    fn merge(&mut self, staged: Aggregator) {
        for (day, counts) in staged.days {
            let day_counts = self.days.entry(day).or_default();
            for (cookie, count) in counts {
                *day_counts.entry(cookie).or_insert(0) += count;
            }
        }
        self.records += staged.records;
    }

    /// Counts every record. On error nothing from `records` is kept.
    pub fn ingest_records<I>(&mut self, records: I) -> Result<u64>
    where
        I: IntoIterator<Item = CookieRecord>,
    {
        let mut staged = Aggregator::new();
        for record in records {
            staged.record(&record.cookie, record.day()?);
        }
        let ingested = staged.records;
        self.merge(staged);
        Ok(ingested)
    }

    /// Reads a `cookie,timestamp` CSV and counts every row.
    ///
    /// Any malformed row aborts the load, leaving `self` untouched; the
    /// error names its line.
    pub fn ingest_reader<R: Read>(&mut self, reader: R) -> Result<u64> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read cookie log header")?
            .clone();
        for column in [COOKIE_COLUMN, TIMESTAMP_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                anyhow::bail!("Cookie log header is missing the '{}' column", column);
            }
        }

        let mut staged = Aggregator::new();
        let mut row = csv::StringRecord::new();
        while csv_reader
            .read_record(&mut row)
            .context("Failed to read cookie log row")?
        {
            let line = row.position().map_or(0, |p| p.line());
            let record: CookieRecord = row
                .deserialize(Some(&headers))
                .with_context(|| format!("Malformed cookie log row at line {}", line))?;
            let day = day_of(&record.timestamp)
                .with_context(|| format!("Malformed cookie log row at line {}", line))?;
            staged.record(&record.cookie, day);
        }

        let ingested = staged.records;
        self.merge(staged);
        Ok(ingested)
    }

    /// Ingests the cookie log at `path`. The file is closed before returning.
    pub fn ingest_path(&mut self, path: &Path) -> Result<u64> {
        let start_time = Instant::now();
        info!(action = "start", component = "cookie_log", file_path = ?path, "Loading cookie log");

        let ingested = {
            let file = File::open(path)
                .with_context(|| format!("Failed to open cookie log {:?}", path))?;
            self.ingest_reader(file)
                .with_context(|| format!("Failed to load cookie log {:?}", path))?
        };

        info!(
            action = "complete",
            component = "cookie_log",
            records = ingested,
            days = self.days.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Cookie log loaded"
        );
        Ok(ingested)
    }

    pub fn finish(self) -> FrequencyTable {
        FrequencyTable {
            days: self.days,
            records: self.records,
        }
    }
}

/// Read-only day -> cookie -> count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    days: HashMap<String, CookieCounts>,
    records: u64,
}

impl FrequencyTable {
    /// Builds a table from already-parsed records.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CookieRecord>,
    {
        let mut aggregator = Aggregator::new();
        aggregator.ingest_records(records)?;
        Ok(aggregator.finish())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let mut aggregator = Aggregator::new();
        aggregator.ingest_path(path)?;
        Ok(aggregator.finish())
    }

    /// Finds every cookie sharing the highest count on `day`.
    ///
    /// The set is reset whenever a strictly larger count shows up and grown
    /// on an equal one, so the visiting order of the map does not matter.
    pub fn most_active(&self, day: &str) -> Activity {
        let Some(counts) = self.days.get(day) else {
            debug!(action = "query", component = "frequency_table", day, "No records for day");
            return Activity::NoRecords;
        };

        let mut max_count = 0;
        let mut cookies = BTreeSet::new();
        for (cookie, &count) in counts {
            if count > max_count {
                max_count = count;
                cookies.clear();
                cookies.insert(cookie.clone());
            } else if count == max_count {
                cookies.insert(cookie.clone());
            }
        }

        debug!(
            action = "query",
            component = "frequency_table",
            day,
            max_count,
            matches = cookies.len(),
            "Most active cookies found"
        );
        Activity::Found {
            count: max_count,
            cookies,
        }
    }

    pub fn count(&self, day: &str, cookie: &str) -> u32 {
        self.days
            .get(day)
            .and_then(|counts| counts.get(cookie))
            .copied()
            .unwrap_or(0)
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }

    pub fn stats(&self) -> LoadStats {
        LoadStats {
            records: self.records,
            days: self.days.len(),
        }
    }
}
