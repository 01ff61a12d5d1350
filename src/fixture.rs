//! Randomized cookie logs with a known answer.
//!
//! A generated [`Fixture`] carries the rows, the day to query and the
//! [`Activity`] a correct aggregator must return for that day. The query day
//! holds `max` occurrences of each winning cookie and strictly fewer of every
//! other cookie; the remaining records are spread over the other days.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::args::DAY_FORMAT;
use crate::record::{CookieRecord, COOKIE_COLUMN, TIMESTAMP_COLUMN};
use crate::stats::Activity;

const ALPHANUMERIC_SYMBOLS: u64 = 62;
/// Days `random_day` can produce: years 1..=9999, 12 months, days 1..=28.
const DISTINCT_DAYS: usize = 9999 * 12 * 28;

#[derive(Debug, Clone)]
pub struct FixtureConfig {
    pub unique_cookies: usize,
    pub total_records: usize,
    pub dates: usize,
    /// Cookie length, or the upper bound when `uniform_length` is off.
    pub cookie_len: usize,
    pub uniform_length: bool,
    /// Several cookies share the maximum on the query day.
    pub multiple_max: bool,
    /// When false the query day is absent from the log.
    pub query_exists: bool,
    pub seed: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            unique_cookies: 20,
            total_records: 100,
            dates: 10,
            cookie_len: 16,
            uniform_length: true,
            multiple_max: false,
            query_exists: true,
            seed: 0,
        }
    }
}

impl FixtureConfig {
    fn validate(&self) -> Result<()> {
        if self.dates < 2 {
            anyhow::bail!("A fixture needs at least 2 dates, got {}", self.dates);
        }
        // An absent query day needs one more free day beyond the logged ones.
        let max_dates = if self.query_exists {
            DISTINCT_DAYS
        } else {
            DISTINCT_DAYS - 1
        };
        if self.dates > max_dates {
            anyhow::bail!(
                "Only {} distinct dates are available, {} requested",
                max_dates,
                self.dates
            );
        }
        if self.unique_cookies == 0 {
            anyhow::bail!("A fixture needs at least 1 cookie");
        }
        if self.multiple_max && self.unique_cookies < 2 {
            anyhow::bail!("Several maxima need at least 2 cookies, got {}", self.unique_cookies);
        }
        if self.cookie_len == 0 {
            anyhow::bail!("Cookie length must be greater than 0");
        }

        let min_winners = if self.multiple_max { 2 } else { 1 };
        let min_records = min_winners + self.dates - 1;
        if self.total_records < min_records {
            anyhow::bail!(
                "{} records cannot cover {} dates with {} winning cookies (need at least {})",
                self.total_records,
                self.dates,
                min_winners,
                min_records
            );
        }

        let space = if self.uniform_length {
            ALPHANUMERIC_SYMBOLS.saturating_pow(self.cookie_len as u32)
        } else {
            (1..=self.cookie_len).fold(0u64, |acc, len| {
                acc.saturating_add(ALPHANUMERIC_SYMBOLS.saturating_pow(len as u32))
            })
        };
        if space < self.unique_cookies as u64 {
            anyhow::bail!(
                "Only {} distinct cookies of length {} exist, {} requested",
                space,
                self.cookie_len,
                self.unique_cookies
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Fixture {
    pub records: Vec<CookieRecord>,
    pub query_day: String,
    pub expected: Activity,
}

impl Fixture {
    pub fn generate(config: &FixtureConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let cookies = random_cookies(&mut rng, config);
        let days = random_days(&mut rng, config.dates);
        let query_idx = rng.gen_range(0..days.len());

        // One record is held back for every non-query day so none ends up empty.
        let mut budget = config.total_records - (days.len() - 1);

        let winner_count = if config.multiple_max {
            rng.gen_range(2..=cookies.len().min(budget))
        } else {
            1
        };
        let winners: Vec<usize> =
            rand::seq::index::sample(&mut rng, cookies.len(), winner_count).into_vec();
        let max_count = rng.gen_range(1..=budget / winner_count);

        let mut placements: Vec<(usize, usize)> = Vec::with_capacity(config.total_records);
        for &cookie in &winners {
            placements.extend(std::iter::repeat((cookie, query_idx)).take(max_count));
        }
        budget -= winner_count * max_count;

        let winner_set: HashSet<usize> = winners.iter().copied().collect();
        for cookie in (0..cookies.len()).filter(|c| !winner_set.contains(c)) {
            let noise = rng.gen_range(0..=(max_count - 1).min(budget));
            placements.extend(std::iter::repeat((cookie, query_idx)).take(noise));
            budget -= noise;
        }

        let other_days: Vec<usize> = (0..days.len()).filter(|&d| d != query_idx).collect();
        for &day in &other_days {
            placements.push((rng.gen_range(0..cookies.len()), day));
        }
        for _ in 0..budget {
            let day = other_days[rng.gen_range(0..other_days.len())];
            placements.push((rng.gen_range(0..cookies.len()), day));
        }

        let mut records: Vec<CookieRecord> = placements
            .into_iter()
            .map(|(cookie, day)| {
                CookieRecord::new(cookies[cookie].clone(), random_timestamp(&mut rng, days[day]))
            })
            .collect();
        records.shuffle(&mut rng);

        let (query_day, expected) = if config.query_exists {
            let winning_cookies: BTreeSet<String> =
                winners.iter().map(|&c| cookies[c].clone()).collect();
            (
                days[query_idx].format(DAY_FORMAT).to_string(),
                Activity::Found {
                    count: max_count as u32,
                    cookies: winning_cookies,
                },
            )
        } else {
            let known: HashSet<NaiveDate> = days.iter().copied().collect();
            let mut absent = random_day(&mut rng);
            while known.contains(&absent) {
                absent = random_day(&mut rng);
            }
            (absent.format(DAY_FORMAT).to_string(), Activity::NoRecords)
        };

        info!(
            action = "generate",
            component = "fixture",
            records = records.len(),
            dates = days.len(),
            cookies = cookies.len(),
            winners = winner_count,
            max_count,
            query_day = %query_day,
            "Fixture generated"
        );

        Ok(Self {
            records,
            query_day,
            expected,
        })
    }

    /// Writes the rows as a `cookie,timestamp` CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record([COOKIE_COLUMN, TIMESTAMP_COLUMN])?;
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create fixture {:?}", path))?;
        self.write_csv(BufWriter::new(file))
            .with_context(|| format!("Failed to write fixture {:?}", path))
    }
}

fn random_cookies(rng: &mut StdRng, config: &FixtureConfig) -> Vec<String> {
    let mut seen = HashSet::with_capacity(config.unique_cookies);
    let mut cookies = Vec::with_capacity(config.unique_cookies);
    while cookies.len() < config.unique_cookies {
        let len = if config.uniform_length {
            config.cookie_len
        } else {
            rng.gen_range(1..=config.cookie_len)
        };
        let cookie: String = (0..len).map(|_| rng.sample(Alphanumeric) as char).collect();
        if seen.insert(cookie.clone()) {
            cookies.push(cookie);
        }
    }
    cookies
}

fn random_days(rng: &mut StdRng, count: usize) -> Vec<NaiveDate> {
    let mut seen = HashSet::with_capacity(count);
    let mut days = Vec::with_capacity(count);
    while days.len() < count {
        let day = random_day(rng);
        if seen.insert(day) {
            days.push(day);
        }
    }
    days
}

/// Days stop at the 28th so every month is valid.
fn random_day(rng: &mut StdRng) -> NaiveDate {
    loop {
        let year = rng.gen_range(1..=9999);
        let month = rng.gen_range(1..=12);
        let day = rng.gen_range(1..=28);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return date;
        }
    }
}

fn random_timestamp(rng: &mut StdRng, day: NaiveDate) -> String {
    format!(
        "{}T{:02}:{:02}:{:02}+00:00",
        day.format(DAY_FORMAT),
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60)
    )
}
