use std::collections::BTreeSet;
use std::fmt;

/// Printed when the queried day has no records.
pub const NO_COOKIES_MESSAGE: &str = "No Cookies on this date";

/// Answer to a most-active-cookie query for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// The day exists; `cookies` holds every cookie seen `count` times.
    Found {
        count: u32,
        cookies: BTreeSet<String>,
    },
    /// Nothing was logged on the day.
    NoRecords,
}

impl Activity {
    pub fn cookies(&self) -> Option<&BTreeSet<String>> {
        match self {
            Activity::Found { cookies, .. } => Some(cookies),
            Activity::NoRecords => None,
        }
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            Activity::Found { count, .. } => Some(*count),
            Activity::NoRecords => None,
        }
    }
}

/// One cookie per line, or the no-records message.
impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Found { cookies, .. } => {
                for (i, cookie) in cookies.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", cookie)?;
                }
                Ok(())
            }
            Activity::NoRecords => write!(f, "{}", NO_COOKIES_MESSAGE),
        }
    }
}

/// Summary of a loaded cookie log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    pub records: u64,
    pub days: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_records_renders_fixed_message() {
        assert_eq!(Activity::NoRecords.to_string(), "No Cookies on this date");
        assert_eq!(Activity::NoRecords.cookies(), None);
        assert_eq!(Activity::NoRecords.count(), None);
    }

    #[test]
    fn found_renders_one_cookie_per_line() {
        let activity = Activity::Found {
            count: 2,
            cookies: ["b".to_string(), "a".to_string()].into_iter().collect(),
        };
        assert_eq!(activity.to_string(), "a\nb");
        assert_eq!(activity.count(), Some(2));
    }
}
