pub mod aggregator;
pub mod analysis;
pub mod args;
pub mod fixture;
pub mod record;
pub mod stats;
pub mod utils;

pub use aggregator::{Aggregator, FrequencyTable};
pub use analysis::{find_most_active_cookies, print_activity};
pub use args::Args;
pub use fixture::{Fixture, FixtureConfig};
pub use record::CookieRecord;
pub use stats::{Activity, LoadStats, NO_COOKIES_MESSAGE};
