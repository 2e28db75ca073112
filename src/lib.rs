//! Premier League match-result scraper.
//!
//! Downloads the last few seasons of `E0.csv` files from football-data.co.uk,
//! glues them together, keeps the columns worth modelling on, labels every match
//! with its outcome from the home side's view and writes a single CSV.

mod error;
mod macros;
pub mod normalize;
mod parse;
pub mod process;
pub mod request;
pub mod save;
pub mod season;
pub mod table;

pub use error::{Error, Result};

/// How many seasons, counting back from the current year, get scraped.
pub const SEASONS: usize = 5;
pub const FILE_PATH: &str = "premier_league_match_data.csv";

pub const BASE_URL: &str = "https://www.football-data.co.uk/mmz4281";
/// English top flight.
pub const DIVISION: &str = "E0";
/// Pause after every season request, whatever its outcome.
pub const REQUEST_DELAY_SECS: u64 = 1;

/// Columns kept in the processed output, in output order.
pub const RELEVANT_COLUMNS: [&str; 12] = [
    "HomeTeam", "AwayTeam", "FTHG", "FTAG", "HS", "AS", "HST", "AST", "HC", "AC", "Season", "Date",
];
/// Fewer available relevant columns than this only triggers a warning.
pub const MIN_COLUMNS: usize = 8;

pub const SEASON_COLUMN: &str = "Season";
pub const DATE_COLUMN: &str = "Date";
pub const HOME_GOALS_COLUMN: &str = "FTHG";
pub const AWAY_GOALS_COLUMN: &str = "FTAG";
pub const OUTCOME_COLUMN: &str = "Outcome";
pub const OUTCOME_LABEL_COLUMN: &str = "OutcomeLabel";
/// Source possession columns and the names they are copied under.
pub const POSSESSION_COLUMNS: [(&str, &str); 2] =
    [("HPOSS", "HomePossession"), ("APOSS", "AwayPossession")];
