use std::future::Future;
use std::time::Duration;

use chrono::Local;
use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};

use crate::parse::parse_season_csv;
use crate::season::Season;
use crate::table::Table;
use crate::{info_time, Error, Result, BASE_URL, DIVISION, REQUEST_DELAY_SECS};

/// Where the season files are requested from and how politely.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub division: String,
    /// Slept between seasons, whatever happened to the previous request.
    pub delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            division: DIVISION.to_string(),
            delay: Duration::from_secs(REQUEST_DELAY_SECS),
        }
    }
}

impl FetchConfig {
    pub fn season_url(&self, season: Season) -> String {
        format!(
            "{}/{}/{}.csv",
            self.base_url.trim_end_matches('/'),
            season.code(),
            self.division
        )
    }
}

/// Status and body of a finished GET.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Anything that can perform a single GET for a season file.
pub trait SeasonSource {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse>>;
}

impl SeasonSource for Client {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let res = Client::get(self, url).send().await?;
        let status = res.status();
        let body = res.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// What a single season request ended up as.
#[derive(Debug)]
pub enum SeasonFetch {
    Rows(Table),
    /// Non-200 status, a blank body or a header without any matches.
    Empty { status: StatusCode },
    Failed(Error),
}

/// Counts gathered while fetching, logged once all seasons are done.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchSummary {
    pub seasons_total: usize,
    pub seasons_succeeded: usize,
    pub rows: usize,
    pub errors: Vec<String>,
}

/// Requests a single season. Never fails, errors are folded into `SeasonFetch::Failed`.
pub async fn request_season<S: SeasonSource>(
    source: &S,
    config: &FetchConfig,
    season: Season,
) -> SeasonFetch {
    let url = config.season_url(season);
    info_time!("Downloading season {} from {url}", season.code());

    let res = match source.get(&url).await {
        Ok(res) => res,
        Err(e) => return SeasonFetch::Failed(e),
    };
    if res.status != StatusCode::OK || res.body.trim().is_empty() {
        return SeasonFetch::Empty { status: res.status };
    }
    match parse_season_csv(&res.body, season) {
        Ok(table) if table.is_empty() => SeasonFetch::Empty { status: res.status },
        Ok(table) => SeasonFetch::Rows(table),
        Err(e) => SeasonFetch::Failed(e),
    }
}

/// Requests every season in order, one at a time, sleeping `config.delay` between them.
pub async fn fetch_seasons<S: SeasonSource>(
    source: &S,
    config: &FetchConfig,
    seasons: &[Season],
) -> Vec<(Season, SeasonFetch)> {
    let mut fetched = Vec::with_capacity(seasons.len());
    for (idx, &season) in seasons.iter().enumerate() {
        if idx > 0 {
            tokio::time::sleep(config.delay).await;
        }
        let outcome = request_season(source, config, season).await;
        fetched.push((season, outcome));
    }
    fetched
}

/// Logs every season's outcome and concatenates the ones that produced rows.
/// Returns `None` if no season did.
pub fn collect_seasons(fetched: Vec<(Season, SeasonFetch)>) -> (Option<Table>, FetchSummary) {
    let mut summary = FetchSummary {
        seasons_total: fetched.len(),
        ..Default::default()
    };
    let mut tables = Vec::with_capacity(fetched.len());

    for (season, outcome) in fetched {
        match outcome {
            SeasonFetch::Rows(table) => {
                info!(season = %season.label(), rows = table.rows(), "season downloaded");
                summary.seasons_succeeded += 1;
                summary.rows += table.rows();
                tables.push(table);
            }
            SeasonFetch::Empty { status } => {
                warn!(
                    season = %season.code(),
                    %status,
                    "No data available for season, skipping"
                );
            }
            SeasonFetch::Failed(e) => {
                error!(season = %season.code(), "Error downloading season: {e}");
                summary.errors.push(format!("{}: {e}", season.code()));
            }
        }
    }

    info!(
        seasons_total = summary.seasons_total,
        seasons_succeeded = summary.seasons_succeeded,
        rows = summary.rows,
        "finished downloading"
    );
    if tables.is_empty() {
        warn!("No data was scraped");
        return (None, summary);
    }
    (Some(Table::concat(&tables)), summary)
}

/// Fetches `seasons` and returns their combined rows, or `None` if nothing came back.
pub async fn scrape_seasons<S: SeasonSource>(
    source: &S,
    config: &FetchConfig,
    seasons: &[Season],
) -> (Option<Table>, FetchSummary) {
    let start_time = Local::now();
    info_time!("Preparing to scrape {} seasons", seasons.len());
    let fetched = fetch_seasons(source, config, seasons).await;
    let collected = collect_seasons(fetched);
    info_time!(start_time, "Finished scraping.");
    collected
}
