use std::path::Path;

use chrono::{Datelike, Local};
use tracing::error;

use crate::normalize::{process_match_data, NormalizeConfig};
use crate::request::{scrape_seasons, FetchConfig, FetchSummary, SeasonSource};
use crate::save::save_table;
use crate::season::resolve_seasons;
use crate::table::Table;
use crate::{info_time, FILE_PATH, SEASONS};

/// What a pipeline run produced.
#[derive(Debug)]
pub struct RunReport {
    pub fetch: FetchSummary,
    /// `None` when no season returned any matches.
    pub processed: Option<Table>,
    /// Whether the output file was written.
    pub saved: bool,
}

/// Scrapes the last `SEASONS` seasons and writes them to `FILE_PATH`.
pub async fn process_site() -> RunReport {
    let client = reqwest::Client::new();
    run_pipeline(
        &client,
        &FetchConfig::default(),
        &NormalizeConfig::default(),
        SEASONS,
        Local::now().year(),
        FILE_PATH,
    )
    .await
}

/// Fetch, normalize and save, once. Nothing in here is fatal: a failed save is logged
/// and reported through `RunReport::saved`.
pub async fn run_pipeline<S: SeasonSource>(
    source: &S,
    fetch_config: &FetchConfig,
    normalize_config: &NormalizeConfig,
    seasons: usize,
    current_year: i32,
    output: impl AsRef<Path>,
) -> RunReport {
    let start_time = Local::now();
    info_time!("Started scraping");

    let seasons = resolve_seasons(seasons, current_year);
    let (raw, fetch) = scrape_seasons(source, fetch_config, &seasons).await;
    let processed = process_match_data(raw.as_ref(), normalize_config);

    let output = output.as_ref();
    let saved = match save_table(processed.as_ref(), output) {
        Ok(saved) => saved,
        Err(e) => {
            error!(path = %output.display(), "Error saving data: {e}");
            false
        }
    };
    info_time!(start_time, "Finished processing all seasons.");

    RunReport {
        fetch,
        processed,
        saved,
    }
}
