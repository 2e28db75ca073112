use chrono::Local;
use pl_scrap::{info_time, process::process_site, FILE_PATH};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let start_time = Local::now();
    let report = process_site().await;
    if report.saved {
        info_time!(
            start_time,
            "Data collection complete. You can now use '{FILE_PATH}' for your analysis."
        );
    } else {
        info_time!(start_time, "Full program time:");
    }
}
