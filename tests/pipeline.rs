use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use pl_scrap::normalize::NormalizeConfig;
use pl_scrap::process::run_pipeline;
use pl_scrap::request::{FetchConfig, RawResponse, SeasonSource};
use pl_scrap::table::ColumnData;
use pl_scrap::{Error, Result};
use reqwest::StatusCode;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pl_scrap_it_{}_{name}", std::process::id()))
}

/// Archive stand-in: known season codes serve a fixture, the rest are 404s.
struct FixtureArchive {
    files: HashMap<&'static str, String>,
    unreachable: Vec<&'static str>,
}

impl SeasonSource for FixtureArchive {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        if self.unreachable.iter().any(|code| url.contains(code)) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timed out",
            )));
        }
        let body = self
            .files
            .iter()
            .find(|(code, _)| url.contains(&format!("/{code}/")))
            .map(|(_, body)| body.clone());
        Ok(match body {
            Some(body) => RawResponse {
                status: StatusCode::OK,
                body,
            },
            None => RawResponse {
                status: StatusCode::NOT_FOUND,
                body: "<html>Not Found</html>".into(),
            },
        })
    }
}

fn fetch_config() -> FetchConfig {
    FetchConfig {
        delay: Duration::ZERO,
        ..Default::default()
    }
}

#[tokio::test]
async fn scrapes_processes_and_saves_available_seasons() {
    let archive = FixtureArchive {
        files: HashMap::from([
            ("2324", read_fixture("e0_2324.csv")),
            ("2425", read_fixture("e0_2425.csv")),
        ]),
        unreachable: vec![],
    };
    let output = temp_output("full.csv");

    let report = run_pipeline(
        &archive,
        &fetch_config(),
        &NormalizeConfig::default(),
        3,
        2025,
        &output,
    )
    .await;

    assert_eq!(report.fetch.seasons_total, 3);
    assert_eq!(report.fetch.seasons_succeeded, 2);
    assert_eq!(report.fetch.rows, 5);
    assert!(report.saved);

    let processed = report.processed.expect("two seasons should produce rows");
    assert_eq!(processed.rows(), 5);
    assert_eq!(
        processed.column("Outcome"),
        Some(&ColumnData::Int(vec![
            Some(-1),
            Some(1),
            Some(0),
            Some(1),
            Some(-1)
        ]))
    );

    let written = fs::read_to_string(&output).expect("output should be written");
    fs::remove_file(&output).ok();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "HomeTeam,AwayTeam,FTHG,FTAG,HS,AS,HST,AST,HC,AC,Season,Date,Outcome,OutcomeLabel,HomePossession,AwayPossession"
    );
    assert_eq!(
        lines[1],
        "Burnley,Man City,0,3,6,17,1,8,6,5,2023-2024,2023-08-11,-1,Loss,,"
    );
    assert_eq!(
        lines[4],
        "Man United,Fulham,1,0,14,10,5,2,7,8,2024-2025,2024-08-16,1,Win,55,45"
    );
}

#[tokio::test]
async fn unreachable_and_missing_seasons_write_nothing() {
    let archive = FixtureArchive {
        files: HashMap::new(),
        unreachable: vec!["2324"],
    };
    let output = temp_output("none.csv");

    let report = run_pipeline(
        &archive,
        &fetch_config(),
        &NormalizeConfig::default(),
        2,
        2025,
        &output,
    )
    .await;

    assert!(report.processed.is_none());
    assert!(!report.saved);
    assert_eq!(report.fetch.errors.len(), 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn zero_seasons_is_a_quiet_no_op() {
    let archive = FixtureArchive {
        files: HashMap::new(),
        unreachable: vec![],
    };
    let output = temp_output("zero.csv");

    let report = run_pipeline(
        &archive,
        &fetch_config(),
        &NormalizeConfig::default(),
        0,
        2025,
        &output,
    )
    .await;

    assert_eq!(report.fetch.seasons_total, 0);
    assert!(report.processed.is_none());
    assert!(!output.exists());
}
