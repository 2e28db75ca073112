use chrono::NaiveDate;
use tracing::{info, warn};

use crate::table::{ColumnData, Table};
use crate::{
    AWAY_GOALS_COLUMN, DATE_COLUMN, HOME_GOALS_COLUMN, MIN_COLUMNS, OUTCOME_COLUMN,
    OUTCOME_LABEL_COLUMN, POSSESSION_COLUMNS, RELEVANT_COLUMNS,
};

/// Which columns survive normalization and where the derived fields come from.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Allow-list, in output order.
    pub columns: Vec<&'static str>,
    /// Below this many available allow-listed columns a warning is logged.
    pub min_columns: usize,
    pub home_goals: &'static str,
    pub away_goals: &'static str,
    pub date_column: &'static str,
    /// `(source, output)` names of the home and away possession columns.
    pub possession: [(&'static str, &'static str); 2],
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            columns: RELEVANT_COLUMNS.to_vec(),
            min_columns: MIN_COLUMNS,
            home_goals: HOME_GOALS_COLUMN,
            away_goals: AWAY_GOALS_COLUMN,
            date_column: DATE_COLUMN,
            possession: POSSESSION_COLUMNS,
        }
    }
}

/// Match outcome from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_goals(home: i64, away: i64) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }

    pub fn value(self) -> i64 {
        match self {
            Outcome::Win => 1,
            Outcome::Draw => 0,
            Outcome::Loss => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Draw => "Draw",
            Outcome::Loss => "Loss",
        }
    }
}

/// Turns the combined raw table into the modelling dataset.
///
/// Returns `None` when there's nothing to process. Missing columns, unparseable dates
/// and a short schema are only logged.
pub fn process_match_data(raw: Option<&Table>, config: &NormalizeConfig) -> Option<Table> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            warn!("No data to process");
            return None;
        }
    };

    let available = raw.available(&config.columns);
    if available.len() < config.min_columns {
        warn!(
            available = available.len(),
            required = config.min_columns,
            "Insufficient columns in dataset. Available columns: {:?}",
            raw.column_names()
        );
    }
    let mut processed = raw.select(&available);

    if let Some((outcomes, labels)) = derive_outcomes(&processed, config) {
        processed.push_column(OUTCOME_COLUMN, outcomes);
        processed.push_column(OUTCOME_LABEL_COLUMN, labels);
    }

    let [home, away] = config.possession;
    if let (Some(home_poss), Some(away_poss)) = (raw.column(home.0), raw.column(away.0)) {
        processed.push_column(home.1, home_poss.clone());
        processed.push_column(away.1, away_poss.clone());
    }

    if let Some(dates) = processed.column(config.date_column).and_then(ColumnData::as_text) {
        match parse_dates(dates) {
            Ok(parsed) => processed.push_column(config.date_column, ColumnData::Date(parsed)),
            Err(bad) => warn!(value = %bad, "Could not parse date column. Keeping as is"),
        }
    }

    info!(
        rows = processed.rows(),
        columns = processed.columns().len(),
        "processed match data"
    );
    Some(processed)
}

/// `Outcome` and `OutcomeLabel` columns, or `None` if either goals column is missing.
///
/// Rows with a blank or non-numeric score get empty cells in both. Those rows fall
/// outside `Outcome ∈ {1, 0, -1}` on purpose: an unplayed match isn't a draw.
fn derive_outcomes(table: &Table, config: &NormalizeConfig) -> Option<(ColumnData, ColumnData)> {
    let home_goals = table.column(config.home_goals)?;
    let away_goals = table.column(config.away_goals)?;

    let outcomes: Vec<Option<Outcome>> = (0..table.rows())
        .map(|row| {
            let home = parse_goals(&home_goals.cell(row))?;
            let away = parse_goals(&away_goals.cell(row))?;
            Some(Outcome::from_goals(home, away))
        })
        .collect();

    let values = outcomes.iter().map(|o| o.map(Outcome::value)).collect();
    let labels = outcomes
        .iter()
        .map(|o| o.map(|o| o.label().to_string()).unwrap_or_default())
        .collect();
    Some((ColumnData::Int(values), ColumnData::Text(labels)))
}

/// Goal counts sometimes come through as floats (`2.0`) in older files.
fn parse_goals(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    cell.parse::<i64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Parses every value day-first. Blank cells become `None`.
/// Fails with the first offending value, all or nothing.
fn parse_dates(values: &[String]) -> Result<Vec<Option<NaiveDate>>, String> {
    values
        .iter()
        .map(|v| {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            parse_day_first(v).map(Some).ok_or_else(|| v.to_string())
        })
        .collect()
}

/// `dd/mm/yy`, `dd/mm/yyyy` (also with `-` or `.`), or ISO `yyyy-mm-dd`.
/// The length of the year part picks the formats, `%Y` would read `23` as the year 23.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    const ISO_FMTS: [&str; 1] = ["%Y-%m-%d"];
    const FMTS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
    const SHORT_FMTS: [&str; 3] = ["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

    let value = value.trim();
    let mut parts = value.split(['/', '-', '.']);
    let fmts: &[&str] = match (parts.next().map(str::len), parts.last().map(str::len)) {
        (Some(4), _) => &ISO_FMTS,
        (_, Some(4)) => &FMTS,
        (_, Some(2)) => &SHORT_FMTS,
        _ => return None,
    };
    fmts.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}
