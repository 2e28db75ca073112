use csv::{ReaderBuilder, StringRecord, Trim};

use crate::season::Season;
use crate::table::{ColumnData, Table};
use crate::{Error, Result, SEASON_COLUMN};

/// Parses a season's CSV body into a text table and tags every row with the season label.
///
/// The upstream files are loosely shaped: rows can be longer or shorter than the header,
/// the header may start with a BOM and the file usually ends with a run of `,,,,` lines.
pub(crate) fn parse_season_csv(body: &str, season: Season) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(body.as_bytes());

    let header_record = reader.headers()?.clone();
    let (headers, keep) = clean_headers(&header_record);
    if headers.is_empty() {
        return Err(Error::MalformedBody {
            season: season.code(),
            reason: "header row has no column names".into(),
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: Vec<String> = keep
            .iter()
            .map(|&idx| record.get(idx).unwrap_or_default().to_string())
            .collect();
        records.push(row);
    }

    let mut table = Table::from_records(&headers, &records);
    table.push_column(
        SEASON_COLUMN,
        ColumnData::Text(vec![season.label(); table.rows()]),
    );
    Ok(table)
}

/// Returns the usable header names and the record indices they come from.
/// Blank names are dropped and repeated names keep their first occurrence.
fn clean_headers(record: &StringRecord) -> (Vec<String>, Vec<usize>) {
    let mut headers: Vec<String> = Vec::with_capacity(record.len());
    let mut keep = Vec::with_capacity(record.len());
    for (idx, name) in record.iter().enumerate() {
        let name = name.trim_start_matches('\u{feff}').trim();
        if name.is_empty() || headers.iter().any(|h| h == name) {
            continue;
        }
        headers.push(name.to_string());
        keep.push(idx);
    }
    (headers, keep)
}
