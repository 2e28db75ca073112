use std::path::Path;

use tracing::{info, warn};

use crate::table::Table;
use crate::Result;

/// Writes `table` as CSV to `path`, overwriting whatever was there.
///
/// Returns `Ok(false)` without touching the file when there's no data to save.
pub fn save_table(table: Option<&Table>, path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let table = match table {
        Some(table) if !table.is_empty() => table,
        _ => {
            warn!("No data to save");
            return Ok(false);
        }
    };

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.column_names())?;
    for row in 0..table.rows() {
        writer.write_record(table.row(row))?;
    }
    writer.flush()?;

    info!(rows = table.rows(), path = %path.display(), "Data successfully saved");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::table::ColumnData;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pl_scrap_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_writes_header_and_rows() {
        let mut table = Table::new();
        table.push_column(
            "HomeTeam",
            ColumnData::Text(vec!["Arsenal".into(), "Brighton, Hove".into()]),
        );
        table.push_column("Outcome", ColumnData::Int(vec![Some(1), None]));
        table.push_column(
            "Date",
            ColumnData::Date(vec![NaiveDate::from_ymd_opt(2023, 8, 12), None]),
        );
        let path = temp_path("rows.csv");

        assert!(save_table(Some(&table), &path).unwrap());
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            written,
            "HomeTeam,Outcome,Date\nArsenal,1,2023-08-12\n\"Brighton, Hove\",,\n"
        );
    }

    #[test]
    fn test_nothing_to_save() {
        let path = temp_path("never.csv");
        assert!(!save_table(None, &path).unwrap());
        assert!(!save_table(Some(&Table::new()), &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let mut table = Table::new();
        table.push_column("HomeTeam", ColumnData::Text(vec!["Arsenal".into()]));
        let path = temp_path("missing_dir").join("out.csv");
        assert!(save_table(Some(&table), path).is_err());
    }
}
