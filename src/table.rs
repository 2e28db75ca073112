//! A small column-oriented table.
//!
//! The upstream files don't share a stable schema between seasons, so columns are
//! looked up by name at runtime instead of being deserialized into a fixed struct.

use chrono::NaiveDate;

/// Values of a single column. All cells of a column share one type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Raw values as delivered upstream, missing cells are empty strings.
    Text(Vec<String>),
    Int(Vec<Option<i64>>),
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders a cell the way it is written to the output file.
    pub fn cell(&self, row: usize) -> String {
        match self {
            ColumnData::Text(v) => v[row].clone(),
            ColumnData::Int(v) => v[row].map(|n| n.to_string()).unwrap_or_default(),
            ColumnData::Date(v) => v[row]
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    fn empty_like(&self, len: usize) -> ColumnData {
        match self {
            ColumnData::Text(_) => ColumnData::Text(vec![String::new(); len]),
            ColumnData::Int(_) => ColumnData::Int(vec![None; len]),
            ColumnData::Date(_) => ColumnData::Date(vec![None; len]),
        }
    }

    /// Appends `other`. Columns of different types fall back to text.
    fn extend(&mut self, other: &ColumnData) {
        match (&mut *self, other) {
            (ColumnData::Text(a), ColumnData::Text(b)) => a.extend_from_slice(b),
            (ColumnData::Int(a), ColumnData::Int(b)) => a.extend_from_slice(b),
            (ColumnData::Date(a), ColumnData::Date(b)) => a.extend_from_slice(b),
            (this, other) => {
                let mut text: Vec<String> = (0..this.len()).map(|i| this.cell(i)).collect();
                text.extend((0..other.len()).map(|i| other.cell(i)));
                *this = ColumnData::Text(text);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a text table from a header and row-major records.
    /// Records shorter than the header are padded with empty cells, surplus cells are dropped.
    pub fn from_records(headers: &[String], records: &[Vec<String>]) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values = records
                    .iter()
                    .map(|r| r.get(idx).cloned().unwrap_or_default())
                    .collect();
                Column::new(name.clone(), ColumnData::Text(values))
            })
            .collect();
        Self {
            columns,
            rows: records.len(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Adds a column, replacing one with the same name in place.
    ///
    /// # Panics
    /// If the column length doesn't match the table's row count (an empty table adopts it).
    pub fn push_column(&mut self, name: impl Into<String>, data: ColumnData) {
        let name = name.into();
        if self.columns.is_empty() {
            self.rows = data.len();
        }
        assert_eq!(
            data.len(),
            self.rows,
            "column {name} has {} rows, table has {}",
            data.len(),
            self.rows
        );
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.data = data,
            None => self.columns.push(Column::new(name, data)),
        }
    }

    /// The subset of `wanted` present in this table, in `wanted`'s order.
    pub fn available<'a>(&self, wanted: &[&'a str]) -> Vec<&'a str> {
        wanted
            .iter()
            .copied()
            .filter(|name| self.has_column(name))
            .collect()
    }

    /// Projects onto `names`, skipping names that don't exist. Rows keep their order.
    pub fn select(&self, names: &[&str]) -> Table {
        let columns = names
            .iter()
            .filter_map(|name| self.columns.iter().find(|c| c.name == *name).cloned())
            .collect();
        Table {
            columns,
            rows: self.rows,
        }
    }

    /// Row-wise union of `tables`, in order.
    /// Columns appear in first-seen order; cells a table didn't have are left empty.
    pub fn concat(tables: &[Table]) -> Table {
        let mut out = Table::new();
        for table in tables {
            for col in &table.columns {
                if !out.has_column(&col.name) {
                    out.columns
                        .push(Column::new(col.name.clone(), col.data.empty_like(out.rows)));
                }
            }
            for col in out.columns.iter_mut() {
                match table.columns.iter().find(|c| c.name == col.name) {
                    Some(src) => col.data.extend(&src.data),
                    None => {
                        let blank = col.data.empty_like(table.rows);
                        col.data.extend(&blank);
                    }
                }
            }
            out.rows += table.rows;
        }
        out
    }

    pub fn row(&self, idx: usize) -> Vec<String> {
        self.columns.iter().map(|c| c.data.cell(idx)).collect()
    }
}
