/// A single football season, spanning `start_year` into the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + 1
    }

    /// The key football-data uses in its archive paths, e.g. `1920` for 2019-2020.
    pub fn code(&self) -> String {
        format!(
            "{:02}{:02}",
            self.start_year.rem_euclid(100),
            self.end_year().rem_euclid(100)
        )
    }

    /// Human readable label stored in the `Season` column, e.g. `2019-2020`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year())
    }
}

/// Returns the `count` most recent seasons, oldest first, the last one ending in `current_year`.
pub fn resolve_seasons(count: usize, current_year: i32) -> Vec<Season> {
    let first = current_year - count as i32;
    (0..count as i32).map(|i| Season::new(first + i)).collect()
}
