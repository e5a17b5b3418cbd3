use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Result, TravelMapError};
use crate::utils::constants::{CITY_NAME_COLUMN, CITY_RANK_COLUMN, DEFAULT_RANK_LIMIT};

/// A single city from the source spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub rank: String,
}

impl City {
    pub fn new(name: impl Into<String>, rank: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rank: rank.into(),
        }
    }
}

/// The city spreadsheet as loaded, with every original column kept as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CityTable {
    /// Build a table; short rows are padded with empty cells to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TravelMapError::MissingColumn(name.to_string()))
    }

    /// Keep only the rows whose rank passes the filter, preserving file order
    pub fn filter_by_rank(&self, filter: &RankFilter) -> Result<CityTable> {
        let rank_idx = self.column_index(CITY_RANK_COLUMN)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| filter.accepts(&row[rank_idx]))
            .cloned()
            .collect();

        Ok(CityTable {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Project the `Name` and `Rang` columns into city records
    pub fn cities(&self) -> Result<Vec<City>> {
        let name_idx = self.column_index(CITY_NAME_COLUMN)?;
        let rank_idx = self.column_index(CITY_RANK_COLUMN)?;

        Ok(self
            .rows
            .iter()
            .map(|row| City::new(row[name_idx].clone(), row[rank_idx].clone()))
            .collect())
    }
}

/// How rank cells are compared against the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankComparison {
    /// Plain string ordering, so "1000." sorts before "201."
    #[default]
    Lexicographic,
    /// Leading digits parsed as an integer; unparseable ranks are rejected
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankFilter {
    pub limit: String,
    pub comparison: RankComparison,
}

impl RankFilter {
    pub fn new(limit: impl Into<String>, comparison: RankComparison) -> Self {
        Self {
            limit: limit.into(),
            comparison,
        }
    }

    pub fn accepts(&self, rank: &str) -> bool {
        match self.comparison {
            RankComparison::Lexicographic => rank.cmp(self.limit.as_str()) != Ordering::Greater,
            RankComparison::Numeric => match (parse_rank(rank), parse_rank(&self.limit)) {
                (Some(rank), Some(limit)) => rank <= limit,
                _ => false,
            },
        }
    }
}

impl Default for RankFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RANK_LIMIT, RankComparison::default())
    }
}

/// Parse ranks written as "12." or "12"
fn parse_rank(rank: &str) -> Option<u32> {
    let digits: String = rank
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
