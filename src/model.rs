//! Records and search types shared by every layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A student or lecturer record. Both tables share this shape.
///
/// `id == 0` means the record has not been persisted yet. Missing JSON fields
/// decode to their zero value, so a body always carries the full record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Person {
    pub id: i64,
    #[serde(rename = "firstname")]
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    #[sqlx(rename = "lastname")]
    pub last_name: String,
    pub year: i32,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, year: i32) -> Self {
        Person {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            year,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

/// Page selector: skip `page * page_size` rows, return up to `page_size`.
/// Values are passed to the database as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Self {
        Pagination { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Sortable columns. Only these names may reach ORDER BY.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortColumn {
    Id,
    FirstName,
    LastName,
    Year,
}

impl SortColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::FirstName => "firstname",
            SortColumn::LastName => "lastname",
            SortColumn::Year => "year",
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortColumn::Id),
            "firstname" => Ok(SortColumn::FirstName),
            "lastname" => Ok(SortColumn::LastName),
            "year" => Ok(SortColumn::Year),
            _ => Err(format!("unknown sort column '{}'", s)),
        }
    }
}

impl TryFrom<String> for SortColumn {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SortColumn> for String {
    fn from(c: SortColumn) -> Self {
        c.column_name().to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(format!("unknown sort direction '{}'", s)),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SortDirection> for String {
    fn from(d: SortDirection) -> Self {
        d.as_sql().to_string()
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortBy {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        SortBy { column, direction }
    }
}

/// Body of `GET /search`. `sortBy` is required; the other fields default to empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_string: String,
    pub sort_by: SortBy,
    #[serde(default)]
    pub pagination: Pagination,
}

/// One page of matches plus the number of matches ignoring pagination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub total_elements: i64,
    pub data: Vec<Person>,
}
