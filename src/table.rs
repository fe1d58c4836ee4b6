//! Tabular step arguments.
//!
//! A [`StepTable`] is the grid a runner attaches to a step. The first row may
//! act as a header, in which case cells can be addressed by header name as
//! well as by position. Every row has the same number of cells.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// Prefix of the routing text produced for table arguments.
pub const TABLE_ROUTE_PREFIX: &str = "table:";

/// Rectangular grid of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct StepTable {
    rows: Vec<Vec<String>>,
}

impl StepTable {
    /// Build a table from rows of cells.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::RaggedTable`] when any row has a different
    /// cell count from the first row.
    pub fn new<R, C>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let collected: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::try_from(collected)
    }

    /// All rows, including the header row when present.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consume the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Number of rows, header included.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells per row; zero for an empty table.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The first row, read as column headers.
    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Cell at positional `(row, column)`.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Position of the first header equal to `header`.
    #[must_use]
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers()?.iter().position(|name| name == header)
    }

    /// Cell in `row` under the column named `header`.
    #[must_use]
    pub fn cell_by_header(&self, row: usize, header: &str) -> Option<&str> {
        self.cell(row, self.column_index(header)?)
    }

    /// Data rows keyed by header name.
    ///
    /// When a header repeats, the rightmost column wins.
    #[must_use]
    pub fn hashes(&self) -> Vec<IndexMap<&str, &str>> {
        let Some((headers, data)) = self.rows.split_first() else {
            return Vec::new();
        };
        data.iter()
            .map(|row| {
                headers
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }

    /// Two-column table read as key/value pairs, one pair per row.
    ///
    /// Returns `None` unless the table has exactly two columns.
    #[must_use]
    pub fn rows_hash(&self) -> Option<IndexMap<&str, &str>> {
        if self.column_count() != 2 {
            return None;
        }
        self.rows
            .iter()
            .map(|row| match row.as_slice() {
                [key, value] => Some((key.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Text the routing registry matches table routes against.
    ///
    /// This is `table:` followed by the first row joined with commas.
    #[must_use]
    pub fn routing_text(&self) -> String {
        let header = self.headers().map(|cells| cells.join(",")).unwrap_or_default();
        format!("{TABLE_ROUTE_PREFIX}{header}")
    }

    /// Build a new table by applying `f` to every cell in row-then-column
    /// order. The first error aborts the mapping.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `f`.
    pub fn try_map_cells<F, E>(&self, mut f: F) -> std::result::Result<Self, E>
    where
        F: FnMut(&str) -> std::result::Result<String, E>,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| f(cell))
                    .collect::<std::result::Result<Vec<String>, E>>()
            })
            .collect::<std::result::Result<Vec<Vec<String>>, E>>()?;
        Ok(Self { rows })
    }
}

impl TryFrom<Vec<Vec<String>>> for StepTable {
    type Error = TransformError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self> {
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(TransformError::RaggedTable {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { rows })
    }
}

impl From<StepTable> for Vec<Vec<String>> {
    fn from(table: StepTable) -> Self {
        table.rows
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests build known-good tables")]

    use super::*;

    fn people() -> StepTable {
        StepTable::new([
            ["name", "role"],
            ["alice", "lecturer"],
            ["bob", "student"],
        ])
        .expect("rectangular table")
    }

    #[test]
    fn reports_shape() {
        let table = people();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(StepTable::default().column_count(), 0);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = StepTable::new(vec![vec!["a", "b"], vec!["c"]]).expect_err("ragged");
        assert!(
            matches!(
                err,
                TransformError::RaggedTable {
                    row: 1,
                    expected: 2,
                    found: 1
                }
            ),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn addresses_cells_by_position_and_header() {
        let table = people();
        assert_eq!(table.cell(1, 0), Some("alice"));
        assert_eq!(table.cell(3, 0), None);
        assert_eq!(table.column_index("role"), Some(1));
        assert_eq!(table.cell_by_header(2, "role"), Some("student"));
        assert_eq!(table.cell_by_header(2, "missing"), None);
    }

    #[test]
    fn hashes_key_data_rows_by_header() {
        let table = people();
        let hashes = table.hashes();
        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes.first().and_then(|row| row.get("name")), Some(&"alice"));
        assert_eq!(hashes.get(1).and_then(|row| row.get("role")), Some(&"student"));
    }

    #[test]
    fn rows_hash_needs_two_columns() {
        let pairs = StepTable::new([["username", "admin"], ["password", "secret"]])
            .expect("rectangular table");
        let hash = pairs.rows_hash().expect("two columns");
        assert_eq!(hash.get("password"), Some(&"secret"));

        let wide = StepTable::new([["a", "b", "c"]]).expect("rectangular table");
        assert!(wide.rows_hash().is_none());
    }

    #[test]
    fn routing_text_joins_first_row() {
        assert_eq!(people().routing_text(), "table:name,role");
        assert_eq!(StepTable::default().routing_text(), "table:");
    }

    #[test]
    fn try_map_cells_preserves_shape() {
        let upper = people()
            .try_map_cells(|cell| Ok::<_, TransformError>(cell.to_uppercase()))
            .expect("infallible mapping");
        assert_eq!(upper.row_count(), 3);
        assert_eq!(upper.column_count(), 2);
        assert_eq!(upper.cell(2, 1), Some("STUDENT"));
    }

    #[test]
    fn deserialises_from_nested_arrays() {
        let table: StepTable =
            serde_json::from_str(r#"[["a","b"],["c","d"]]"#).expect("valid table json");
        assert_eq!(table.cell(1, 1), Some("d"));
        assert!(serde_json::from_str::<StepTable>(r#"[["a","b"],["c"]]"#).is_err());
    }
}
