//! CSV export of a table view.
//!
//! Export writes every record that passes the current search and filters, in
//! the current sort order. Pagination is ignored: the export button downloads
//! the whole view, not the visible page.

use crate::error::Result;
use crate::query::Query;
use crate::value::Value;

/// One exported column: a header title and the field it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'c> {
    /// Header cell.
    pub title: &'c str,
    /// Field passed to the accessor.
    pub field: &'c str,
}

impl<'c> Column<'c> {
    /// Creates a column.
    pub const fn new(title: &'c str, field: &'c str) -> Self {
        Column { title, field }
    }
}

/// Exports the view described by `query` as CSV.
///
/// Cells use each value's display form; missing values are empty cells.
///
/// ```
/// use roster::{export_csv, Column, Query, Value};
///
/// let cities = vec!["Paris".to_string(), "Dakar, Sénégal".to_string()];
/// let columns = [Column::new("Ville", "name")];
/// let csv = export_csv(&cities, &Query::new(), &columns, |c, _| Value::String(c)).unwrap();
/// assert_eq!(csv, "Ville\nParis\n\"Dakar, Sénégal\"\n");
/// ```
pub fn export_csv<T, F>(records: &[T], query: &Query, columns: &[Column<'_>], accessor: F) -> Result<String>
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    let selected = query.select(records, &accessor)?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(columns.iter().map(|c| c.title))?;
    for record in &selected {
        wtr.write_record(
            columns
                .iter()
                .map(|c| accessor(*record, c.field).to_string()),
        )?;
    }

    tracing::debug!(rows = selected.len(), columns = columns.len(), "exported table view");

    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
