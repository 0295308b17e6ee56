//! Terminal rendering of a table page.

use roster::{Column, Page, Value};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cells wider than this are truncated with an ellipsis.
pub const MAX_CELL_WIDTH: usize = 32;

const GAP: &str = "  ";

/// Renders a page as an aligned table followed by the pagination footer.
///
/// An empty page renders `No <title> found.` in place of the table.
pub fn text<T, F>(page: &Page<'_, T>, columns: &[Column<'_>], title: &str, accessor: F) -> String
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    if page.is_empty() {
        return format!("No {title} found.\n");
    }

    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| truncate_to_width(&accessor(*record, column.field).to_string(), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(column.title.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, columns.iter().map(|c| c.title), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out.push('\n');
    out.push_str(&footer(page));
    out.push('\n');
    out
}

/// `Page 2 of 5 · showing 11–20 of 42`
pub fn footer<T>(page: &Page<'_, T>) -> String {
    format!(
        "Page {} of {} · showing {}–{} of {}",
        page.page,
        page.total_pages,
        page.first_index(),
        page.last_index(),
        page.total_items
    )
}

fn push_row<'s>(out: &mut String, cells: impl Iterator<Item = &'s str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Fits a cell into `max_width` terminal columns, replacing the cut tail
/// with `…`. Wide characters (CJK, emoji) count for two columns.
pub fn truncate_to_width(cell: &str, max_width: usize) -> String {
    if cell.width() <= max_width {
        return cell.to_string();
    }
    let budget = max_width.saturating_sub('…'.width().unwrap_or(1));
    let mut used = 0;
    let kept: String = cell
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    format!("{kept}…")
}
