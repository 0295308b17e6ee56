//! Query state owned by one table.
//!
//! Every entity table keeps the same handful of UI state: the search box, the
//! filter dropdowns, the sorted column and the pagination controls. The
//! [`QueryState`] container holds that state for a record type and applies the
//! table lifecycle rules:
//!
//! - changing the search term, a filter or the sort resets to page 1
//! - changing the page size keeps the page, clamped to the new page count
//! - clicking the sorted column flips direction, clicking another column sorts
//!   it ascending

use std::fmt;
use std::marker::PhantomData;

use crate::config::TableConfig;
use crate::error::{Result, RosterError};
use crate::filter::FilterValue;
use crate::ordering::{Dir, SortKey};
use crate::page::{page_count, Page};
use crate::pipeline;
use crate::query::Query;
use crate::traits::Tabular;
use crate::value::Value;

/// Query state for a table of `T` records.
///
/// # Example
///
/// ```
/// use roster::{QueryState, Tabular, Value};
///
/// struct Student {
///     last_name: String,
/// }
///
/// impl Tabular for Student {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "last_name" => Value::String(&self.last_name),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let students: Vec<Student> = ["Petit", "Dupont", "Martin"]
///     .into_iter()
///     .map(|n| Student { last_name: n.to_string() })
///     .collect();
///
/// let mut state = QueryState::<Student>::new()
///     .search_in(["last_name"])
///     .default_sort("last_name", roster::Dir::Asc);
///
/// state.toggle_sort("last_name"); // same column: now descending
/// let page = state.evaluate(&students).unwrap();
/// assert_eq!(page.items[0].last_name, "Petit");
/// ```
pub struct QueryState<T> {
    query: Query,
    config: TableConfig,
    last_total_items: Option<usize>,
    _record: PhantomData<fn(&T)>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for QueryState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryState")
            .field("query", &self.query)
            .field("config", &self.config)
            .field("last_total_items", &self.last_total_items)
            .finish()
    }
}

impl<T> QueryState<T> {
    /// Creates state with the default configuration.
    pub fn new() -> Self {
        let config = TableConfig::default();
        QueryState {
            query: config.query(),
            config,
            last_total_items: None,
            _record: PhantomData,
        }
    }

    /// Creates state from a validated configuration.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(QueryState {
            query: config.query(),
            config,
            last_total_items: None,
            _record: PhantomData,
        })
    }

    /// Sets the fields the search box matches against.
    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query = self.query.search_in(fields);
        self
    }

    /// Sets the sort the table opens with.
    pub fn default_sort(mut self, field: &str, dir: Dir) -> Self {
        self.query = self.query.sort_by(field, dir);
        self
    }

    /// Returns the current query.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.query.get_page()
    }

    /// Page count from the last evaluation, if any.
    pub fn total_pages(&self) -> Option<usize> {
        self.last_total_items
            .map(|total| page_count(total, self.query.get_page_size()))
    }

    // ========================================================================
    // Criteria changes (reset to page 1)
    // ========================================================================

    /// Updates the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_search(term.into());
        self.reset_page("search");
    }

    /// Sets a filter dropdown. [`FilterValue::All`] lifts the constraint.
    pub fn set_filter(&mut self, field: &str, value: impl Into<FilterValue>) {
        self.query.set_filter(field, value.into());
        self.reset_page("filter");
    }

    /// Resets one filter to "all".
    pub fn clear_filter(&mut self, field: &str) {
        self.set_filter(field, FilterValue::All);
    }

    /// Resets every filter to "all".
    pub fn clear_filters(&mut self) {
        self.query.reset_filters();
        self.reset_page("filters cleared");
    }

    /// Handles a click on a column header.
    ///
    /// The sorted column flips direction; any other column becomes the sort
    /// key, ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        let next = match self.query.sort_key() {
            Some(current) if current.field == field => SortKey::new(field, current.dir.flip()),
            _ => SortKey::asc(field),
        };
        self.query.set_sort(Some(next));
        self.reset_page("sort");
    }

    /// Sorts by `field` in the given direction.
    pub fn set_sort(&mut self, field: &str, dir: Dir) {
        self.query.set_sort(Some(SortKey::new(field, dir)));
        self.reset_page("sort");
    }

    fn reset_page(&mut self, cause: &'static str) {
        tracing::trace!(cause, "table criteria changed, back to page 1");
        self.query.set_page(1);
    }

    // ========================================================================
    // Pagination controls
    // ========================================================================

    /// Jumps to `page`. Pages past the end are clamped at evaluation.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(RosterError::InvalidQuery {
                reason: "page numbers start at 1",
            });
        }
        self.query.set_page(page);
        Ok(())
    }

    /// Changes the page size without resetting the page.
    ///
    /// The current page is clamped to the page count the new size gives for
    /// the last evaluated result.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(RosterError::InvalidQuery {
                reason: "page size must be at least 1",
            });
        }
        if !self.config.allows_page_size(size) {
            return Err(RosterError::PageSizeNotAllowed {
                size,
                allowed: self.config.page_size_options.clone(),
            });
        }
        self.query.set_page_size(size);
        if let Some(total_pages) = self.total_pages() {
            if self.query.get_page() > total_pages {
                tracing::trace!(total_pages, "page size change moved past the end, clamping");
                self.query.set_page(total_pages);
            }
        }
        Ok(())
    }

    /// Goes to the first page.
    pub fn first_page(&mut self) {
        self.query.set_page(1);
    }

    /// Goes back one page, stopping at the first.
    pub fn previous_page(&mut self) {
        let page = self.query.get_page().saturating_sub(1).max(1);
        self.query.set_page(page);
    }

    /// Goes forward one page, stopping at the last known page.
    pub fn next_page(&mut self) {
        let mut page = self.query.get_page() + 1;
        if let Some(total_pages) = self.total_pages() {
            page = page.min(total_pages);
        }
        self.query.set_page(page);
    }

    /// Goes to the last known page.
    pub fn last_page(&mut self) {
        if let Some(total_pages) = self.total_pages() {
            self.query.set_page(total_pages);
        }
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluates the current query with an explicit accessor.
    ///
    /// Remembers the result size for the pagination controls and stores the
    /// clamped page back into the state.
    pub fn evaluate_with<'a, F>(&mut self, records: &'a [T], accessor: F) -> Result<Page<'a, T>>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let page = pipeline::evaluate(records, &self.query, accessor)?;
        self.last_total_items = Some(page.total_items);
        self.query.set_page(page.page);
        Ok(page)
    }
}

impl<T: Tabular> QueryState<T> {
    /// Evaluates the current query.
    pub fn evaluate<'a>(&mut self, records: &'a [T]) -> Result<Page<'a, T>> {
        self.evaluate_with(records, T::accessor)
    }
}
