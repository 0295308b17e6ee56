//! Query builder.
//!
//! The [`Query`] struct provides a fluent builder API describing one table
//! view: a search term, exact-match filters, a sort key and a page request.
//! Execution lives in [`crate::pipeline`]; the methods here delegate to it.

use crate::error::{Result, RosterError};
use crate::filter::{Filter, FilterValue};
use crate::ordering::{Dir, SortKey};
use crate::page::Page;
use crate::pipeline;
use crate::traits::Tabular;
use crate::value::Value;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A declarative description of one table view: search, filters, sort and page.
///
/// # Example
///
/// ```
/// use roster::{Query, Value, Number};
///
/// struct Student {
///     first_name: String,
///     last_name: String,
///     department: String,
/// }
///
/// fn accessor<'a>(s: &'a Student, field: &str) -> Value<'a> {
///     match field {
///         "first_name" => Value::String(&s.first_name),
///         "last_name" => Value::String(&s.last_name),
///         "department" => Value::String(&s.department),
///         _ => Value::None,
///     }
/// }
///
/// let students = vec![
///     Student { first_name: "Marie".into(), last_name: "Dupont".into(), department: "Sciences".into() },
///     Student { first_name: "Thomas".into(), last_name: "Martin".into(), department: "Lettres".into() },
/// ];
///
/// let query = Query::new()
///     .search("MARIE")
///     .search_in(["first_name", "last_name"])
///     .filter("department", "Sciences")
///     .sort_asc("last_name")
///     .page_size(10)
///     .build()
///     .unwrap();
///
/// let page = query.evaluate(&students, accessor).unwrap();
/// assert_eq!(page.total_items, 1);
/// assert_eq!(page.items[0].last_name, "Dupont");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    search: String,
    search_fields: Vec<String>,
    fold_diacritics: bool,
    filters: Vec<Filter>,
    sort: Option<SortKey>,
    strict_sort: bool,
    page: usize,
    page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Query {
            search: String::new(),
            search_fields: Vec::new(),
            fold_diacritics: false,
            filters: Vec::new(),
            sort: None,
            strict_sort: false,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Query {
    /// Creates a new query.
    ///
    /// An empty query matches all records, keeps their input order and shows
    /// the first [`DEFAULT_PAGE_SIZE`] of them.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Sets the fields the search term is matched against.
    ///
    /// With no search fields, a non-empty term matches nothing.
    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Enables accent-insensitive search (`"ecole"` finds `"École"`).
    ///
    /// Folding only touches letters; emoji and symbols must match as typed.
    pub fn fold_diacritics(mut self, fold: bool) -> Self {
        self.fold_diacritics = fold;
        self
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Constrains `field` to equal `value`.
    ///
    /// A second filter on the same field replaces the first. Passing
    /// [`FilterValue::All`] lifts the constraint.
    pub fn filter(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.set_filter(field, value.into());
        self
    }

    /// Sets `field` to the "all" sentinel.
    pub fn filter_all(self, field: &str) -> Self {
        self.filter(field, FilterValue::All)
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Sorts by `field` in the given direction.
    pub fn sort_by(mut self, field: &str, dir: Dir) -> Self {
        self.sort = Some(SortKey::new(field, dir));
        self
    }

    /// Sorts ascending by `field`.
    pub fn sort_asc(self, field: &str) -> Self {
        self.sort_by(field, Dir::Asc)
    }

    /// Sorts descending by `field`.
    pub fn sort_desc(self, field: &str) -> Self {
        self.sort_by(field, Dir::Desc)
    }

    /// Keeps input order.
    pub fn unsorted(mut self) -> Self {
        self.sort = None;
        self
    }

    /// Makes the sort stage fail on keys of mismatched types instead of
    /// leaving the order unchanged.
    pub fn strict_sort(mut self, strict: bool) -> Self {
        self.strict_sort = strict;
        self
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Sets the 1-based page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Finalizes the query, rejecting a zero page or page size.
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Checks the pagination parameters.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(RosterError::InvalidQuery {
                reason: "page size must be at least 1",
            });
        }
        if self.page == 0 {
            return Err(RosterError::InvalidQuery {
                reason: "page numbers start at 1",
            });
        }
        Ok(())
    }

    // ========================================================================
    // In-place updates (used by QueryState)
    // ========================================================================

    pub(crate) fn set_search(&mut self, term: String) {
        self.search = term;
    }

    pub(crate) fn set_filter(&mut self, field: &str, value: FilterValue) {
        match self.filters.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.value = value,
            None => self.filters.push(Filter::new(field, value)),
        }
    }

    pub(crate) fn reset_filters(&mut self) {
        for filter in &mut self.filters {
            filter.value = FilterValue::All;
        }
    }

    pub(crate) fn set_sort(&mut self, sort: Option<SortKey>) {
        self.sort = sort;
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub(crate) fn set_page_size(&mut self, size: usize) {
        self.page_size = size;
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search term as entered.
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Returns the fields searched by the search term.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Returns `true` if accent folding is enabled for search.
    pub fn folds_diacritics(&self) -> bool {
        self.fold_diacritics
    }

    /// Returns the filters, including those set to "all".
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the constraint on `field`, [`FilterValue::All`] if none.
    pub fn filter_value(&self, field: &str) -> &FilterValue {
        const ALL: &FilterValue = &FilterValue::All;
        self.filters
            .iter()
            .find(|f| f.field == field)
            .map_or(ALL, |f| &f.value)
    }

    /// Returns the sort key, if any.
    pub fn sort_key(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Returns `true` if strict sorting is enabled.
    pub fn is_strict_sort(&self) -> bool {
        self.strict_sort
    }

    /// Returns the requested page number.
    pub fn get_page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    /// Returns `true` if neither search nor filters constrain the result.
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty() && self.filters.iter().all(|f| f.value.is_all())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record passes search and filters.
    pub fn matches<T, F>(&self, record: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        pipeline::matcher(self).matches(record, &accessor)
    }

    /// Counts the records that pass search and filters.
    pub fn count<T, F>(&self, records: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let matcher = pipeline::matcher(self);
        records
            .iter()
            .filter(|record| matcher.matches(*record, &accessor))
            .count()
    }

    /// Returns every record that passes search and filters, sorted, without
    /// pagination.
    pub fn select<'a, T, F>(&self, records: &'a [T], accessor: F) -> Result<Vec<&'a T>>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        pipeline::select(records, self, &accessor)
    }

    /// Evaluates the query: search, filter, sort, then paginate.
    pub fn evaluate<'a, T, F>(&self, records: &'a [T], accessor: F) -> Result<Page<'a, T>>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        pipeline::evaluate(records, self, accessor)
    }

    /// Evaluates the query against records that describe their own fields.
    pub fn evaluate_records<'a, T: Tabular>(&self, records: &'a [T]) -> Result<Page<'a, T>> {
        pipeline::evaluate(records, self, T::accessor)
    }
}
