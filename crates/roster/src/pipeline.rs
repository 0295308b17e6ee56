//! The tabular data pipeline: search → filter → sort → paginate.
//!
//! Every stage is pure. The input slice is never reordered or mutated; stages
//! work on a vector of references into it.

use crate::error::Result;
use crate::filter::Filter;
use crate::ordering::{sort_records, SortOutcome};
use crate::page::Page;
use crate::query::Query;
use crate::search::SearchTerm;
use crate::value::Value;

/// Search and filter predicates of a query, normalized once per evaluation.
pub(crate) struct Matcher<'q> {
    search: SearchTerm,
    search_fields: &'q [String],
    filters: Vec<&'q Filter>,
}

impl Matcher<'_> {
    pub(crate) fn matches<T, F>(&self, record: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.search.matches(record, self.search_fields, accessor)
            && self.filters.iter().all(|filter| filter.matches(record, accessor))
    }
}

pub(crate) fn matcher(query: &Query) -> Matcher<'_> {
    Matcher {
        search: SearchTerm::new(query.search_term(), query.folds_diacritics()),
        search_fields: query.search_fields(),
        filters: query
            .filters()
            .iter()
            .filter(|filter| !filter.value.is_all())
            .collect(),
    }
}

/// Runs the search, filter and sort stages.
pub(crate) fn select<'a, T, F>(records: &'a [T], query: &Query, accessor: &F) -> Result<Vec<&'a T>>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let matcher = matcher(query);
    let mut matched: Vec<&'a T> = records
        .iter()
        .filter(|record| matcher.matches(*record, accessor))
        .collect();

    if let Some(key) = query.sort_key() {
        let outcome = sort_records(&mut matched, key, accessor, query.is_strict_sort())?;
        if outcome == SortOutcome::Unchanged {
            tracing::debug!(
                field = %key.field,
                "sort keys have mismatched types, keeping input order"
            );
        }
    }

    Ok(matched)
}

/// Evaluates `query` over `records`.
///
/// Returns the requested page, clamped into range, together with the number
/// of matching records and pages. Fails only for a zero page or page size,
/// or for mismatched sort keys under strict sorting.
///
/// The accessor is called as-is; a panic inside it propagates to the caller.
///
/// ```
/// use roster::{evaluate, Query, Value};
///
/// let names = vec!["Lucas".to_string(), "Emma".to_string(), "Hugo".to_string()];
/// let query = Query::new().sort_asc("name").page_size(2).page(2);
///
/// let page = evaluate(&names, &query, |s, _field| Value::String(s)).unwrap();
/// assert_eq!(page.items, vec![&"Lucas".to_string()]);
/// assert_eq!(page.total_pages, 2);
/// ```
pub fn evaluate<'a, T, F>(records: &'a [T], query: &Query, accessor: F) -> Result<Page<'a, T>>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    query.validate()?;
    let matched = select(records, query, &accessor)?;
    let page = Page::slice(matched, query.get_page(), query.get_page_size());

    tracing::debug!(
        records = records.len(),
        matched = page.total_items,
        page = page.page,
        total_pages = page.total_pages,
        "evaluated table query"
    );

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::filter::FilterValue;
    use crate::value::Number;

    #[derive(Debug, Clone, PartialEq)]
    struct Registration {
        student_name: &'static str,
        student_id: u64,
        department: &'static str,
        status: &'static str,
        registration_date: &'static str,
    }

    fn accessor<'a>(r: &'a Registration, field: &str) -> Value<'a> {
        match field {
            "student_name" => Value::String(r.student_name),
            "student_id" => Value::Number(Number::U64(r.student_id)),
            "department" => Value::String(r.department),
            "status" => Value::String(r.status),
            "registration_date" => Value::String(r.registration_date),
            _ => Value::None,
        }
    }

    fn registrations() -> Vec<Registration> {
        let rows = [
            ("Marie Dupont", 20230001, "Sciences", "approved", "2023-07-15"),
            ("Thomas Martin", 20230002, "Lettres", "approved", "2023-07-18"),
            ("Sophie Bernard", 20220015, "Droit", "approved", "2023-07-10"),
            ("Lucas Petit", 20230045, "Sciences", "pending", "2023-08-05"),
            ("Emma Leroy", 20230010, "Économie", "pending", "2023-08-12"),
            ("Hugo Moreau", 20210078, "Sciences", "approved", "2023-07-22"),
            ("Chloé Dubois", 20220089, "Lettres", "rejected", "2023-07-30"),
        ];
        rows.into_iter()
            .map(
                |(student_name, student_id, department, status, registration_date)| Registration {
                    student_name,
                    student_id,
                    department,
                    status,
                    registration_date,
                },
            )
            .collect()
    }

    fn names(page: &Page<'_, Registration>) -> Vec<&'static str> {
        page.items.iter().map(|r| r.student_name).collect()
    }

    #[test]
    fn empty_query_returns_first_page_in_input_order() {
        let data = registrations();
        let page = evaluate(&data, &Query::new(), accessor).unwrap();
        assert_eq!(page.total_items, 7);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.first().map(|r| r.student_name), Some("Marie Dupont"));
    }

    #[test]
    fn search_spans_fields_including_numbers() {
        let data = registrations();
        let query = Query::new()
            .search("2022")
            .search_in(["student_name", "student_id"]);
        let page = evaluate(&data, &query, accessor).unwrap();
        assert_eq!(names(&page), vec!["Sophie Bernard", "Chloé Dubois"]);
    }

    #[test]
    fn search_without_fields_matches_nothing() {
        let data = registrations();
        let page = evaluate(&data, &Query::new().search("marie"), accessor).unwrap();
        assert_eq!(page.total_items, 0);
        assert!(page.is_empty());
    }

    #[test]
    fn filters_and_together() {
        let data = registrations();
        let query = Query::new()
            .filter("department", "Sciences")
            .filter("status", "approved");
        let page = evaluate(&data, &query, accessor).unwrap();
        assert_eq!(names(&page), vec!["Marie Dupont", "Hugo Moreau"]);
    }

    #[test]
    fn all_sentinel_is_ignored() {
        let data = registrations();
        let query = Query::new()
            .filter("department", FilterValue::All)
            .filter("status", FilterValue::parse("pending"));
        let page = evaluate(&data, &query, accessor).unwrap();
        assert_eq!(names(&page), vec!["Lucas Petit", "Emma Leroy"]);
    }

    #[test]
    fn sorts_by_date_descending() {
        let data = registrations();
        let query = Query::new().sort_desc("registration_date").page_size(3);
        let page = evaluate(&data, &query, accessor).unwrap();
        assert_eq!(names(&page), vec!["Emma Leroy", "Lucas Petit", "Chloé Dubois"]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn input_is_not_mutated() {
        let data = registrations();
        let before = data.clone();
        let query = Query::new().sort_asc("student_name");
        let first = evaluate(&data, &query, accessor).unwrap();
        let second = evaluate(&data, &query, accessor).unwrap();
        assert_eq!(first, second);
        assert_eq!(data, before);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let data = registrations();
        let err = evaluate(&data, &Query::new().page_size(0), accessor).unwrap_err();
        assert!(matches!(err, RosterError::InvalidQuery { .. }));
    }

    #[test]
    fn strict_sort_error_surfaces_from_evaluate() {
        fn mixed<'a>(n: &'a i64, _field: &str) -> Value<'a> {
            if *n == 2 {
                Value::Bool(true)
            } else {
                Value::Number(Number::I64(*n))
            }
        }

        let data = vec![1i64, 2, 3];
        let query = Query::new().sort_asc("v").strict_sort(true);
        let err = evaluate(&data, &query, mixed).unwrap_err();
        assert!(matches!(err, RosterError::UnsupportedSortField { .. }));
    }
}
