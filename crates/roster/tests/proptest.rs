//! Property-based tests for the table pipeline using proptest.

use std::collections::BTreeSet;

use proptest::prelude::*;
use roster::{evaluate, page_count, Number, Query, Value};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: usize,
    name: String,
    department: String,
    credits: i64,
    active: bool,
}

fn accessor<'a>(row: &'a Row, field: &str) -> Value<'a> {
    match field {
        "id" => Value::Number(Number::from(row.id)),
        "name" => Value::String(&row.name),
        "department" => Value::String(&row.department),
        "credits" => Value::Number(Number::I64(row.credits)),
        "active" => Value::Bool(row.active),
        _ => Value::None,
    }
}

const DEPARTMENTS: [&str; 4] = ["Sciences", "Lettres", "Droit", "Économie"];

fn rows_strategy(max: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        ("[a-zé]{1,8}", 0..DEPARTMENTS.len(), -5i64..5, any::<bool>()),
        0..max,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(id, (name, dept, credits, active))| Row {
                id,
                name,
                department: DEPARTMENTS[dept].to_string(),
                credits,
                active,
            })
            .collect()
    })
}

fn ids(items: &[&Row]) -> Vec<usize> {
    items.iter().map(|row| row.id).collect()
}

fn id_set(items: &[&Row]) -> BTreeSet<usize> {
    items.iter().map(|row| row.id).collect()
}

fn owned(items: &[&Row]) -> Vec<Row> {
    items.iter().map(|row| (*row).clone()).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Evaluating the same query twice gives the same page.
    #[test]
    fn evaluation_is_idempotent(
        rows in rows_strategy(60),
        term in "[a-z]{0,2}",
        page in 1usize..8,
        page_size in 1usize..15,
    ) {
        let query = Query::new()
            .search(term)
            .search_in(["name", "department"])
            .sort_desc("credits")
            .page(page)
            .page_size(page_size);

        let first = evaluate(&rows, &query, accessor).unwrap();
        let second = evaluate(&rows, &query, accessor).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Walking every page yields each matching record exactly once, in sorted
    /// order.
    #[test]
    fn pages_partition_the_result(
        rows in rows_strategy(60),
        page_size in 1usize..12,
    ) {
        let base = Query::new().sort_asc("name").page_size(page_size);
        let all = base.select(&rows, accessor).unwrap();
        let total_pages = page_count(all.len(), page_size);

        let mut walked = Vec::new();
        for page in 1..=total_pages {
            let result = evaluate(&rows, &base.clone().page(page), accessor).unwrap();
            prop_assert_eq!(result.total_items, all.len());
            prop_assert_eq!(result.total_pages, total_pages);
            walked.extend(result.items);
        }
        prop_assert_eq!(ids(&walked), ids(&all));
    }

    /// A page never holds more than `page_size` records.
    #[test]
    fn page_never_exceeds_page_size(
        rows in rows_strategy(80),
        page in 1usize..20,
        page_size in 1usize..20,
    ) {
        let query = Query::new().page(page).page_size(page_size);
        let result = evaluate(&rows, &query, accessor).unwrap();
        prop_assert!(result.items.len() <= page_size);
        prop_assert!(result.total_pages >= 1);
        prop_assert!(result.page >= 1 && result.page <= result.total_pages);
    }

    /// Pages past the end return the last page.
    #[test]
    fn out_of_range_page_clamps_to_last(
        rows in rows_strategy(40),
        page_size in 1usize..10,
        overshoot in 1usize..50,
    ) {
        let total_pages = page_count(rows.len(), page_size);
        let last = evaluate(&rows, &Query::new().page(total_pages).page_size(page_size), accessor).unwrap();
        let past = evaluate(
            &rows,
            &Query::new().page(total_pages + overshoot).page_size(page_size),
            accessor,
        )
        .unwrap();
        prop_assert_eq!(past.page, total_pages);
        prop_assert_eq!(ids(&past.items), ids(&last.items));
    }

    /// Every record on a filtered page satisfies every active filter.
    #[test]
    fn filters_are_conjunctive(
        rows in rows_strategy(60),
        dept in 0..DEPARTMENTS.len(),
        active in any::<bool>(),
    ) {
        let query = Query::new()
            .filter("department", DEPARTMENTS[dept])
            .filter("active", active)
            .page_size(100);
        let result = evaluate(&rows, &query, accessor).unwrap();

        let expected = rows
            .iter()
            .filter(|row| row.department == DEPARTMENTS[dept] && row.active == active)
            .count();
        prop_assert_eq!(result.total_items, expected);
        for row in &result.items {
            prop_assert_eq!(row.department.as_str(), DEPARTMENTS[dept]);
            prop_assert_eq!(row.active, active);
        }
    }

    /// The combined result is the intersection of what the search and each
    /// filter select on their own.
    #[test]
    fn combined_result_is_intersection_of_stages(
        rows in rows_strategy(60),
        term in "[a-zé]{0,2}",
        dept in 0..DEPARTMENTS.len(),
        credits in -5i64..5,
        active in any::<bool>(),
    ) {
        let search = Query::new().search(term.as_str()).search_in(["name", "department"]);
        let filters = [
            Query::new().filter("department", DEPARTMENTS[dept]),
            Query::new().filter("credits", credits),
            Query::new().filter("active", active),
        ];
        let combined = search
            .clone()
            .filter("department", DEPARTMENTS[dept])
            .filter("credits", credits)
            .filter("active", active);

        let mut expected = id_set(&search.select(&rows, accessor).unwrap());
        for filter in &filters {
            let selected = id_set(&filter.select(&rows, accessor).unwrap());
            expected = expected.intersection(&selected).copied().collect();
        }
        prop_assert_eq!(id_set(&combined.select(&rows, accessor).unwrap()), expected);
    }

    /// Searching then filtering keeps the same records, in the same order, as
    /// filtering then searching.
    #[test]
    fn search_and_filter_commute(
        rows in rows_strategy(60),
        term in "[a-zé]{0,2}",
        dept in 0..DEPARTMENTS.len(),
        active in any::<bool>(),
    ) {
        let search = Query::new().search(term.as_str()).search_in(["name", "department"]);
        let filter = Query::new()
            .filter("department", DEPARTMENTS[dept])
            .filter("active", active);

        let searched = owned(&search.select(&rows, accessor).unwrap());
        let search_then_filter = ids(&filter.select(&searched, accessor).unwrap());

        let filtered = owned(&filter.select(&rows, accessor).unwrap());
        let filter_then_search = ids(&search.select(&filtered, accessor).unwrap());

        prop_assert_eq!(search_then_filter, filter_then_search);
    }

    /// Records with equal sort keys keep their input order.
    #[test]
    fn sort_is_stable(rows in rows_strategy(60), descending in any::<bool>()) {
        let mut query = Query::new().page_size(100);
        query = if descending { query.sort_desc("credits") } else { query.sort_asc("credits") };
        let sorted = query.select(&rows, accessor).unwrap();

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if descending {
                prop_assert!(a.credits >= b.credits);
            } else {
                prop_assert!(a.credits <= b.credits);
            }
            if a.credits == b.credits {
                prop_assert!(a.id < b.id);
            }
        }
    }

    /// Search results only contain records whose searched fields contain the
    /// term, ignoring case.
    #[test]
    fn search_results_contain_the_term(
        rows in rows_strategy(60),
        term in "[a-zA-Z]{1,2}",
    ) {
        let query = Query::new().search(term.clone()).search_in(["name"]).page_size(100);
        let result = evaluate(&rows, &query, accessor).unwrap();
        let needle = term.to_lowercase();

        for row in &result.items {
            prop_assert!(row.name.to_lowercase().contains(&needle));
        }
        let expected = rows
            .iter()
            .filter(|row| row.name.to_lowercase().contains(&needle))
            .count();
        prop_assert_eq!(result.total_items, expected);
    }

    /// The input slice is left untouched.
    #[test]
    fn input_is_not_mutated(rows in rows_strategy(40)) {
        let before = rows.clone();
        let _ = evaluate(&rows, &Query::new().sort_desc("name").page_size(7), accessor).unwrap();
        prop_assert_eq!(rows, before);
    }

    /// `count` agrees with the total reported by `evaluate`.
    #[test]
    fn count_equals_total_items(
        rows in rows_strategy(60),
        dept in 0..DEPARTMENTS.len(),
    ) {
        let query = Query::new().filter("department", DEPARTMENTS[dept]);
        let result = evaluate(&rows, &query, accessor).unwrap();
        prop_assert_eq!(query.count(&rows, accessor), result.total_items);
    }
}

#[test]
fn empty_input_yields_one_empty_page() {
    let rows: Vec<Row> = Vec::new();
    let result = evaluate(&rows, &Query::new().page(4), accessor).unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.total_items, 0);
    assert_eq!(result.total_pages, 1);
    assert_eq!(result.page, 1);
}
