//! Roster - search, filter, sort and paginate in-memory records for admin tables.
//!
//! Every list screen of an administration portal (students, departments,
//! registrations, users...) runs the same pipeline over an in-memory
//! collection:
//!
//! ```text
//! records ─► search ─► filter ─► sort ─► paginate ─► Page
//! ```
//!
//! Roster implements that pipeline once. Tables supply typed field accessors
//! and a [`Query`]; the pipeline returns a [`Page`] with the visible records
//! and pagination metadata.
//!
//! - **Search**: case-insensitive substring match over chosen fields, with
//!   optional accent folding
//! - **Filters**: exact-match constraints, ANDed, with an "all" sentinel
//! - **Sort**: stable, locale-aware for strings, numeric for numbers
//! - **Pagination**: 1-based, out-of-range pages clamp to the last page
//!
//! # Quick Start
//!
//! ```rust
//! use roster::{Query, Value, Number};
//!
//! struct Department {
//!     name: String,
//!     faculty: String,
//!     student_count: u32,
//! }
//!
//! fn accessor<'a>(dept: &'a Department, field: &str) -> Value<'a> {
//!     match field {
//!         "name" => Value::String(&dept.name),
//!         "faculty" => Value::String(&dept.faculty),
//!         "student_count" => Value::Number(Number::from(dept.student_count)),
//!         _ => Value::None,
//!     }
//! }
//!
//! let departments = vec![
//!     Department { name: "Mathématiques".into(), faculty: "Sciences".into(), student_count: 45 },
//!     Department { name: "Histoire".into(), faculty: "Lettres".into(), student_count: 38 },
//!     Department { name: "Physique".into(), faculty: "Sciences".into(), student_count: 32 },
//! ];
//!
//! let query = Query::new()
//!     .filter("faculty", "Sciences")
//!     .sort_asc("student_count")
//!     .page_size(10)
//!     .build()
//!     .unwrap();
//!
//! let page = query.evaluate(&departments, accessor).unwrap();
//! assert_eq!(page.total_items, 2);
//! assert_eq!(page.total_pages, 1);
//! assert_eq!(page.items[0].name, "Physique");
//! ```
//!
//! # Behavior at the Edges
//!
//! | Situation | Result |
//! |-----------|--------|
//! | Empty input or nothing matches | no items, `total_items == 0`, `total_pages == 1` |
//! | Page past the end | the last page |
//! | Page or page size of zero | [`RosterError::InvalidQuery`] |
//! | Sort keys of mixed types | input order kept (or an error with strict sorting) |
//! | Missing sort value | sorted after present values |
//!
//! Search does not fold accents unless asked to: `"ecole"` only finds
//! `"École"` with [`Query::fold_diacritics`] enabled.

mod collate;
mod config;
mod error;
mod export;
mod filter;
mod ordering;
mod page;
mod pipeline;
mod query;
mod search;
mod state;
mod traits;
mod value;

// Re-export public API
pub use collate::{collate, fold, CollationKey};
pub use config::{TableConfig, DEFAULT_PAGE_SIZE_OPTIONS};
pub use error::{Result, RosterError};
pub use export::{export_csv, Column};
pub use filter::{distinct_values, Filter, FilterValue};
pub use ordering::{compare_values, Dir, SortKey};
pub use page::{page_count, Page};
pub use pipeline::evaluate;
pub use query::{Query, DEFAULT_PAGE_SIZE};
pub use search::SearchTerm;
pub use state::QueryState;
pub use traits::{TableLabel, Tabular};
pub use value::{Number, Value};

#[cfg(feature = "macros")]
pub use roster_macros::Tabular;
