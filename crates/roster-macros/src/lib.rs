//! Proc macros for Roster.
//!
//! - [`Tabular`] - Generate field accessors and field-name constants for a
//!   record struct
//!
//! For working examples, see `roster/tests/tabular_derive.rs`.

mod table;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `roster::Tabular` trait for a record struct.
///
/// Only fields carrying a `#[table(...)]` kind are queryable; every other
/// field reads as `Value::None`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Text field (`String`, `&str`, anything `AsRef<str>`). Also accepted as `Date` for ISO date strings |
/// | `Number` | Numeric field, converted with `Number::from` |
/// | `Bool` | Boolean field |
/// | `Label` | Field whose type implements `TableLabel`, such as a status enum |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Query name of the field (default: the Rust field name) |
///
/// `Option<T>` fields read as `Value::None` when empty.
///
/// # Generated Code
///
/// 1. Field name constants (e.g. `Student::LAST_NAME`)
/// 2. `Tabular::field_value()` and `Tabular::fields()`
///
/// # Example
///
/// ```ignore
/// use roster::{Query, Tabular as _, TableLabel};
/// use roster_macros::Tabular;
///
/// enum Status { Active, Graduated }
///
/// impl TableLabel for Status {
///     fn label(&self) -> &str {
///         match self {
///             Status::Active => "active",
///             Status::Graduated => "graduated",
///         }
///     }
/// }
///
/// #[derive(Tabular)]
/// struct Student {
///     #[table(String, rename = "lastName")]
///     last_name: String,
///
///     #[table(Number)]
///     year: Option<u8>,
///
///     #[table(Label)]
///     status: Status,
///
///     #[table(skip)]
///     notes: String,
/// }
///
/// let query = Query::new()
///     .filter(Student::STATUS, "active")
///     .sort_asc(Student::LAST_NAME);
/// let page = query.evaluate(&students, Student::accessor)?;
/// ```
#[proc_macro_derive(Tabular, attributes(table))]
pub fn tabular_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    table::tabular_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
