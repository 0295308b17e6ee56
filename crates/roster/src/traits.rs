//! Traits for records that describe their own fields.
//!
//! This module provides the [`Tabular`] trait which is implemented by the
//! `#[derive(Tabular)]` macro to give the pipeline typed field access.

use crate::value::Value;

/// Trait for record types that can be shown in a table.
///
/// This trait is typically derived using `#[derive(Tabular)]` from the
/// `roster-macros` crate, but can also be implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use roster_macros::Tabular;
/// use roster::{Query, Tabular as _};
///
/// #[derive(Tabular)]
/// struct Department {
///     #[table(String)]
///     name: String,
///     #[table(Number)]
///     student_count: u32,
/// }
///
/// let query = Query::new().sort_desc(Department::STUDENT_COUNT);
/// let page = query.evaluate(&departments, Department::accessor)?;
/// ```
///
/// # Manual Implementation
///
/// ```
/// use roster::{Tabular, Value, Number};
///
/// struct Department {
///     name: String,
///     student_count: u32,
/// }
///
/// impl Tabular for Department {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "student_count" => Value::Number(Number::from(self.student_count)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Tabular {
    /// Returns the value of a field for searching, filtering and sorting.
    ///
    /// Returns [`Value::None`] if the field doesn't exist or is not queryable.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns a static accessor function suitable for [`crate::evaluate`].
    fn accessor<'a>(record: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        record.field_value(field)
    }

    /// Names of the queryable fields, in declaration order.
    ///
    /// The derive macro fills this in; manual implementations may leave it
    /// empty.
    fn fields() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }

    /// Returns `true` if `field` is one of [`Tabular::fields`].
    fn has_field(field: &str) -> bool
    where
        Self: Sized,
    {
        Self::fields().iter().any(|known| *known == field)
    }
}

/// Display label of a value stored in a record, such as a status enum.
///
/// Fields marked `#[table(Label)]` are exposed as strings through this trait,
/// so they can be searched, filtered by label and sorted alphabetically.
///
/// ```
/// use roster::TableLabel;
///
/// enum Status {
///     Active,
///     Graduated,
/// }
///
/// impl TableLabel for Status {
///     fn label(&self) -> &str {
///         match self {
///             Status::Active => "active",
///             Status::Graduated => "graduated",
///         }
///     }
/// }
/// ```
pub trait TableLabel {
    /// Returns the label compared by filters and the sort stage.
    fn label(&self) -> &str;
}

impl TableLabel for String {
    fn label(&self) -> &str {
        self
    }
}
