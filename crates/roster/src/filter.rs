//! Exact-match filters.
//!
//! A [`Filter`] pins one field to an expected value. The table UI's dropdowns
//! always carry an "all" entry, modelled here as [`FilterValue::All`], which
//! places no constraint on the field.

use crate::value::{Number, Value};

/// Owned value a filter compares against.
///
/// Unlike [`Value`], which borrows from a record, `FilterValue` owns its data
/// so it can be stored in a query.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    /// No constraint: the "all" entry of a filter dropdown.
    #[default]
    All,
    /// String value, compared with exact (case-sensitive) equality.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
}

impl FilterValue {
    /// Sentinel text that stands for [`FilterValue::All`] in UI and CLI input.
    pub const ALL: &'static str = "all";

    /// Parses a dropdown value: `"all"` becomes [`FilterValue::All`], anything
    /// else an exact string constraint.
    pub fn parse(raw: &str) -> Self {
        if raw == Self::ALL {
            FilterValue::All
        } else {
            FilterValue::String(raw.to_string())
        }
    }

    /// Returns `true` if this is the "all" sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }

    /// Tests a field value for exact equality.
    ///
    /// A type mismatch or a missing field never matches a constraint.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (self, field_value) {
            (FilterValue::All, _) => true,
            (FilterValue::String(expected), Value::String(actual)) => expected == actual,
            (FilterValue::Number(expected), Value::Number(actual)) => {
                actual.compare(*expected) == Some(std::cmp::Ordering::Equal)
            }
            (FilterValue::Bool(expected), Value::Bool(actual)) => expected == actual,
            _ => false,
        }
    }
}

/// A single field constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// The field name to compare.
    pub field: String,
    /// The expected value.
    pub value: FilterValue,
}

impl Filter {
    /// Creates a new filter.
    pub fn new(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Filter {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Tests a record against this filter.
    pub fn matches<T, F>(&self, record: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.value.is_all() || self.value.matches(&accessor(record, &self.field))
    }
}

/// Lists the options of a filter dropdown: every distinct value of `field`,
/// in the order first seen.
///
/// Missing values are skipped, strings are distinct when they differ in any
/// byte, and numbers are distinct when they differ numerically.
///
/// ```
/// use roster::{distinct_values, Value};
///
/// fn department<'a>(name: &'a &str, _field: &str) -> Value<'a> {
///     Value::String(name)
/// }
///
/// let departments = ["Sciences", "Lettres", "Sciences", "Droit"];
/// let options = distinct_values(&departments, "department", department);
/// assert_eq!(
///     options,
///     vec![Value::String("Sciences"), Value::String("Lettres"), Value::String("Droit")]
/// );
/// ```
pub fn distinct_values<'a, T, F>(records: &'a [T], field: &str, accessor: F) -> Vec<Value<'a>>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut options: Vec<Value<'a>> = Vec::new();
    for record in records {
        let value = accessor(record, field);
        if value.is_none() || options.iter().any(|seen| same_option(seen, &value)) {
            continue;
        }
        options.push(value);
    }
    options
}

fn same_option(a: &Value<'_>, b: &Value<'_>) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.compare(*b) == Some(std::cmp::Ordering::Equal),
        _ => a == b,
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::String(s)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::String(s.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<Number> for FilterValue {
    fn from(n: Number) -> Self {
        FilterValue::Number(n)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::All, Into::into)
    }
}

macro_rules! filter_value_from_number {
    ($($source:ty),*) => {
        $(
            impl From<$source> for FilterValue {
                fn from(n: $source) -> Self {
                    FilterValue::Number(Number::from(n))
                }
            }
        )*
    };
}

filter_value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
