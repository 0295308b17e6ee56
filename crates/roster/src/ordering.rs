//! Sort direction, sort keys and the sort stage.
//!
//! Provides [`Dir`] for sort direction and [`SortKey`] for field-based
//! ordering. The sort stage is stable: records with equal keys keep the order
//! they arrived in, which keeps pagination deterministic across re-renders.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collate::{collate, CollationKey};
use crate::error::{Result, RosterError};
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The field and direction a table is sorted by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl SortKey {
    /// Creates an ascending sort key for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortKey {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a descending sort key for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortKey {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a sort key with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortKey {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values according to this key.
    ///
    /// Returns `None` if the values cannot be compared (type mismatch).
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        let base_ordering = compare_values(a, b)?;
        Some(self.dir.apply(base_ordering))
    }
}

/// Compares two values of the same type.
///
/// Strings use locale-aware collation, numbers compare numerically with NaN
/// last, and `false < true`. A missing value sorts after any present one.
/// Returns `None` if the types don't match.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(collate(a, b)),
        (Value::Number(a), Value::Number(b)) => Some(a.total_cmp(*b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

/// Pre-extracted sort key of one record.
enum Key<'a> {
    String(CollationKey<'a>),
    Number(Number),
    Bool(bool),
    Missing,
}

impl Key<'_> {
    fn cmp_same_kind(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::String(a), Key::String(b)) => a.cmp(b),
            (Key::Number(a), Key::Number(b)) => a.total_cmp(*b),
            (Key::Bool(a), Key::Bool(b)) => a.cmp(b),
            (Key::Missing, Key::Missing) => Ordering::Equal,
            (Key::Missing, _) => Ordering::Greater,
            (_, Key::Missing) => Ordering::Less,
            // Mixed kinds are rejected before sorting starts.
            _ => Ordering::Equal,
        }
    }
}

/// Outcome of the sort stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOutcome {
    Sorted,
    /// Keys had mismatched types; input order was kept.
    Unchanged,
}

/// Stable-sorts `records` in place by `key`.
///
/// Keys of mismatched types (say, strings and numbers under the same field)
/// cannot be ordered. In that case the records keep their input order, or,
/// when `strict` is set, an [`RosterError::UnsupportedSortField`] is returned.
pub(crate) fn sort_records<'a, T, F>(
    records: &mut Vec<&'a T>,
    key: &SortKey,
    accessor: &F,
    strict: bool,
) -> Result<SortOutcome>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut kind: Option<&'static str> = None;
    let mut keyed: Vec<(Key<'a>, &'a T)> = Vec::with_capacity(records.len());

    for record in records.iter().copied() {
        let value = accessor(record, &key.field);
        if !value.is_none() {
            let this_kind = value.type_name();
            match kind {
                None => kind = Some(this_kind),
                Some(seen) if seen != this_kind => {
                    if strict {
                        return Err(RosterError::UnsupportedSortField {
                            field: key.field.clone(),
                            reason: format!("mixed {seen} and {this_kind} values"),
                        });
                    }
                    return Ok(SortOutcome::Unchanged);
                }
                Some(_) => {}
            }
        }
        let extracted = match value {
            Value::String(s) => Key::String(CollationKey::new(s)),
            Value::Number(n) => Key::Number(n),
            Value::Bool(b) => Key::Bool(b),
            Value::None => Key::Missing,
        };
        keyed.push((extracted, record));
    }

    // `sort_by` is stable; equal keys keep input order.
    keyed.sort_by(|(a, _), (b, _)| key.dir.apply(a.cmp_same_kind(b)));
    records.clear();
    records.extend(keyed.into_iter().map(|(_, record)| record));
    Ok(SortOutcome::Sorted)
}
