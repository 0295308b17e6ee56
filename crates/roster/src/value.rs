//! Runtime field values.
//!
//! The [`Value`] enum is what an accessor returns for one field of one record.
//! It borrows from the record, so reading a field never clones it.

use std::cmp::Ordering;
use std::fmt;

/// Runtime value of a record field, borrowed from the record.
///
/// Date-like fields are expected as ISO strings (`"2023-07-15"`), which order
/// chronologically under string comparison.
///
/// # Example
///
/// ```
/// use roster::{Value, Number};
///
/// struct Department {
///     name: String,
///     student_count: u32,
/// }
///
/// fn accessor<'a>(dept: &'a Department, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&dept.name),
///         "student_count" => Value::Number(Number::from(dept.student_count)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or not queryable.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::None => "none",
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::None => Ok(()),
        }
    }
}

/// Numeric value.
///
/// Stored as one of three variants to preserve precision. Comparisons between
/// variants are exact: an integer is never widened to `f64`, so `2^53 + 1`
/// stays above `2^53` whichever variant holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(cmp_i64_u64(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(cmp_i64_u64(b, a).reverse()),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::I64(a), Number::F64(b)) => cmp_int_f64(i128::from(a), b),
            (Number::U64(a), Number::F64(b)) => cmp_int_f64(i128::from(a), b),
            (Number::F64(a), Number::I64(b)) => cmp_int_f64(i128::from(b), a).map(Ordering::reverse),
            (Number::F64(a), Number::U64(b)) => cmp_int_f64(i128::from(b), a).map(Ordering::reverse),
        }
    }

    /// Total ordering used for sorting: NaN sorts after every other number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match self.compare(other) {
            Some(ordering) => ordering,
            None => {
                let (a, b) = (self.to_f64(), other.to_f64());
                a.is_nan().cmp(&b.is_nan()).then_with(|| a.total_cmp(&b))
            }
        }
    }
}

fn cmp_i64_u64(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

/// Integer bounds of `i64` and `u64`, as exactly representable floats.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const U64_END_F64: f64 = 18_446_744_073_709_551_616.0;

/// Compares an integer against a float without rounding the integer.
fn cmp_int_f64(a: i128, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    if b >= U64_END_F64 {
        return Some(Ordering::Less);
    }
    if b < I64_MIN_F64 {
        return Some(Ordering::Greater);
    }
    // In range, `trunc` is an integer that fits in i128 exactly.
    let whole = b.trunc();
    Some(a.cmp(&(whole as i128)).then_with(|| {
        let frac = b - whole;
        if frac > 0.0 {
            Ordering::Less
        } else if frac < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);
