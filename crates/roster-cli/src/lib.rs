//! The `roster` command: the portal's list screens in a terminal.
//!
//! Each subcommand loads one table's records, applies the search, filters,
//! sort and page given on the command line through a [`QueryState`], and
//! prints the visible page, the page as JSON, or the whole view as CSV.

pub mod cli;
pub mod entities;
pub mod logging;
pub mod render;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use roster::{distinct_values, export_csv, Dir, FilterValue, Number, QueryState, TableConfig, Value};

use crate::cli::{Command, Format, TableArgs};
use crate::entities::{Department, Registration, Student, Table};

/// Runs a parsed command and returns what it prints.
pub fn run(command: &Command) -> Result<String> {
    match command {
        Command::Students(args) => show::<Student>(args),
        Command::Departments(args) => show::<Department>(args),
        Command::Registrations(args) => show::<Registration>(args),
    }
}

fn show<T: Table>(args: &TableArgs) -> Result<String> {
    let records: Vec<T> = load_records(args.data.as_deref())?;
    if let Some(field) = &args.list_values {
        return list_values(&records, field);
    }
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => TableConfig::default(),
    };
    config.fold_diacritics |= args.fold_accents;

    let (default_field, default_dir) = T::DEFAULT_SORT;
    let mut state = QueryState::<T>::with_config(config)?
        .search_in(T::SEARCH_FIELDS.iter().copied())
        .default_sort(default_field, default_dir);

    if let Some(term) = &args.search {
        state.set_search(term.as_str());
    }
    for raw in &args.filters {
        let (field, value) = parse_filter::<T>(raw, &records)?;
        state.set_filter(field, value);
    }
    match (&args.sort, args.desc) {
        (Some(field), desc) => {
            check_field::<T>(field)?;
            state.set_sort(field, if desc { Dir::Desc } else { Dir::Asc });
        }
        (None, true) => state.set_sort(default_field, Dir::Desc),
        (None, false) => {}
    }
    if let Some(size) = args.page_size {
        state.set_page_size(size)?;
    }
    if let Some(page) = args.page {
        state.set_page(page)?;
    }

    tracing::debug!(table = T::TITLE, records = records.len(), query = ?state.query(), "showing table");

    match args.format {
        Format::Text => {
            let page = state.evaluate(&records)?;
            Ok(render::text(&page, T::COLUMNS, T::TITLE, T::accessor))
        }
        Format::Json => {
            let page = state.evaluate(&records)?;
            let mut json = serde_json::to_string_pretty(&page)?;
            json.push('\n');
            Ok(json)
        }
        Format::Csv => Ok(export_csv(&records, state.query(), T::COLUMNS, T::accessor)?),
    }
}

/// Prints the options of the filter on `field`: `all`, then each distinct
/// value in the order the records first show it.
fn list_values<T: Table>(records: &[T], field: &str) -> Result<String> {
    check_field::<T>(field)?;
    let mut out = format!("{}\n", FilterValue::ALL);
    for value in distinct_values(records, field, T::accessor) {
        out.push_str(&value.to_string());
        out.push('\n');
    }
    Ok(out)
}

fn load_records<T: Table>(path: Option<&Path>) -> Result<Vec<T>> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&source)
                .with_context(|| format!("{} is not a list of {}", path.display(), T::TITLE))
        }
        None => serde_json::from_str(T::SAMPLE)
            .with_context(|| format!("built-in {} data is malformed", T::TITLE)),
    }
}

fn load_config(path: &Path) -> Result<TableConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    TableConfig::from_yaml(&source).with_context(|| format!("invalid configuration in {}", path.display()))
}

fn check_field<T: Table>(field: &str) -> Result<()> {
    if !T::has_field(field) {
        bail!(
            "{} have no field '{}' (fields: {})",
            T::TITLE,
            field,
            T::fields().join(", ")
        );
    }
    Ok(())
}

/// Parses `FIELD=VALUE`, typing the value after the field's values so that
/// `studentCount=45` compares as a number.
fn parse_filter<'r, T: Table>(raw: &'r str, records: &[T]) -> Result<(&'r str, FilterValue)> {
    let Some((field, value)) = raw.split_once('=') else {
        bail!("filter '{raw}' must look like FIELD=VALUE");
    };
    check_field::<T>(field)?;

    let filter_value = match FilterValue::parse(value) {
        FilterValue::All => FilterValue::All,
        parsed => {
            let kind = records
                .iter()
                .map(|record| record.field_value(field))
                .find(|v| !v.is_none());
            match kind {
                Some(Value::Number(_)) => FilterValue::Number(parse_number(value).with_context(|| {
                    format!("filter on '{field}' expects a number, got '{value}'")
                })?),
                Some(Value::Bool(_)) => FilterValue::Bool(
                    value
                        .parse()
                        .with_context(|| format!("filter on '{field}' expects true or false"))?,
                ),
                _ => parsed,
            }
        }
    };
    Ok((field, filter_value))
}

fn parse_number(raw: &str) -> Result<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(Number::I64(n));
    }
    Ok(Number::F64(raw.parse::<f64>()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Vec<Student> {
        serde_json::from_str(Student::SAMPLE).unwrap()
    }

    #[test]
    fn filter_values_follow_field_type() {
        let departments: Vec<Department> = serde_json::from_str(Department::SAMPLE).unwrap();
        let (field, value) = parse_filter::<Department>("studentCount=980", &departments).unwrap();
        assert_eq!(field, "studentCount");
        assert_eq!(value, FilterValue::Number(Number::I64(980)));

        let (_, value) = parse_filter::<Department>("name=Droit", &departments).unwrap();
        assert_eq!(value, FilterValue::String("Droit".to_string()));
    }

    #[test]
    fn all_lifts_a_filter() {
        let (_, value) = parse_filter::<Student>("department=all", &students()).unwrap();
        assert!(value.is_all());
    }

    #[test]
    fn malformed_filters_are_rejected() {
        let data = students();
        assert!(parse_filter::<Student>("department", &data).is_err());
        assert!(parse_filter::<Student>("faculty=Sciences", &data).is_err());

        let departments: Vec<Department> = serde_json::from_str(Department::SAMPLE).unwrap();
        assert!(parse_filter::<Department>("studentCount=many", &departments).is_err());
    }

    #[test]
    fn list_values_starts_with_all() {
        let registrations: Vec<Registration> = serde_json::from_str(Registration::SAMPLE).unwrap();
        let out = list_values(&registrations, "paymentStatus").unwrap();
        let options: Vec<&str> = out.lines().collect();
        assert_eq!(options[0], "all");
        assert!(options.contains(&"unpaid"));
        let distinct: std::collections::HashSet<&str> = options.iter().copied().collect();
        assert_eq!(distinct.len(), options.len());
        assert!(list_values(&registrations, "colour").is_err());
    }

    #[test]
    fn numbers_parse_as_integers_first() {
        assert_eq!(parse_number("45").unwrap(), Number::I64(45));
        assert_eq!(parse_number("2.5").unwrap(), Number::F64(2.5));
        assert!(parse_number("x").is_err());
    }
}
