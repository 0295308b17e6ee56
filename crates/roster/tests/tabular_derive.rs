//! Tests for `#[derive(Tabular)]`.

use roster::{Dir, Number, Query, QueryState, TableLabel, Tabular, Value};
#[cfg(not(feature = "macros"))]
use roster_macros::Tabular;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Active,
    Inactive,
    Graduated,
}

impl TableLabel for Status {
    fn label(&self) -> &str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Graduated => "graduated",
        }
    }
}

#[derive(Debug, Clone, Tabular)]
struct Student {
    #[table(String, rename = "firstName")]
    first_name: String,

    #[table(String, rename = "lastName")]
    last_name: String,

    #[table(Number)]
    year: Option<u8>,

    #[table(Bool)]
    scholarship: bool,

    #[table(Label)]
    status: Status,

    #[table(Date, rename = "enrollmentDate")]
    enrollment_date: &'static str,

    #[table(skip)]
    #[allow(dead_code)]
    notes: String,
}

fn student(first: &str, last: &str, year: Option<u8>, status: Status, date: &'static str) -> Student {
    Student {
        first_name: first.to_string(),
        last_name: last.to_string(),
        year,
        scholarship: year.is_some_and(|y| y > 2),
        status,
        enrollment_date: date,
        notes: String::new(),
    }
}

fn students() -> Vec<Student> {
    vec![
        student("Marie", "Dupont", Some(3), Status::Active, "2021-09-01"),
        student("Thomas", "Martin", Some(2), Status::Active, "2022-09-01"),
        student("Sophie", "Bernard", None, Status::Inactive, "2023-01-15"),
        student("Lucas", "Petit", Some(5), Status::Graduated, "2019-09-01"),
    ]
}

#[test]
fn generates_field_constants() {
    assert_eq!(Student::FIRST_NAME, "firstName");
    assert_eq!(Student::LAST_NAME, "lastName");
    assert_eq!(Student::YEAR, "year");
    assert_eq!(Student::SCHOLARSHIP, "scholarship");
    assert_eq!(Student::STATUS, "status");
    assert_eq!(Student::ENROLLMENT_DATE, "enrollmentDate");
}

#[test]
fn lists_fields_in_declaration_order() {
    assert_eq!(
        Student::fields(),
        &["firstName", "lastName", "year", "scholarship", "status", "enrollmentDate"]
    );
    assert!(Student::has_field("status"));
    assert!(!Student::has_field("notes"));
}

#[test]
fn reads_field_values() {
    let data = students();
    let marie = &data[0];
    assert_eq!(marie.field_value(Student::FIRST_NAME), Value::String("Marie"));
    assert_eq!(marie.field_value(Student::YEAR), Value::Number(Number::U64(3)));
    assert_eq!(marie.field_value(Student::SCHOLARSHIP), Value::Bool(true));
    assert_eq!(marie.field_value(Student::STATUS), Value::String("active"));
    assert_eq!(marie.field_value(Student::ENROLLMENT_DATE), Value::String("2021-09-01"));
    assert_eq!(marie.field_value("notes"), Value::None);
    assert_eq!(data[2].field_value(Student::YEAR), Value::None);
}

#[test]
fn filters_on_labels() {
    let data = students();
    let page = Query::new()
        .filter(Student::STATUS, "active")
        .sort_asc(Student::LAST_NAME)
        .evaluate(&data, Student::accessor)
        .unwrap();
    let names: Vec<&str> = page.items.iter().map(|s| s.last_name.as_str()).collect();
    assert_eq!(names, vec!["Dupont", "Martin"]);
}

#[test]
fn missing_numbers_sort_last() {
    let data = students();
    let page = Query::new().sort_asc(Student::YEAR).evaluate_records(&data).unwrap();
    let years: Vec<Option<u8>> = page.items.iter().map(|s| s.year).collect();
    assert_eq!(years, vec![Some(2), Some(3), Some(5), None]);
}

#[test]
fn iso_dates_sort_chronologically() {
    let data = students();
    let mut state: QueryState<Student> = QueryState::new().default_sort(Student::ENROLLMENT_DATE, Dir::Desc);
    let page = state.evaluate(&data).unwrap();
    let firsts: Vec<&str> = page.items.iter().map(|s| s.first_name.as_str()).collect();
    assert_eq!(firsts, vec!["Sophie", "Thomas", "Marie", "Lucas"]);
}

#[test]
fn searches_numbers_by_display_form() {
    let data = students();
    let query = Query::new().search("5").search_in([Student::YEAR]);
    assert_eq!(query.count(&data, Student::accessor), 1);

    // "2023-01-15" contains a 5 too.
    let query = query.search_in(Student::fields().iter().copied());
    assert_eq!(query.count(&data, Student::accessor), 2);
}
