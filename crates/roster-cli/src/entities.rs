//! Record types of the portal's tables.
//!
//! Each type mirrors the JSON shape of the portal's data (camelCase keys) and
//! describes its table: which fields the search box looks at, how the table
//! is sorted when it opens, and which columns are shown and exported.

use roster::{Column, Dir, TableLabel, Tabular};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A table the CLI can show.
pub trait Table: Tabular + Serialize + DeserializeOwned + Sized {
    /// Plural noun used in messages ("students").
    const TITLE: &'static str;
    /// Built-in records used when no data file is given.
    const SAMPLE: &'static str;
    /// Fields the search box matches against.
    const SEARCH_FIELDS: &'static [&'static str];
    /// Sort applied when the table opens.
    const DEFAULT_SORT: (&'static str, Dir);
    /// Displayed and exported columns.
    const COLUMNS: &'static [Column<'static>];
}

macro_rules! label_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl TableLabel for $name {
            fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

label_enum!(StudentStatus {
    Active => "active",
    Inactive => "inactive",
    Suspended => "suspended",
    Graduated => "graduated",
});

label_enum!(RegistrationType {
    New => "new",
    Reenrollment => "reenrollment",
});

label_enum!(RegistrationStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Cancelled => "cancelled",
});

label_enum!(PaymentStatus {
    Unpaid => "unpaid",
    Partial => "partial",
    Paid => "paid",
});

// ============================================================================
// Students
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabular)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[table(String)]
    pub id: String,
    #[table(String, rename = "firstName")]
    pub first_name: String,
    #[table(String, rename = "lastName")]
    pub last_name: String,
    #[table(String)]
    pub email: String,
    #[table(String, rename = "studentId")]
    pub student_id: String,
    #[table(String)]
    pub department: String,
    #[table(String)]
    pub program: String,
    #[table(String)]
    pub year: String,
    #[table(Label)]
    pub status: StudentStatus,
    #[table(Date, rename = "enrollmentDate")]
    pub enrollment_date: String,
}

impl Table for Student {
    const TITLE: &'static str = "students";
    const SAMPLE: &'static str = include_str!("../data/students.json");
    const SEARCH_FIELDS: &'static [&'static str] = &[
        Student::FIRST_NAME,
        Student::LAST_NAME,
        Student::EMAIL,
        Student::STUDENT_ID,
        Student::PROGRAM,
    ];
    const DEFAULT_SORT: (&'static str, Dir) = (Student::LAST_NAME, Dir::Asc);
    const COLUMNS: &'static [Column<'static>] = &[
        Column::new("ID", Student::STUDENT_ID),
        Column::new("First name", Student::FIRST_NAME),
        Column::new("Last name", Student::LAST_NAME),
        Column::new("Email", Student::EMAIL),
        Column::new("Department", Student::DEPARTMENT),
        Column::new("Program", Student::PROGRAM),
        Column::new("Year", Student::YEAR),
        Column::new("Status", Student::STATUS),
        Column::new("Enrolled", Student::ENROLLMENT_DATE),
    ];
}

// ============================================================================
// Departments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabular)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[table(String)]
    pub id: String,
    #[table(String)]
    pub name: String,
    #[table(String)]
    pub director: String,
    #[table(Number, rename = "professorCount")]
    pub professor_count: u32,
    #[table(Number, rename = "studentCount")]
    pub student_count: u32,
    #[table(Number, rename = "programCount")]
    pub program_count: u32,
    #[table(Date, rename = "createdAt")]
    pub created_at: String,
}

impl Table for Department {
    const TITLE: &'static str = "departments";
    const SAMPLE: &'static str = include_str!("../data/departments.json");
    const SEARCH_FIELDS: &'static [&'static str] = &[Department::NAME, Department::DIRECTOR];
    const DEFAULT_SORT: (&'static str, Dir) = (Department::NAME, Dir::Asc);
    const COLUMNS: &'static [Column<'static>] = &[
        Column::new("Name", Department::NAME),
        Column::new("Director", Department::DIRECTOR),
        Column::new("Professors", Department::PROFESSOR_COUNT),
        Column::new("Students", Department::STUDENT_COUNT),
        Column::new("Programs", Department::PROGRAM_COUNT),
        Column::new("Created", Department::CREATED_AT),
    ];
}

// ============================================================================
// Registrations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabular)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[table(String)]
    pub id: String,
    #[table(String, rename = "studentId")]
    pub student_id: String,
    #[table(String, rename = "studentName")]
    pub student_name: String,
    #[table(String, rename = "studentEmail")]
    pub student_email: String,
    #[table(String, rename = "academicYear")]
    pub academic_year: String,
    #[table(String)]
    pub department: String,
    #[table(String)]
    pub program: String,
    #[table(Label, rename = "registrationType")]
    pub registration_type: RegistrationType,
    #[table(Label)]
    pub status: RegistrationStatus,
    #[table(Date, rename = "registrationDate")]
    pub registration_date: String,
    #[table(Label, rename = "paymentStatus")]
    pub payment_status: PaymentStatus,
}

impl Table for Registration {
    const TITLE: &'static str = "registrations";
    const SAMPLE: &'static str = include_str!("../data/registrations.json");
    const SEARCH_FIELDS: &'static [&'static str] = &[
        Registration::STUDENT_NAME,
        Registration::STUDENT_ID,
        Registration::STUDENT_EMAIL,
        Registration::PROGRAM,
    ];
    const DEFAULT_SORT: (&'static str, Dir) = (Registration::REGISTRATION_DATE, Dir::Desc);
    const COLUMNS: &'static [Column<'static>] = &[
        Column::new("ID", Registration::STUDENT_ID),
        Column::new("Name", Registration::STUDENT_NAME),
        Column::new("Year", Registration::ACADEMIC_YEAR),
        Column::new("Department", Registration::DEPARTMENT),
        Column::new("Program", Registration::PROGRAM),
        Column::new("Type", Registration::REGISTRATION_TYPE),
        Column::new("Status", Registration::STATUS),
        Column::new("Date", Registration::REGISTRATION_DATE),
        Column::new("Payment", Registration::PAYMENT_STATUS),
    ];
}
