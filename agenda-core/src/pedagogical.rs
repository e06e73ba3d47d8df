//! Pedagogical records: observations, attendance, weekly planning and
//! daily contents.
//!
//! Student ids in the create payloads are passed through as given; the
//! server is the one that checks they exist.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AgendaError;

/// Weekdays offered by the planning form.
pub const WEEKDAYS: [&str; 5] = ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes"];

/// Topics offered by the daily content form.
pub const CONTENT_TOPICS: [&str; 5] = [
    "colores",
    "números",
    "juegos",
    "canciones",
    "temas trabajados",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: i64,
    pub owner_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub behavior_mood: Option<String>,
    pub participation: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObservation {
    pub student_id: i64,
    pub date: NaiveDate,
    pub behavior_mood: Option<String>,
    pub participation: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub owner_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Attendance mark. Marks written by other clients are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Presente,
    Ausente,
    Tarde,
    Other(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Presente => "presente",
            AttendanceStatus::Ausente => "ausente",
            AttendanceStatus::Tarde => "tarde",
            AttendanceStatus::Other(s) => s,
        }
    }
}

impl From<String> for AttendanceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "presente" => AttendanceStatus::Presente,
            "ausente" => AttendanceStatus::Ausente,
            "tarde" => AttendanceStatus::Tarde,
            _ => AttendanceStatus::Other(value),
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(value: AttendanceStatus) -> Self {
        match value {
            AttendanceStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = AgendaError;

    /// Strict parse for user input: only the three known marks.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match AttendanceStatus::from(s.trim().to_lowercase()) {
            AttendanceStatus::Other(other) => Err(AgendaError::InvalidInput(format!(
                "Unknown attendance status '{other}'. Expected presente, ausente or tarde"
            ))),
            known => Ok(known),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weekday of a week's lesson plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planning {
    pub id: i64,
    pub owner_id: i64,
    pub week_start: NaiveDate,
    pub weekday: String,
    pub activities: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlanning {
    pub week_start: NaiveDate,
    pub weekday: String,
    pub activities: String,
}

/// A topic worked on a given day, optionally for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyContent {
    pub id: i64,
    pub owner_id: i64,
    pub student_id: Option<i64>,
    pub date: NaiveDate,
    pub topic: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContent {
    pub student_id: Option<i64>,
    pub date: NaiveDate,
    pub topic: String,
    pub notes: Option<String>,
}
