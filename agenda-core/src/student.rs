//! Students and their progress status.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AgendaError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub owner_id: i64,
    pub full_name: String,
    pub age: Option<u32>,
    pub birthday: Option<NaiveDate>,
    pub group_name: Option<String>,
    pub guardian_contact: Option<String>,
    #[serde(default)]
    pub progress_status: ProgressStatus,
}

/// Payload for `POST /api/students`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewStudent {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_contact: Option<String>,
    pub progress_status: ProgressStatus,
}

/// Partial update for `PUT /api/students/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_status: Option<ProgressStatus>,
}

impl StudentUpdate {
    pub fn progress(status: ProgressStatus) -> Self {
        StudentUpdate {
            progress_status: Some(status),
            ..StudentUpdate::default()
        }
    }
}

/// At-a-glance pedagogical status of a student.
///
/// Values the client does not know are read as `EnProceso`, the same
/// neutral status new students start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProgressStatus {
    Bien,
    #[default]
    EnProceso,
    Atencion,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Bien => "bien",
            ProgressStatus::EnProceso => "en_proceso",
            ProgressStatus::Atencion => "atencion",
        }
    }

    /// Traffic-light glyph used in listings.
    pub fn glyph(&self) -> &'static str {
        match self {
            ProgressStatus::Bien => "🟢",
            ProgressStatus::EnProceso => "🟡",
            ProgressStatus::Atencion => "🔴",
        }
    }

    pub fn all() -> [ProgressStatus; 3] {
        [
            ProgressStatus::Bien,
            ProgressStatus::EnProceso,
            ProgressStatus::Atencion,
        ]
    }
}

impl From<String> for ProgressStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<ProgressStatus> for String {
    fn from(value: ProgressStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "bien" => Ok(ProgressStatus::Bien),
            "en_proceso" => Ok(ProgressStatus::EnProceso),
            "atencion" | "atención" => Ok(ProgressStatus::Atencion),
            other => Err(AgendaError::InvalidInput(format!(
                "Unknown progress status '{other}'. Expected bien, en_proceso or atencion"
            ))),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}
