//! Tasks and reminders.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AgendaError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    pub notes: Option<String>,
    pub is_done: bool,
    /// Event this task belongs to, if any
    pub event_id: Option<i64>,
}

/// Payload for `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
}

/// Partial update for `PUT /api/tasks/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
}

impl TaskUpdate {
    /// Update that flips the done flag of `task`.
    pub fn toggle(task: &Task) -> Self {
        TaskUpdate {
            is_done: Some(!task.is_done),
            ..TaskUpdate::default()
        }
    }
}

/// Task priority. Values written by other clients are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(s) => s,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Other(value),
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AgendaError;

    /// Strict parse for user input: only the three known levels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" => Ok(Priority::Low),
            "medium" | "media" => Ok(Priority::Medium),
            "high" | "alta" => Ok(Priority::High),
            other => Err(AgendaError::InvalidInput(format!(
                "Unknown priority '{other}'. Expected low, medium or high"
            ))),
        }
    }
}

/// A reminder, optionally tied to an event or a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub owner_id: i64,
    pub event_id: Option<i64>,
    pub task_id: Option<i64>,
    pub minutes_before: u32,
    pub custom_message: Option<String>,
    #[serde(default)]
    pub daily_summary: bool,
}

/// Payload for `POST /api/reminders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReminder {
    pub event_id: Option<i64>,
    pub task_id: Option<i64>,
    pub minutes_before: u32,
    pub custom_message: Option<String>,
    pub daily_summary: bool,
}

pub const DEFAULT_REMINDER_MESSAGE: &str = "Recordatorio pedagógico";

impl NewReminder {
    /// A free-standing reminder. An empty message falls back to the default one.
    pub fn new(minutes_before: u32, message: Option<String>, daily_summary: bool) -> Self {
        let custom_message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REMINDER_MESSAGE.to_string());

        NewReminder {
            event_id: None,
            task_id: None,
            minutes_before,
            custom_message: Some(custom_message),
            daily_summary,
        }
    }
}

impl Reminder {
    /// Reminders that fire before something, as opposed to daily digests.
    pub fn is_active(&self) -> bool {
        !self.daily_summary
    }
}
