//! Read-only digests of the aggregate for the home, tracking, students and
//! settings screens.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::AgendaError;
use crate::event::Event;
use crate::pedagogical::{Observation, Planning};
use crate::profile::StudentProfile;
use crate::student::Student;
use crate::sync::AggregateState;
use crate::task::Reminder;

const ACTIVE_REMINDERS_SHOWN: usize = 5;
const UPCOMING_SHOWN: usize = 5;
const PLANNINGS_SHOWN: usize = 5;
const RECENT_OBSERVATIONS_SHOWN: usize = 10;
const SETTINGS_REMINDERS_SHOWN: usize = 8;

/// Placeholder for missing values.
pub const NO_DATA: &str = "s/d";
pub const NO_GROUP: &str = "Sin sala";

/// The "Hoy" dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSummary<'a> {
    pub classes_today: Vec<&'a Event>,
    pub active_reminders: Vec<&'a Reminder>,
    pub attendance_count: usize,
    pub observation_count: usize,
    /// First events as served.
    pub upcoming: Vec<&'a Event>,
    pub plannings: Vec<&'a Planning>,
}

impl<'a> HomeSummary<'a> {
    pub fn build(data: &'a AggregateState, today: NaiveDate) -> Self {
        HomeSummary {
            classes_today: data.events.iter().filter(|e| e.date == today).collect(),
            active_reminders: data
                .reminders
                .iter()
                .filter(|r| r.is_active())
                .take(ACTIVE_REMINDERS_SHOWN)
                .collect(),
            attendance_count: data.attendance.len(),
            observation_count: data.observations.len(),
            upcoming: data.events.iter().take(UPCOMING_SHOWN).collect(),
            plannings: data.plannings.iter().take(PLANNINGS_SHOWN).collect(),
        }
    }
}

/// One row of the tracking overview.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentStatusRow<'a> {
    pub glyph: &'static str,
    pub full_name: &'a str,
    pub group: &'a str,
}

impl<'a> From<&'a Student> for StudentStatusRow<'a> {
    fn from(student: &'a Student) -> Self {
        StudentStatusRow {
            glyph: student.progress_status.glyph(),
            full_name: &student.full_name,
            group: student.group_name.as_deref().unwrap_or(NO_GROUP),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingOverview<'a> {
    pub students: Vec<StudentStatusRow<'a>>,
    pub recent_observations: Vec<&'a Observation>,
}

impl<'a> TrackingOverview<'a> {
    pub fn build(data: &'a AggregateState) -> Self {
        TrackingOverview {
            students: data.students.iter().map(StudentStatusRow::from).collect(),
            recent_observations: data
                .observations
                .iter()
                .take(RECENT_OBSERVATIONS_SHOWN)
                .collect(),
        }
    }
}

/// `date · Alumno #id · mood · participation`
pub fn observation_line(observation: &Observation) -> String {
    format!(
        "{} · Alumno #{} · {} · {}",
        observation.date,
        observation.student_id,
        observation.behavior_mood.as_deref().unwrap_or(NO_DATA),
        observation.participation.as_deref().unwrap_or(NO_DATA),
    )
}

/// Students whose name contains `query`, ignoring case. An empty query
/// matches everyone.
pub fn search_students<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let query = query.trim().to_lowercase();
    students
        .iter()
        .filter(|s| query.is_empty() || s.full_name.to_lowercase().contains(&query))
        .collect()
}

pub fn age_label(student: &Student) -> String {
    match student.age {
        Some(age) => format!("{age} años"),
        None => "edad s/d".to_string(),
    }
}

/// Reminders listed on the settings screen.
pub fn settings_reminders(data: &AggregateState) -> &[Reminder] {
    &data.reminders[..data.reminders.len().min(SETTINGS_REMINDERS_SHOWN)]
}

/// The tabs of the student detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Seguimiento,
    Asistencias,
    Observaciones,
    Contenidos,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 4] = [
        ProfileTab::Seguimiento,
        ProfileTab::Asistencias,
        ProfileTab::Observaciones,
        ProfileTab::Contenidos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileTab::Seguimiento => "seguimiento",
            ProfileTab::Asistencias => "asistencias",
            ProfileTab::Observaciones => "observaciones",
            ProfileTab::Contenidos => "contenidos",
        }
    }
}

impl fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileTab {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                AgendaError::InvalidInput(format!(
                    "Unknown tab '{s}'. Expected seguimiento, asistencias, observaciones or contenidos"
                ))
            })
    }
}

/// Counts shown on the `seguimiento` tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileCounts {
    pub observations: usize,
    pub attendance: usize,
    pub contents: usize,
}

impl From<&StudentProfile> for ProfileCounts {
    fn from(profile: &StudentProfile) -> Self {
        ProfileCounts {
            observations: profile.observations.len(),
            attendance: profile.attendance.len(),
            contents: profile.contents.len(),
        }
    }
}
