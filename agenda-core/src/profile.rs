//! Profile loader: the composite, student-scoped snapshot.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::AgendaResult;
use crate::pedagogical::{Attendance, DailyContent, Observation};
use crate::student::Student;

/// A student together with everything recorded about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student: Student,
    #[serde(default)]
    pub attendance: Vec<Attendance>,
    #[serde(default)]
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub contents: Vec<DailyContent>,
}

impl StudentProfile {
    pub fn student_id(&self) -> i64 {
        self.student.id
    }
}

pub fn profile_path(student_id: i64) -> String {
    format!("/api/students/{student_id}/profile")
}

pub fn student_path(student_id: i64) -> String {
    format!("/api/students/{student_id}")
}

/// Fetch the profile of one student.
pub async fn load_profile(
    api: &ApiClient,
    token: &str,
    student_id: i64,
) -> AgendaResult<StudentProfile> {
    let profile: StudentProfile = api.get(&profile_path(student_id), token).await?;
    tracing::debug!(
        student_id,
        attendance = profile.attendance.len(),
        observations = profile.observations.len(),
        contents = profile.contents.len(),
        "profile loaded"
    );
    Ok(profile)
}
