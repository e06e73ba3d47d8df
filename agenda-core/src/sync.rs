//! Data synchronizer.
//!
//! Fetches all eight top-level collections concurrently and only hands back
//! an aggregate once every one of them has arrived. A single failure fails
//! the whole load; nothing partial ever reaches the caller.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::error::{AgendaError, AgendaResult};
use crate::event::Event;
use crate::pedagogical::{Attendance, DailyContent, Observation, Planning};
use crate::student::Student;
use crate::task::{Reminder, Task};

/// The top-level collections that make up the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Events,
    Tasks,
    Reminders,
    Students,
    Observations,
    Attendance,
    Plannings,
    Contents,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Events,
        ResourceKind::Tasks,
        ResourceKind::Reminders,
        ResourceKind::Students,
        ResourceKind::Observations,
        ResourceKind::Attendance,
        ResourceKind::Plannings,
        ResourceKind::Contents,
    ];

    /// Endpoint new records are posted to.
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Events => "/api/events",
            ResourceKind::Tasks => "/api/tasks",
            ResourceKind::Reminders => "/api/reminders",
            ResourceKind::Students => "/api/students",
            ResourceKind::Observations => "/api/pedagogical/observations",
            ResourceKind::Attendance => "/api/pedagogical/attendance",
            ResourceKind::Plannings => "/api/pedagogical/plannings",
            ResourceKind::Contents => "/api/pedagogical/contents",
        }
    }

    /// Endpoint the aggregate reads from. Attendance is read as the
    /// trailing week.
    pub fn list_path(&self) -> &'static str {
        match self {
            ResourceKind::Attendance => "/api/pedagogical/attendance?view=weekly",
            other => other.collection_path(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Events => "events",
            ResourceKind::Tasks => "tasks",
            ResourceKind::Reminders => "reminders",
            ResourceKind::Students => "students",
            ResourceKind::Observations => "observations",
            ResourceKind::Attendance => "attendance",
            ResourceKind::Plannings => "plannings",
            ResourceKind::Contents => "contents",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of every top-level collection as of the last completed load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateState {
    pub events: Vec<Event>,
    pub tasks: Vec<Task>,
    pub reminders: Vec<Reminder>,
    pub students: Vec<Student>,
    pub observations: Vec<Observation>,
    pub attendance: Vec<Attendance>,
    pub plannings: Vec<Planning>,
    pub contents: Vec<DailyContent>,
}

impl AggregateState {
    pub fn len_of(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Events => self.events.len(),
            ResourceKind::Tasks => self.tasks.len(),
            ResourceKind::Reminders => self.reminders.len(),
            ResourceKind::Students => self.students.len(),
            ResourceKind::Observations => self.observations.len(),
            ResourceKind::Attendance => self.attendance.len(),
            ResourceKind::Plannings => self.plannings.len(),
            ResourceKind::Contents => self.contents.len(),
        }
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn student(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }
}

async fn fetch<T: DeserializeOwned>(
    api: &ApiClient,
    token: &str,
    kind: ResourceKind,
) -> AgendaResult<Vec<T>> {
    api.get(kind.list_path(), token)
        .await
        .map_err(|e| AgendaError::Sync {
            resource: kind,
            source: Box::new(e),
        })
}

/// Load all eight collections at once.
///
/// Returns the first failure, tagged with the collection that failed.
pub async fn load_all(api: &ApiClient, token: &str) -> AgendaResult<AggregateState> {
    let (events, tasks, reminders, students, observations, attendance, plannings, contents) =
        tokio::try_join!(
            fetch::<Event>(api, token, ResourceKind::Events),
            fetch::<Task>(api, token, ResourceKind::Tasks),
            fetch::<Reminder>(api, token, ResourceKind::Reminders),
            fetch::<Student>(api, token, ResourceKind::Students),
            fetch::<Observation>(api, token, ResourceKind::Observations),
            fetch::<Attendance>(api, token, ResourceKind::Attendance),
            fetch::<Planning>(api, token, ResourceKind::Plannings),
            fetch::<DailyContent>(api, token, ResourceKind::Contents),
        )?;

    let state = AggregateState {
        events,
        tasks,
        reminders,
        students,
        observations,
        attendance,
        plannings,
        contents,
    };

    tracing::debug!(
        events = state.events.len(),
        tasks = state.tasks.len(),
        students = state.students.len(),
        "aggregate loaded"
    );

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_distinct_read_endpoints() {
        let mut paths: Vec<_> = ResourceKind::ALL.iter().map(|k| k.list_path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 8);
    }

    #[test]
    fn attendance_reads_weekly_but_posts_plain() {
        assert_eq!(
            ResourceKind::Attendance.list_path(),
            "/api/pedagogical/attendance?view=weekly"
        );
        assert_eq!(
            ResourceKind::Attendance.collection_path(),
            "/api/pedagogical/attendance"
        );
    }
}
