//! View router.
//!
//! One discriminant picks the screen. The students view has two modes:
//! the list, and the detail of a selected student once their profile has
//! loaded. Switching top-level view always drops the selection.

use std::fmt;
use std::str::FromStr;

use crate::error::AgendaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Calendar,
    Students,
    Tracking,
    Settings,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::Calendar,
        View::Students,
        View::Tracking,
        View::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Calendar => "calendar",
            View::Students => "students",
            View::Tracking => "tracking",
            View::Settings => "settings",
        }
    }

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Calendar => "Calendario",
            View::Students => "Alumnos",
            View::Tracking => "Seguimiento",
            View::Settings => "Ajustes",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            View::Home => "🏠",
            View::Calendar => "📅",
            View::Students => "👧",
            View::Tracking => "📝",
            View::Settings => "⚙️",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                AgendaError::InvalidInput(format!(
                    "Unknown view '{s}'. Expected home, calendar, students, tracking or settings"
                ))
            })
    }
}

/// What is actually on screen, resolved from the router and the loaded
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Calendar,
    StudentList,
    StudentDetail { student_id: i64 },
    Tracking,
    Settings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRouter {
    current: View,
    selected_student: Option<i64>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn selected_student(&self) -> Option<i64> {
        self.selected_student
    }

    /// Move to a top-level view. Always clears the student selection, even
    /// when staying on the same view.
    pub fn change_view(&mut self, view: View) {
        self.selected_student = None;
        self.current = view;
    }

    pub fn select_student(&mut self, student_id: i64) {
        self.selected_student = Some(student_id);
    }

    /// Detail back to list. Takes effect immediately.
    pub fn clear_selection(&mut self) {
        self.selected_student = None;
    }

    pub fn reset(&mut self) {
        *self = ViewRouter::default();
    }

    /// Resolve the screen. `loaded_profile` is the student id of the
    /// profile currently held, if any.
    pub fn screen(&self, loaded_profile: Option<i64>) -> Screen {
        match self.current {
            View::Home => Screen::Home,
            View::Calendar => Screen::Calendar,
            View::Tracking => Screen::Tracking,
            View::Settings => Screen::Settings,
            View::Students => match (self.selected_student, loaded_profile) {
                (Some(selected), Some(loaded)) if selected == loaded => {
                    Screen::StudentDetail {
                        student_id: selected,
                    }
                }
                _ => Screen::StudentList,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let router = ViewRouter::new();
        assert_eq!(router.current(), View::Home);
        assert_eq!(router.screen(None), Screen::Home);
    }

    #[test]
    fn detail_needs_selection_and_loaded_profile() {
        let mut router = ViewRouter::new();
        router.change_view(View::Students);
        router.select_student(4);

        assert_eq!(router.screen(None), Screen::StudentList);
        assert_eq!(router.screen(Some(9)), Screen::StudentList);
        assert_eq!(
            router.screen(Some(4)),
            Screen::StudentDetail { student_id: 4 }
        );
    }

    #[test]
    fn changing_view_clears_selection() {
        let mut router = ViewRouter::new();
        router.change_view(View::Students);
        router.select_student(4);

        router.change_view(View::Tracking);
        assert_eq!(router.selected_student(), None);

        router.change_view(View::Students);
        assert_eq!(router.screen(Some(4)), Screen::StudentList);
    }

    #[test]
    fn back_returns_to_list() {
        let mut router = ViewRouter::new();
        router.change_view(View::Students);
        router.select_student(4);
        router.clear_selection();

        assert_eq!(router.current(), View::Students);
        assert_eq!(router.screen(Some(4)), Screen::StudentList);
    }

    #[test]
    fn parses_view_names() {
        assert_eq!("Tracking".parse::<View>().unwrap(), View::Tracking);
        assert!(matches!(
            "reports".parse::<View>(),
            Err(AgendaError::InvalidInput(_))
        ));
    }
}
