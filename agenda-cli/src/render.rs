//! Terminal rendering for agenda types.
//!
//! Extension traits that add colored terminal output to agenda-core types
//! using owo_colors.

use agenda_core::View;
use agenda_core::agenda::Occurrence;
use agenda_core::event::Event;
use agenda_core::pedagogical::{Attendance, AttendanceStatus, DailyContent, Observation, Planning};
use agenda_core::student::{ProgressStatus, Student};
use agenda_core::summary::{self, StudentStatusRow};
use agenda_core::task::{Priority, Reminder, Task};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for View {
    fn render(&self) -> String {
        format!("{} {}", self.icon(), self.label())
    }
}

/// Navigation bar with the current view highlighted.
pub fn nav_bar(current: View) -> String {
    View::ALL
        .iter()
        .map(|view| {
            if *view == current {
                view.render().bold().to_string()
            } else {
                view.render().dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn heading(text: &str) -> String {
    text.bold().to_string()
}

/// Dimmed placeholder for an empty list.
pub fn empty(text: &str) -> String {
    format!("   {}", text.dimmed())
}

impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{} · {} · {}",
            self.date,
            self.start_time.format("%H:%M"),
            self.title
        )
    }
}

impl Render for Occurrence<'_> {
    fn render(&self) -> String {
        let recurring = if self.event.is_recurring() { " ↻" } else { "" };
        format!(
            "{} {} {}{} {}",
            self.date.format("%a %d").dimmed(),
            self.event.time_range().cyan(),
            self.event.title,
            recurring.dimmed(),
            format!("({})", self.event.category).dimmed()
        )
    }
}

impl Render for Priority {
    fn render(&self) -> String {
        match self {
            Priority::High => self.to_string().red().to_string(),
            Priority::Medium => self.to_string().yellow().to_string(),
            Priority::Low => self.to_string().dimmed().to_string(),
            Priority::Other(s) => s.clone(),
        }
    }
}

impl Render for Task {
    fn render(&self) -> String {
        let check = if self.is_done { "✅" } else { "⬜" };
        let due = self
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "sin fecha".to_string());
        let title = if self.is_done {
            self.title.dimmed().to_string()
        } else {
            self.title.clone()
        };

        format!(
            "{} {} {} {} · {}",
            format!("#{}", self.id).dimmed(),
            check,
            title,
            self.priority.render(),
            due.dimmed()
        )
    }
}

impl Render for Reminder {
    fn render(&self) -> String {
        let message = self.custom_message.as_deref().unwrap_or("Recordatorio");
        let daily = if self.daily_summary {
            " (resumen diario)".dimmed().to_string()
        } else {
            String::new()
        };
        format!("{} min · {}{}", self.minutes_before, message, daily)
    }
}

impl Render for ProgressStatus {
    fn render(&self) -> String {
        let label = match self {
            ProgressStatus::Bien => "bien",
            ProgressStatus::EnProceso => "en proceso",
            ProgressStatus::Atencion => "atención",
        };
        format!("{} {}", self.glyph(), label)
    }
}

impl Render for Student {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            format!("#{}", self.id).dimmed(),
            self.full_name.bold(),
            format!(
                "{} · {}",
                self.group_name.as_deref().unwrap_or(summary::NO_GROUP),
                summary::age_label(self)
            )
            .dimmed()
        )
    }
}

impl Render for StudentStatusRow<'_> {
    fn render(&self) -> String {
        format!("{} {} {}", self.glyph, self.full_name.bold(), self.group.dimmed())
    }
}

impl Render for AttendanceStatus {
    fn render(&self) -> String {
        match self {
            AttendanceStatus::Presente => self.as_str().green().to_string(),
            AttendanceStatus::Tarde => self.as_str().yellow().to_string(),
            AttendanceStatus::Ausente => self.as_str().red().to_string(),
            AttendanceStatus::Other(s) => s.clone(),
        }
    }
}

impl Render for Attendance {
    fn render(&self) -> String {
        format!("{} · {}", self.date, self.status.render())
    }
}

impl Render for Observation {
    fn render(&self) -> String {
        format!("{} · {}", self.date, self.notes)
    }
}

impl Render for DailyContent {
    fn render(&self) -> String {
        format!("{} · {}", self.date, self.topic)
    }
}

impl Render for Planning {
    fn render(&self) -> String {
        format!("{}: {}", self.weekday.bold(), self.activities)
    }
}
