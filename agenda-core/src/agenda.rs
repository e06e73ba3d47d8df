//! Calendar agenda: events laid out over a day, week or month window, with
//! recurring events expanded into their occurrences.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc};
use rrule::RRuleSet;

use crate::error::AgendaError;
use crate::event::{Event, Recurrence};

/// Upper bound on occurrences per event in one window.
const MAX_OCCURRENCES: u16 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarScope {
    Day,
    #[default]
    Week,
    Month,
}

impl CalendarScope {
    pub const ALL: [CalendarScope; 3] = [
        CalendarScope::Day,
        CalendarScope::Week,
        CalendarScope::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarScope::Day => "day",
            CalendarScope::Week => "week",
            CalendarScope::Month => "month",
        }
    }

    /// Name used in export titles and file names.
    pub fn spanish_name(&self) -> &'static str {
        match self {
            CalendarScope::Day => "dia",
            CalendarScope::Week => "semana",
            CalendarScope::Month => "mes",
        }
    }

    /// Inclusive date window containing `anchor`. Weeks start on Monday.
    pub fn window(&self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            CalendarScope::Day => (anchor, anchor),
            CalendarScope::Week => {
                let start = anchor - Days::new(u64::from(anchor.weekday().num_days_from_monday()));
                (start, start + Days::new(6))
            }
            CalendarScope::Month => {
                let start = anchor - Days::new(u64::from(anchor.day0()));
                let end = start + Months::new(1) - Days::new(1);
                (start, end)
            }
        }
    }
}

impl fmt::Display for CalendarScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarScope {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "dia" | "día" => Ok(CalendarScope::Day),
            "week" | "semana" => Ok(CalendarScope::Week),
            "month" | "mes" => Ok(CalendarScope::Month),
            other => Err(AgendaError::InvalidInput(format!(
                "Unknown calendar scope '{other}'. Expected day, week or month"
            ))),
        }
    }
}

/// One dated appearance of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence<'a> {
    pub date: NaiveDate,
    pub event: &'a Event,
}

impl Occurrence<'_> {
    pub fn start_time(&self) -> NaiveTime {
        self.event.start_time
    }

    /// `date start-end | title | category`
    pub fn agenda_line(&self) -> String {
        format!(
            "{} {} | {} | {}",
            self.date,
            self.event.time_range(),
            self.event.title,
            self.event.category
        )
    }
}

/// The RRULE body for an event, if it repeats.
fn rrule_body(event: &Event) -> Option<String> {
    match event.recurrence.as_ref()? {
        Recurrence::None => None,
        Recurrence::Other(kind) => {
            tracing::debug!(
                event_id = event.id,
                recurrence = %kind,
                "unknown recurrence, using base date"
            );
            None
        }
        Recurrence::Daily => Some("FREQ=DAILY".to_string()),
        Recurrence::Weekly => Some("FREQ=WEEKLY".to_string()),
        Recurrence::Monthly => Some("FREQ=MONTHLY".to_string()),
        Recurrence::Custom => event
            .recurrence_rule
            .as_deref()
            .map(|rule| rule.trim().trim_start_matches("RRULE:").to_string())
            .filter(|rule| !rule.is_empty()),
    }
}

/// Dates on which `event` occurs within `[from, to]`.
pub fn occurrence_dates(event: &Event, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let base = || {
        if (from..=to).contains(&event.date) {
            vec![event.date]
        } else {
            Vec::new()
        }
    };

    let Some(body) = rrule_body(event) else {
        return base();
    };
    if event.date > to {
        return Vec::new();
    }

    // Occurrences are whole dates, so DTSTART sits at midnight UTC
    let rule = format!(
        "DTSTART:{}T000000Z\nRRULE:{}",
        event.date.format("%Y%m%d"),
        body
    );
    let rrule_set: RRuleSet = match rule.parse() {
        Ok(set) => set,
        Err(e) => {
            tracing::debug!(
                event_id = event.id,
                error = %e,
                "unusable recurrence rule, using base date"
            );
            return base();
        }
    };

    // after/before are exclusive
    let tz: rrule::Tz = Utc.into();
    let after = (from.and_time(NaiveTime::MIN).and_utc() - Duration::seconds(1)).with_timezone(&tz);
    let before = (to.and_time(NaiveTime::MIN).and_utc() + Duration::seconds(1)).with_timezone(&tz);

    rrule_set
        .after(after)
        .before(before)
        .all(MAX_OCCURRENCES)
        .dates
        .iter()
        .map(|dt| dt.date_naive())
        .collect()
}

/// All occurrences of `events` within `[from, to]`, by date then start time.
pub fn occurrences(events: &[Event], from: NaiveDate, to: NaiveDate) -> Vec<Occurrence<'_>> {
    let mut all: Vec<Occurrence> = events
        .iter()
        .flat_map(|event| {
            occurrence_dates(event, from, to)
                .into_iter()
                .map(move |date| Occurrence { date, event })
        })
        .collect();

    all.sort_by_key(|o| (o.date, o.start_time(), o.event.id));
    all
}

/// A titled, printable agenda for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDocument {
    pub scope: CalendarScope,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub title: String,
    pub lines: Vec<String>,
}

impl AgendaDocument {
    pub fn build(events: &[Event], scope: CalendarScope, anchor: NaiveDate) -> Self {
        let (from, to) = scope.window(anchor);
        let lines = occurrences(events, from, to)
            .iter()
            .map(Occurrence::agenda_line)
            .collect();

        AgendaDocument {
            scope,
            from,
            to,
            title: format!("Agenda Docente - Vista {}", scope.spanish_name()),
            lines,
        }
    }

    /// `agenda-<scope>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("agenda-{}.{extension}", self.scope.spanish_name())
    }
}
