//! Agenda as an iCalendar feed: one VEVENT per occurrence, in floating
//! local time.

use chrono::NaiveDateTime;
use icalendar::{Alarm, Calendar, Component, EventLike, Trigger};

use crate::agenda::Occurrence;
use crate::task::Reminder;

const PRODID: &str = "PRODID:AGENDA-DOCENTE";

fn uid(occurrence: &Occurrence) -> String {
    format!(
        "event-{}-{}@agenda-docente",
        occurrence.event.id,
        occurrence.date.format("%Y%m%d")
    )
}

fn floating(datetime: NaiveDateTime) -> String {
    datetime.format("%Y%m%dT%H%M%S").to_string()
}

/// Generate .ics content for `occurrences`. Reminders attached to an event
/// (and not daily digests) become display alarms on each of its occurrences.
pub fn generate_agenda_ics(occurrences: &[Occurrence], reminders: &[Reminder]) -> String {
    let mut cal = Calendar::new();

    for occurrence in occurrences {
        let event = occurrence.event;
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&uid(occurrence));
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTART", floating(occurrence.date.and_time(event.start_time)));
        ics_event.add_property("DTEND", floating(occurrence.date.and_time(event.end_time)));
        ics_event.add_property("CATEGORIES", &event.category);

        if let Some(ref notes) = event.notes {
            ics_event.description(notes);
        }
        if let Some(ref location) = event.location {
            ics_event.location(location);
        }

        for reminder in reminders
            .iter()
            .filter(|r| r.is_active() && r.event_id == Some(event.id))
        {
            let trigger = Trigger::before_start(chrono::Duration::minutes(i64::from(
                reminder.minutes_before,
            )));
            let message = reminder.custom_message.as_deref().unwrap_or("Recordatorio");
            ics_event.alarm(Alarm::display(message, trigger));
        }

        cal.push(ics_event.done());
    }

    normalize(&cal.done().to_string())
}

/// Use our own PRODID and drop CALSCALE:GREGORIAN, which is the default.
fn normalize(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::event::Event;

    fn event() -> Event {
        Event {
            id: 7,
            owner_id: 1,
            title: "Ronda de canciones".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
            location: Some("Sala de 4".into()),
            category: "subject".into(),
            notes: None,
            recurrence: None,
            recurrence_rule: None,
            color: "#60a5fa".into(),
        }
    }

    #[test]
    fn one_vevent_per_occurrence() {
        let event = event();
        let occurrences = vec![
            Occurrence {
                date: event.date,
                event: &event,
            },
            Occurrence {
                date: NaiveDate::from_ymd_opt(2026, 3, 23).unwrap(),
                event: &event,
            },
        ];

        let ics = generate_agenda_ics(&occurrences, &[]);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("UID:event-7-20260323@agenda-docente"));
        assert!(ics.contains("DTSTART:20260316T090000"));
        assert!(ics.contains("PRODID:AGENDA-DOCENTE"));
        assert!(!ics.contains("CALSCALE"));
    }

    #[test]
    fn event_reminders_become_alarms() {
        let event = event();
        let occurrences = vec![Occurrence {
            date: event.date,
            event: &event,
        }];
        let reminders = vec![
            Reminder {
                id: 1,
                owner_id: 1,
                event_id: Some(7),
                task_id: None,
                minutes_before: 15,
                custom_message: Some("Preparar instrumentos".into()),
                daily_summary: false,
            },
            Reminder {
                id: 2,
                owner_id: 1,
                event_id: Some(7),
                task_id: None,
                minutes_before: 0,
                custom_message: None,
                daily_summary: true,
            },
        ];

        let ics = generate_agenda_ics(&occurrences, &reminders);
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 1);
        assert!(ics.contains("Preparar instrumentos"));
    }
}
