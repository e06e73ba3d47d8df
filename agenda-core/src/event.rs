//! Calendar event types.
//!
//! An event occupies a time slot on a single date and may repeat.
//! The server assigns the display color.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::AgendaError;

/// A calendar event as returned by `GET /api/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub category: String,
    pub notes: Option<String>,
    pub recurrence: Option<Recurrence>,
    /// Free-text rule, only meaningful when `recurrence` is `Custom`
    pub recurrence_rule: Option<String>,
    pub color: String,
}

/// Payload for `POST /api/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
}

/// Categories offered by the quick-add form. The server accepts any string.
pub const EVENT_CATEGORIES: [&str; 4] = ["subject", "practice", "exam", "personal"];

impl NewEvent {
    /// Attach a recurrence. `None` is sent as an absent field and a rule is
    /// only kept for `Custom`.
    pub fn with_recurrence(mut self, recurrence: Recurrence, rule: Option<String>) -> Self {
        self.recurrence_rule =
            rule.filter(|r| recurrence == Recurrence::Custom && !r.trim().is_empty());
        self.recurrence = (recurrence != Recurrence::None).then_some(recurrence);
        self
    }
}

/// How an event repeats. Values written by other clients are kept
/// verbatim and treated as not repeating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Custom,
    Other(String),
}

impl Recurrence {
    pub fn as_str(&self) -> &str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Custom => "custom",
            Recurrence::Other(s) => s,
        }
    }
}

impl From<String> for Recurrence {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "none" => Recurrence::None,
            "daily" => Recurrence::Daily,
            "weekly" => Recurrence::Weekly,
            "monthly" => Recurrence::Monthly,
            "custom" => Recurrence::Custom,
            _ => Recurrence::Other(value),
        }
    }
}

impl From<Recurrence> for String {
    fn from(value: Recurrence) -> Self {
        match value {
            Recurrence::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = AgendaError;

    /// Strict parse for user input: only the known kinds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Recurrence::from(s.trim().to_lowercase()) {
            Recurrence::Other(other) => Err(AgendaError::InvalidInput(format!(
                "Unknown recurrence '{other}'. Expected none, daily, weekly, monthly or custom"
            ))),
            known => Ok(known),
        }
    }
}

impl Event {
    /// `HH:MM-HH:MM`
    pub fn time_range(&self) -> String {
        format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }

    pub fn is_recurring(&self) -> bool {
        matches!(
            self.recurrence,
            Some(Recurrence::Daily | Recurrence::Weekly | Recurrence::Monthly | Recurrence::Custom)
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_payload() {
        let json = r##"{
            "id": 3, "owner_id": 1, "title": "Ronda de canciones",
            "date": "2026-03-20", "start_time": "09:00:00", "end_time": "09:45:00",
            "location": null, "category": "clase", "notes": null,
            "recurrence": "weekly", "recurrence_rule": null, "color": "#60a5fa"
        }"##;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.recurrence, Some(Recurrence::Weekly));
        assert_eq!(event.time_range(), "09:00-09:45");
        assert!(event.is_recurring());
    }

    #[test]
    fn new_event_omits_empty_optionals() {
        let new = NewEvent {
            title: "Acto".into(),
            date: NaiveDate::from_ymd_opt(2026, 5, 25).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            location: None,
            category: "acto".into(),
            notes: None,
            recurrence: None,
            recurrence_rule: None,
        };

        let value = serde_json::to_value(&new).unwrap();
        assert!(value.get("location").is_none());
        assert!(value.get("recurrence").is_none());
        assert_eq!(value["start_time"], "10:00:00");
    }

    #[test]
    fn rule_only_kept_for_custom() {
        let base = NewEvent {
            title: "Huerta".into(),
            date: NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            location: None,
            category: EVENT_CATEGORIES[1].into(),
            notes: None,
            recurrence: None,
            recurrence_rule: None,
        };

        let weekly = base
            .clone()
            .with_recurrence(Recurrence::Weekly, Some("FREQ=DAILY".into()));
        assert_eq!(weekly.recurrence, Some(Recurrence::Weekly));
        assert_eq!(weekly.recurrence_rule, None);

        let none = base.clone().with_recurrence(Recurrence::None, None);
        assert_eq!(none.recurrence, None);

        let custom =
            base.with_recurrence(Recurrence::Custom, Some("FREQ=WEEKLY;BYDAY=MO,WE".into()));
        assert_eq!(custom.recurrence_rule.as_deref(), Some("FREQ=WEEKLY;BYDAY=MO,WE"));
    }

    #[test]
    fn parses_recurrence_names() {
        assert_eq!("Weekly".parse::<Recurrence>().unwrap(), Recurrence::Weekly);
        assert_eq!("".parse::<Recurrence>().unwrap(), Recurrence::None);
        assert!("yearly".parse::<Recurrence>().is_err());
    }

    #[test]
    fn unknown_recurrence_is_kept_but_not_repeating() {
        let json = r##"{
            "id": 4, "owner_id": 1, "title": "Aniversario del jardín",
            "date": "2026-09-10", "start_time": "10:00:00", "end_time": "11:00:00",
            "location": null, "category": "acto", "notes": null,
            "recurrence": "yearly", "recurrence_rule": null, "color": "#f472b6"
        }"##;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.recurrence, Some(Recurrence::Other("yearly".into())));
        assert!(!event.is_recurring());
        assert_eq!(serde_json::to_value(&event).unwrap()["recurrence"], "yearly");
    }
}
