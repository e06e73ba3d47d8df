use std::path::PathBuf;

use agenda_core::View;
use agenda_core::agenda::{self, AgendaDocument, CalendarScope};
use agenda_core::event::{EVENT_CATEGORIES, NewEvent, Recurrence};
use agenda_core::export;
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::{load_app, print_nav, submit, today};
use crate::ExportFormat;
use crate::render::{self, Render};

pub async fn show(scope: CalendarScope, date: Option<NaiveDate>) -> Result<()> {
    let app = load_app(View::Calendar).await?;
    let (from, to) = scope.window(date.unwrap_or_else(today));
    let occurrences = agenda::occurrences(&app.data().events, from, to);

    print_nav(&app);
    println!(
        "{} {}",
        render::heading("Calendario"),
        format!("{from} → {to}").dimmed()
    );

    if occurrences.is_empty() {
        println!("{}", render::empty("Sin eventos"));
    }
    for occurrence in &occurrences {
        println!("   {}", occurrence.render());
    }

    Ok(())
}

pub async fn export(
    scope: CalendarScope,
    date: Option<NaiveDate>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let app = load_app(View::Calendar).await?;
    let anchor = date.unwrap_or_else(today);
    let document = AgendaDocument::build(&app.data().events, scope, anchor);
    let dir = output.unwrap_or_else(|| PathBuf::from("."));

    let path = match format {
        ExportFormat::Pdf => {
            let path = dir.join(document.file_name("pdf"));
            export::write_pdf(&document, &path)?;
            path
        }
        ExportFormat::Ics => {
            let path = dir.join(document.file_name("ics"));
            let occurrences = agenda::occurrences(&app.data().events, document.from, document.to);
            let ics = export::generate_agenda_ics(&occurrences, &app.data().reminders);
            std::fs::write(&path, ics)
                .with_context(|| format!("No se pudo escribir {}", path.display()))?;
            path
        }
    };

    println!(
        "{} {} ({} eventos)",
        "✓".green(),
        path.display(),
        document.lines.len()
    );
    Ok(())
}

/// Event fields from the command line. Anything missing is prompted for
/// when no title was given.
pub struct EventForm {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub rule: Option<String>,
}

fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Prompt until the input parses.
fn prompt_parsed<T>(prompt: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        match input.parse() {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_time(prompt: &str, default: NaiveTime) -> Result<NaiveTime> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(default.format("%H:%M").to_string())
            .interact_text()?;
        match parse_time(&input) {
            Ok(time) => return Ok(time),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

impl EventForm {
    fn into_new_event(self) -> Result<NewEvent> {
        let interactive = self.title.is_none();

        let title = match self.title {
            Some(t) => t,
            None => Input::<String>::new()
                .with_prompt("  Título")
                .interact_text()?,
        };

        let date = match self.date {
            Some(d) => d,
            None if interactive => prompt_parsed("  Fecha", today())?,
            None => today(),
        };
        let start_time = match self.start {
            Some(t) => t,
            None if interactive => prompt_time("  Inicio", default_start())?,
            None => default_start(),
        };
        let end_time = match self.end {
            Some(t) => t,
            None if interactive => prompt_time("  Fin", default_end())?,
            None => default_end(),
        };
        if end_time <= start_time {
            bail!("La hora de fin {end_time} debe ser posterior al inicio {start_time}");
        }

        let category = match self.category {
            Some(c) => c,
            None if interactive => {
                let index = Select::new()
                    .with_prompt("  Categoría")
                    .items(&EVENT_CATEGORIES)
                    .default(0)
                    .interact()?;
                EVENT_CATEGORIES[index].to_string()
            }
            None => EVENT_CATEGORIES[0].to_string(),
        };

        let location = match self.location {
            Some(l) => Some(l).filter(|l| !l.is_empty()),
            None if interactive => prompt_optional("  Lugar (opcional)")?,
            None => None,
        };

        let recurrence = match self.recurrence {
            Some(r) => r,
            None if interactive => prompt_parsed("  Repetición", Recurrence::None)?,
            None => Recurrence::None,
        };
        let rule = match self.rule {
            Some(r) => Some(r),
            None if interactive && recurrence == Recurrence::Custom => {
                prompt_optional("  Regla (RRULE)")?
            }
            None => None,
        };

        let event = NewEvent {
            title,
            date,
            start_time,
            end_time,
            location,
            category,
            notes: self.notes.filter(|n| !n.is_empty()),
            recurrence: None,
            recurrence_rule: None,
        };
        Ok(event.with_recurrence(recurrence, rule))
    }
}

fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .with_context(|| format!("Hora inválida '{input}', se espera HH:MM"))
}

pub async fn new_event(form: EventForm) -> Result<()> {
    let mut app = load_app(View::Calendar).await?;
    let event = form.into_new_event()?;

    submit("Guardando evento", app.add(&event)).await?;

    println!(
        "{} {} {} {}",
        "✓".green(),
        event.title.bold(),
        event.date,
        format!("{}-{}", event.start_time.format("%H:%M"), event.end_time.format("%H:%M")).dimmed()
    );
    Ok(())
}
