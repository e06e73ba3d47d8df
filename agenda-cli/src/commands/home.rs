use agenda_core::View;
use agenda_core::pedagogical::{NewPlanning, WEEKDAYS};
use agenda_core::summary::HomeSummary;
use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate, Weekday};
use owo_colors::OwoColorize;

use super::{load_app, print_nav, submit, today};
use crate::render::{self, Render};

pub async fn run() -> Result<()> {
    let app = load_app(View::Home).await?;
    let summary = HomeSummary::build(app.data(), today());

    print_nav(&app);

    println!("{}", render::heading("Hoy"));
    println!("{}", "Resumen rápido de la jornada docente.".dimmed());
    for (count, label) in [
        (summary.classes_today.len(), "clases hoy"),
        (summary.active_reminders.len(), "recordatorios activos"),
        (summary.attendance_count, "asistencias registradas"),
        (summary.observation_count, "observaciones"),
    ] {
        println!("{}", format!("  {count} {label}").bold());
    }

    println!("\n{}", render::heading("Próximos eventos"));
    if summary.upcoming.is_empty() {
        println!("{}", render::empty("Sin eventos"));
    }
    for event in &summary.upcoming {
        println!("   {}", event.render());
    }

    println!("\n{}", render::heading("Planificación semanal"));
    if summary.plannings.is_empty() {
        println!("{}", render::empty("Sin planificación"));
    }
    for planning in &summary.plannings {
        println!("   {}", planning.render());
    }

    println!("\n{}", render::heading("Tareas"));
    if app.data().tasks.is_empty() {
        println!("{}", render::empty("Sin tareas"));
    }
    for task in &app.data().tasks {
        println!("   {}", task.render());
    }

    Ok(())
}

pub async fn plannings() -> Result<()> {
    let app = load_app(View::Home).await?;

    println!("{}", render::heading("Planificación semanal"));
    if app.data().plannings.is_empty() {
        println!("{}", render::empty("Sin planificación"));
    }
    for planning in &app.data().plannings {
        println!(
            "   {} {}",
            format!("semana {}", planning.week_start).dimmed(),
            planning.render()
        );
    }

    Ok(())
}

/// Weekday names are matched loosely ("miercoles", "LUNES") against the
/// planning form's options.
fn normalize_weekday(input: &str) -> Option<&'static str> {
    let fold = |s: &str| s.trim().to_lowercase().replace('é', "e");
    WEEKDAYS.into_iter().find(|day| fold(day) == fold(input))
}

pub async fn new_planning(
    week_start: NaiveDate,
    weekday: String,
    activities: String,
) -> Result<()> {
    let Some(weekday) = normalize_weekday(&weekday) else {
        bail!(
            "Día desconocido '{weekday}'. Se espera uno de: {}",
            WEEKDAYS.join(", ")
        );
    };
    if week_start.weekday() != Weekday::Mon {
        eprintln!(
            "  {}",
            format!("{week_start} no es lunes; se guarda tal cual").yellow()
        );
    }

    let mut app = load_app(View::Home).await?;
    let planning = NewPlanning {
        week_start,
        weekday: weekday.to_string(),
        activities,
    };
    submit("Guardando planificación", app.add(&planning)).await?;

    println!("{} Planificación agregada para {}", "✓".green(), weekday.bold());
    Ok(())
}
