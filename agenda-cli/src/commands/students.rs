use agenda_core::pedagogical::{
    AttendanceStatus, CONTENT_TOPICS, NewAttendance, NewContent, NewObservation,
};
use agenda_core::profile::StudentProfile;
use agenda_core::student::{NewStudent, ProgressStatus, StudentUpdate};
use agenda_core::summary::{self, ProfileCounts, ProfileTab};
use agenda_core::{App, Screen, View};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::{load_app, print_nav, submit, today};
use crate::render::{self, Render};

pub async fn list(search: Option<&str>) -> Result<()> {
    let app = load_app(View::Students).await?;
    let students = summary::search_students(&app.data().students, search.unwrap_or_default());

    print_nav(&app);
    println!("{}", render::heading("Alumnos"));
    if students.is_empty() {
        println!("{}", render::empty("Sin alumnos"));
    }
    for student in students {
        println!("   {}", student.render());
    }

    Ok(())
}

pub async fn new_student(
    full_name: String,
    age: Option<u32>,
    birthday: Option<NaiveDate>,
    group_name: Option<String>,
    guardian_contact: Option<String>,
) -> Result<()> {
    let mut app = load_app(View::Students).await?;
    let student = NewStudent {
        full_name,
        age,
        birthday,
        group_name: group_name.filter(|g| !g.is_empty()),
        guardian_contact: guardian_contact.filter(|c| !c.is_empty()),
        progress_status: ProgressStatus::default(),
    };
    submit("Guardando alumno", app.add(&student)).await?;

    println!("{} {} agregado", "✓".green(), student.full_name.bold());
    Ok(())
}

/// Load the app on the students view with `student_id` open.
async fn open_student(student_id: i64) -> Result<App> {
    let mut app = load_app(View::Students).await?;
    submit("Cargando perfil", app.select_student(student_id)).await?;

    if app.screen() != (Screen::StudentDetail { student_id }) {
        bail!("No se pudo abrir el alumno #{student_id}");
    }
    Ok(app)
}

fn print_profile(profile: &StudentProfile, tab: ProfileTab) {
    let student = &profile.student;
    let none = summary::NO_DATA;

    println!("{}", "← Volver a alumnos: agenda student list".dimmed());
    println!("{}", render::heading(&student.full_name));
    println!(
        "   {} · Cumpleaños: {} · {}",
        student
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Edad s/d".to_string()),
        student
            .birthday
            .map(|b| b.to_string())
            .unwrap_or_else(|| none.to_string()),
        student.group_name.as_deref().unwrap_or(summary::NO_GROUP)
    );
    println!(
        "   Contacto familiar: {}",
        student.guardian_contact.as_deref().unwrap_or(none)
    );
    println!("   Estado general: {}", student.progress_status.render());

    let tabs: Vec<String> = ProfileTab::ALL
        .iter()
        .map(|t| {
            if *t == tab {
                t.as_str().bold().underline().to_string()
            } else {
                t.as_str().dimmed().to_string()
            }
        })
        .collect();
    println!("\n   {}", tabs.join("  "));

    match tab {
        ProfileTab::Seguimiento => {
            let counts = ProfileCounts::from(profile);
            println!("   Observaciones totales: {}", counts.observations);
            println!("   Asistencias registradas: {}", counts.attendance);
            println!("   Contenidos vistos: {}", counts.contents);
        }
        ProfileTab::Asistencias => print_list(&profile.attendance, "Sin asistencias"),
        ProfileTab::Observaciones => print_list(&profile.observations, "Sin observaciones"),
        ProfileTab::Contenidos => print_list(&profile.contents, "Sin contenidos"),
    }
}

fn print_list<T: Render>(items: &[T], empty: &str) {
    if items.is_empty() {
        println!("{}", render::empty(empty));
    }
    for item in items {
        println!("   {}", item.render());
    }
}

fn print_open_profile(app: &App, tab: ProfileTab) {
    if let Some(profile) = app.profile() {
        print_profile(profile, tab);
    }
}

pub async fn show(student_id: i64, tab: ProfileTab) -> Result<()> {
    let app = open_student(student_id).await?;

    print_nav(&app);
    print_open_profile(&app, tab);
    Ok(())
}

pub async fn set_status(student_id: i64, status: ProgressStatus) -> Result<()> {
    let mut app = open_student(student_id).await?;
    submit(
        "Actualizando estado",
        app.update_student(student_id, &StudentUpdate::progress(status)),
    )
    .await?;

    print_open_profile(&app, ProfileTab::Seguimiento);
    Ok(())
}

pub async fn attendance(
    student_id: i64,
    status: AttendanceStatus,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut app = open_student(student_id).await?;
    let record = NewAttendance {
        student_id,
        date: date.unwrap_or_else(today),
        status,
    };
    submit("Registrando asistencia", app.add(&record)).await?;

    print_open_profile(&app, ProfileTab::Asistencias);
    Ok(())
}

pub async fn observation(
    student_id: i64,
    notes: String,
    behavior_mood: Option<String>,
    participation: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    if notes.trim().is_empty() {
        bail!("La observación necesita notas");
    }

    let mut app = open_student(student_id).await?;
    let record = NewObservation {
        student_id,
        date: date.unwrap_or_else(today),
        behavior_mood: behavior_mood.filter(|m| !m.is_empty()),
        participation: participation.filter(|p| !p.is_empty()),
        notes,
    };
    submit("Guardando observación", app.add(&record)).await?;

    print_open_profile(&app, ProfileTab::Observaciones);
    Ok(())
}

pub async fn content(
    topic: String,
    student_id: Option<i64>,
    notes: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    if !CONTENT_TOPICS.contains(&topic.as_str()) {
        eprintln!(
            "  {}",
            format!("'{topic}' no es uno de: {}", CONTENT_TOPICS.join(", ")).yellow()
        );
    }

    let mut app = match student_id {
        Some(id) => open_student(id).await?,
        None => load_app(View::Students).await?,
    };
    let record = NewContent {
        student_id,
        date: date.unwrap_or_else(today),
        topic,
        notes: notes.filter(|n| !n.is_empty()),
    };
    submit("Agregando contenido", app.add(&record)).await?;

    match student_id {
        Some(_) => print_open_profile(&app, ProfileTab::Contenidos),
        None => println!("{} {} agregado", "✓".green(), record.topic.bold()),
    }
    Ok(())
}
