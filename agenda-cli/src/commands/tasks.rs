use agenda_core::View;
use agenda_core::task::{NewTask, Priority};
use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::{load_app, submit};
use crate::render::{self, Render};

pub async fn list() -> Result<()> {
    let app = load_app(View::Home).await?;

    println!("{}", render::heading("Tareas"));
    if app.data().tasks.is_empty() {
        println!("{}", render::empty("Sin tareas"));
    }
    for task in &app.data().tasks {
        println!("   {}", task.render());
    }

    Ok(())
}

pub async fn new_task(
    title: String,
    due_date: Option<NaiveDate>,
    priority: Priority,
    notes: Option<String>,
    event_id: Option<i64>,
) -> Result<()> {
    let mut app = load_app(View::Home).await?;
    let task = NewTask {
        title,
        due_date,
        priority,
        notes: notes.filter(|n| !n.is_empty()),
        event_id,
    };
    submit("Guardando tarea", app.add(&task)).await?;

    println!("{} {} {}", "✓".green(), task.title.bold(), task.priority.render());
    Ok(())
}

pub async fn toggle(id: i64) -> Result<()> {
    let mut app = load_app(View::Home).await?;
    submit("Actualizando tarea", app.toggle_task_by_id(id)).await?;

    match app.data().task(id) {
        Some(task) => println!("   {}", task.render()),
        None => println!("{}", render::empty("La tarea ya no está en la lista")),
    }
    Ok(())
}
