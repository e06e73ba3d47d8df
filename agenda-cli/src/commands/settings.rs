use agenda_core::View;
use agenda_core::summary;
use agenda_core::task::NewReminder;
use anyhow::Result;
use owo_colors::OwoColorize;

use super::{load_app, print_nav, submit};
use crate::render::{self, Render};

pub async fn run() -> Result<()> {
    let app = load_app(View::Settings).await?;

    print_nav(&app);
    println!("{}", render::heading("Ajustes"));
    println!("   Idioma por defecto: Español");
    println!("   Perfil docente: activo");
    println!("   Servidor: {}", app.api().base_url().as_str().dimmed());
    println!("   Cerrar sesión: {}", "agenda logout".cyan());

    println!("\n{}", render::heading("Recordatorios pedagógicos"));
    let reminders = summary::settings_reminders(app.data());
    if reminders.is_empty() {
        println!("{}", render::empty("Sin recordatorios"));
    }
    for reminder in reminders {
        println!("   {}", reminder.render());
    }

    Ok(())
}

pub async fn new_reminder(minutes: u32, message: Option<String>, daily: bool) -> Result<()> {
    let mut app = load_app(View::Settings).await?;
    let reminder = NewReminder::new(minutes, message, daily);
    submit("Guardando recordatorio", app.add(&reminder)).await?;

    println!(
        "{} {} min · {}",
        "✓".green(),
        reminder.minutes_before,
        reminder.custom_message.as_deref().unwrap_or_default()
    );
    Ok(())
}
