use agenda_core::View;
use agenda_core::summary::{self, TrackingOverview};
use anyhow::Result;
use owo_colors::OwoColorize;

use super::{load_app, print_nav};
use crate::render::{self, Render};

pub async fn run() -> Result<()> {
    let app = load_app(View::Tracking).await?;
    let overview = TrackingOverview::build(app.data());

    print_nav(&app);
    println!("{}", render::heading("Seguimiento pedagógico"));
    println!("{}", "Vista general por alumno con estado.".dimmed());
    if overview.students.is_empty() {
        println!("{}", render::empty("Sin alumnos"));
    }
    for row in &overview.students {
        println!("   {}", row.render());
    }

    println!("\n{}", render::heading("Observaciones recientes"));
    if overview.recent_observations.is_empty() {
        println!("{}", render::empty("Sin observaciones"));
    }
    for observation in &overview.recent_observations {
        println!("   {}", summary::observation_line(observation));
    }

    Ok(())
}
