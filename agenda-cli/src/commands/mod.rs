pub mod auth;
pub mod calendar;
pub mod home;
pub mod settings;
pub mod students;
pub mod tasks;
pub mod tracking;

use agenda_core::{
    AgendaConfig, AgendaError, AgendaResult, ApiClient, App, TokenStore, View, agenda_config,
};
use anyhow::Result;
use chrono::NaiveDate;

use crate::render;
use crate::utils::tui::create_spinner;

/// Build the app from the config and token in the agenda home. Nothing is
/// loaded yet.
pub fn open_app() -> Result<App> {
    let home = agenda_config::home_dir()?;
    let config = AgendaConfig::load_from(&home)?;
    tracing::debug!(home = %home.display(), api_url = %config.api_url, "opening agenda");
    let api = ApiClient::from_config(&config)?;
    Ok(App::new(api, TokenStore::in_dir(&home))?)
}

/// Open the app signed in, load everything and move to `view`.
pub async fn load_app(view: View) -> Result<App> {
    let mut app = open_app()?;
    if !app.session().is_authenticated() {
        return Err(AgendaError::NotAuthenticated.into());
    }

    tracing::debug!(%view, "loading agenda");
    let spinner = create_spinner("Cargando agenda".to_string());
    let result = app.start().await;
    spinner.finish_and_clear();
    result?;

    app.change_view(view);
    Ok(app)
}

/// Await a mutation (and its reload) behind a spinner.
pub async fn submit<F>(message: &str, mutation: F) -> Result<()>
where
    F: Future<Output = AgendaResult<()>>,
{
    let spinner = create_spinner(message.to_string());
    let result = mutation.await;
    spinner.finish_and_clear();
    Ok(result?)
}

pub fn print_nav(app: &App) {
    println!("{}\n", render::nav_bar(app.view()));
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
