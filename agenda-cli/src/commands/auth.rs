use agenda_core::session::{self, MIN_PASSWORD_LEN, NewUser};
use anyhow::{Context, Result};
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{open_app, submit};

/// Prompt the user for password input (hidden).
fn prompt_password(label: &str) -> Result<String> {
    let prompt = format!("  {}: ", label);
    rpassword::prompt_password(&prompt).context("No se pudo leer la contraseña")
}

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(e) => Ok(e),
        None => Ok(Input::<String>::new()
            .with_prompt("  Email")
            .interact_text()?),
    }
}

pub async fn login(email: Option<String>) -> Result<()> {
    let email = prompt_email(email)?;
    let password = prompt_password("Contraseña")?;

    let mut app = open_app()?;
    let token = session::login(app.api(), &email, &password).await?;

    submit("Cargando agenda", app.authenticate(&token.access_token)).await?;

    println!("{} Sesión iniciada como {}", "✓".green(), email.bold());
    Ok(())
}

pub async fn register(email: Option<String>, name: Option<String>) -> Result<()> {
    let email = prompt_email(email)?;
    let full_name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Nombre completo")
            .interact_text()?,
    };

    let password = loop {
        let password = prompt_password("Contraseña")?;
        if password.chars().count() >= MIN_PASSWORD_LEN {
            break password;
        }
        eprintln!(
            "  {}",
            format!("La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres").red()
        );
    };

    let mut app = open_app()?;
    let user = NewUser {
        email: email.clone(),
        full_name,
        password: password.clone(),
    };
    let created = session::register(app.api(), &user).await?;
    println!("{} Cuenta creada para {}", "✓".green(), created.full_name.bold());

    let token = session::login(app.api(), &email, &password).await?;
    submit("Cargando agenda", app.authenticate(&token.access_token)).await?;

    println!("{} Sesión iniciada", "✓".green());
    Ok(())
}

/// Store a token obtained elsewhere and load with it.
pub async fn token(token: &str) -> Result<()> {
    let mut app = open_app()?;
    submit("Cargando agenda", app.authenticate(token)).await?;

    println!("{} Token guardado", "✓".green());
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut app = open_app()?;
    app.logout()?;

    println!("Sesión cerrada");
    Ok(())
}
