//! Session commands: login, logout, whoami, token.

use crate::app::App;
use std::io::{BufRead, Write};

pub async fn login(
    app: &App,
    email: &str,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let profile = app.session.login(email, &password).await?;
    let role = if profile.is_admin() { "admin" } else { "user" };
    println!("Logged in as {} <{}> ({})", profile.full_name(), profile.email, role);
    Ok(())
}

fn prompt_password() -> std::io::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn logout(app: &App) {
    app.session.logout();
    println!("Logged out");
}

pub fn whoami(app: &App, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = app.session.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    match snapshot.user {
        Some(user) => {
            println!("{} <{}>", user.full_name(), user.email);
            println!("  id:     {}", user.id);
            let default_role = if user.is_admin() { "admin" } else { "user" };
            println!(
                "  role:   {}",
                user.role_name.as_deref().unwrap_or(default_role)
            );
            println!("  active: {}", user.is_active());
            if let Some(expires_at) = snapshot.token_expires_at {
                println!("  credential expires: {}", expires_at.to_rfc3339());
            }
            println!("  credential file: {}", app.paths.credential_store_file().display());
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

pub fn token(app: &App) {
    match app.session.token_store().remaining_minutes() {
        Some(minutes) => println!("Credential valid for {} more minute(s)", minutes),
        None => println!("No valid credential"),
    }
}
