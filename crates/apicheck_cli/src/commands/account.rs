//! Signup and login commands.

use anyhow::{Context, Result};
use apicheck_core::{unique_email, Credentials, Session, UserEndpoint};
use console::style;
use std::path::Path;

/// Register a user.
pub async fn signup(
    config_path: &Path,
    base_url: Option<&str>,
    email: &str,
    password: &str,
    unique: bool,
) -> Result<()> {
    let config = super::load_config(config_path, base_url)?;
    let client = super::client(&config)?;

    let email = if unique {
        unique_email(email)?
    } else {
        email.to_string()
    };

    let mut session = Session::new();
    let creds = UserEndpoint::new(&client)
        .sign_up(&mut session, &email, password)
        .await
        .with_context(|| format!("Failed to register {}", email))?;

    println!("{} Registered {}", style("✓").green(), style(&email).cyan());
    print_credentials(&creds);
    Ok(())
}

/// Log in an existing user.
pub async fn login(
    config_path: &Path,
    base_url: Option<&str>,
    email: &str,
    password: &str,
) -> Result<()> {
    let config = super::load_config(config_path, base_url)?;
    let client = super::client(&config)?;

    let mut session = Session::new();
    let creds = UserEndpoint::new(&client)
        .log_in(&mut session, email, password)
        .await
        .with_context(|| format!("Failed to log in as {}", email))?;

    println!("{} Logged in", style("✓").green());
    print_credentials(&creds);
    Ok(())
}

fn print_credentials(creds: &Credentials) {
    println!("  User id:      {}", style(creds.user_id).cyan());
    println!("  Email:        {}", creds.user_email);
    println!("  Access token: {}", creds.access_token);
}
