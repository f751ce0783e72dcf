//! Authentication command handlers

use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{print_error, print_info, print_success};
use crate::progress::{complete_spinner_and_clear, complete_spinner_error, create_spinner};
use dialoguer::{Input, Password};
use tracing::debug;
use weedguard_sdk::types::RegisterRequest;

/// Handle register command
pub async fn handle_register(
    fullname: Option<String>,
    email: Option<String>,
    config: &CliConfig,
) -> Result<()> {
    let fullname = match fullname {
        Some(value) => value,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };
    let email = match email {
        Some(value) => value,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    debug!("registering account for {email}");
    let client = config.client()?;
    let spinner = create_spinner("Registering account...");
    match client
        .register(&RegisterRequest::farmer(fullname, email, password))
        .await
    {
        Ok(response) => {
            complete_spinner_and_clear(spinner);
            print_success("Account registered");
            if response.access_token.is_some() {
                print_info("Session tokens stored; you are logged in");
            } else {
                print_info("Run 'weedguard login' to authenticate");
            }
            Ok(())
        }
        Err(err) => {
            complete_spinner_error(spinner, "Registration failed");
            if let Some(detail) = err.detail() {
                print_error(&detail);
            }
            Err(err.into())
        }
    }
}

/// Handle login command
pub async fn handle_login(email: Option<String>, config: &CliConfig) -> Result<()> {
    let email = match email {
        Some(value) => value,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    debug!("logging in as {email}");
    let client = config.client()?;
    let spinner = create_spinner("Authenticating...");
    match client.login(&email, &password).await {
        Ok(_) => {
            complete_spinner_and_clear(spinner);
            print_success(&format!("Logged in as {email}"));
            Ok(())
        }
        Err(err) => {
            complete_spinner_error(spinner, "Login failed");
            if let Some(detail) = err.detail() {
                print_error(&detail);
            }
            Err(err.into())
        }
    }
}

/// Handle logout command
pub async fn handle_logout(config: &CliConfig) -> Result<()> {
    let client = config.client()?;
    client.logout().await?;
    print_success("Logged out");
    Ok(())
}
