//! Authentication commands.

use super::{connect, prompt};
use crate::output::{self, OutputFormat};
use anyhow::{bail, Result};
use serde_json::json;
use triqueta_auth::{AuthStatus, RegisterRequest, User};

fn describe(user: &User) -> String {
    match user.display_name() {
        Some(name) => format!("{} <{}>", name, user.email),
        None => user.email.clone(),
    }
}

fn read_credentials(email: Option<String>) -> Result<(String, String)> {
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    if email.is_empty() {
        bail!("Email is required");
    }

    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        bail!("Password is required");
    }
    Ok((email, password))
}

/// Login with email and password.
pub async fn login(email: Option<String>, format: &OutputFormat) -> Result<()> {
    let api = connect("login")?;

    if let AuthStatus::LoggedIn { user } = api.auth.status().await? {
        output::print_success(&format!("Already logged in as {}", describe(&user)), format);
        return Ok(());
    }

    let (email, password) = read_credentials(email)?;
    api.auth.login(&email, &password).await?;

    let user = api.auth.current_user().await?;
    output::print_success(&format!("Logged in as {}", describe(&user)), format);
    Ok(())
}

/// Create an account and log straight into it.
pub async fn register(
    email: Option<String>,
    name: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let api = connect("register")?;

    let (email, password) = read_credentials(email)?;
    let confirmation = rpassword::prompt_password("Confirm password: ")?;
    if confirmation != password {
        bail!("Passwords do not match");
    }

    let user = api
        .auth
        .register_and_login(&RegisterRequest {
            email,
            password,
            nombre_completo: name.filter(|n| !n.trim().is_empty()),
        })
        .await?;

    output::print_success(&format!("Account created. Logged in as {}", describe(&user)), format);
    Ok(())
}

/// Logout and clear the stored session.
pub async fn logout(format: &OutputFormat) -> Result<()> {
    let api = connect("logout")?;
    api.auth.logout().await?;
    output::print_success("Logged out successfully", format);
    Ok(())
}

/// Check authentication status.
pub async fn status(format: &OutputFormat) -> Result<()> {
    let api = connect("status")?;
    let status = api.auth.status().await?;

    match format {
        OutputFormat::Text => match &status {
            AuthStatus::LoggedIn { user } => {
                println!("Auth:     logged in");
                println!("User:     {}", describe(user));
                println!("Role:     {}", if user.is_admin { "admin" } else { "user" });
            }
            AuthStatus::NotLoggedIn => println!("Auth:     not logged in"),
            AuthStatus::Expired => println!("Auth:     session expired"),
        },
        OutputFormat::Json => {
            let json = match &status {
                AuthStatus::LoggedIn { user } => json!({
                    "logged_in": true,
                    "expired": false,
                    "user": user,
                }),
                AuthStatus::NotLoggedIn => json!({ "logged_in": false, "expired": false }),
                AuthStatus::Expired => json!({ "logged_in": false, "expired": true }),
            };
            output::print_json(&json)?;
        }
    }

    Ok(())
}

/// Show the current account and its profile.
pub async fn me(format: &OutputFormat) -> Result<()> {
    let api = connect("me")?;
    let user = api.users.me().await?;

    if *format == OutputFormat::Json {
        return output::print_json(&user);
    }

    output::print_heading("Account");
    output::print_row("ID", &user.id.to_string());
    output::print_row("Email", &user.email);
    output::print_row("Active", &user.is_active.to_string());
    output::print_row("Admin", &user.is_admin.to_string());
    output::print_row("Created", &user.created_at);

    if let Some(perfil) = &user.perfil {
        output::print_heading("Profile");
        output::print_row("Name", output::or_dash(perfil.nombre_completo.as_deref()));
        output::print_row("Phone", output::or_dash(perfil.telefono.as_deref()));
        output::print_row("Locality", output::or_dash(perfil.localidad_preferida.as_deref()));
        output::print_row("Activity level", output::or_dash(perfil.nivel_actividad.as_deref()));
        output::print_row("Interests", &perfil.etiquetas_interes.join(", "));
    }

    Ok(())
}
