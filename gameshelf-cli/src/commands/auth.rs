use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::AuthGateway;

use super::{Context, success, value_or_prompt};
use crate::error::CliError;
use crate::settings::Settings;

/// Where password-reset links send the user back to.
const RESET_REDIRECT_URL: &str = "gameshelf://reset-password";

pub(crate) async fn run_signup(
    ctx: &Context,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let gateway = ctx.open_gateway(&settings)?;
    let password = value_or_prompt(password, "Password")?;

    gateway.sign_up(email, &password).await?;
    success(format!("Account created for {}", email));
    log::info!("Sign in with `gameshelf login {}`", email);
    Ok(())
}

pub(crate) async fn run_login(
    ctx: &Context,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    let gateway = ctx.open_gateway(&settings)?;
    let password = value_or_prompt(password, "Password")?;

    let session = gateway.sign_in(email, &password).await?;
    settings.session_token = Some(session.token);
    if let Some(db) = &ctx.db {
        settings.database = Some(db.clone());
    }
    settings.save()?;
    success(format!(
        "Signed in as {}",
        session.user.email.if_supports_color(Stdout, |t| t.bold())
    ));
    Ok(())
}

pub(crate) async fn run_logout(ctx: &Context) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    let Some(token) = settings.session_token.take() else {
        log::info!("Not signed in.");
        return Ok(());
    };

    let gateway = ctx.open_gateway(&settings)?;
    // A stale token has nothing left to revoke.
    if gateway.resume(&token).await.is_ok() {
        gateway.sign_out().await?;
    }
    settings.save()?;
    success("Signed out");
    Ok(())
}

pub(crate) async fn run_reset_password(ctx: &Context, email: &str) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let gateway = ctx.open_gateway(&settings)?;
    gateway.request_password_reset(email, RESET_REDIRECT_URL).await?;
    success(format!(
        "If an account exists for {}, a reset link has been sent",
        email
    ));
    Ok(())
}

pub(crate) async fn run_set_password(
    ctx: &Context,
    password: Option<String>,
) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let gateway = ctx.open_gateway(&settings)?;
    let token = settings
        .session_token
        .as_deref()
        .ok_or(CliError::NotSignedIn)?;
    gateway.resume(token).await?;

    let password = value_or_prompt(password, "New password")?;
    gateway.update_password(&password).await?;
    success("Password updated");
    Ok(())
}

pub(crate) async fn run_whoami(ctx: &Context) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let gateway = ctx.open_gateway(&settings)?;
    let Some(token) = settings.session_token.as_deref() else {
        log::info!("Not signed in.");
        return Ok(());
    };
    match gateway.resume(token).await {
        Ok(session) => {
            log::info!(
                "{} (signed in {})",
                session.user.email.if_supports_color(Stdout, |t| t.bold()),
                session.created_at.format("%Y-%m-%d %H:%M"),
            );
            Ok(())
        }
        Err(_) => Err(CliError::NotSignedIn),
    }
}
