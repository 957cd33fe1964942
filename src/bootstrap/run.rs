//! Command dispatch for the `learnhub` binary.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, info_span, Instrument};

use super::config::{default_config_path, load_config, load_config_if_present};
use super::wiring::{wire_dependencies, AppDeps};
use crate::cli::terminal::{Console, TerminalEventPort};
use crate::cli::wizard::{run_login, run_signup, WizardOutcome};
use crate::cli::{Cli, Command};
use crate::cli::input::is_yes;

/// Load config, wire dependencies and run the selected command.
pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        // An explicitly named file must exist.
        Some(path) => load_config(path.clone())?,
        None => match default_config_path() {
            Some(path) => load_config_if_present(&path)?,
            None => Default::default(),
        },
    };
    let deps = wire_dependencies(&config).context("failed to wire dependencies")?;
    let restored = deps
        .auth_context
        .init()
        .await
        .context("failed to restore the signed-in session")?;

    let command = cli.selected_command();
    let span = info_span!("app.run", command = ?command);
    async {
        info!(api_base_url = %deps.settings.api_base_url, signed_in = restored.is_some(), "learnhub started");
        let mut console = Console::stdin();

        match command {
            Command::Signup => signup(&deps, &mut console).await,
            Command::Login { email } => {
                run_login(&deps.login_user(), &mut console, email.as_deref()).await?;
                Ok(())
            }
            Command::Logout => {
                deps.logout_user().execute().await?;
                println!("Signed out.");
                Ok(())
            }
            Command::Whoami => {
                match deps.auth_context.current_user().await {
                    Some(user) => println!(
                        "{} <{}> ({})",
                        user.full_name.as_deref().unwrap_or("-"),
                        user.email,
                        user.role
                    ),
                    None => println!("Not signed in."),
                }
                Ok(())
            }
        }
    }
    .instrument(span)
    .await
}

async fn signup<R>(deps: &AppDeps, console: &mut Console<R>) -> anyhow::Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let flow = deps.signup_flow(Arc::new(TerminalEventPort::stdout()));

    match run_signup(&flow, console).await? {
        WizardOutcome::Completed { email } => {
            let Some(answer) = console.prompt("Sign in now? [Y/n]: ").await? else {
                return Ok(());
            };
            if is_yes(&answer, true) {
                run_login(&deps.login_user(), console, Some(email.as_str())).await?;
            }
        }
        WizardOutcome::SignIn => {
            run_login(&deps.login_user(), console, None).await?;
        }
        WizardOutcome::Abandoned => println!("Sign-up cancelled."),
    }
    Ok(())
}
