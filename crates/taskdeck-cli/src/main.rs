mod cli;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use taskdeck_auth::{AuthClient, AuthGateway, TokenStore};
use taskdeck_core::AppConfig;
use taskdeck_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKDECK_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut command = Cli::command();
        clap_complete::generate(*shell, &mut command, "taskdeck", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.effective_api_base_url().to_string());
    let token_path = cli
        .token_file
        .clone()
        .or_else(|| config.effective_token_path())
        .ok_or_else(|| anyhow::anyhow!("no config directory available; pass --token-file"))?;

    let gateway = AuthGateway::new(AuthClient::new(base_url), TokenStore::new(token_path));

    match cli.command {
        Some(Commands::Login { email, password }) => {
            handlers::auth::login(&gateway, &email, &password).await?;
        }
        Some(Commands::Signup {
            name,
            email,
            password,
        }) => {
            handlers::auth::signup(&gateway, &name, &email, &password).await?;
        }
        Some(Commands::Logout) => {
            handlers::auth::logout(&gateway)?;
        }
        Some(Commands::Whoami) => {
            handlers::auth::whoami(&gateway).await?;
        }
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
        None => {
            let user = if cli.offline {
                None
            } else {
                match gateway.restore().await? {
                    Some(session) => Some(session.user),
                    None => output::output_error(
                        "Not signed in. Run `taskdeck login --email .. --password ..` or pass --offline.",
                    ),
                }
            };
            let mut app = App::new(user);
            app.run().await?;
        }
    }

    Ok(())
}
