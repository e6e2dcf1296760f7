//! `heroes` entry-point: loads settings, wires the HTTP gateway into the hero
//! page, and runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use frontend::config::HeroesSettings;
use frontend::domain::HeroPage;
use frontend::domain::ports::{DeleteConfirmation, PreConfirmed};
use frontend::inbound::cli::{Cli, CliError, Command, ConsoleConfirmation, run};
use frontend::outbound::http::HttpHeroGateway;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let settings = HeroesSettings::load_from_iter([OsString::from("heroes")])
        .map_err(|error| eyre!("failed to load heroes settings: {error}"))?;
    init_tracing(settings.log_json);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(async_main(cli, settings))
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn async_main(cli: Cli, settings: HeroesSettings) -> Result<()> {
    let base_url = settings
        .base_url()
        .wrap_err("HEROES_BASE_URL is not a valid URL")?;
    let gateway = HttpHeroGateway::new(base_url, settings.request_timeout())
        .wrap_err("failed to build HTTP client")?
        .with_validation_errors_key(settings.validation_errors_key());

    let gateway = Arc::new(gateway);
    match &cli.command {
        Command::Delete { yes: true, .. } => drive(&cli, gateway, PreConfirmed).await,
        _ => drive(&cli, gateway, ConsoleConfirmation).await,
    }
}

async fn drive<C>(cli: &Cli, gateway: Arc<HttpHeroGateway>, confirmation: C) -> Result<()>
where
    C: DeleteConfirmation,
{
    let mut page = HeroPage::new(gateway, Arc::new(confirmation), Arc::new(DefaultClock));

    let mut stdout = io::stdout().lock();
    match run(cli, &mut page, &mut stdout).await {
        Ok(()) => Ok(()),
        // Already shown to the user.
        Err(CliError::Page(error)) => Err(eyre!("{error}")),
        Err(CliError::Output(error)) => Err(error).wrap_err("failed to write output"),
    }
}
