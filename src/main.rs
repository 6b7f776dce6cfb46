//! Bakery storefront entry point

use std::{io, process::ExitCode};

use thiserror::Error;
use tracing::info;

use bakery::{
    catalog::{CatalogError, CatalogProvider},
    config::AppConfig,
    logging::{LoggingError, init_subscriber},
    session::{Session, SessionError},
};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            #[expect(
                clippy::print_stderr,
                reason = "the error may come from logging set-up, so it can not be logged"
            )]
            {
                eprintln!("bakery: {err}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    init_subscriber(config)?;

    let catalog = config.catalog()?;

    info!(
        items = catalog.len(),
        currency = catalog.currency().iso_alpha_code,
        policy = ?config.on_unresolved_name,
        "starting storefront"
    );

    let mut session = Session::new(catalog, config.on_unresolved_name);

    session.run(io::stdin().lock(), io::stdout().lock())?;

    Ok(())
}
