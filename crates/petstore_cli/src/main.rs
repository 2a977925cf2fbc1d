//! CLI smoke entry point.
//!
//! # Responsibility
//! - Resolve store config from the environment, open the database and report
//!   what it holds.
//! - Keep output deterministic for quick local sanity checks.

use log::error;
use petstore_core::{
    core_version, init_db, init_logging_from_config, PetService, SqlitePetRepository, StoreConfig,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("petstore_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = StoreConfig::from_env()?;
    init_logging_from_config(&config)?;

    let conn = init_db(&config)?;
    let service = PetService::new(SqlitePetRepository::try_new(&conn)?);
    let total = service.all()?.len();
    let available = service.find_available()?.len();

    println!("petstore_core version={}", core_version());
    println!("petstore pets={total} available={available}");
    Ok(())
}
