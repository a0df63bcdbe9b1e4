//! Genealogy browser CLI.
//!
//! # Responsibility
//! - Resolve a detail route (`person/<id>`, `marriage/<id>`) against a
//!   SQLite database and print the detail page as text or JSON.
//! - Wire configuration (flags over `GENBROWSE_*` env) and optional logging.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use genbrowse_core::db::open_db;
use genbrowse_core::{
    init_logging, BrowserConfig, ConfigOverrides, DetailService, RelationService, RepoError, Route,
    SqliteMarriageRepository, SqlitePersonRepository,
};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "genbrowse", version, about = "Browse genealogy records stored in SQLite")]
struct Cli {
    /// Database file [env: GENBROWSE_DB]
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Print the detail page as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// trace|debug|info|warn|error [env: GENBROWSE_LOG_LEVEL]
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off without it
    /// [env: GENBROWSE_LOG_DIR]
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Detail route, e.g. `person/12` or `marriage/3`.
    route: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err:#}");
            eprintln!("error: {err:#}");
            if is_not_found(&err) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = BrowserConfig::load(ConfigOverrides {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    })?;

    if let Some(dir) = &config.log_dir {
        let absolute = if dir.is_absolute() {
            dir.clone()
        } else {
            std::env::current_dir()
                .context("cannot resolve relative log directory")?
                .join(dir)
        };
        init_logging(config.log_level, &absolute)?;
    }

    let route = Route::parse(&cli.route)?;
    info!("event=cli_route module=cli status=start route={route}");

    let conn = open_db(&config.db_path)
        .with_context(|| format!("cannot open database `{}`", config.db_path.display()))?;
    let service = DetailService::new(RelationService::new(
        SqlitePersonRepository::try_new(&conn)?,
        SqliteMarriageRepository::try_new(&conn)?,
    ));

    let output = match route {
        Route::Person(id) => {
            let detail = service.person_detail(id)?;
            if cli.json {
                serde_json::to_string_pretty(&detail)?
            } else {
                render::person_page(&detail)
            }
        }
        Route::Marriage(id) => {
            let detail = service.marriage_detail(id)?;
            if cli.json {
                serde_json::to_string_pretty(&detail)?
            } else {
                render::marriage_page(&detail)
            }
        }
    };
    println!("{output}");

    info!("event=cli_route module=cli status=ok route={route}");
    Ok(())
}

fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<RepoError>(), Some(RepoError::NotFound(_)))
}
