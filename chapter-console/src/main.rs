use std::fs;
use std::fs::File;
use std::process::ExitCode;

use chapter_console::cli::Cli;
use chapter_console::data::Dataset;
use chapter_console::error::ConsoleError;
use chapter_console::pages;
use chapter_console::paths;
use chapter_console::session::EnvSession;
use chapter_console::settings::SettingsProvider;
use chapter_console::settings::SqliteBackend;
use chapter_lib::auth::UserProfile;
use chapter_lib::auth::current_profile;
use chapter_lib::error::AuthError;
use clap::Parser;
use log::error;
use log::info;
use log::warn;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to `latest.log` in the cache directory, rotating the previous file.
fn init_logging(verbose: bool) {
    let Some(log_path) = paths::log_file() else {
        return;
    };
    if let Some(dir) = log_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    paths::rotate_logs();

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    match File::create(&log_path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Warning: logging disabled, cannot create {}: {e}", log_path.display()),
    }
}

async fn run(cli: Cli) -> Result<String, ConsoleError> {
    let interactions = cli.interactions()?;
    let settings = open_settings(&cli).await?;
    let profile = signed_in_profile().await?;
    let dataset = Dataset::load(&cli.data).await?;

    let output = pages::open_page(
        cli.page.into(),
        &dataset,
        &interactions,
        &settings,
        profile.as_ref(),
    )
    .await?;
    Ok(output.text)
}

async fn open_settings(cli: &Cli) -> Result<SettingsProvider, ConsoleError> {
    if cli.no_persist {
        return Ok(SettingsProvider::in_memory());
    }
    let Some(path) = cli.settings.clone().or_else(paths::settings_db) else {
        warn!("No data directory, settings will not persist");
        return Ok(SettingsProvider::in_memory());
    };
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| ConsoleError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
    }
    Ok(SettingsProvider::new(SqliteBackend::open(&path).await?))
}

/// The signed-in user, or `None` when no session is configured.
async fn signed_in_profile() -> Result<Option<UserProfile>, ConsoleError> {
    let session = EnvSession::from_env();
    match current_profile(&session).await {
        Ok(profile) => {
            info!("Signed in as {}", profile.display_name());
            Ok(Some(profile))
        }
        Err(AuthError::Unauthenticated) => {
            info!("No session, continuing signed out");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
