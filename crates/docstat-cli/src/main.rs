//! docstat - command-line client for the document status backend.

mod app;
mod commands;
mod navigator;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docstat_config_and_utils::{init_logging, Config, Paths};

/// docstat command-line interface.
#[derive(Parser)]
#[command(name = "docstat")]
#[command(about = "Upload documents, track their processing, and manage users")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Base directory for runtime files (credentials, logs, config). Defaults to ~/.docstat
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the credential for later commands
    Login {
        #[arg(short, long)]
        email: String,
        /// Read from DOCSTAT_PASSWORD, or prompted for when absent
        #[arg(short, long, env = "DOCSTAT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and discard the stored credential
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Print the session as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how long the stored credential stays valid
    Token,
    /// Work with documents
    #[command(subcommand)]
    Documents(commands::documents::DocumentsCommand),
    /// Administer users (admin only)
    #[command(subcommand)]
    Users(commands::users::UsersCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    paths.ensure_dirs()?;
    let config = Config::load(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging("docstat", level, Some(paths.log_file()));

    let app = app::App::start(config, paths).await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&app, &email, password).await?;
        }
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami { json } => commands::auth::whoami(&app, json)?,
        Commands::Token => commands::auth::token(&app),
        Commands::Documents(cmd) => commands::documents::run(&app, cmd).await?,
        Commands::Users(cmd) => commands::users::run(&app, cmd).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_login_with_global_flags() {
        let cli = Cli::try_parse_from([
            "docstat",
            "login",
            "--email",
            "good@x.com",
            "--password",
            "right-pw",
            "--log-level",
            "debug",
            "--base-dir",
            "/tmp/docstat",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/docstat")));
        match cli.command {
            Commands::Login { email, password } => {
                assert_eq!(email, "good@x.com");
                assert_eq!(password.as_deref(), Some("right-pw"));
            }
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn test_parse_document_upload_with_watch() {
        let cli = Cli::try_parse_from(["docstat", "documents", "upload", "scan.png", "--watch"]).unwrap();
        match cli.command {
            Commands::Documents(commands::documents::DocumentsCommand::Upload { path, watch }) => {
                assert_eq!(path, PathBuf::from("scan.png"));
                assert!(watch);
            }
            _ => panic!("expected documents upload"),
        }
    }

    #[test]
    fn test_parse_document_download() {
        let cli = Cli::try_parse_from(["docstat", "documents", "download", "5", "--mask", "-o", "m.png"])
            .unwrap();
        match cli.command {
            Commands::Documents(commands::documents::DocumentsCommand::Download { id, kind, output }) => {
                assert_eq!(id, 5);
                assert_eq!(kind.kind(), docstat_api::ResultKind::Mask);
                assert_eq!(output, Some(PathBuf::from("m.png")));
            }
            _ => panic!("expected documents download"),
        }

        let cli = Cli::try_parse_from(["docstat", "documents", "download", "5"]).unwrap();
        match cli.command {
            Commands::Documents(commands::documents::DocumentsCommand::Download { kind, output, .. }) => {
                assert_eq!(kind.kind(), docstat_api::ResultKind::Csv);
                assert!(output.is_none());
            }
            _ => panic!("expected documents download"),
        }

        assert!(Cli::try_parse_from(["docstat", "documents", "download", "5", "--csv", "--mask"]).is_err());
    }

    #[test]
    fn test_users_get_requires_numeric_id() {
        assert!(Cli::try_parse_from(["docstat", "users", "get", "abc"]).is_err());
        assert!(Cli::try_parse_from(["docstat", "users", "get", "4"]).is_ok());
    }
}
