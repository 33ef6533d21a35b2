// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strongbox - a local credential vault behind one master password.
//!
//! This is the binary entry point.

mod commands;
mod output;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use strongbox_config::StrongboxConfig;
use strongbox_core::StrongboxError;
use strongbox_vault::{
    generate_password, get_master_password, get_master_password_with_confirm, prompt_secret, Vault,
};

use crate::commands::NewEntry;

/// Strongbox - a local credential vault behind one master password.
#[derive(Parser, Debug)]
#[command(name = "strongbox", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use this vault file instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    vault: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the vault and set the master password.
    Init,
    /// Add a credential.
    Add {
        /// Service name, e.g. "email".
        #[arg(long, short)]
        service: String,
        /// Website, e.g. "mail.example.com".
        #[arg(long, short)]
        website: String,
        /// Account username.
        #[arg(long, short)]
        username: String,
        /// Generate the account password instead of prompting for it.
        #[arg(long, short)]
        generate: bool,
        /// Length of the generated password.
        #[arg(long, short, requires = "generate")]
        length: Option<usize>,
    },
    /// List stored credentials without decrypting them.
    List,
    /// Decrypt and show one credential.
    View {
        /// Entry identifier as shown by `list`.
        id: i64,
    },
    /// Delete one credential.
    Remove {
        /// Entry identifier as shown by `list`.
        id: i64,
    },
    /// Print a random password.
    Generate {
        /// Number of characters.
        #[arg(long, short)]
        length: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            strongbox_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    if let Some(path) = &cli.vault {
        config.storage.database_path = path.display().to_string();
    }

    init_tracing(&config.general.log_level);

    if let Err(e) = run(cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<StrongboxConfig, Vec<strongbox_config::ConfigError>> {
    match path {
        Some(path) => strongbox_config::load_and_validate_path(path),
        None => strongbox_config::load_and_validate(),
    }
}

fn run(cli: Cli, config: &StrongboxConfig) -> Result<(), StrongboxError> {
    let use_color = !cli.plain && std::io::stdout().is_terminal();
    let mut out = std::io::stdout().lock();

    let open = || -> Result<Vault, StrongboxError> {
        let vault = Vault::from_config(config)?;
        tracing::debug!(path = %vault.store().path().display(), "using vault");
        Ok(vault)
    };

    match cli.command {
        Commands::Init => {
            let vault = open()?;
            if vault.exists()? {
                return Err(StrongboxError::AlreadyInitialized);
            }
            let master = get_master_password_with_confirm()?;
            commands::run_init(&vault, &master, &mut out)
        }
        Commands::Add {
            service,
            website,
            username,
            generate,
            length,
        } => {
            let master = get_master_password()?;
            let password = if generate {
                let length = length.unwrap_or(config.generator.default_length);
                SecretString::from(generate_password(length)?)
            } else {
                prompt_secret("Entry password: ")?
            };
            let entry = NewEntry {
                service: &service,
                website: &website,
                username: &username,
                password: &password,
            };
            commands::run_add(&open()?, &master, entry, &mut out).map(|_| ())
        }
        Commands::List => commands::run_list(&open()?, &mut out, use_color),
        Commands::View { id } => {
            let master = get_master_password()?;
            commands::run_view(&open()?, &master, id, &mut out, use_color)
        }
        Commands::Remove { id } => {
            let master = get_master_password()?;
            commands::run_remove(&open()?, &master, id, &mut out)
        }
        Commands::Generate { length } => {
            let length = length.unwrap_or(config.generator.default_length);
            commands::run_generate(length, &mut out).map(|_| ())
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so they never mix with command output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strongbox={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
