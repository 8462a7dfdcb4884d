//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use keygate_core::config::{self, paths};
use keygate_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "keygate")]
#[command(version)]
#[command(about = "Log in to or create an account on an auth service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the issued token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long, env = "KEYGATE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Do not open the redirect URL after a successful login
        #[arg(long = "no-open")]
        no_open: bool,
    },

    /// Create a new account
    Register {
        /// Letters, numbers and underscores; at least 3 characters
        #[arg(long)]
        username: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// 8-12 characters with upper, lower, digit and special character
        #[arg(long, env = "KEYGATE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect the stored token
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Set the auth service base URL in the config file
    SetBaseUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

#[derive(clap::Subcommand)]
enum TokenCommands {
    /// Show where the token is stored
    Path,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it logs to a file instead of stderr.
    let target = if cli.command.is_none() {
        LogTarget::File(paths::logs_dir())
    } else {
        LogTarget::Stderr
    };
    let default_directive = if cli.command.is_none() { "info" } else { "warn" };
    let _log_guard = logging::init(target, default_directive)?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    let Some(command) = cli.command else {
        return commands::interactive::run(&config);
    };

    match command {
        Commands::Login {
            email,
            password,
            no_open,
        } => commands::login::run(&config, email, password, !no_open).await,
        Commands::Register {
            username,
            email,
            password,
        } => commands::register::run(&config, username, email, password).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
        },

        Commands::Token { command } => match command {
            TokenCommands::Path => {
                commands::token::path();
                Ok(())
            }
        },
    }
}
