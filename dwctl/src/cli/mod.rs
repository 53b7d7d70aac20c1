//! The `dwctl` command line.
//!
//! Without a subcommand `dwctl` redeploys one application:
//!
//! ```bash
//! # Deploy the latest image of `orders` to the default environment
//! dwctl -a orders
//!
//! # Deploy a specific tag to `sit`
//! dwctl -a orders -v 1.4.2 -e sit
//!
//! # Show what would be applied
//! dwctl -a orders -v 1.4.2 --dry-run
//!
//! # List the configured environments
//! dwctl environments list
//! ```

mod deploy;
mod environments;
pub mod error;
mod internal;

use std::{io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use snafu::ResultExt;

pub use self::error::Error;
use self::{deploy::DeployCommand, environments::EnvironmentCommands, internal::ConnectionArgs};
use crate::{CLI_PROGRAM_NAME, config::Config, shadow};

/// `Cli` is the main entry point for the dwctl command line.
#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about = "dwctl: redeploy an application as a Kubernetes Deployment and Service.",
    long_about = "dwctl replaces the Deployment of an application with one running the \
                  requested image tag and makes sure a matching Service exists. Registry, \
                  namespaces and endpoints come from the configuration file or built-in \
                  defaults.",
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Subcommand to run. Without one the application given by `-a` is
    /// redeployed.
    #[clap(subcommand)]
    commands: Option<Commands>,

    // Arguments of the default redeploy command.
    #[command(flatten)]
    deploy: DeployCommand,

    // Kubeconfig and context selection.
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Path to the configuration file.
    #[clap(
        long = "config",
        short = 'c',
        env = "DWCTL_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/dwctl/config.yaml or \
                DWCTL_CONFIG_FILE_PATH env var; built-in defaults apply when none exists."
    )]
    config_file: Option<PathBuf>,

    /// Overrides the log level from the configuration file.
    #[clap(
        long = "log-level",
        env = "DWCTL_LOG_LEVEL",
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,
}

/// Subcommands of `dwctl`.
#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Shows the version of dwctl and of the API server.
    #[command(about = "Display client and server version information")]
    Version {
        /// Skips the API server lookup.
        #[clap(long = "client", help = "If true, shows client version only (no server required).")]
        client: bool,
    },

    /// Generates a shell completion script.
    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions {
        /// The shell to generate the script for.
        shell: clap_complete::Shell,
    },

    /// Prints the built-in configuration as YAML.
    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    /// Inspects the configured environments.
    #[command(aliases = ["env", "envs"], about = "Inspect deployment environments")]
    Environments {
        /// The environments subcommand to run.
        #[command(subcommand)]
        commands: EnvironmentCommands,
    },
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    /// Loads the configuration and applies the `--log-level` override.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = Config::load_or_default(self.config_file.clone())?;

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }

        Ok(config)
    }

    /// Runs the parsed command and returns the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if the configuration cannot be loaded, the runtime
    /// cannot be created, or the command itself fails.
    ///
    /// # Panics
    ///
    /// Panics if writing the version or completion script to stdout fails.
    pub fn run(self) -> Result<i32, Error> {
        let client_version = Self::command().get_version().unwrap_or_default().to_string();
        match self.commands {
            Some(Commands::Version { client }) if client => {
                std::io::stdout()
                    .write_all(Self::command().render_long_version().as_bytes())
                    .expect("Failed to write to stdout");
                std::io::stdout()
                    .write_all(format!("Client Version: {client_version}\n").as_bytes())
                    .expect("Failed to write to stdout");

                return Ok(0);
            }
            Some(Commands::Completions { shell }) => {
                let mut app = Self::command();
                let bin_name = app.get_name().to_string();
                clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
                return Ok(0);
            }
            Some(Commands::DefaultConfig) => {
                std::io::stdout()
                    .write_all(Config::template_basic()?.as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();

        let Self { commands, deploy, connection, .. } = self;
        let fut = async move {
            match commands {
                Some(Commands::Version { .. }) => {
                    let kube_client = connection.client().await?;
                    let server_version = kube_client.apiserver_version().await.map_or_else(
                        |_| "unknown".to_string(),
                        |info| format!("{}.{}", info.major, info.minor),
                    );
                    let info = format!(
                        "Client Version: {client_version}\nServer Version: {server_version}\n",
                    );
                    std::io::stdout()
                        .write_all(Self::command().render_long_version().as_bytes())
                        .context(error::WriteStdoutSnafu)?;
                    std::io::stdout()
                        .write_all(info.as_bytes())
                        .context(error::WriteStdoutSnafu)?;
                }
                Some(Commands::Environments { commands }) => commands.run(config).await?,
                _ => deploy.run(&connection, config).await?,
            }

            Ok(0)
        };

        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context(error::InitializeTokioRuntimeSnafu)?
            .block_on(fut)
    }
}
