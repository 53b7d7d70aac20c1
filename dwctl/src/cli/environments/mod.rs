mod list;

use clap::Subcommand;

use crate::{
    cli::{Error, environments::list::ListCommand},
    config::Config,
};

#[derive(Clone, Subcommand)]
pub enum EnvironmentCommands {
    #[command(alias = "l", about = "List configured deployment environments")]
    List(ListCommand),
}

impl EnvironmentCommands {
    pub async fn run(self, config: Config) -> Result<(), Error> {
        match self {
            Self::List(cmd) => cmd.run(config).await,
        }
    }
}
