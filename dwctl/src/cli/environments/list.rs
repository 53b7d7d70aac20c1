use clap::Args;
use snafu::ResultExt;
use tokio::io::AsyncWriteExt;

use crate::{
    cli::{Error, error},
    config::Config,
    ui::table::EnvironmentListExt,
};

/// Represents the `environments list` subcommand.
///
/// Prints every configured environment with its namespace and endpoints; the
/// environment used when `-e` is omitted is marked.
#[derive(Args, Clone)]
pub struct ListCommand {}

impl ListCommand {
    /// # Errors
    ///
    /// This function will return an `Error` if it fails to write to standard
    /// output.
    pub async fn run(self, config: Config) -> Result<(), Error> {
        let table = config.environments.render_table(&config.default_environment);
        let mut stdout = tokio::io::stdout();
        stdout.write_all(table.as_bytes()).await.context(error::WriteStdoutSnafu)?;
        stdout.write_u8(b'\n').await.context(error::WriteStdoutSnafu)?;
        stdout.flush().await.context(error::WriteStdoutSnafu)
    }
}
