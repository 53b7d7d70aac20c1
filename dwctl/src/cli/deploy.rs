//! The default command: redeploy one application.

use std::time::Duration;

use clap::Args;
use dwctl_base::consts;
use snafu::{OptionExt, ResultExt};
use tokio::io::AsyncWriteExt;

use crate::{
    cli::{Error, error, internal::ConnectionArgs},
    cluster::KubeCluster,
    config::Config,
    deploy::{self, ApplicationName, DeployPlan, build_deployment, build_service},
    ui::table::DeployReportExt,
};

/// Arguments of a redeploy.
#[derive(Args, Clone, Debug)]
pub struct DeployCommand {
    #[arg(
        short = 'a',
        long = "application",
        help = "Name of the application to deploy. Used as Deployment, Service and container name."
    )]
    pub application: Option<String>,

    #[arg(
        short = 'v',
        long = "app-version",
        default_value = consts::DEFAULT_VERSION,
        help = "Image tag to deploy."
    )]
    pub app_version: String,

    #[arg(
        short = 'e',
        long = "environment",
        help = "Environment to deploy to. Selects the namespace and endpoints. Defaults to the \
                configured default environment."
    )]
    pub environment: Option<String>,

    #[arg(
        long = "dry-run",
        help = "Print the Deployment and Service manifests instead of applying them."
    )]
    pub dry_run: bool,

    #[arg(
        short = 't',
        long = "timeout-seconds",
        default_value_t = consts::DEFAULT_DELETION_TIMEOUT_SECS,
        help = "The maximum time in seconds to wait for the previous Deployment to be deleted."
    )]
    pub timeout_secs: u64,
}

impl DeployCommand {
    /// Validates the arguments and resolves them against `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApplicationName`] when `-a` is absent or
    /// empty, and a deploy error when the name is not a valid Kubernetes name
    /// or no environment can be resolved.
    pub fn plan(&self, config: &Config) -> Result<DeployPlan, Error> {
        let application = self
            .application
            .as_deref()
            .filter(|name| !name.is_empty())
            .context(error::MissingApplicationNameSnafu)?
            .parse::<ApplicationName>()?;
        Ok(DeployPlan::new(application, &self.app_version, self.environment.as_deref(), config)?)
    }

    /// Redeploys the application, or prints its manifests with `--dry-run`.
    ///
    /// The plan is validated before a Kubernetes client is created, so
    /// invalid input never reaches the cluster.
    pub async fn run(self, connection: &ConnectionArgs, config: Config) -> Result<(), Error> {
        let plan = self.plan(&config)?;
        tracing::info!(
            "application={}, version={}, env={}, namespace={}",
            plan.name(),
            plan.version,
            plan.environment.name,
            plan.namespace()
        );

        if self.dry_run {
            return write_stdout(&render_manifests(&plan)?).await;
        }

        let cluster =
            KubeCluster::new(connection.client().await?, Duration::from_secs(self.timeout_secs));
        let report = deploy::redeploy(&cluster, &plan).await?;
        write_stdout(&format!("{}\n", report.render_table())).await
    }
}

/// Renders the Deployment and Service as a multi-document YAML stream.
fn render_manifests(plan: &DeployPlan) -> Result<String, Error> {
    let deployment = serde_yaml::to_string(&build_deployment(plan))
        .context(error::SerializeManifestSnafu { kind: "deployment" })?;
    let service = serde_yaml::to_string(&build_service(plan))
        .context(error::SerializeManifestSnafu { kind: "service" })?;
    Ok(format!("---\n{deployment}---\n{service}"))
}

async fn write_stdout(content: &str) -> Result<(), Error> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(content.as_bytes()).await.context(error::WriteStdoutSnafu)?;
    stdout.flush().await.context(error::WriteStdoutSnafu)
}
