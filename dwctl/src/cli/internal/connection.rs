use std::path::PathBuf;

use clap::Args;
use kube::config::{KubeConfigOptions, Kubeconfig};
use snafu::ResultExt;

use crate::cli::{Error, error};

/// Flags selecting the cluster to talk to.
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionArgs {
    #[arg(
        long = "kubeconfig",
        env = "DWCTL_KUBECONFIG",
        help = "Path to the kubeconfig file. Defaults to $KUBECONFIG or ~/.kube/config."
    )]
    pub kubeconfig: Option<PathBuf>,

    #[arg(long = "context", help = "Kubeconfig context to use. Defaults to the current context.")]
    pub context: Option<String>,
}

impl ConnectionArgs {
    /// Builds a Kubernetes client from the selected kubeconfig and context.
    ///
    /// Without flags the standard inference applies: `$KUBECONFIG`, then
    /// `~/.kube/config`, then the in-cluster service account.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if the kubeconfig cannot be read or does not
    /// describe a usable cluster.
    pub async fn client(&self) -> Result<kube::Client, Error> {
        let Self { kubeconfig, context } = self;
        if kubeconfig.is_none() && context.is_none() {
            return kube::Client::try_default().await.context(error::KubeConfigSnafu);
        }

        let options =
            KubeConfigOptions { context: context.clone(), ..KubeConfigOptions::default() };
        let config = match kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path)
                    .context(error::ReadKubeconfigSnafu { path: path.clone() })?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .context(error::LoadKubeconfigSnafu)?
            }
            None => {
                kube::Config::from_kubeconfig(&options).await.context(error::LoadKubeconfigSnafu)?
            }
        };
        kube::Client::try_from(config).context(error::KubeConfigSnafu)
    }
}
