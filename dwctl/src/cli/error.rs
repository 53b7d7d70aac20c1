use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Deploy {
        #[snafu(source(from(crate::deploy::Error, Box::new)))]
        source: Box<crate::deploy::Error>,
    },

    #[snafu(display("Application name is required, pass it with -a/--application"))]
    MissingApplicationName,

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to serialize {kind} manifest, error: {source}"))]
    SerializeManifest { kind: &'static str, source: serde_yaml::Error },

    #[snafu(display("Failed to read kubeconfig from {}, error: {source}", path.display()))]
    ReadKubeconfig {
        path: PathBuf,
        #[snafu(source(from(kube::config::KubeconfigError, Box::new)))]
        source: Box<kube::config::KubeconfigError>,
    },

    #[snafu(display("Failed to load Kubernetes client configuration, error: {source}"))]
    LoadKubeconfig {
        #[snafu(source(from(kube::config::KubeconfigError, Box::new)))]
        source: Box<kube::config::KubeconfigError>,
    },

    #[snafu(display("Failed to initialize Kubernetes client configuration, error: {source}"))]
    KubeConfig {
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to create tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<crate::deploy::Error> for Error {
    fn from(source: crate::deploy::Error) -> Self { Self::Deploy { source: Box::new(source) } }
}
