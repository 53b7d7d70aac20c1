use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Application name must not be empty"))]
    EmptyApplicationName,

    #[snafu(display("Invalid application name '{name}': {reason}"))]
    InvalidApplicationName { name: String, reason: &'static str },

    #[snafu(display("{source}"))]
    ResolveEnvironment { source: crate::config::Error },

    #[snafu(display("Failed to remove the previous deployment, error: {source}"))]
    DeleteDeployment { source: crate::cluster::Error },

    #[snafu(display("Failed to create deployment, error: {source}"))]
    CreateDeployment { source: crate::cluster::Error },

    #[snafu(display("Failed to create service, error: {source}"))]
    CreateService { source: crate::cluster::Error },
}
