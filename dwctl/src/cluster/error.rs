use std::time::Duration;

use snafu::Snafu;

use crate::cluster::ResourceKind;

/// A failed cluster request, classified by what the caller can do about it.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{kind}/{name} not found in namespace {namespace}"))]
    NotFound { kind: ResourceKind, namespace: String, name: String },

    #[snafu(display("{kind}/{name} already exists in namespace {namespace}"))]
    AlreadyExists { kind: ResourceKind, namespace: String, name: String },

    #[snafu(display(
        "Kubernetes rejected the request for {kind}/{name} in namespace {namespace} with status \
         {code} ({reason}): {message}"
    ))]
    Rejected {
        kind: ResourceKind,
        namespace: String,
        name: String,
        code: u16,
        reason: String,
        message: String,
    },

    #[snafu(display(
        "Failed to send request for {kind}/{name} in namespace {namespace}, error: {source}"
    ))]
    Request {
        kind: ResourceKind,
        namespace: String,
        name: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display(
        "Failed to wait for {kind}/{name} to be deleted in namespace {namespace}, error: {source}"
    ))]
    AwaitDeletion {
        kind: ResourceKind,
        namespace: String,
        name: String,
        #[snafu(source(from(kube::runtime::wait::Error, Box::new)))]
        source: Box<kube::runtime::wait::Error>,
    },

    #[snafu(display(
        "Timed out after {}s waiting for {kind}/{name} to be deleted in namespace {namespace}",
        timeout.as_secs()
    ))]
    DeletionTimeout { kind: ResourceKind, namespace: String, name: String, timeout: Duration },
}

impl Error {
    /// Classifies an error returned by the Kubernetes API server.
    pub fn from_kube(
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        source: kube::Error,
    ) -> Self {
        let (namespace, name) = (namespace.to_string(), name.to_string());
        match source {
            kube::Error::Api(response) if response.code == 404 => {
                Self::NotFound { kind, namespace, name }
            }
            kube::Error::Api(response) if response.is_already_exists() => {
                Self::AlreadyExists { kind, namespace, name }
            }
            kube::Error::Api(response) => Self::Rejected {
                kind,
                namespace,
                name,
                code: response.code,
                reason: response.reason.clone(),
                message: response.message.clone(),
            },
            source => Self::Request { kind, namespace, name, source: Box::new(source) },
        }
    }

    pub const fn is_not_found(&self) -> bool { matches!(self, Self::NotFound { .. }) }

    pub const fn is_already_exists(&self) -> bool { matches!(self, Self::AlreadyExists { .. }) }
}
