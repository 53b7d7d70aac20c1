//! Access to the Kubernetes API server.
//!
//! The redeploy operation only needs three calls, so they sit behind the
//! [`Cluster`] trait. [`KubeCluster`] talks to a real API server; tests use an
//! in-memory fake.

pub mod error;
#[cfg(test)]
mod fake;
mod kubernetes;

use std::fmt;

use k8s_openapi::api::{apps::v1::Deployment, core::v1::Service};

#[cfg(test)]
pub use self::fake::{Call, FakeCluster, Operation};
pub use self::{error::Error, kubernetes::KubeCluster};

/// The kinds of object dwctl manages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResourceKind {
    Deployment,
    Service,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Deployment => "deployment",
            Self::Service => "service",
        })
    }
}

/// The create and delete requests the redeploy operation issues.
///
/// Implementations report failures through [`Error`] so callers can tell
/// `NotFound` and `AlreadyExists` apart from real failures.
pub trait Cluster {
    /// Deletes the named Deployment and returns once it is gone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no such Deployment exists.
    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<(), Error>;

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, Error>;

    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] when a Service of the same name
    /// exists. The existing Service is left untouched.
    async fn create_service(&self, namespace: &str, service: &Service) -> Result<Service, Error>;
}
