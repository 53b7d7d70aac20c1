/// This module provides extensions for the Kubernetes `Api<Deployment>` type.
use std::time::Duration;

use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    Api, ResourceExt,
    runtime::{conditions::is_deleted, wait::await_condition},
};
use snafu::ResultExt;

use crate::cluster::{Error, ResourceKind, error};

/// Extension trait for `kube::Api<Deployment>`.
pub trait ApiDeploymentExt {
    /// Waits until `deployment` no longer exists.
    ///
    /// The wait is keyed on the object's UID, so a Deployment recreated under
    /// the same name does not end it early. Returns immediately when the
    /// object carries no UID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeletionTimeout`] when the object still exists after
    /// `timeout`, or [`Error::AwaitDeletion`] when the watch fails.
    async fn await_deleted(
        &self,
        deployment: &Deployment,
        namespace: &str,
        timeout: Duration,
    ) -> Result<(), Error>;
}

impl ApiDeploymentExt for Api<Deployment> {
    async fn await_deleted(
        &self,
        deployment: &Deployment,
        namespace: &str,
        timeout: Duration,
    ) -> Result<(), Error> {
        let name = deployment.name_any();
        let Some(uid) = deployment.uid() else {
            return Ok(());
        };

        let _last_seen =
            tokio::time::timeout(timeout, await_condition(self.clone(), &name, is_deleted(&uid)))
                .await
                .map_err(|_| Error::DeletionTimeout {
                    kind: ResourceKind::Deployment,
                    namespace: namespace.to_string(),
                    name: name.clone(),
                    timeout,
                })?
                .with_context(|_| error::AwaitDeletionSnafu {
                    kind: ResourceKind::Deployment,
                    namespace: namespace.to_string(),
                    name: name.clone(),
                })?;
        Ok(())
    }
}
