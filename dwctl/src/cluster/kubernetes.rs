use std::time::Duration;

use k8s_openapi::api::{apps::v1::Deployment, core::v1::Service};
use kube::{
    Api, ResourceExt,
    api::{DeleteParams, PostParams},
};

use crate::{
    cluster::{Cluster, Error, ResourceKind},
    ext::ApiDeploymentExt,
};

/// [`Cluster`] backed by a `kube::Client`.
pub struct KubeCluster {
    client: kube::Client,
    deletion_timeout: Duration,
}

impl KubeCluster {
    /// `deletion_timeout` bounds how long [`Cluster::delete_deployment`]
    /// waits for the old Deployment to disappear.
    pub const fn new(client: kube::Client, deletion_timeout: Duration) -> Self {
        Self { client, deletion_timeout }
    }
}

impl Cluster for KubeCluster {
    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<(), Error> {
        let api = Api::<Deployment>::namespaced(self.client.clone(), namespace);
        let pending = api
            .delete(name, &DeleteParams::background())
            .await
            .map_err(|source| Error::from_kube(ResourceKind::Deployment, namespace, name, source))?;

        // `Left` means the API server accepted the request but the object
        // still exists, typically while finalizers run.
        if let Some(deployment) = pending.left() {
            tracing::debug!("Waiting for deployment/{name} to be deleted in namespace {namespace}");
            api.await_deleted(&deployment, namespace, self.deletion_timeout).await?;
        }
        Ok(())
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, Error> {
        Api::<Deployment>::namespaced(self.client.clone(), namespace)
            .create(&PostParams::default(), deployment)
            .await
            .map_err(|source| {
                let name = deployment.name_any();
                Error::from_kube(ResourceKind::Deployment, namespace, &name, source)
            })
    }

    async fn create_service(&self, namespace: &str, service: &Service) -> Result<Service, Error> {
        Api::<Service>::namespaced(self.client.clone(), namespace)
            .create(&PostParams::default(), service)
            .await
            .map_err(|source| {
                Error::from_kube(ResourceKind::Service, namespace, &service.name_any(), source)
            })
    }
}
