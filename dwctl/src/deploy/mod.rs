//! The redeploy operation.
//!
//! A redeploy replaces the application's Deployment and makes sure its
//! Service exists:
//!
//! 1. delete the Deployment of the same name, if any, and wait until it is
//!    gone;
//! 2. create the new Deployment;
//! 3. create the Service, leaving an existing one untouched.
//!
//! The sequence is not atomic. If the process dies between 1 and 2 the
//! application stays undeployed until the next run.

mod error;
mod identity;
mod manifest;
mod plan;

use std::fmt;

use snafu::ResultExt;

pub use self::{
    error::Error,
    identity::ApplicationName,
    manifest::{build_deployment, build_service},
    plan::DeployPlan,
};
use crate::cluster::{Cluster, ResourceKind};

/// What a redeploy did to one resource.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Created where nothing existed before.
    Created,
    /// An existing object was deleted and created anew.
    Replaced,
    /// An object of the same name already existed and was kept as is.
    Unchanged,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Replaced => "replaced",
            Self::Unchanged => "unchanged",
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppliedResource {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
    pub action: Action,
}

/// Outcome of a successful [`redeploy`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeployReport {
    /// The image the new Deployment runs.
    pub image: String,
    pub resources: Vec<AppliedResource>,
}

/// Replaces the Deployment described by `plan` and ensures its Service.
///
/// A missing Deployment and an existing Service are expected states. Every
/// other cluster failure aborts the redeploy.
///
/// # Errors
///
/// Returns [`Error::DeleteDeployment`], [`Error::CreateDeployment`] or
/// [`Error::CreateService`] with the underlying cluster error.
pub async fn redeploy<C>(cluster: &C, plan: &DeployPlan) -> Result<DeployReport, Error>
where
    C: Cluster,
{
    let namespace = plan.namespace();
    let name = plan.name();
    let image = plan.image();
    let deployment = build_deployment(plan);

    let deployment_action = match cluster.delete_deployment(namespace, name).await {
        Ok(()) => {
            tracing::info!("deployment/{name} deleted in namespace {namespace}");
            Action::Replaced
        }
        Err(err) if err.is_not_found() => {
            tracing::debug!("deployment/{name} does not exist in namespace {namespace}");
            Action::Created
        }
        Err(source) => return Err(Error::DeleteDeployment { source }),
    };

    let _deployment = cluster
        .create_deployment(namespace, &deployment)
        .await
        .context(error::CreateDeploymentSnafu)?;
    tracing::info!("deployment/{name} created in namespace {namespace} with image {image}");

    let service = build_service(plan);
    let service_action = match cluster.create_service(namespace, &service).await {
        Ok(_service) => {
            tracing::info!("service/{name} created in namespace {namespace}");
            Action::Created
        }
        Err(err) if err.is_already_exists() => {
            tracing::info!("service/{name} already exists in namespace {namespace}, keeping it");
            Action::Unchanged
        }
        Err(source) => return Err(Error::CreateService { source }),
    };

    let applied = |kind, action| AppliedResource {
        kind,
        namespace: namespace.to_string(),
        name: name.to_string(),
        action,
    };
    Ok(DeployReport {
        image,
        resources: vec![
            applied(ResourceKind::Deployment, deployment_action),
            applied(ResourceKind::Service, service_action),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cluster::{self, Call, FakeCluster, Operation},
        config::Config,
    };

    fn plan(application: &str, version: &str) -> DeployPlan {
        DeployPlan::new(
            application.parse().expect("valid application name"),
            version,
            Some("dev"),
            &Config::default(),
        )
        .expect("plan resolves")
    }

    fn actions(report: &DeployReport) -> Vec<(ResourceKind, Action)> {
        report.resources.iter().map(|resource| (resource.kind, resource.action)).collect()
    }

    fn image_of(cluster: &FakeCluster, name: &str) -> Option<String> {
        cluster
            .deployment("dev", name)
            .and_then(|deployment| deployment.spec)
            .and_then(|spec| spec.template.spec)
            .and_then(|pod| pod.containers.into_iter().next())
            .and_then(|container| container.image)
    }

    #[tokio::test]
    async fn test_fresh_deploy_creates_both_resources() {
        let cluster = FakeCluster::default();
        let report = redeploy(&cluster, &plan("orders", "1.0.0")).await.expect("deploy succeeds");

        assert_eq!(report.image, "nexus3.showcai.com.cn:5000/orders:1.0.0");
        assert_eq!(actions(&report), [
            (ResourceKind::Deployment, Action::Created),
            (ResourceKind::Service, Action::Created)
        ]);
        assert_eq!(cluster.calls(), [
            Call::DeleteDeployment { namespace: "dev".to_string(), name: "orders".to_string() },
            Call::CreateDeployment { namespace: "dev".to_string(), name: "orders".to_string() },
            Call::CreateService { namespace: "dev".to_string(), name: "orders".to_string() },
        ]);
        assert!(cluster.service("dev", "orders").is_some());
    }

    #[tokio::test]
    async fn test_second_deploy_replaces_deployment_and_keeps_service() {
        let cluster = FakeCluster::default();
        let _first = redeploy(&cluster, &plan("orders", "1.0.0")).await.expect("first deploy");
        let second = redeploy(&cluster, &plan("orders", "1.0.0")).await.expect("second deploy");

        assert_eq!(actions(&second), [
            (ResourceKind::Deployment, Action::Replaced),
            (ResourceKind::Service, Action::Unchanged)
        ]);
        assert_eq!(cluster.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_new_version_updates_only_the_image() {
        let cluster = FakeCluster::default();
        let _first = redeploy(&cluster, &plan("orders", "1.0.0")).await.expect("first deploy");
        let before = cluster.deployment("dev", "orders").expect("deployment exists");
        let _second = redeploy(&cluster, &plan("orders", "1.1.0")).await.expect("second deploy");
        let after = cluster.deployment("dev", "orders").expect("deployment exists");

        assert_eq!(before.metadata.name, after.metadata.name);
        assert_eq!(before.metadata.namespace, after.metadata.namespace);
        assert_eq!(before.metadata.labels, after.metadata.labels);
        assert_eq!(
            image_of(&cluster, "orders").as_deref(),
            Some("nexus3.showcai.com.cn:5000/orders:1.1.0")
        );
    }

    #[tokio::test]
    async fn test_existing_service_is_not_refreshed() {
        let mut stale = build_service(&plan("orders", "latest"));
        stale.metadata.annotations = None;
        let cluster = FakeCluster::default().with_service("dev", stale.clone());

        let report = redeploy(&cluster, &plan("orders", "latest")).await.expect("deploy succeeds");

        assert_eq!(report.resources[1].action, Action::Unchanged);
        assert_eq!(cluster.service("dev", "orders"), Some(stale));
    }

    #[tokio::test]
    async fn test_delete_failure_aborts_before_create() {
        let cluster = FakeCluster::default().failing(Operation::DeleteDeployment, 403);

        let err = redeploy(&cluster, &plan("orders", "latest")).await.unwrap_err();

        assert!(matches!(
            err,
            Error::DeleteDeployment { source: cluster::Error::Rejected { code: 403, .. } }
        ));
        assert_eq!(cluster.calls().len(), 1);
        assert!(cluster.deployment("dev", "orders").is_none());
    }

    #[tokio::test]
    async fn test_create_deployment_failure_is_fatal() {
        let cluster = FakeCluster::default().failing(Operation::CreateDeployment, 500);

        let err = redeploy(&cluster, &plan("orders", "latest")).await.unwrap_err();

        assert!(matches!(err, Error::CreateDeployment { .. }));
        assert!(!cluster.calls().iter().any(|call| matches!(call, Call::CreateService { .. })));
    }

    #[tokio::test]
    async fn test_service_failure_other_than_conflict_is_reported() {
        let cluster = FakeCluster::default().failing(Operation::CreateService, 422);

        let err = redeploy(&cluster, &plan("orders", "latest")).await.unwrap_err();

        assert!(matches!(
            err,
            Error::CreateService { source: cluster::Error::Rejected { code: 422, .. } }
        ));
        assert!(cluster.deployment("dev", "orders").is_some());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Created.to_string(), "created");
        assert_eq!(Action::Replaced.to_string(), "replaced");
        assert_eq!(Action::Unchanged.to_string(), "unchanged");
    }
}
