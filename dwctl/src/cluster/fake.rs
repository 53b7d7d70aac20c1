use std::{collections::BTreeMap, sync::Mutex};

use k8s_openapi::api::{apps::v1::Deployment, core::v1::Service};
use kube::ResourceExt;

use crate::cluster::{Cluster, Error, ResourceKind};

/// A request recorded by [`FakeCluster`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    DeleteDeployment { namespace: String, name: String },
    CreateDeployment { namespace: String, name: String },
    CreateService { namespace: String, name: String },
}

/// Selects the request [`FakeCluster::failing`] rejects.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Operation {
    DeleteDeployment,
    CreateDeployment,
    CreateService,
}

type ObjectKey = (String, String);

#[derive(Default)]
struct State {
    deployments: BTreeMap<ObjectKey, Deployment>,
    services: BTreeMap<ObjectKey, Service>,
    calls: Vec<Call>,
    failures: BTreeMap<Operation, u16>,
}

/// In-memory [`Cluster`] that behaves like an API server without
/// controllers: objects exist exactly between create and delete.
#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<State>,
}

impl FakeCluster {
    /// Makes every `operation` fail with the given HTTP status code.
    pub fn failing(self, operation: Operation, code: u16) -> Self {
        let _previous = self.lock().failures.insert(operation, code);
        self
    }

    pub fn with_service(self, namespace: &str, service: Service) -> Self {
        let _previous =
            self.lock().services.insert((namespace.to_string(), service.name_any()), service);
        self
    }

    pub fn calls(&self) -> Vec<Call> { self.lock().calls.clone() }

    pub fn deployment(&self, namespace: &str, name: &str) -> Option<Deployment> {
        self.lock().deployments.get(&(namespace.to_string(), name.to_string())).cloned()
    }

    pub fn service(&self, namespace: &str, name: &str) -> Option<Service> {
        self.lock().services.get(&(namespace.to_string(), name.to_string())).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake cluster state is never poisoned")
    }

    fn injected_failure(
        state: &State,
        operation: Operation,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), Error> {
        match state.failures.get(&operation) {
            Some(&code) => Err(Error::Rejected {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
                code,
                reason: "InternalError".to_string(),
                message: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Cluster for FakeCluster {
    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<(), Error> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteDeployment {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        Self::injected_failure(
            &state,
            Operation::DeleteDeployment,
            ResourceKind::Deployment,
            namespace,
            name,
        )?;

        match state.deployments.remove(&(namespace.to_string(), name.to_string())) {
            Some(_deployment) => Ok(()),
            None => Err(Error::NotFound {
                kind: ResourceKind::Deployment,
                namespace: namespace.to_string(),
                name: name.to_string(),
            }),
        }
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, Error> {
        let name = deployment.name_any();
        let mut state = self.lock();
        state.calls.push(Call::CreateDeployment {
            namespace: namespace.to_string(),
            name: name.clone(),
        });
        Self::injected_failure(
            &state,
            Operation::CreateDeployment,
            ResourceKind::Deployment,
            namespace,
            &name,
        )?;

        let key = (namespace.to_string(), name.clone());
        if state.deployments.contains_key(&key) {
            return Err(Error::AlreadyExists {
                kind: ResourceKind::Deployment,
                namespace: namespace.to_string(),
                name,
            });
        }
        let _previous = state.deployments.insert(key, deployment.clone());
        Ok(deployment.clone())
    }

    async fn create_service(&self, namespace: &str, service: &Service) -> Result<Service, Error> {
        let name = service.name_any();
        let mut state = self.lock();
        state
            .calls
            .push(Call::CreateService { namespace: namespace.to_string(), name: name.clone() });
        Self::injected_failure(
            &state,
            Operation::CreateService,
            ResourceKind::Service,
            namespace,
            &name,
        )?;

        let key = (namespace.to_string(), name.clone());
        if state.services.contains_key(&key) {
            return Err(Error::AlreadyExists {
                kind: ResourceKind::Service,
                namespace: namespace.to_string(),
                name,
            });
        }
        let _previous = state.services.insert(key, service.clone());
        Ok(service.clone())
    }
}
