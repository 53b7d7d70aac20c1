//! Builders for the objects sent to the API server.

use std::collections::BTreeMap;

use dwctl_base::{
    PROJECT_VERSION,
    consts::k8s::{annotations, ports},
};
use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec},
        core::v1::{
            Container, ContainerPort, EnvVar, LocalObjectReference, PodSpec, PodTemplateSpec,
            Service, ServicePort, ServiceSpec,
        },
    },
    apimachinery::pkg::{apis::meta::v1::LabelSelector, util::intstr::IntOrString},
};
use kube::api::ObjectMeta;

use crate::{config::Resources, deploy::DeployPlan};

pub fn build_deployment(plan: &DeployPlan) -> Deployment {
    let labels = plan.labels();
    let image_pull_secrets = (!plan.image_pull_secrets.is_empty()).then(|| {
        plan.image_pull_secrets
            .iter()
            .map(|secret| LocalObjectReference { name: secret.clone().into() })
            .collect::<Vec<_>>()
    });

    Deployment {
        metadata: object_meta(plan, labels.clone()),
        spec: Some(DeploymentSpec {
            replicas: Some(plan.replicas),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta { labels: Some(labels), ..ObjectMeta::default() }),
                spec: Some(PodSpec {
                    containers: vec![build_container(plan)],
                    image_pull_secrets,
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}

pub fn build_service(plan: &DeployPlan) -> Service {
    let labels = plan.labels();
    let port = i32::from(plan.container_port);

    Service {
        metadata: object_meta(plan, labels.clone()),
        spec: Some(ServiceSpec {
            type_: Some("ClusterIP".to_string()),
            ports: Some(vec![ServicePort {
                name: Some(format!("{}-{port}", ports::CONTAINER_PORT_NAME)),
                protocol: Some(ports::PROTOCOL.to_string()),
                port,
                target_port: Some(IntOrString::Int(port)),
                ..ServicePort::default()
            }]),
            selector: Some(labels),
            ..ServiceSpec::default()
        }),
        ..Service::default()
    }
}

fn build_container(plan: &DeployPlan) -> Container {
    let env = plan
        .env_vars()
        .into_iter()
        .map(|(name, value)| EnvVar { name, value: Some(value), ..EnvVar::default() })
        .collect();

    Container {
        name: plan.name().to_string(),
        image: Some(plan.image()),
        image_pull_policy: Some(plan.image_pull_policy.to_string()),
        ports: Some(vec![ContainerPort {
            name: Some(ports::CONTAINER_PORT_NAME.to_string()),
            protocol: Some(ports::PROTOCOL.to_string()),
            container_port: i32::from(plan.container_port),
            ..ContainerPort::default()
        }]),
        env: Some(env),
        resources: plan.resources.as_ref().map(Resources::to_kubernetes_requirements),
        ..Container::default()
    }
}

fn object_meta(plan: &DeployPlan, labels: BTreeMap<String, String>) -> ObjectMeta {
    let annotations = BTreeMap::from_iter([
        (annotations::ENVIRONMENT.to_string(), plan.environment.name.clone()),
        (annotations::VERSION.to_string(), PROJECT_VERSION.to_string()),
    ]);

    ObjectMeta {
        name: Some(plan.name().to_string()),
        namespace: Some(plan.namespace().to_string()),
        labels: Some(labels),
        annotations: Some(annotations),
        ..ObjectMeta::default()
    }
}
