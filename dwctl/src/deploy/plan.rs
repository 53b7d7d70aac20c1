use std::collections::{BTreeMap, BTreeSet};

use dwctl_base::consts::{self, env, k8s::labels};
use snafu::ResultExt;

use crate::{
    config::{Config, Environment, ImagePullPolicy, Resources, SkyWalking},
    deploy::{ApplicationName, Error, error},
};

/// Everything needed to build the manifests of one redeploy.
///
/// A plan is resolved from the command line and [`Config`] before any
/// cluster call is made.
#[derive(Clone, Debug)]
pub struct DeployPlan {
    pub application: ApplicationName,
    pub version: String,
    pub environment: Environment,
    pub registry: String,
    pub replicas: i32,
    pub container_port: u16,
    pub image_pull_policy: ImagePullPolicy,
    pub image_pull_secrets: Vec<String>,
    pub resources: Option<Resources>,
    pub skywalking: Option<SkyWalking>,
    pub extra_env: BTreeMap<String, String>,
}

impl DeployPlan {
    /// An empty `version` deploys `latest`. An unknown `environment` deploys
    /// to the configured default environment.
    pub fn new(
        application: ApplicationName,
        version: &str,
        environment: Option<&str>,
        config: &Config,
    ) -> Result<Self, Error> {
        let environment = config
            .resolve_environment(environment)
            .context(error::ResolveEnvironmentSnafu)?
            .clone();
        let version =
            if version.is_empty() { consts::DEFAULT_VERSION } else { version }.to_string();

        let Config {
            registry,
            replicas,
            container_port,
            image_pull_policy,
            image_pull_secrets,
            resources,
            skywalking,
            extra_env,
            ..
        } = config;

        Ok(Self {
            application,
            version,
            environment,
            registry: registry.trim_end_matches('/').to_string(),
            replicas: *replicas,
            container_port: *container_port,
            image_pull_policy: *image_pull_policy,
            image_pull_secrets: image_pull_secrets.clone(),
            resources: resources.clone(),
            skywalking: skywalking.clone(),
            extra_env: extra_env.clone(),
        })
    }

    pub fn name(&self) -> &str { self.application.as_str() }

    pub fn namespace(&self) -> &str { self.environment.namespace() }

    /// `<registry>/<application>:<version>`
    pub fn image(&self) -> String {
        format!("{}/{}:{}", self.registry, self.application, self.version)
    }

    /// The label set shared by the Deployment, its pods and the Service.
    pub fn labels(&self) -> BTreeMap<String, String> {
        let name = self.name();
        BTreeMap::from_iter([
            (labels::APP.to_string(), name.to_string()),
            (labels::NAME.to_string(), name.to_string()),
            (labels::VERSION.to_string(), labels::VERSION_VALUE.to_string()),
        ])
    }

    /// Container environment in injection order.
    ///
    /// Configured extra variables never override the built-in ones; a
    /// per-environment variable overrides a global one of the same name.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        let name = self.name();
        let mut vars = vec![
            (env::APP_ID.to_string(), name.to_string()),
            (env::ENV.to_string(), self.environment.env_value()),
        ];
        if let Some(url) = &self.environment.apollo_config_service {
            vars.push((env::APOLLO_CONFIG_SERVICE.to_string(), url.clone()));
        }
        if let Some(SkyWalking { collector_backend_services }) = &self.skywalking {
            vars.push((
                env::SW_AGENT_COLLECTOR_BACKEND_SERVICES.to_string(),
                collector_backend_services.clone(),
            ));
            vars.push((env::SW_AGENT_NAME.to_string(), name.to_string()));
        }

        let builtin = vars.iter().map(|(key, _)| key.clone()).collect::<BTreeSet<_>>();
        let extras = self
            .extra_env
            .iter()
            .chain(&self.environment.extra_env)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<BTreeMap<_, _>>();
        for (key, value) in extras {
            if builtin.contains(&key) {
                tracing::warn!("Ignoring configured variable {key}, it is set by dwctl");
            } else {
                vars.push((key, value));
            }
        }
        vars
    }
}
