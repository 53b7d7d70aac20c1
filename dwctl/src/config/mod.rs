mod environment;
mod error;
mod image_pull_policy;
mod resources;

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use dwctl_base::consts;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt, ensure};

pub use self::{
    environment::Environment, error::Error, image_pull_policy::ImagePullPolicy,
    resources::Resources,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Registry host (and optional port) prefixed to every image reference.
    #[serde(default = "default_registry")]
    pub registry: String,

    #[serde(default = "default_environment")]
    pub default_environment: String,

    #[serde(default = "default_environments")]
    pub environments: Vec<Environment>,

    #[serde(default = "default_replicas")]
    pub replicas: i32,

    #[serde(default = "default_container_port")]
    pub container_port: u16,

    #[serde(default)]
    pub image_pull_policy: ImagePullPolicy,

    #[serde(default = "default_image_pull_secrets")]
    pub image_pull_secrets: Vec<String>,

    /// `null` deploys without resource bounds.
    #[serde(default = "default_resources")]
    pub resources: Option<Resources>,

    /// `null` deploys without the SkyWalking agent variables.
    #[serde(default = "default_skywalking")]
    pub skywalking: Option<SkyWalking>,

    /// Variables added to every application container in every environment.
    #[serde(default)]
    pub extra_env: BTreeMap<String, String>,

    #[serde(default = "dwctl_cli::config::LogConfig::default")]
    pub log: dwctl_cli::config::LogConfig,
}

/// Settings of the SkyWalking Java agent baked into application images.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyWalking {
    pub collector_backend_services: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            default_environment: default_environment(),
            environments: default_environments(),
            replicas: default_replicas(),
            container_port: default_container_port(),
            image_pull_policy: ImagePullPolicy::default(),
            image_pull_secrets: default_image_pull_secrets(),
            resources: default_resources(),
            skywalking: default_skywalking(),
            extra_env: BTreeMap::new(),
            log: dwctl_cli::config::LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the first existing configuration file, if any.
    pub fn search_config_file_path() -> Option<PathBuf> {
        std::iter::once(Self::default_path())
            .chain(dwctl_base::fallback_project_config_directories().into_iter().map(|mut path| {
                path.push(dwctl_base::CLI_CONFIG_NAME);
                path
            }))
            .find(|path| path.try_exists().unwrap_or(false))
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        [dwctl_base::PROJECT_CONFIG_DIR.to_path_buf(), PathBuf::from(dwctl_base::CLI_CONFIG_NAME)]
            .into_iter()
            .collect()
    }

    /// Loads `path` when given, otherwise the first configuration file found
    /// by [`Config::search_config_file_path`], otherwise the built-in
    /// defaults.
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self, Error> {
        match path.or_else(Self::search_config_file_path) {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No configuration file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path =
                path.as_ref().try_resolve().map(|path| path.to_path_buf()).with_context(|_| {
                    error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() }
                })?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks that environment names are unique and that the default
    /// environment is one of them.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = BTreeSet::new();
        for environment in &self.environments {
            ensure!(
                seen.insert(environment.name.as_str()),
                error::DuplicateEnvironmentSnafu { name: environment.name.clone() }
            );
        }
        ensure!(
            seen.contains(self.default_environment.as_str()),
            error::UnknownDefaultEnvironmentSnafu { name: self.default_environment.clone() }
        );
        Ok(())
    }

    pub fn find_environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|environment| environment.name == name)
    }

    /// Resolves the environment profile for `requested`.
    ///
    /// An empty or missing name selects the default environment. A name with
    /// no matching profile also falls back to the default, with a warning.
    pub fn resolve_environment(&self, requested: Option<&str>) -> Result<&Environment, Error> {
        let requested = requested.filter(|name| !name.is_empty());
        if let Some(environment) = requested.and_then(|name| self.find_environment(name)) {
            return Ok(environment);
        }

        let fallback = self.find_environment(&self.default_environment).with_context(|| {
            error::UnknownDefaultEnvironmentSnafu { name: self.default_environment.clone() }
        })?;
        if let Some(name) = requested {
            tracing::warn!(
                "Environment {name} is not configured, falling back to {}",
                fallback.name
            );
        }
        Ok(fallback)
    }

    /// Renders the built-in configuration as YAML.
    pub fn template_basic() -> Result<String, Error> {
        serde_yaml::to_string(&Self::default()).context(error::SerializeConfigSnafu)
    }
}

fn default_registry() -> String { consts::DEFAULT_REGISTRY.to_string() }

fn default_environment() -> String { consts::DEFAULT_ENVIRONMENT.to_string() }

fn default_environments() -> Vec<Environment> { vec![Environment::dev(), Environment::sit()] }

const fn default_replicas() -> i32 { consts::DEFAULT_REPLICAS }

const fn default_container_port() -> u16 { consts::DEFAULT_CONTAINER_PORT }

fn default_image_pull_secrets() -> Vec<String> {
    vec![consts::DEFAULT_IMAGE_PULL_SECRET.to_string()]
}

#[allow(clippy::unnecessary_wraps)]
fn default_resources() -> Option<Resources> { Some(Resources::standard()) }

#[allow(clippy::unnecessary_wraps)]
fn default_skywalking() -> Option<SkyWalking> {
    Some(SkyWalking {
        collector_backend_services: consts::DEFAULT_SKYWALKING_COLLECTOR.to_string(),
    })
}
