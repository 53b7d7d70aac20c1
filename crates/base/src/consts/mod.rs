pub mod k8s;

/// The image tag used when no version is given on the command line.
pub const DEFAULT_VERSION: &str = "latest";

/// The environment profile used when none is configured or requested.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// The port every deployed application listens on.
pub const DEFAULT_CONTAINER_PORT: u16 = 8080;

/// The number of pods a deployed application runs with.
pub const DEFAULT_REPLICAS: i32 = 1;

/// The registry images are pulled from.
pub const DEFAULT_REGISTRY: &str = "nexus3.showcai.com.cn:5000";

/// The secret used to authenticate against [`DEFAULT_REGISTRY`].
pub const DEFAULT_IMAGE_PULL_SECRET: &str = "dw-secret";

/// The SkyWalking OAP collector the agent inside each pod reports to.
pub const DEFAULT_SKYWALKING_COLLECTOR: &str = "10.141.48.10:11800";

/// Seconds to wait for a replaced Deployment to disappear.
pub const DEFAULT_DELETION_TIMEOUT_SECS: u64 = 90;

/// Environment variable names injected into the application container.
pub mod env {
    pub const APP_ID: &str = "APP_ID";
    pub const ENV: &str = "ENV";
    pub const APOLLO_CONFIG_SERVICE: &str = "APOLLO_CONFIGSERVICE";
    pub const SW_AGENT_COLLECTOR_BACKEND_SERVICES: &str = "SW_AGENT_COLLECTOR_BACKEND_SERVICES";
    pub const SW_AGENT_NAME: &str = "SW_AGENT_NAME";
}
