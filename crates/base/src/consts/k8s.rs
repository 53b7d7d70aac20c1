//! Kubernetes definitions shared by every resource dwctl creates.

pub mod labels {
    //! Label keys. The Deployment, its pod template and the Service all carry
    //! exactly this set so the Service selector always matches.

    /// Plain `app` label, kept for selectors written before the recommended
    /// labels existed.
    pub const APP: &str = "app";

    pub const NAME: &str = "app.kubernetes.io/name";

    pub const VERSION: &str = "app.kubernetes.io/version";

    /// Value of [`VERSION`]. This is the label schema version, not the image
    /// tag, so redeploying a new tag never changes the selector.
    pub const VERSION_VALUE: &str = "v1";
}

pub mod annotations {
    //! Annotation keys written on resources created by dwctl.

    use std::sync::LazyLock;

    use crate::PROJECT_NAME;

    /// The environment profile the resource was deployed with.
    pub static ENVIRONMENT: LazyLock<String> =
        LazyLock::new(|| format!("{PROJECT_NAME}.deploy/environment"));

    /// The dwctl version that created the resource.
    pub static VERSION: LazyLock<String> = LazyLock::new(|| format!("{PROJECT_NAME}.version"));
}

pub mod ports {
    /// Name of the container port.
    pub const CONTAINER_PORT_NAME: &str = "http";

    /// Protocol used by both the container port and the service port.
    pub const PROTOCOL: &str = "TCP";
}
