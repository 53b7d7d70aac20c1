//! Extensions to `kube` API handles used by the cluster backend.

mod api_deployment;

pub use self::api_deployment::ApiDeploymentExt;
