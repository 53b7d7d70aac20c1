//! Table rendering for command output.
//!
//! Re-exports [`DeployReportExt`] for the summary printed after a redeploy and
//! [`EnvironmentListExt`] for `environments list`.

mod deploy_report_ext;
mod environment_list_ext;

pub use self::{deploy_report_ext::DeployReportExt, environment_list_ext::EnvironmentListExt};
