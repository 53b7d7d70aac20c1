use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A deployment target: the namespace resources land in plus the endpoints
/// applications in that environment talk to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub name: String,

    /// Defaults to `name` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apollo_config_service: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_env: BTreeMap<String, String>,
}

impl Environment {
    pub fn namespace(&self) -> &str { self.namespace.as_deref().unwrap_or(&self.name) }

    /// Value of the `ENV` variable seen by the application.
    pub fn env_value(&self) -> String { self.name.to_uppercase() }

    pub fn dev() -> Self {
        Self {
            name: "dev".to_string(),
            namespace: Some("dev".to_string()),
            apollo_config_service: Some("http://10.141.48.10:18080/".to_string()),
            extra_env: BTreeMap::new(),
        }
    }

    pub fn sit() -> Self {
        Self {
            name: "sit".to_string(),
            namespace: Some("sit".to_string()),
            apollo_config_service: Some("http://10.141.48.10:28080/".to_string()),
            extra_env: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_defaults_to_name() {
        let env: Environment = serde_yaml::from_str("name: uat\n").expect("valid environment");
        assert_eq!(env.namespace(), "uat");
        assert_eq!(env.apollo_config_service, None);
        assert!(env.extra_env.is_empty());
    }

    #[test]
    fn test_explicit_namespace_wins() {
        let env: Environment =
            serde_yaml::from_str("name: prod\nnamespace: production\n").expect("valid environment");
        assert_eq!(env.namespace(), "production");
        assert_eq!(env.env_value(), "PROD");
    }

    #[test]
    fn test_builtin_profiles_differ_only_in_endpoints() {
        let (dev, sit) = (Environment::dev(), Environment::sit());
        assert_eq!(dev.namespace(), "dev");
        assert_eq!(sit.namespace(), "sit");
        assert_ne!(dev.apollo_config_service, sit.apollo_config_service);
    }
}
