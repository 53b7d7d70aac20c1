use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::ResourceRequirements, apimachinery::pkg::api::resource::Quantity,
};
use serde::{Deserialize, Serialize};

/// CPU and memory bounds for the application container.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(default)]
    pub limits: ResourceQuantities,

    #[serde(default)]
    pub requests: ResourceQuantities,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuantities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

impl Resources {
    pub fn standard() -> Self {
        Self {
            limits: ResourceQuantities {
                cpu: Some("2000m".to_string()),
                memory: Some("2Gi".to_string()),
            },
            requests: ResourceQuantities {
                cpu: Some("1000m".to_string()),
                memory: Some("500Mi".to_string()),
            },
        }
    }

    pub fn to_kubernetes_requirements(&self) -> ResourceRequirements {
        ResourceRequirements {
            limits: self.limits.to_kubernetes_quantities(),
            requests: self.requests.to_kubernetes_quantities(),
            ..ResourceRequirements::default()
        }
    }
}

impl ResourceQuantities {
    /// Returns `None` when neither bound is set so the field is omitted from
    /// the manifest instead of being sent as an empty map.
    pub fn to_kubernetes_quantities(&self) -> Option<BTreeMap<String, Quantity>> {
        let Self { cpu, memory } = self;
        let quantities = [("cpu", cpu), ("memory", memory)]
            .into_iter()
            .filter_map(|(key, value)| {
                value.as_ref().map(|value| (key.to_string(), Quantity(value.clone())))
            })
            .collect::<BTreeMap<_, _>>();
        (!quantities.is_empty()).then_some(quantities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_requirements() {
        let requirements = Resources::standard().to_kubernetes_requirements();
        let limits = requirements.limits.expect("limits are set");
        let requests = requirements.requests.expect("requests are set");

        assert_eq!(limits.get("cpu"), Some(&Quantity("2000m".to_string())));
        assert_eq!(limits.get("memory"), Some(&Quantity("2Gi".to_string())));
        assert_eq!(requests.get("cpu"), Some(&Quantity("1000m".to_string())));
        assert_eq!(requests.get("memory"), Some(&Quantity("500Mi".to_string())));
    }

    #[test]
    fn test_empty_quantities_are_omitted() {
        let resources = Resources {
            limits: ResourceQuantities { cpu: None, memory: Some("1Gi".to_string()) },
            requests: ResourceQuantities::default(),
        };
        let requirements = resources.to_kubernetes_requirements();

        assert_eq!(requirements.limits.map(|limits| limits.len()), Some(1));
        assert!(requirements.requests.is_none());
    }
}
