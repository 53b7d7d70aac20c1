use std::fmt;

use serde::{Deserialize, Serialize};

/// When the kubelet pulls the application image. Redeploys reuse tags such as
/// `latest`, so the default is [`ImagePullPolicy::Always`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Serialize, PartialEq)]
pub enum ImagePullPolicy {
    #[default]
    Always,
    IfNotPresent,
    Never,
}

impl fmt::Display for ImagePullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val = match self {
            Self::Always => "Always",
            Self::IfNotPresent => "IfNotPresent",
            Self::Never => "Never",
        };
        f.write_str(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_always() {
        assert_eq!(ImagePullPolicy::default(), ImagePullPolicy::Always);
        assert_eq!(ImagePullPolicy::default().to_string(), "Always");
    }

    #[test]
    fn test_deserialize_matches_kubernetes_spelling() {
        let policy: ImagePullPolicy = serde_yaml::from_str("IfNotPresent").expect("valid policy");
        assert_eq!(policy, ImagePullPolicy::IfNotPresent);
        assert!(serde_yaml::from_str::<ImagePullPolicy>("sometimes").is_err());
    }
}
