use std::{fmt, str::FromStr};

use snafu::ensure;

use crate::deploy::{Error, error};

/// Longest name Kubernetes accepts for a DNS-1123 label.
const MAX_NAME_LENGTH: usize = 63;

/// The name an application is deployed under.
///
/// It becomes the Deployment, Service and container name and the value of the
/// `app` labels, so it must be a valid DNS-1123 label.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplicationName(String);

impl ApplicationName {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ApplicationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for ApplicationName {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ensure!(!name.is_empty(), error::EmptyApplicationNameSnafu);
        ensure!(
            name.len() <= MAX_NAME_LENGTH,
            error::InvalidApplicationNameSnafu { name, reason: "must be at most 63 characters" }
        );
        ensure!(
            name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'),
            error::InvalidApplicationNameSnafu {
                name,
                reason: "must consist of lowercase alphanumeric characters or '-'"
            }
        );
        ensure!(
            !name.starts_with('-') && !name.ends_with('-'),
            error::InvalidApplicationNameSnafu {
                name,
                reason: "must start and end with an alphanumeric character"
            }
        );
        Ok(Self(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        for name in ["orders", "order-service", "a", "svc2", "0day"] {
            let parsed: ApplicationName = name.parse().expect("valid name");
            assert_eq!(parsed.as_str(), name);
            assert_eq!(parsed.to_string(), name);
        }
    }

    #[test]
    fn test_empty_name() {
        assert!(matches!("".parse::<ApplicationName>(), Err(Error::EmptyApplicationName)));
    }

    #[test]
    fn test_rejects_uppercase_and_symbols() {
        for name in ["Orders", "order_service", "orders.v2", "orders svc"] {
            let result = name.parse::<ApplicationName>();
            assert!(
                matches!(result, Err(Error::InvalidApplicationName { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_leading_or_trailing_dash() {
        assert!("-orders".parse::<ApplicationName>().is_err());
        assert!("orders-".parse::<ApplicationName>().is_err());
    }

    #[test]
    fn test_length_limit() {
        assert!("a".repeat(63).parse::<ApplicationName>().is_ok());
        let err = "a".repeat(64).parse::<ApplicationName>().unwrap_err();
        assert!(err.to_string().contains("at most 63 characters"));
    }
}
