//! Gateway mode value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which questionnaire backend implementation to wire in
///
/// Chosen once at startup; never switched per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// Deterministic in-memory backend with canned questions (default)
    #[default]
    Mock,
    /// The remote check-in service over HTTP
    Live,
}

impl GatewayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayMode::Mock => "mock",
            GatewayMode::Live => "live",
        }
    }
}

impl std::fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GatewayMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(GatewayMode::Mock),
            "live" | "http" => Ok(GatewayMode::Live),
            other => Err(DomainError::UnknownGatewayMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mock() {
        assert_eq!(GatewayMode::default(), GatewayMode::Mock);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("live".parse::<GatewayMode>().unwrap(), GatewayMode::Live);
        assert_eq!(" MOCK ".parse::<GatewayMode>().unwrap(), GatewayMode::Mock);
        assert!("carrier-pigeon".parse::<GatewayMode>().is_err());
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&GatewayMode::Live).unwrap();
        assert_eq!(json, "\"live\"");
    }
}
