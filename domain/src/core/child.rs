//! Child identifier value object

use serde::{Deserialize, Serialize};

/// Opaque identifier of the child a check-in is about (Value Object)
///
/// Supplied by the external "current child" collaborator. The engine never
/// interprets it beyond equality and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(String);

impl ChildId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ChildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChildId {
    fn from(s: &str) -> Self {
        ChildId::new(s)
    }
}

impl From<String> for ChildId {
    fn from(s: String) -> Self {
        ChildId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_id_from_str() {
        let id: ChildId = "child-42".into();
        assert_eq!(id.as_str(), "child-42");
        assert_eq!(id.to_string(), "child-42");
    }

    #[test]
    fn test_blank_child_id() {
        assert!(ChildId::new("   ").is_blank());
        assert!(!ChildId::new("c1").is_blank());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ChildId::new("c1")).unwrap();
        assert_eq!(json, "\"c1\"");
    }
}
