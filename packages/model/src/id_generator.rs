use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a section or item for the lifetime of an editing session.
///
/// Identifiers never appear in the persisted `home_page` JSON; they only
/// travel through the rendered tree as `data-temp_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unassigned ids come from freshly deserialized nodes.
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Generate a document seed from its origin (backend URL or file path) using CRC32
pub fn get_document_id(origin: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(origin.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for sections and items within a document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(origin: &str) -> Self {
        Self {
            seed: get_document_id(origin),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId(format!("{}-{}", self.seed, self.count))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_generation() {
        let id1 = get_document_id("http://localhost:5000");
        let id2 = get_document_id("http://localhost:5000");
        assert_eq!(id1, id2);

        let id3 = get_document_id("home.json");
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("home.json");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.as_str().ends_with("-1"));
        assert!(id2.as_str().ends_with("-2"));
        assert!(id1.as_str().starts_with(gen.seed()));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_default_id_is_unassigned() {
        assert!(NodeId::default().is_unassigned());
        assert!(!NodeId::from("abc-1").is_unassigned());
    }
}
