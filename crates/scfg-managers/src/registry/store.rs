//! Manager registry storage

use std::collections::HashMap;

use super::ManagerDescriptor;
use crate::error::{Error, Result};

/// Lookup table of manager descriptors keyed by id.
#[derive(Debug, Clone)]
pub struct ManagerRegistry {
    managers: HashMap<String, ManagerDescriptor>,
}

impl ManagerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            managers: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with all built-in managers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in super::builtins::builtin_descriptors() {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous one with the same id.
    pub fn register(&mut self, descriptor: ManagerDescriptor) {
        self.managers.insert(descriptor.id.clone(), descriptor);
    }

    pub fn get(&self, id: &str) -> Option<&ManagerDescriptor> {
        self.managers.get(id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error listing the valid ones.
    pub fn require(&self, id: &str) -> Result<&ManagerDescriptor> {
        self.get(id).ok_or_else(|| Error::UnknownManager {
            id: id.to_string(),
            valid: self.list().into_iter().map(String::from).collect(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.managers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// List all registered manager ids (sorted).
    pub fn list(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.managers.keys().map(|s| s.as_str()).collect();
        ids.sort();
        ids
    }
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
