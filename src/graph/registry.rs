//! Node-type registry keyed by type GUID.
//!
//! Document load reconstructs nodes through these factories; hosts extend
//! the set by registering their own types.

use super::node::Node;
use super::params::BooleanParam;
use crate::tracker::MouseTracker;
use crate::types::TypeGuid;
use once_cell::sync::Lazy;
use std::collections::HashMap;

type Factory = fn() -> Box<dyn Node>;

/// Factories for reconstructing nodes from persisted documents.
pub struct NodeRegistry {
    factories: HashMap<TypeGuid, Factory>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory; re-registering a GUID replaces the old factory.
    pub fn register(&mut self, guid: TypeGuid, factory: Factory) {
        self.factories.insert(guid, factory);
    }

    pub fn create(&self, guid: TypeGuid) -> Option<Box<dyn Node>> {
        self.factories.get(&guid).map(|factory| factory())
    }

    pub fn contains(&self, guid: TypeGuid) -> bool {
        self.factories.contains_key(&guid)
    }

    /// Registry holding every built-in node type.
    pub fn builtin() -> &'static NodeRegistry {
        static BUILTIN: Lazy<NodeRegistry> = Lazy::new(|| {
            let mut registry = NodeRegistry::new();
            registry.register(MouseTracker::TYPE_GUID, || Box::new(MouseTracker::new()));
            registry.register(BooleanParam::TYPE_GUID, || Box::new(BooleanParam::new(false)));
            registry
        });
        &BUILTIN
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
