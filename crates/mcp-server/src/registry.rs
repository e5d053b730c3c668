//! Tool, resource, and prompt registries: each pairs a wire descriptor
//! with the handler that serves it, and supports `add`/`remove`/`list`
//! under a single lock per registry so mutation never blocks lookup for
//! long.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use mcp_schema::{Prompt, Resource, Tool};

use crate::handlers::{PromptHandler, ResourceHandler, ToolHandler};

pub struct ToolRegistry {
    entries: RwLock<HashMap<String, (Tool, Arc<dyn ToolHandler>)>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn add(&self, tool: Tool, handler: Arc<dyn ToolHandler>) {
        self.entries.write().unwrap().insert(tool.name.clone(), (tool, handler));
    }

    pub fn remove(&self, name: &str) -> bool {
        self.entries.write().unwrap().remove(name).is_some()
    }

    pub fn list(&self) -> Vec<Tool> {
        self.entries.read().unwrap().values().map(|(tool, _)| tool.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<(Tool, Arc<dyn ToolHandler>)> {
        self.entries.read().unwrap().get(name).cloned()
    }
}

pub struct ResourceRegistry {
    entries: RwLock<HashMap<String, (Resource, Arc<dyn ResourceHandler>)>>,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn add(&self, resource: Resource, handler: Arc<dyn ResourceHandler>) {
        self.entries.write().unwrap().insert(resource.uri.clone(), (resource, handler));
    }

    pub fn remove(&self, uri: &str) -> bool {
        self.entries.write().unwrap().remove(uri).is_some()
    }

    pub fn list(&self) -> Vec<Resource> {
        self.entries.read().unwrap().values().map(|(resource, _)| resource.clone()).collect()
    }

    pub fn get(&self, uri: &str) -> Option<(Resource, Arc<dyn ResourceHandler>)> {
        self.entries.read().unwrap().get(uri).cloned()
    }
}

pub struct PromptRegistry {
    entries: RwLock<HashMap<String, (Prompt, Arc<dyn PromptHandler>)>>,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn add(&self, prompt: Prompt, handler: Arc<dyn PromptHandler>) {
        self.entries.write().unwrap().insert(prompt.name.clone(), (prompt, handler));
    }

    pub fn remove(&self, name: &str) -> bool {
        self.entries.write().unwrap().remove(name).is_some()
    }

    pub fn list(&self) -> Vec<Prompt> {
        self.entries.read().unwrap().values().map(|(prompt, _)| prompt.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<(Prompt, Arc<dyn PromptHandler>)> {
        self.entries.read().unwrap().get(name).cloned()
    }
}
