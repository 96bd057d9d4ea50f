//! Process-wide tool table built once before any transport starts serving.
use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    lib::errors::{InvocationError, RegistryError, ValidationError},
    tools::schema::{ToolInput, ToolSchema},
};

/// Type-erased handler receiving arguments already normalized by the schema.
pub type ToolHandler =
    Arc<dyn Fn(Map<String, Value>) -> Result<String, ValidationError> + Send + Sync>;

/// A named, schema-validated, invocable tool.
#[derive(Clone)]
pub struct RegisteredTool {
    name: String,
    description: String,
    schema: ToolSchema,
    handler: ToolHandler,
}

impl RegisteredTool {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ToolSchema,
        handler: F,
    ) -> Self
    where
        F: Fn(Map<String, Value>) -> Result<String, ValidationError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Arc::new(handler),
        }
    }

    /// Register a handler over a static input struct; the schema comes from `I`.
    pub fn typed<I, F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        I: ToolInput + 'static,
        F: Fn(I) -> String + Send + Sync + 'static,
    {
        Self::new(name, description, I::schema(), move |arguments| {
            I::from_validated(arguments).map(&handler)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Validate `payload` and run the handler. The handler never sees invalid input.
    pub fn call(&self, payload: &Value) -> Result<String, ValidationError> {
        let arguments = self.schema.validate(payload)?;
        (self.handler)(arguments)
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.schema.to_json_schema(),
        }
    }
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Mutable registration phase. Consumed by [`ToolRegistryBuilder::build`].
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Arc<RegisteredTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A duplicate name is rejected and the earlier tool is kept.
    pub fn register(&mut self, tool: RegisteredTool) -> Result<&mut Self, RegistryError> {
        if self.index.contains_key(tool.name()) {
            return Err(RegistryError::DuplicateToolName {
                name: tool.name().to_string(),
            });
        }
        self.index.insert(tool.name().to_string(), self.tools.len());
        self.tools.push(Arc::new(tool));
        Ok(self)
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            index: self.index,
        }
    }
}

/// Immutable set of tools shared by every transport adapter.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<RegisteredTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    pub fn lookup(&self, name: &str) -> Result<&Arc<RegisteredTool>, RegistryError> {
        self.index
            .get(name)
            .map(|&idx| &self.tools[idx])
            .ok_or_else(|| RegistryError::ToolNotFound {
                name: name.to_string(),
            })
    }

    /// Look up `name`, validate `payload` against its schema, and run the handler.
    pub fn invoke(&self, name: &str, payload: &Value) -> Result<String, InvocationError> {
        let tool = self.lookup(name)?;
        Ok(tool.call(payload)?)
    }

    /// Tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RegisteredTool>> {
        self.tools.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn listing(&self, server: &str) -> ToolListing {
        ToolListing {
            server: server.to_string(),
            tools: self.tools.iter().map(|tool| tool.descriptor()).collect(),
        }
    }
}

/// Public description of one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Map<String, Value>,
}

/// Response body of the tool listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolListing {
    pub server: String,
    pub tools: Vec<ToolDescriptor>,
}

impl ToolListing {
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }
}
