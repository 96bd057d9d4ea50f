//! Tool definitions, input schemas, and the registry shared by all transports.

pub mod catalog;
pub mod describe;
pub mod echo;
pub mod greeting;
pub mod registry;
pub mod schema;
pub mod secret;
pub mod template;

pub use catalog::{build_registry, ServerIdentity, ServerProfile};
pub use registry::{
    RegisteredTool, ToolDescriptor, ToolHandler, ToolListing, ToolRegistry, ToolRegistryBuilder,
};
pub use schema::{NoInput, ToolInput, ToolSchema};
pub use secret::{SecretString, REDACTION_MARKER};
