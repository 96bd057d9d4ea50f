//! Configuration, MCP runtime, and the HTTP adapter.
pub mod config;
pub mod http;
pub mod runtime;
