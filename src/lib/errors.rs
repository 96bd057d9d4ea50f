use std::{fmt, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Where configuration values were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// A TOML file on disk.
    File(PathBuf),
    /// Built-in defaults plus CLI overrides.
    Defaults,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Defaults => f.write_str("<defaults>"),
        }
    }
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing or blank.
    #[error("Configuration {origin} is missing `{field}`")]
    MissingField {
        origin: ConfigOrigin,
        field: &'static str,
    },
    /// Field failed validation.
    #[error("Configuration {origin} has invalid `{field}`: {message}")]
    InvalidField {
        origin: ConfigOrigin,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Input payload rejected before the handler runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },
    #[error("field `{field}` must be a {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("tool arguments must be a JSON object, got {found}")]
    InvalidPayload { found: &'static str },
    #[error("tool arguments do not fit the input type: {message}")]
    Undeserializable { message: String },
}

/// Registry construction and lookup failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool `{name}` is already registered")]
    DuplicateToolName { name: String },
    #[error("tool `{name}` is not registered")]
    ToolNotFound { name: String },
}

/// Any failure surfaced by `ToolRegistry::invoke`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl InvocationError {
    /// Descriptor carrying the stable error code and remediation hint.
    pub fn descriptor(&self) -> &'static ToolErrorDescriptor {
        match self {
            InvocationError::Registry(RegistryError::ToolNotFound { .. }) => {
                &TOOL_NOT_FOUND_ERROR
            }
            InvocationError::Registry(RegistryError::DuplicateToolName { .. }) => {
                &DUPLICATE_TOOL_NAME_ERROR
            }
            InvocationError::Validation(ValidationError::MissingField { .. }) => {
                &MISSING_FIELD_ERROR
            }
            InvocationError::Validation(ValidationError::TypeMismatch { .. })
            | InvocationError::Validation(ValidationError::Undeserializable { .. }) => {
                &TYPE_MISMATCH_ERROR
            }
            InvocationError::Validation(ValidationError::InvalidPayload { .. }) => {
                &INVALID_PAYLOAD_ERROR
            }
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        self.descriptor().code
    }

    fn details(&self) -> Value {
        let mut details = Map::new();
        match self {
            InvocationError::Registry(RegistryError::ToolNotFound { name })
            | InvocationError::Registry(RegistryError::DuplicateToolName { name }) => {
                details.insert("tool".into(), Value::String(name.clone()));
            }
            InvocationError::Validation(ValidationError::MissingField { field }) => {
                details.insert("field".into(), Value::String(field.clone()));
            }
            InvocationError::Validation(ValidationError::TypeMismatch {
                field,
                expected,
                found,
            }) => {
                details.insert("field".into(), Value::String(field.clone()));
                details.insert("expected".into(), Value::String((*expected).into()));
                details.insert("found".into(), Value::String((*found).into()));
            }
            InvocationError::Validation(ValidationError::InvalidPayload { found }) => {
                details.insert("found".into(), Value::String((*found).into()));
            }
            InvocationError::Validation(ValidationError::Undeserializable { message }) => {
                details.insert("reason".into(), Value::String(message.clone()));
            }
        }
        Value::Object(details)
    }

    /// Convert into MCP `ErrorData` with structured metadata.
    pub fn to_error_data(&self) -> ErrorData {
        self.descriptor()
            .builder()
            .message(self.to_string())
            .retryable(false)
            .details(self.details())
            .build()
            .unwrap_or_else(|err| ErrorData::internal_error(err.to_string(), None))
    }
}

/// Failures of the HTTP smoke client.
#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("could not reach {url}: {source}")]
    TransportConnection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Structured error metadata returned by MCP tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// Default user-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
}

impl ToolErrorDescriptor {
    /// Simple constructor.
    pub const fn new(code: &'static str, message: &'static str, remediation: &'static str) -> Self {
        Self {
            code,
            message,
            remediation,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    message: Option<String>,
    retryable: Option<bool>,
    details: Option<Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            message: None,
            retryable: None,
            details: None,
        }
    }

    /// Replace the descriptor's default message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }

        let message = self
            .message
            .unwrap_or_else(|| self.descriptor.message.to_string());
        Ok(ErrorData::invalid_params(message, Some(Value::Object(data))))
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

pub const MISSING_FIELD_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "missing_field",
    "A required tool argument is missing",
    "Include every required field listed in the tool's input schema.",
);

pub const TYPE_MISMATCH_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "type_mismatch",
    "A tool argument has the wrong type",
    "Send each field with the JSON type declared in the tool's input schema.",
);

pub const INVALID_PAYLOAD_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "invalid_payload",
    "Tool arguments must be a JSON object",
    "Send the arguments as a JSON object keyed by field name.",
);

pub const TOOL_NOT_FOUND_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "tool_not_found",
    "The requested tool is not registered",
    "List the available tools and retry with one of the advertised names.",
);

pub const DUPLICATE_TOOL_NAME_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "duplicate_tool_name",
    "A tool with this name is already registered",
    "Give every tool a unique name before starting the server.",
);
