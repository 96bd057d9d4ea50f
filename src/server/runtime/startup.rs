use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use rmcp::ServiceExt;
use tokio::net::TcpListener;

use crate::{
    cli::{LaunchProfile, TransportMode},
    lib::telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    server::{
        config::ServerConfig,
        http::{self, HttpState},
        runtime::{build_identity, build_instructions, DemoServer},
    },
    tools::build_registry,
};

/// Bundles a runtime error message with an exit code and optional structured error data.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
    error_data: Option<rmcp::model::ErrorData>,
}

impl RuntimeExit {
    pub fn structured(error: rmcp::model::ErrorData, exit_code: ExitCode) -> Self {
        Self {
            message: error.message.to_string(),
            exit_code,
            error_data: Some(error),
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
            error_data: None,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(data) = self.error_data {
            if let Ok(serialized) = serde_json::to_string(&data) {
                eprintln!("{serialized}");
            } else {
                eprintln!("{}", data.message);
            }
        } else {
            eprintln!("{}", self.message);
        }
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn error_data(&self) -> Option<&rmcp::model::ErrorData> {
        self.error_data.as_ref()
    }
}

/// Build the registry for the configured profile and serve it over the chosen transport.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let identity = build_identity(&profile, &config);
    let registry = build_registry(&identity).map_err(|err| {
        RuntimeExit::structured(
            crate::lib::errors::InvocationError::from(err).to_error_data(),
            ExitCode::FAILURE,
        )
    })?;
    let registry = Arc::new(registry);
    let tool_names = registry.names();
    let origin = config.origin.to_string();

    emit_runtime_mode(&RuntimeModeTelemetry {
        server_name: &identity.name,
        profile: identity.profile.as_str(),
        transport: profile.transport.as_str(),
        host: matches!(profile.transport, TransportMode::Http).then_some(identity.host.as_str()),
        port: matches!(profile.transport, TransportMode::Http).then_some(identity.port),
        config_origin: &origin,
        tools: &tool_names,
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => {
            let instructions = build_instructions(&identity, &config);
            run_stdio(DemoServer::new(identity, instructions, registry)).await
        }
        TransportMode::Http => {
            let addr = format!("{}:{}", identity.host, identity.port);
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind HTTP port {addr}"))
                .map_err(RuntimeExit::from_error)?;
            let state = HttpState::new(identity, registry);
            http::serve(listener, state, http::shutdown_signal())
                .await
                .map_err(RuntimeExit::from_error)
        }
    }
}

async fn run_stdio(server: DemoServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}
