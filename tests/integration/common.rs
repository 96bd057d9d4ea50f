use std::{io, path::PathBuf, process::Stdio, sync::Arc};

use anyhow::{Context, Result};
use hello_mcp::{
    server::http::{self, HttpState},
    tools::{build_registry, ServerIdentity, ServerProfile},
};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf},
    net::TcpListener,
    process::{Child, ChildStdin, ChildStdout, Command},
    sync::oneshot,
    task::JoinHandle,
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_hello-mcp");

/// Spawn the binary in stdio mode with the given profile and no config file.
pub async fn spawn_server_process(
    profile: &str,
) -> Result<(Child, ChildIoBridge, Option<JoinHandle<()>>)> {
    let mut command = Command::new(BINARY_PATH);
    command
        .args(["--transport", "stdio", "--profile", profile])
        .env(
            "HELLO_MCP_CONFIG",
            fixture("tests/fixtures/config_valid.toml"),
        )
        .env("RUST_LOG", "warn")
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    let mut child = command.spawn().context("failed to spawn server process")?;
    let stdout = child.stdout.take().context("child stdout")?;
    let stdin = child.stdin.take().context("child stdin")?;
    let bridge = ChildIoBridge::new(stdout, stdin);
    let stderr_handle = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
        })
    });
    Ok((child, bridge, stderr_handle))
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

pub fn identity(profile: ServerProfile, transport: &'static str, port: u16) -> ServerIdentity {
    ServerIdentity {
        name: profile.default_server_name().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        profile,
        transport,
        host: "127.0.0.1".to_string(),
        port,
        base_path: "/mcp".to_string(),
    }
}

/// In-process HTTP server on an ephemeral port; dropping it stops the server.
pub struct TestHttpServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestHttpServer {
    pub async fn start(profile: ServerProfile) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let identity = identity(profile, "http", port);
        let base_url = identity.endpoint_url();
        let registry = Arc::new(build_registry(&identity)?);
        let state = HttpState::new(identity, registry);

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(err) = http::serve(listener, state, shutdown).await {
                eprintln!("test server failed: {err:?}");
            }
        });

        Ok(Self {
            base_url,
            shutdown: Some(tx),
            handle: Some(handle),
        })
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestHttpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl ChildIoBridge {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self { stdout, stdin }
    }
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        data: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        std::pin::Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}
