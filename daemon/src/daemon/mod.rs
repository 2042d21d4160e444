// src/daemon/mod.rs
pub mod handlers;
pub mod state;

use anyhow::{anyhow, Context, Result};
use handlers::dispatch;
use state::{DaemonState, Outcome};
use std::future::Future;
use std::io;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use wirecall_core::rpc::unix::read_request_header;
use wirecall_core::utils::MAX_REQUEST_BYTES;

/// Binds the daemon socket, replacing a stale socket file.
pub async fn bind(sock_path: &str) -> Result<UnixListener> {
    log::info!("Daemon starting, attempting to listen on socket: {}", sock_path);

    if Path::new(sock_path).exists() {
        log::warn!("Socket file {} already exists, attempting to remove.", sock_path);
        tokio::fs::remove_file(sock_path)
            .await
            .with_context(|| format!("Failed to remove existing socket file: {}", sock_path))?;
    }

    let listener = UnixListener::bind(sock_path)
        .with_context(|| format!("Failed to bind to socket: {}", sock_path))?;
    log::info!("Successfully bound to socket: {}", sock_path);
    Ok(listener)
}

/// Starts the daemon and serves until Ctrl-C.
pub async fn start(sock_path: &str, state: DaemonState) -> Result<()> {
    let listener = bind(sock_path).await?;
    serve_until(listener, sock_path, state, tokio::signal::ctrl_c()).await
}

/// Serves until `signal` resolves. A failed signal stops the daemon with its error.
pub async fn serve_until<F>(
    listener: UnixListener,
    sock_path: &str,
    state: DaemonState,
    signal: F,
) -> Result<()>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let watcher = tokio::spawn(async move {
        let res = signal.await;
        match &res {
            Ok(()) => log::info!("Received Ctrl-C."),
            Err(e) => log::error!("Failed to listen for Ctrl-C: {}", e),
        }
        let _ = shutdown_tx.send(true);
        res
    });

    serve(listener, sock_path, state, shutdown_rx).await?;
    watcher
        .await
        .context("Failed to join Ctrl-C listener")?
        .context("Failed to listen for Ctrl-C")
}

/// Accepts connections until the shutdown signal flips to `true`.
pub async fn serve(
    listener: UnixListener,
    sock_path: &str,
    state: DaemonState,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    log::info!("Daemon ready and listening for connections.");
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        log::debug!("Accepted new connection");
                        let state_clone = state.clone();
                        tasks.spawn(async move {
                            if let Err(e) = handle_connection(stream, state_clone).await {
                                log::error!("Error handling connection: {:#}", e);
                            }
                        });
                    }
                    Err(e) => {
                        log::error!("Failed to accept connection: {}", e);
                    }
                }
            }
            Some(res) = tasks.join_next() => {
                if let Err(e) = res {
                    log::error!("Failed to join connection task: {}", e);
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    log::info!("Shutdown signal received, stopping listener.");
                    break;
                }
            }
        }
    }

    log::info!("Daemon shutting down, waiting for {} connection(s)...", tasks.len());
    while let Some(res) = tasks.join_next().await {
        if let Err(e) = res {
            log::error!("Failed to join connection task: {}", e);
        }
    }

    for ((instance, name), stats) in state.all_stats().await {
        log::info!(
            "{}.{}: served {}, failed {}, unknown {}",
            instance,
            name,
            stats.served,
            stats.failed,
            stats.unknown
        );
    }

    if let Err(e) = tokio::fs::remove_file(sock_path).await {
        log::warn!("Failed to remove socket file during shutdown {}: {}", sock_path, e);
    }

    log::info!("Daemon has shut down.");
    Ok(())
}

/// Handles a single invocation.
///
/// The request runs until the client shuts down its write half. Unknown
/// functions get no result, the caller then sees the stream end.
async fn handle_connection(mut stream: UnixStream, state: DaemonState) -> Result<()> {
    let mut request = Vec::new();
    (&mut stream)
        .take(MAX_REQUEST_BYTES + 1)
        .read_to_end(&mut request)
        .await
        .context("Failed to read request")?;
    if request.len() as u64 > MAX_REQUEST_BYTES {
        return Err(anyhow!(
            "Received excessively large request, over {} bytes",
            MAX_REQUEST_BYTES
        ));
    }

    let mut r = request.as_slice();
    let (instance, name) = read_request_header(&mut r).context("Failed to decode request header")?;
    log::info!("Invocation of {}.{}", instance, name);

    let reply = match dispatch(&instance, &name, r, &state).await {
        Ok(Some(reply)) => reply,
        Ok(None) => {
            log::warn!("No function {} exported by {}", name, instance);
            state.record(&instance, &name, Outcome::Unknown).await;
            return Ok(());
        }
        Err(e) => {
            state.record(&instance, &name, Outcome::Failed).await;
            return Err(e.context(format!("Failed to handle {}.{}", instance, name)));
        }
    };

    if let Err(e) = write_reply(&mut stream, &reply).await {
        state.record(&instance, &name, Outcome::Failed).await;
        return Err(e.context(format!("Failed to reply to {}.{}", instance, name)));
    }
    state.record(&instance, &name, Outcome::Served).await;

    log::debug!("Sent result and closing connection.");
    Ok(())
}

async fn write_reply(stream: &mut UnixStream, reply: &[u8]) -> Result<()> {
    stream.write_all(reply).await.context("Failed to write result")?;
    stream.shutdown().await.context("Failed to close result stream")?;
    Ok(())
}
