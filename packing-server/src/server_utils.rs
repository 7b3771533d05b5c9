use anyhow::{Context, Result};
use listenfd::ListenFd;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use packing_types::ServerConfig;

pub async fn create_listener(config: &ServerConfig) -> Result<tokio::net::TcpListener> {
    let mut listenfd = ListenFd::from_env();

    if let Some(listener) = listenfd.take_tcp_listener(0)? {
        info!("Using systemd socket activation (fd=3)");
        listener.set_nonblocking(true)?;
        return Ok(tokio::net::TcpListener::from_std(listener)?);
    }

    let bind_addr = config.bind_address();
    let addr: SocketAddr = tokio::net::lookup_host(&bind_addr)
        .await
        .with_context(|| format!("Invalid bind address '{bind_addr}'"))?
        .next()
        .with_context(|| format!("Bind address '{bind_addr}' did not resolve"))?;
    let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into()).with_context(|| format!("Failed to bind {addr}"))?;
    socket.listen(1024)?;

    info!(%addr, "Bound listener with SO_REUSEPORT");

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and never fires, leaving the other one in charge.
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(e) => {
                error!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let reason = tokio::select! {
        () = interrupt => "interrupt",
        () = terminate => "terminate",
    };

    info!(signal = reason, "Shutting down, draining in-flight requests");
}
