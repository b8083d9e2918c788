// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;

/// Accept loop. Returns once `shutdown` resolves; connections already being
/// served finish in their own tasks.
pub async fn start_server_loop<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => tracing::error!(error = %e, "Failed to accept connection"),
                }
            }

            () = &mut shutdown => {
                tracing::info!(
                    active = active_connections.load(Ordering::SeqCst),
                    "Stopped accepting connections"
                );
                return Ok(());
            }
        }
    }
}
