//! Accept loop.

use crate::auth::AuthGate;
use crate::connection::handle_connection;
use crate::context::ServiceContext;
use crate::dispatch::{Dispatcher, Registry};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// The picsync server: an accept loop feeding the
/// gate → dispatcher pipeline, one task per connection.
///
/// Connections are admitted through a semaphore sized by
/// `max_connections`; a connection arriving with no permit available is
/// dropped at admission rather than queued without bound. Shutdown is
/// cooperative: flipping the watch channel stops the accept loop, which
/// then waits for in-flight handlers to finish.
pub struct Server {
    context: Arc<ServiceContext>,
    gate: Arc<AuthGate>,
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    /// Builds a server, registering every operation handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        let gate = Arc::new(AuthGate::new(context.identity.clone()));
        let registry = Registry::with_default_handlers(context.clone());
        let dispatcher = Arc::new(Dispatcher::new(registry));
        Self {
            context,
            gate,
            dispatcher,
        }
    }

    /// Runs the accept loop until `shutdown` flips to `true`.
    ///
    /// Each accepted connection is handled independently; a failing
    /// connection is logged and never takes down the loop. On shutdown the
    /// listener stops accepting and in-flight connections are drained.
    pub async fn serve(
        &self,
        listener: TcpListener,
        mut shutdown: watch::Receiver<bool>,
    ) -> std::io::Result<()> {
        let admission = Arc::new(Semaphore::new(self.context.config.max_connections));
        let mut connections = JoinSet::new();

        info!(addr = %listener.local_addr()?, "server listening");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender counts as a shutdown request.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(pair) => pair,
                        Err(err) => {
                            // Transient accept errors (e.g. fd exhaustion)
                            // must not kill the loop.
                            warn!(%err, "accept failed");
                            continue;
                        }
                    };

                    let Ok(permit) = admission.clone().try_acquire_owned() else {
                        warn!(%peer, "connection limit reached, dropping connection");
                        continue;
                    };

                    let gate = self.gate.clone();
                    let dispatcher = self.dispatcher.clone();
                    connections.spawn(async move {
                        let _permit = permit;
                        if let Err(err) = handle_connection(stream, &gate, &dispatcher).await {
                            debug!(%peer, %err, "connection closed with error");
                        }
                    });
                }
                // Reap finished connection tasks as they complete.
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        drop(listener);
        info!(in_flight = connections.len(), "shutting down, draining connections");
        while connections.join_next().await.is_some() {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use picsync_protocol::{read_frame, write_frame, OpCode, Request, Response, StatusCode};
    use picsync_testkit::TestBackend;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    async fn start_server(backend: &TestBackend) -> (std::net::SocketAddr, watch::Sender<bool>) {
        let context = Arc::new(ServiceContext::new(
            ServerConfig::default(),
            backend.documents.clone(),
            backend.blobs.clone(),
            backend.identity.clone(),
        ));
        let server = Server::new(context);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move { server.serve(listener, shutdown_rx).await.unwrap() });
        (addr, shutdown_tx)
    }

    async fn round_trip(addr: std::net::SocketAddr, request: &Request) -> Response {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        write_frame(&mut stream, &request.encode().unwrap())
            .await
            .unwrap();
        let body = read_frame(&mut stream).await.unwrap();
        Response::decode(&body).unwrap()
    }

    #[tokio::test]
    async fn serves_one_request_per_connection() {
        let backend = TestBackend::new();
        let (addr, shutdown) = start_server(&backend).await;

        let request = Request::new(OpCode::UserAuth, backend.token_for("u1"));
        let response = round_trip(addr, &request).await;

        assert_eq!(response.status_code(), Some(StatusCode::Ok));
        assert_eq!(response.payload_as::<String>().unwrap(), "u1");

        shutdown.send(true).unwrap();
    }

    #[tokio::test]
    async fn survives_a_broken_connection() {
        let backend = TestBackend::new();
        let (addr, shutdown) = start_server(&backend).await;

        // A client that sends half a frame and disappears.
        {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(&100u32.to_be_bytes()).await.unwrap();
            stream.write_all(b"partial").await.unwrap();
        }

        // The loop is still alive and serving.
        let request = Request::new(OpCode::UserAuth, backend.token_for("u1"));
        let response = round_trip(addr, &request).await;
        assert_eq!(response.status_code(), Some(StatusCode::Ok));

        shutdown.send(true).unwrap();
    }
}
