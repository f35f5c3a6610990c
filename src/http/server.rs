//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create an Axum Router around one [`RequestHandler`]
//! - Wire up middleware (tracing, request ID)
//! - Serve on a bound listener until the shutdown future completes

use axum::{body::Body, extract::ConnectInfo, http::Request, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::routing::RequestHandler;

/// HTTP server for one routing mode.
pub struct HttpServer {
    router: Router,
    mode: &'static str,
}

impl HttpServer {
    /// Create a server that sends every request, whatever its path or
    /// method, to `handler`.
    pub fn new<H: RequestHandler>(handler: H) -> Self {
        let mode = handler.mode();
        let router = Self::build_router(Arc::new(handler));
        Self { router, mode }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The handler is installed as the fallback so that `/`, empty paths and
    /// authority-form CONNECT targets reach it too.
    fn build_router<H: RequestHandler>(handler: Arc<H>) -> Router {
        Router::new()
            .fallback(move |request: Request<Body>| {
                let handler = Arc::clone(&handler);
                async move {
                    if let Some(ConnectInfo(peer)) =
                        request.extensions().get::<ConnectInfo<SocketAddr>>()
                    {
                        tracing::trace!(peer_addr = %peer, "Dispatching request");
                    }
                    handler.handle(request).await
                }
            })
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The Axum router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn mode(&self) -> &'static str {
        self.mode
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` completes. In-flight requests are allowed to finish.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = self.mode,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!(mode = self.mode, "HTTP server stopped");
        Ok(())
    }
}
