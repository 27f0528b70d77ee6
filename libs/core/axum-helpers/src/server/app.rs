use super::shutdown::ShutdownCoordinator;
use crate::errors::{ErrorCode, error_response, handlers::not_found};
use axum::{Router, http::StatusCode, middleware, response::Response};
use core_config::server::{ListenType, ServerConfig};
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wrap API routes with documentation, tracing, timeouts and a JSON 404 fallback.
///
/// - `/swagger-ui` and `/api-docs/openapi.json` serve the OpenAPI document `T`
/// - requests whose body is not received within `read_timeout` fail
/// - requests not answered within `write_timeout` get `408 Request Timeout`;
///   the handler future is dropped, which aborts any in-flight database call
///
/// ```ignore
/// let api = register_all(Router::new(), &[&users]);
/// let router = create_router::<ApiDoc>(api, &config.server);
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(RequestBodyTimeoutLayer::new(server_config.read_timeout))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server_config.write_timeout,
        ))
        .layer(middleware::map_response(json_timeout_body))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Give bare 408 responses produced by the timeout layer the standard error body.
async fn json_timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response
            .headers()
            .contains_key(axum::http::header::CONTENT_TYPE)
    {
        return error_response(StatusCode::REQUEST_TIMEOUT, ErrorCode::RequestTimeout);
    }
    response
}

/// Serve `router` on the configured listener until SIGINT/SIGTERM.
///
/// - binds TCP `host:port` or a Unix socket, per `server_config.listen_type`
/// - stops accepting on shutdown and drains in-flight requests
/// - then runs `cleanup`, bounded by `shutdown_timeout`
///
/// ```ignore
/// serve(router, &config.server, Duration::from_secs(30), async move {
///     drop(client);
/// })
/// .await?;
/// ```
pub async fn serve<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    let serve_result =
        serve_until(router, server_config, async move { coordinator.wait().await }).await;

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

/// Serve `router` until `shutdown` resolves, then drain connections.
pub async fn serve_until<S>(
    router: Router,
    server_config: &ServerConfig,
    shutdown: S,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    match server_config.listen_type {
        ListenType::Tcp => {
            let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
            info!("Server listening on tcp {}", listener.local_addr()?);

            axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(shutdown)
                .await
                .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e))
        }
        ListenType::Socket => serve_unix(router, server_config, shutdown).await,
    }
}

#[cfg(unix)]
async fn serve_unix<S>(router: Router, server_config: &ServerConfig, shutdown: S) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let path = &server_config.socket_path;
    remove_stale_socket(path)?;

    let listener = tokio::net::UnixListener::bind(path)?;
    info!("Server listening on unix socket {}", path.display());

    let result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    remove_stale_socket(path)?;
    result
}

#[cfg(not(unix))]
async fn serve_unix<S>(_router: Router, _server_config: &ServerConfig, _shutdown: S) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "unix socket listeners are not supported on this platform",
    ))
}

#[cfg(unix)]
fn remove_stale_socket(path: &std::path::Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
