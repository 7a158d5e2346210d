//! HTTP server for the expense API
//!
//! A small hyper HTTP/1 server. Each request body is collected and handed
//! to [`route`] on the blocking pool, since storage does file I/O.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use super::routes::{route, ApiResponse};
use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Storage;

/// Shared state for all connections
pub struct ApiState {
    pub storage: Storage,
    /// Owner recorded on expenses posted without a `user_id`
    pub user_id: String,
}

/// Run the server until Ctrl-C
pub fn run(addr: SocketAddr, state: ApiState) -> ExpenseResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ExpenseError::Api(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(async move {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ExpenseError::Api(format!("Failed to bind {}: {}", addr, e)))?;
        serve(listener, Arc::new(state)).await
    })
}

/// Accept connections on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, state: Arc<ApiState>) -> ExpenseResult<()> {
    let local = listener
        .local_addr()
        .map_err(|e| ExpenseError::Api(e.to_string()))?;
    log::info!("Expense API listening on http://{}", local);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    log::debug!("Connection from {}", peer);
                    let state = Arc::clone(&state);
                    tokio::spawn(async move {
                        handle_connection(stream, state).await;
                    });
                }
                Err(e) => {
                    log::error!("Failed to accept connection: {}", e);
                }
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down expense API");
                return Ok(());
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, state: Arc<ApiState>) {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req| handle_request(req, Arc::clone(&state)));

    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
        log::error!("HTTP connection error: {}", err);
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<ApiState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    log::debug!("{} {}", method, req.uri());

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            log::warn!("Failed to read request body: {}", e);
            return Ok(to_response(ApiResponse {
                status: StatusCode::BAD_REQUEST,
                body: r#"{"error":"Failed to read request body"}"#.to_string(),
            }));
        }
    };

    let routed = tokio::task::spawn_blocking(move || {
        route(
            &state.storage,
            &state.user_id,
            &method,
            &path,
            query.as_deref(),
            &body,
        )
    })
    .await;

    let response = match routed {
        Ok(response) => response,
        Err(e) => {
            log::error!("Request handler failed: {}", e);
            ApiResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: r#"{"error":"Internal server error"}"#.to_string(),
            }
        }
    };

    Ok(to_response(response))
}

fn to_response(api: ApiResponse) -> Response<Full<Bytes>> {
    let has_body = !api.body.is_empty();
    let mut response = Response::new(Full::new(Bytes::from(api.body)));
    *response.status_mut() = api.status;
    if has_body {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    response
}
