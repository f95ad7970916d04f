use std::future::Future;

use axum::{
    extract::Request,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::{self, MethodFilter, MethodRouter},
};
use thiserror::Error;
use tracing::warn;

use crate::config::RunMode;

use super::response::ApiError;

/// Failure returned by a fallible handler.
///
/// Intentional application errors carry their own status and message and
/// reach the client unchanged. Everything else is opaque; the adapter
/// decides how much of it the client may see.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Converts handler failures into structured JSON error responses.
///
/// The run mode is injected at construction so both classification branches
/// are deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct ErrorAdapter {
    mode: RunMode,
}

impl ErrorAdapter {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    /// Classify a failure into the error the client will see.
    ///
    /// Opaque failures keep their message only in debug mode; in release
    /// mode the client gets the fixed server-error message.
    fn classify(&self, err: HandlerError) -> ApiError {
        match err {
            HandlerError::Api(api_err) => api_err,
            HandlerError::Other(err) => {
                if self.mode.is_debug() {
                    ApiError::unknown(err.to_string())
                } else {
                    ApiError::server_error()
                }
            }
        }
    }

    /// Build the terminal response for a failed request.
    ///
    /// `request` is overwritten here unconditionally; whatever the handler
    /// put there is discarded.
    pub fn respond(&self, method: &Method, uri: &Uri, err: HandlerError) -> Response {
        let mut api_err = self.classify(err);
        api_err.request = format!("{method} to {uri}");

        warn!(
            status = %api_err.code.as_u16(),
            msg = %api_err.msg,
            request = %api_err.request,
            "Handler failed"
        );

        api_err.into_response()
    }
}

/// Register a fallible handler under the given method.
///
/// On success the handler's response passes through untouched; on failure
/// the adapter writes the structured error response in its place.
pub fn on_fallible<S, F, Fut>(filter: MethodFilter, mode: RunMode, handler: F) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, HandlerError>> + Send + 'static,
{
    let adapter = ErrorAdapter::new(mode);
    routing::on(filter, move |request: Request| {
        let handler = handler.clone();
        async move {
            let method = request.method().clone();
            let uri = request.uri().clone();
            match handler(request).await {
                Ok(response) => response,
                Err(err) => adapter.respond(&method, &uri, err),
            }
        }
    })
}

/// `GET` route with error wrapping
pub fn get_fallible<S, F, Fut>(mode: RunMode, handler: F) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, HandlerError>> + Send + 'static,
{
    on_fallible(MethodFilter::GET, mode, handler)
}

/// `POST` route with error wrapping
pub fn post_fallible<S, F, Fut>(mode: RunMode, handler: F) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, HandlerError>> + Send + 'static,
{
    on_fallible(MethodFilter::POST, mode, handler)
}
