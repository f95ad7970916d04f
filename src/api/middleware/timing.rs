use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::debug;

/// Value stamped onto the request before the handler runs. Handlers read it
/// back through `Extension<RequestMarker>`.
#[derive(Debug, Clone, Copy)]
pub struct RequestMarker(pub &'static str);

const MARKER: &str = "1111";

/// Route-scoped middleware: stamps the request with a marker the handler
/// can extract, then logs how long the handler took.
pub async fn timing_middleware(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    request.extensions_mut().insert(RequestMarker(MARKER));

    let response = next.run(request).await;

    debug!(
        latency_ms = %start.elapsed().as_millis(),
        "Timed route completed"
    );

    response
}
