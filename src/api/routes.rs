use axum::{
    http::{Method, Uri},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::RunMode;
use crate::errors::{get_fallible, post_fallible, ApiError, ErrorAdapter};

use super::handlers::{
    create_post, greet_or_fail, greet_user, ping, request_marker, root, route_path, submit_form,
    upload_file, user_query,
};
use super::middleware::{logging_middleware, timing_middleware};

pub fn create_router(mode: RunMode) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let adapter = ErrorAdapter::new(mode);

    // Versioned route group, mounted under /v1 and /v2
    let versioned = Router::new()
        .route("/posts", get(route_path))
        .route("/series", get(route_path));

    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        // Static /user/query takes precedence over the :name capture
        .route("/user/query", get(user_query))
        .route("/user/:name", get(greet_user))
        .route("/form", post(submit_form))
        .route("/posts", post(create_post))
        .nest("/v1", versioned.clone())
        .nest("/v2", versioned)
        .route("/upload", post_fallible(mode, upload_file))
        // Timing middleware applies to this route only
        .route(
            "/single",
            get(request_marker).layer(middleware::from_fn(timing_middleware)),
        )
        .route("/global/error", get_fallible(mode, greet_or_fail))
        // Unmatched paths get the structured error treatment too
        .fallback(move |method: Method, uri: Uri| async move {
            adapter.respond(&method, &uri, ApiError::not_found().into())
        })
        // Add middleware (order matters: logging -> cors -> panic recovery -> trace)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
