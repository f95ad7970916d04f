use axum::{
    extract::{Extension, FromRequest, MatchedPath, Multipart, Path, Query, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Form,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::{ApiError, HandlerError};

use super::middleware::timing::RequestMarker;

/// Root endpoint
pub async fn root() -> &'static str {
    "Who are you?"
}

/// Liveness-style ping
pub async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong",
    }))
}

/// Greet a user addressed by path parameter
pub async fn greet_user(Path(name): Path<String>) -> String {
    format!("hello {name}")
}

/// Query parameters for the role greeting
#[derive(Debug, Deserialize)]
pub struct RoleParams {
    pub name: Option<String>,
    /// Defaults to "teacher" when absent
    pub role: Option<String>,
}

/// Greet a user described by query parameters
pub async fn user_query(Query(params): Query<RoleParams>) -> String {
    let name = params.name.unwrap_or_default();
    let role = params.role.unwrap_or_else(|| "teacher".to_string());
    format!("{name} is a {role}")
}

/// Credential fields shared by the form endpoints
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub uname: Option<String>,
    /// Defaults to "999999" when absent
    pub pword: Option<String>,
}

/// Echo a submitted form back as JSON
pub async fn submit_form(Form(form): Form<CredentialsForm>) -> impl IntoResponse {
    Json(json!({
        "username": form.uname.unwrap_or_default(),
        "password": form.pword.unwrap_or_else(|| "999999".to_string()),
    }))
}

/// Query parameters accompanying a post submission
#[derive(Debug, Deserialize)]
pub struct PostParams {
    pub id: Option<String>,
    /// Defaults to "1" when absent
    pub page: Option<String>,
}

/// Mixed query-and-form submission
pub async fn create_post(
    Query(params): Query<PostParams>,
    Form(form): Form<CredentialsForm>,
) -> impl IntoResponse {
    Json(json!({
        "id": params.id.unwrap_or_default(),
        "page": params.page.unwrap_or_else(|| "1".to_string()),
        "username": form.uname.unwrap_or_default(),
        "password": form.pword.unwrap_or_else(|| "999999".to_string()),
    }))
}

/// Default handler for the versioned route groups: reports which route
/// pattern matched.
pub async fn route_path(path: MatchedPath) -> impl IntoResponse {
    Json(json!({
        "path": path.as_str(),
    }))
}

/// Reads the marker stamped by the timing middleware
pub async fn request_marker(Extension(marker): Extension<RequestMarker>) -> &'static str {
    marker.0
}

/// Accept a multipart file upload.
///
/// A missing or unreadable `file` field is a client error, reported through
/// the adapter rather than silently ignored.
pub async fn upload_file(request: Request) -> Result<Response, HandlerError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|err| ApiError::new(StatusCode::BAD_REQUEST, err.to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::new(StatusCode::BAD_REQUEST, err.to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("unnamed").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::new(StatusCode::BAD_REQUEST, err.to_string()))?;

            info!(file = %file_name, size = bytes.len(), "File received");
            return Ok(format!("{file_name} uploaded!").into_response());
        }
    }

    Err(ApiError::new(StatusCode::BAD_REQUEST, "missing file field").into())
}

/// Parameters for the error-wrapped greeting
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: Option<String>,
}

/// Error-wrapped greeting: the reserved name fails with an intentional
/// API error, anything else responds normally.
pub async fn greet_or_fail(request: Request) -> Result<Response, HandlerError> {
    let Query(params) =
        Query::<NameParams>::try_from_uri(request.uri()).map_err(anyhow::Error::new)?;

    let name = params.name.unwrap_or_default();
    if name == "abcd" {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "param error").into());
    }

    Ok(Json(json!({
        "message": name,
    }))
    .into_response())
}
