//! Structured error responses and the failure-classifying adapter

pub mod adapter;
pub mod response;

pub use adapter::{get_fallible, post_fallible, ErrorAdapter, HandlerError};
pub use response::ApiError;
