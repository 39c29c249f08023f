//! Extractors whose rejections answer with the crate's validation error body.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::Error;

/// JSON request body. A body that does not parse is a 400 on field `body`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// Path parameters. Malformed segments are a 400 on field `path`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct PathParams<T>(pub T);

/// Query string. Missing or malformed parameters are a 400 on field `query`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);
