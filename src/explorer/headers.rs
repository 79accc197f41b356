//! Header utilities for API Explorer requests

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

use crate::error::{ExportError, ExportResult};

pub const AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");
pub const LANGUAGE: HeaderName = HeaderName::from_static("x-language");
pub const REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Build the headers sent with every API Explorer request
///
/// The token is only attached when configured, and `X-Language` only in
/// English mode. No `Content-Type` is set since the crawl never sends a body.
pub fn build_default_headers(auth_token: Option<&str>, english: bool) -> ExportResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(token) = auth_token.filter(|t| !t.is_empty()) {
        let value =
            HeaderValue::from_str(token).map_err(|_| ExportError::InvalidHeader("X-Auth-Token"))?;
        headers.insert(AUTH_TOKEN, value);
    }

    if english {
        headers.insert(LANGUAGE, HeaderValue::from_static("en-us"));
    }

    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));

    Ok(headers)
}
