//! This module provides extension traits for reading query parameters and form bodies out of
//! `http` types.

use http::{header::CONTENT_TYPE, HeaderMap, Request, StatusCode, Uri};

use crate::query::{parse_multi, parse_single, MultiQueryMap, QueryMap};

/// The media type of form bodies, see [`is_form_urlencoded`].
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Errors while reading a form body.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    UnsupportedMediaType,

    InvalidEncoding,
}

impl ParseError {
    /// The status a server would answer a request with when its body fails to parse.
    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ParseError::InvalidEncoding => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnsupportedMediaType => write!(f, "Unsupported Media Type"),
            ParseError::InvalidEncoding => write!(f, "Invalid utf-8"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Returns true if the `Content-Type` header names a form body. Parameters such as `charset` are
/// ignored.
pub fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return false;
    };

    let Ok(value) = value.to_str() else {
        return false;
    };

    let media_type = value.split(';').next().unwrap_or_default().trim();

    media_type.eq_ignore_ascii_case(FORM_URLENCODED)
}

/// Query string extension trait. A missing query yields an empty map.
pub trait QueryExt {
    /// The raw, still encoded query. Ex: "foo=bar&baz"
    fn raw_query(&self) -> Option<&str>;

    /// Query parameters with the values of repeated keys joined by a comma.
    fn query_map(&self) -> QueryMap {
        self.raw_query().map(parse_single).unwrap_or_default()
    }

    /// Query parameters with every value of a repeated key kept.
    fn query_multi_map(&self) -> MultiQueryMap {
        self.raw_query().map(parse_multi).unwrap_or_default()
    }
}

impl QueryExt for Uri {
    fn raw_query(&self) -> Option<&str> {
        self.query()
    }
}

impl<T> QueryExt for Request<T> {
    fn raw_query(&self) -> Option<&str> {
        self.uri().query()
    }
}

/// `application/x-www-form-urlencoded` body extension trait.
pub trait FormExt {
    /// The body as text, if the request declares a form body and the body is valid utf-8.
    fn form_body(&self) -> Result<&str, ParseError>;

    /// Form fields with the values of repeated keys joined by a comma.
    fn form_map(&self) -> Result<QueryMap, ParseError> {
        self.form_body().map(parse_single)
    }

    /// Form fields with every value of a repeated key kept.
    fn form_multi_map(&self) -> Result<MultiQueryMap, ParseError> {
        self.form_body().map(parse_multi)
    }
}

impl<T> FormExt for Request<T>
where
    T: AsRef<[u8]>,
{
    fn form_body(&self) -> Result<&str, ParseError> {
        if !is_form_urlencoded(self.headers()) {
            log::debug!(
                "rejecting body with content type {:?}",
                self.headers().get(CONTENT_TYPE)
            );

            return Err(ParseError::UnsupportedMediaType);
        }

        let Ok(body) = std::str::from_utf8(self.body().as_ref()) else {
            log::debug!("rejecting form body that isn't utf-8");

            return Err(ParseError::InvalidEncoding);
        };

        Ok(body)
    }
}
