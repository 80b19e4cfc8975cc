//! Bearer credential extraction
//!
//! Only `Authorization: Bearer <token>` is accepted. Any other scheme,
//! an empty token, or stray whitespace is rejected.

use axum::http::{HeaderMap, header};

/// Error when extracting a bearer credential
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization header is not of the form `Bearer <token>`")]
    Malformed,
}

/// Parse a raw `Authorization` value
pub fn parse_bearer(value: &str) -> Result<&str, BearerError> {
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(BearerError::Malformed)?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}

/// Extract the bearer token from request headers
///
/// A header that appears more than once is treated as malformed.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let mut values = headers.get_all(header::AUTHORIZATION).iter();
    let value = values.next().ok_or(BearerError::Missing)?;
    if values.next().is_some() {
        return Err(BearerError::Malformed);
    }

    let value = value.to_str().map_err(|_| BearerError::Malformed)?;
    parse_bearer(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_valid_bearer() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert_eq!(
            extract_bearer(&headers_with("Basic dXNlcjpwYXNz")),
            Err(BearerError::Malformed)
        );
        assert_eq!(extract_bearer(&headers_with("bearer abc")), Err(BearerError::Malformed));
        assert_eq!(extract_bearer(&headers_with("abc.def.ghi")), Err(BearerError::Malformed));
    }

    #[test]
    fn test_empty_or_spaced_token_rejected() {
        assert_eq!(parse_bearer("Bearer "), Err(BearerError::Malformed));
        assert_eq!(parse_bearer("Bearer  abc"), Err(BearerError::Malformed));
        assert_eq!(parse_bearer("Bearer abc def"), Err(BearerError::Malformed));
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let mut headers = HeaderMap::new();
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("Bearer a"));
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("Bearer b"));
        assert_eq!(extract_bearer(&headers), Err(BearerError::Malformed));
    }
}
