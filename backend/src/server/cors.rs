//! Cross-origin policy for browser clients such as the admin dashboard.

use actix_cors::Cors;
use actix_web::http::Uri;

use civicdesk::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin; responses carry `Access-Control-Allow-Origin: *`.
    #[default]
    AnyOrigin,
    /// Only these exact origins are echoed back.
    Origins(Vec<String>),
}

/// Rejected `CIVICDESK_CORS_ORIGINS` entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorsPolicyError {
    /// The entry is not a bare `scheme://host[:port]` origin.
    #[error("invalid CORS origin {origin:?}: expected scheme://host[:port]")]
    InvalidOrigin { origin: String },
}

impl CorsPolicy {
    /// Parse a comma-separated origin list. An empty list or `*` allows any
    /// origin.
    pub fn parse(raw: &str) -> Result<Self, CorsPolicyError> {
        let origins: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect();
        if origins.is_empty() || origins.contains(&"*") {
            return Ok(Self::AnyOrigin);
        }
        origins
            .into_iter()
            .map(validate_origin)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Origins)
    }

    /// Build the middleware. Called once per worker.
    pub fn middleware(&self) -> Cors {
        let cors = match self {
            Self::AnyOrigin => Cors::default().allow_any_origin().send_wildcard(),
            Self::Origins(origins) => origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin)),
        };
        cors.allow_any_method()
            .allow_any_header()
            .expose_headers([TRACE_ID_HEADER])
            .max_age(PREFLIGHT_MAX_AGE_SECS)
    }
}

/// Browsers send origins without a path, so `http://host/` never matches.
fn validate_origin(raw: &str) -> Result<String, CorsPolicyError> {
    let invalid = || CorsPolicyError::InvalidOrigin {
        origin: raw.to_owned(),
    };
    let uri: Uri = raw.parse().map_err(|_| invalid())?;
    let bare = uri.scheme().is_some()
        && uri.authority().is_some()
        && uri.path() == "/"
        && uri.query().is_none()
        && !raw.ends_with('/');
    if bare { Ok(raw.to_owned()) } else { Err(invalid()) }
}
