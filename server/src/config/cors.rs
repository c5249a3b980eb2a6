use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

pub fn create_cors_layer(allowed_origins: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(parse_allowed_origins(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn parse_allowed_origins(origins_str: &str) -> AllowOrigin {
    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter(|origin| {
            if *origin == "*" {
                tracing::warn!("CORS: Wildcard origin ignored, credentials require explicit origins");
                return false;
            }
            true
        })
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    // Credentials cannot be combined with a wildcard origin, so an empty list
    // falls back to the local development origins.
    if origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, using development defaults");
        return AllowOrigin::list(
            DEFAULT_ALLOWED_ORIGINS
                .split(',')
                .map(HeaderValue::from_static),
        );
    }

    tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
    AllowOrigin::list(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer() {
        let _layer = create_cors_layer(DEFAULT_ALLOWED_ORIGINS);
        let _fallback = create_cors_layer(" , ");
    }

    #[test]
    fn test_wildcard_origin_is_dropped() {
        let _wildcard = create_cors_layer("*");
        let _mixed = create_cors_layer("*, https://zoo.example.com");
    }

    #[test]
    fn test_default_origins_are_valid() {
        for origin in DEFAULT_ALLOWED_ORIGINS.split(',') {
            assert!(
                origin.trim().parse::<HeaderValue>().is_ok(),
                "Default origin '{}' should be a valid HeaderValue",
                origin
            );
        }
    }
}
