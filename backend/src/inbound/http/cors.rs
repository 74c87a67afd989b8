//! Cross-origin allow-list for browser clients.
//!
//! Origins are configured as a comma-separated list such as
//! `http://localhost:3000,https://ops.example.com`. Each entry is parsed as a
//! URL and reduced to its `scheme://host[:port]` origin before it reaches
//! [`actix_cors::Cors`].

use actix_cors::Cors;
use url::Url;

/// Origin allowed when nothing is configured.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Failure to interpret an allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorsConfigError {
    #[error("invalid CORS origin `{value}`: {message}")]
    InvalidOrigin { value: String, message: String },
    #[error("CORS origin `{value}` has no host")]
    OpaqueOrigin { value: String },
}

/// Parse a comma-separated allow-list into normalised origins.
///
/// Empty entries are ignored, so trailing commas are harmless.
///
/// # Examples
/// ```
/// use incident_tracker::inbound::http::cors::parse_allowed_origins;
///
/// let origins = parse_allowed_origins("http://localhost:3000/, https://ops.example.com")
///     .expect("valid origins");
/// assert_eq!(origins, vec!["http://localhost:3000", "https://ops.example.com"]);
/// ```
pub fn parse_allowed_origins(raw: &str) -> Result<Vec<String>, CorsConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_origin)
        .collect()
}

fn parse_origin(value: &str) -> Result<String, CorsConfigError> {
    let url = Url::parse(value).map_err(|err| CorsConfigError::InvalidOrigin {
        value: value.to_owned(),
        message: err.to_string(),
    })?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(CorsConfigError::OpaqueOrigin {
            value: value.to_owned(),
        });
    }
    Ok(origin.ascii_serialization())
}

/// Build the CORS middleware for the given origins.
///
/// Every method and header is allowed and credentials are supported.
pub fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
    };
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    #[case("", Vec::<&str>::new())]
    #[case(" , ,", Vec::<&str>::new())]
    #[case(DEFAULT_ALLOWED_ORIGIN, vec!["http://localhost:3000"])]
    #[case("https://ops.example.com:443/path", vec!["https://ops.example.com"])]
    #[case("http://a.test,http://b.test:8080,", vec!["http://a.test", "http://b.test:8080"])]
    fn parses_allow_lists(#[case] raw: &str, #[case] expected: Vec<&str>) {
        let origins = parse_allowed_origins(raw).expect("valid allow-list");
        assert_eq!(origins, expected);
    }

    #[rstest]
    #[case("localhost:3000")]
    #[case("not a url")]
    #[case("file:///tmp/ops")]
    fn rejects_unusable_origins(#[case] raw: &str) {
        assert!(parse_allowed_origins(raw).is_err());
    }

    #[actix_web::test]
    async fn allowed_origin_receives_credentialed_cors_headers() {
        let origins = vec![DEFAULT_ALLOWED_ORIGIN.to_owned()];
        let app = actix_test::init_service(
            App::new()
                .wrap(cors(&origins))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((ORIGIN, DEFAULT_ALLOWED_ORIGIN))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some(DEFAULT_ALLOWED_ORIGIN)
        );
        assert_eq!(
            res.headers()
                .get(ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|value| value.to_str().ok()),
            Some("true")
        );
    }

    #[actix_web::test]
    async fn unknown_origin_gets_no_allow_header() {
        let origins = vec![DEFAULT_ALLOWED_ORIGIN.to_owned()];
        let app = actix_test::init_service(
            App::new()
                .wrap(cors(&origins))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((ORIGIN, "http://evil.test"))
            .to_request();
        let res = actix_test::try_call_service(&app, req).await;

        match res {
            Ok(res) => assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none()),
            Err(err) => assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST),
        }
    }
}
