//! Cross-origin policy for the browser client.
//!
//! The client sends the session cookie, so origins are listed explicitly and
//! credentials are allowed. Requests without an `Origin` header pass through
//! untouched.

use actix_cors::Cors;
use actix_web::http::{Method, header};

use crate::domain::TRACE_ID_HEADER;

/// Origin of the bundled web client when nothing else is configured.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware admitting exactly `origins`.
///
/// # Examples
/// ```
/// use trip_planner::server::cors::{DEFAULT_CORS_ORIGIN, cors_middleware};
///
/// let _cors = cors_middleware(&[DEFAULT_CORS_ORIGIN.to_owned()]);
/// ```
#[must_use]
pub fn cors_middleware(origins: &[String]) -> Cors {
    let base = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([TRACE_ID_HEADER])
        .supports_credentials()
        .max_age(PREFLIGHT_MAX_AGE_SECS);
    origins
        .iter()
        .fold(base, |cors, origin| cors.allowed_origin(origin))
}

#[cfg(test)]
mod tests {
    use actix_web::body::{BoxBody, EitherBody};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;

    type Response = actix_web::dev::ServiceResponse<EitherBody<BoxBody>>;

    async fn call(request: test::TestRequest) -> Response {
        let app = test::init_service(
            App::new()
                .wrap(cors_middleware(&[DEFAULT_CORS_ORIGIN.to_owned()]))
                .route("/trips", web::get().to(HttpResponse::Ok))
                .route("/trips", web::post().to(HttpResponse::Created)),
        )
        .await;
        test::call_service(&app, request.to_request()).await
    }

    fn header_value<'a>(
        res: &'a Response,
        name: header::HeaderName,
    ) -> Option<&'a str> {
        res.headers().get(name).and_then(|value| value.to_str().ok())
    }

    #[rstest]
    #[actix_web::test]
    async fn preflight_from_client_origin_allows_credentials() {
        let res = call(
            test::TestRequest::default()
                .method(Method::OPTIONS)
                .uri("/trips")
                .insert_header((header::ORIGIN, DEFAULT_CORS_ORIGIN))
                .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
                .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            header_value(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(DEFAULT_CORS_ORIGIN)
        );
        assert_eq!(
            header_value(&res, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some("true")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn actual_request_exposes_trace_header() {
        let res = call(
            test::TestRequest::get()
                .uri("/trips")
                .insert_header((header::ORIGIN, DEFAULT_CORS_ORIGIN)),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            header_value(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(DEFAULT_CORS_ORIGIN)
        );
        let exposed =
            header_value(&res, header::ACCESS_CONTROL_EXPOSE_HEADERS).unwrap_or_default();
        assert!(exposed.to_ascii_lowercase().contains(TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_web::test]
    async fn other_origins_get_no_allow_header() {
        let res = call(
            test::TestRequest::get()
                .uri("/trips")
                .insert_header((header::ORIGIN, "http://evil.example")),
        )
        .await;

        assert!(header_value(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn requests_without_origin_pass_through() {
        let res = call(test::TestRequest::get().uri("/trips")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(header_value(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
