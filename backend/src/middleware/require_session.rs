//! Middleware rejecting requests that carry no logged-in session.
//!
//! Must be registered inside the session middleware so the session is
//! already loaded when the check runs.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error as DomainError;
use crate::inbound::http::session::SessionContext;

/// Session guard for protected scopes.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use trip_planner::middleware::RequireSession;
///
/// let _app = App::new().service(web::scope("/private").wrap(RequireSession));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

/// Service produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if SessionContext::from_service_request(&req).username().is_some() {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        debug!(path = %req.path(), "request without session rejected");
        // Built inside the future so the error picks up the request trace id.
        Box::pin(async move {
            let response = HttpResponse::from_error(DomainError::unauthorized("login required"));
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::domain::{AuthenticatedUser, ErrorCode};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn app() -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/login",
                web::post().to(|session: SessionContext| async move {
                    session.persist_user(&AuthenticatedUser::new("justwravel"))?;
                    Ok::<_, DomainError>(HttpResponse::Ok().finish())
                }),
            )
            .service(
                web::scope("/private")
                    .wrap(RequireSession)
                    .route("", web::get().to(|| async { HttpResponse::Ok().body("secret") })),
            )
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_requests_never_reach_the_handler() {
        let app = test::init_service(app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/private").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let payload: DomainError = test::read_body_json(res).await;
        assert_eq!(payload.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[actix_web::test]
    async fn logged_in_requests_pass_through() {
        let app = test::init_service(app()).await;
        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;
        let cookie = session_cookie(&login).expect("session cookie");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/private")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "secret");
    }
}
