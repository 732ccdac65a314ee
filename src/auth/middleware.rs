use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, Method},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::Principal;
use crate::services::UserService;

/// Gate for the `/api` scope.
///
/// Requests under `/api/auth/` and CORS preflights pass through untouched.
/// Everything else needs `Authorization: Bearer <token>`; the token is
/// verified with the shared [`TokenService`], its subject is resolved through
/// [`UserService::load_by_username`], and the resulting [`Principal`] is
/// stored in the request extensions.
///
/// Rejections are rendered here rather than bubbled up as `Err`, so outer
/// middleware (CORS, logging) still sees a regular 401 response.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if is_public(&req) {
            return Box::pin(async move {
                service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body)
            });
        }

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(principal) => {
                    req.extensions_mut().insert(principal);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    log::debug!("rejected {} {}: {}", req.method(), req.path(), err);
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}

fn is_public(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS || req.path().starts_with("/api/auth/")
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

async fn authenticate(req: &ServiceRequest) -> Result<Principal, AppError> {
    let token =
        bearer_token(req).ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("TokenService not configured".into()))?;
    let users = req
        .app_data::<web::Data<UserService>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("UserService not configured".into()))?;

    let claims = tokens.verify(&token)?;
    users.load_by_username(&claims.sub).await
}
