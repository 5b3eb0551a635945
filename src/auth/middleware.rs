use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::token::TokenManager;
use crate::error::AppError;
use crate::AppAuthenticator;

/// Gate for task routes. Extracts the bearer token, verifies its
/// signature, resolves the claims to a stored user, and attaches that user
/// to the request for the `CurrentUser` extractor. Requests with no token,
/// a bad token, or claims naming a vanished user are rejected with 401
/// before the handler runs.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
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
    // Identity resolution awaits a store lookup, so the wrapped service is
    // shared into the response future.
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_owned);

            let token = match token {
                Some(token) => token,
                None => return Err(AppError::Unauthenticated.into()),
            };

            let claims = {
                let tokens = req.app_data::<web::Data<TokenManager>>().ok_or_else(|| {
                    Error::from(AppError::Internal("token manager not configured".into()))
                })?;
                tokens.verify(&token)?
            };

            let user = {
                let authenticator = req
                    .app_data::<web::Data<AppAuthenticator>>()
                    .ok_or_else(|| {
                        Error::from(AppError::Internal("authenticator not configured".into()))
                    })?;
                authenticator.resolve_identity(&claims).await?
            };

            req.extensions_mut().insert(user);
            service.call(req).await
        })
    }
}
