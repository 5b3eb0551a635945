use crate::{
    auth::{AuthResponse, Credentials},
    error::AppError,
    AppAuthenticator,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new account.
///
/// Responds 201 with the created user (the password hash is not part of
/// the serialized shape), 409 when the username is taken, 422 when the
/// credentials fail validation.
#[post("/signup")]
pub async fn signup(
    authenticator: web::Data<AppAuthenticator>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let user = authenticator.sign_up(&credentials).await?;

    Ok(HttpResponse::Created().json(user))
}

/// Exchange credentials for a bearer token.
///
/// Responds 200 with the token, or 401 with one uniform message for any
/// credential failure.
#[post("/signin")]
pub async fn signin(
    authenticator: web::Data<AppAuthenticator>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let access_token = authenticator.sign_in(&credentials).await?;

    Ok(HttpResponse::Ok().json(AuthResponse { access_token }))
}
