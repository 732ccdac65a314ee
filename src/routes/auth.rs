use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, TokenService},
    error::AppError,
    services::UserService,
};
use actix_web::{http::StatusCode, post, web, HttpResponse, ResponseError};
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns a token for it. Client errors
/// (validation, duplicate username or email) are answered with
/// `400 {"token": null, "username": null, "message": ...}`.
#[post("/register")]
pub async fn register(
    users: web::Data<UserService>,
    tokens: web::Data<TokenService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = async {
        register_data.validate()?;
        let user = users
            .register(
                &register_data.username,
                &register_data.password,
                &register_data.email,
            )
            .await?;
        let token = tokens.issue(&user.username)?;
        Ok::<_, AppError>(AuthResponse::success(
            token,
            user.username,
            "User registered successfully",
        ))
    }
    .await;

    respond(outcome)
}

/// Login user
///
/// Authenticates a username/password pair and returns a fresh token.
#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = async {
        login_data.validate()?;
        let user = users
            .authenticate(&login_data.username, &login_data.password)
            .await?;
        let token = tokens.issue(&user.username)?;
        Ok::<_, AppError>(AuthResponse::success(token, user.username, "Login successful"))
    }
    .await;

    respond(outcome)
}

fn respond(outcome: Result<AuthResponse, AppError>) -> Result<HttpResponse, AppError> {
    match outcome {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(err) if err.status_code() == StatusCode::BAD_REQUEST => {
            log::debug!("auth request rejected: {}", err);
            Ok(HttpResponse::BadRequest().json(AuthResponse::failure(err.message())))
        }
        Err(err) => Err(err),
    }
}
