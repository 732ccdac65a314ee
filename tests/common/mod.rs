#![allow(dead_code)]

use actix_web::{http::header, test};
use serde_json::json;
use todo_manager::auth::AuthResponse;
use todo_manager::{AppServices, Config};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        "JWT_EXPIRATION_MS" => Some("3600000".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub fn memory_services() -> AppServices {
    AppServices::in_memory(&test_config()).expect("in-memory services")
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers `username` and returns the token from the response.
pub async fn register_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> Result<String, String> {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": username,
            "password": password,
            "email": format!("{}@example.com", username)
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let auth: AuthResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse registration response: {}", e))?;
    auth.token
        .ok_or_else(|| "Registration response carried no token".to_string())
}
