use std::time::Duration;

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::error::AppError;
use crate::services::{TaskService, UserService};

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Health check endpoint
///
/// Round-trips both stores. Answers `503` when either is unreachable
/// or does not answer within `PROBE_TIMEOUT`.
#[get("/health")]
pub async fn health(
    users: web::Data<UserService>,
    tasks: web::Data<TaskService>,
) -> impl Responder {
    let probe = async {
        users.ping().await?;
        tasks.ping().await
    };
    let checked = match tokio::time::timeout(PROBE_TIMEOUT, probe).await {
        Ok(result) => result,
        Err(_) => Err(AppError::ServiceUnavailable(
            "storage did not answer in time".into(),
        )),
    };

    match checked {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "timestamp": Utc::now()
        })),
        Err(err) => {
            log::error!("health check failed: {}", err);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unavailable",
                "timestamp": Utc::now()
            }))
        }
    }
}
