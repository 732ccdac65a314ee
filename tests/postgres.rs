//! End-to-end run against a real database. Needs `DATABASE_URL`:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/todo_test cargo test --test postgres -- --ignored
//! ```

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use dotenv::dotenv;
use pretty_assertions::assert_eq;
use serde_json::json;
use sqlx::PgPool;
use todo_manager::models::Task;
use todo_manager::{AppServices, Config};

use common::{bearer, register_user, TEST_SECRET};

async fn cleanup_user(pool: &PgPool, username: &str) {
    let _ = sqlx::query(
        "DELETE FROM tasks WHERE user_id IN (SELECT id FROM users WHERE username = $1)",
    )
    .bind(username)
    .execute(pool)
    .await;
    let _ = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await;
}

#[test_log::test(actix_rt::test)]
#[ignore = "requires DATABASE_URL pointing at a disposable PostgreSQL database"]
async fn test_postgres_task_lifecycle() {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test configuration is valid");

    let services = AppServices::from_config(&config)
        .await
        .expect("Failed to connect to test DB");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    for username in ["pg_owner", "pg_other"] {
        cleanup_user(&pool, username).await;
    }

    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let owner = register_user(&app, "pg_owner", "Password123!").await.unwrap();
    let other = register_user(&app, "pg_other", "Password123!").await.unwrap();

    // Unique constraint still yields the registration failure body
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "pg_owner",
            "password": "Password123!",
            "email": "another@example.com"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&owner))
        .set_json(json!({ "title": "Stored task", "dueDate": "2031-06-30", "priority": "MEDIUM" }))
        .to_request();
    let created: Task = test::call_and_read_body_json(&app, req).await;
    assert!(!created.completed);

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}/complete", created.id))
        .insert_header(bearer(&owner))
        .to_request();
    let completed: Task = test::call_and_read_body_json(&app, req).await;
    assert!(completed.completed);
    assert_eq!(completed.due_date, created.due_date);

    let req = test::TestRequest::get()
        .uri("/api/tasks/completed")
        .insert_header(bearer(&owner))
        .to_request();
    let listed: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, vec![completed.clone()]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&other))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&owner))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&owner))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    for username in ["pg_owner", "pg_other"] {
        cleanup_user(&pool, username).await;
    }
}
