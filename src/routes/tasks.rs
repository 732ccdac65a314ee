use crate::{
    error::AppError,
    models::{Principal, TaskFilter, TaskInput},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Lists every task of the authenticated user, ordered by id.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    principal: Principal,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(&principal, TaskFilter::All).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Lists the authenticated user's completed tasks.
#[get("/completed")]
pub async fn get_completed_tasks(
    tasks: web::Data<TaskService>,
    principal: Principal,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(&principal, TaskFilter::Completed).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Lists the authenticated user's pending tasks.
#[get("/pending")]
pub async fn get_pending_tasks(
    tasks: web::Data<TaskService>,
    principal: Principal,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(&principal, TaskFilter::Pending).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1 to 255 characters.
/// - `dueDate` (optional): `YYYY-MM-DD`.
/// - `priority` (optional): `HIGH`, `MEDIUM` or `LOW`.
/// - `completed` (optional): defaults to `false`.
///
/// ## Responses:
/// - `200 OK`: the created task.
/// - `400 Bad Request`: malformed body or failed validation.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    principal: Principal,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task = tasks.create(&principal, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Retrieves a single task.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `401 Unauthorized`, `403 Forbidden` (not the owner), `404 Not Found`.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    principal: Principal,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(&principal, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates title, due date and priority of a task.
///
/// Fields missing from the body are cleared; `completed` is ignored here,
/// use `PUT /{id}/complete` instead.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`, `401 Unauthorized`, `403 Forbidden`, `404 Not Found`.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    principal: Principal,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task = tasks
        .update(&principal, task_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Marks a task as completed. Completing an already completed task is a no-op.
#[put("/{id}/complete")]
pub async fn complete_task(
    tasks: web::Data<TaskService>,
    principal: Principal,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = tasks.complete(&principal, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `200 OK` with an empty body.
/// - `401 Unauthorized`, `403 Forbidden`, `404 Not Found`.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    principal: Principal,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    tasks.delete(&principal, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
