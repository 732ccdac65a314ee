pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

/// Route table for everything under `/api`.
///
/// The fixed task paths are registered before `/{id}` so `completed` and
/// `pending` are never parsed as ids.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::get_completed_tasks)
            .service(tasks::get_pending_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::complete_task)
            .service(tasks::delete_task),
    );
}
