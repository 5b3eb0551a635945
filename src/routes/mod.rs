pub mod auth;
pub mod health;
pub mod tasks;

use crate::auth::AuthMiddleware;
use actix_web::web;

/// Mounts the API surface. Auth endpoints are open; every task endpoint
/// sits behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::signin),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task_status)
            .service(tasks::delete_task),
    );
}
