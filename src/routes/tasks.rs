use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{StatusUpdate, TaskFilter, TaskInput},
    AppTaskService,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Lists the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `status` (optional): exact status filter (`OPEN`, `IN_PROGRESS`, `DONE`).
/// - `search` (optional): case-insensitive substring matched against title
///   or description.
///
/// Filters combine with AND semantics; results are in creation order.
#[get("")]
pub async fn list_tasks(
    service: web::Data<AppTaskService>,
    filter: web::Query<TaskFilter>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = service.list(user.0.id, &filter).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the authenticated user.
///
/// Expects `{title, description}`; both are required and non-empty. The
/// new task always starts in the `OPEN` state. Responds 201 with the
/// created task.
#[post("")]
pub async fn create_task(
    service: web::Data<AppTaskService>,
    input: web::Json<TaskInput>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let task = service.create(input.into_inner(), user.0.id).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Fetches one task by id.
///
/// Responds 404 both when the id does not exist and when the task belongs
/// to a different user.
#[get("/{task_id}")]
pub async fn get_task(
    service: web::Data<AppTaskService>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = service.get_owned(task_id.into_inner(), user.0.id).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Moves a task to a new status.
///
/// The body is `{status}` with one of the status enumeration values;
/// anything else is rejected during deserialization. Only the status (and
/// the update timestamp) changes. Responds 404 for missing or foreign
/// tasks.
#[patch("/{task_id}/status")]
pub async fn update_task_status(
    service: web::Data<AppTaskService>,
    task_id: web::Path<Uuid>,
    update: web::Json<StatusUpdate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .update_status(task_id.into_inner(), update.status, user.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// Responds 204 on success, 404 for missing or foreign tasks.
#[delete("/{task_id}")]
pub async fn delete_task(
    service: web::Data<AppTaskService>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    service.delete(task_id.into_inner(), user.0.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
