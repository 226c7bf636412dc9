use actix_web::{delete, post, put, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{GenerateChecklistRequest, UpdateProgressRequest},
        response::ActionResponse,
    },
};

#[post("/api/sessions/{id}/checklist")]
pub async fn generate_checklist(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<GenerateChecklistRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let outcome = state
        .session_service
        .generate_checklist(&id, &request.topic)
        .await?;
    Ok(HttpResponse::Ok().json(ActionResponse::from(outcome)))
}

/// Drops the current checklist so a new topic can be entered.
#[delete("/api/sessions/{id}/checklist")]
pub async fn clear_checklist(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.session_service.clear_checklist(&id).await?;
    Ok(HttpResponse::Ok().json(ActionResponse::from(outcome)))
}

#[put("/api/sessions/{id}/checklist/progress")]
pub async fn update_progress(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<UpdateProgressRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let outcome = state
        .session_service
        .set_item_completed(&id, &request.item, request.completed)
        .await?;
    Ok(HttpResponse::Ok().json(ActionResponse::from(outcome)))
}

#[post("/api/sessions/{id}/checklist/progress/reset")]
pub async fn reset_progress(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.session_service.reset_progress(&id).await?;
    Ok(HttpResponse::Ok().json(ActionResponse::from(outcome)))
}
