use actix_web::{get, web, HttpResponse};
use uuid::Uuid;

use crate::{app_state::AppState, errors::AppError, models::dto::response::DashboardView};

#[get("/api/sessions/{id}/dashboard")]
pub async fn get_dashboard(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(DashboardView::from(&session)))
}
