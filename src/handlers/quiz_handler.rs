use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{GenerateQuizRequest, SelectAnswerRequest},
        response::{ActionResponse, QuizStateResponse},
    },
};

#[get("/api/sessions/{id}/quiz")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(QuizStateResponse::from(&session)))
}

#[post("/api/sessions/{id}/quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let outcome = state
        .session_service
        .generate_quiz(&id, request.into_inner().into_options())
        .await?;
    Ok(HttpResponse::Created().json(ActionResponse::from(outcome)))
}

#[delete("/api/sessions/{id}/quiz")]
pub async fn close_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.session_service.close_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(ActionResponse::from(outcome)))
}

#[put("/api/sessions/{id}/quiz/answers/{position}")]
pub async fn select_answer(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, usize)>,
    request: web::Json<SelectAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let (id, position) = path.into_inner();
    let outcome = state
        .session_service
        .select_answer(&id, position, &request.option)
        .await?;
    Ok(HttpResponse::Ok().json(ActionResponse::from(outcome)))
}

#[post("/api/sessions/{id}/quiz/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.session_service.submit_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(ActionResponse::from(outcome)))
}

#[post("/api/sessions/{id}/quiz/retake")]
pub async fn retake_quiz(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.session_service.retake_quiz(&id).await?;
    Ok(HttpResponse::Created().json(ActionResponse::from(outcome)))
}
