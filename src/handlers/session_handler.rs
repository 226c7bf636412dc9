use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::response::{DeleteResponse, SessionView},
};

#[post("/api/sessions")]
pub async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let session = state.session_service.create_session().await?;
    Ok(HttpResponse::Created().json(SessionView::from(&session)))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(SessionView::from(&session)))
}

#[delete("/api/sessions/{id}")]
pub async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.session_service.end_session(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("Session '{}' ended", id),
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        test_utils::test_helpers::{assert_error_status, assert_success_status},
    };
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
    }

    #[actix_web::test]
    async fn test_session_lifecycle() {
        let state = AppState::new(Config::test_config());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(create_session)
                .service(get_session)
                .service(delete_session),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/sessions").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
        let created: serde_json::Value = test::read_body_json(resp).await;
        let uri = format!("/api/sessions/{}", created["id"].as_str().unwrap_or_default());

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_success_status(test::call_service(&app, req).await.status());

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_success_status(test::call_service(&app, req).await.status());

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_error_status(test::call_service(&app, req).await.status());
    }
}
