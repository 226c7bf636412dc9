pub mod checklist_handler;
pub mod dashboard_handler;
pub mod quiz_handler;
pub mod session_handler;

use actix_web::web;

use crate::errors::AppError;

pub use checklist_handler::{clear_checklist, generate_checklist, reset_progress, update_progress};
pub use dashboard_handler::get_dashboard;
pub use quiz_handler::{
    close_quiz, generate_quiz, get_quiz, retake_quiz, select_answer, submit_quiz,
};
pub use session_handler::{create_session, delete_session, get_session, health_check};

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(json_config)
        .service(health_check)
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(generate_checklist)
        .service(clear_checklist)
        .service(update_progress)
        .service(reset_progress)
        .service(get_quiz)
        .service(generate_quiz)
        .service(close_quiz)
        .service(select_answer)
        .service(submit_quiz)
        .service(retake_quiz)
        .service(get_dashboard);
}
