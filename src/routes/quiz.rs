use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;
use crate::core::{QuizSession, QUESTIONS};
use crate::models::{Participant, SubmitQuizRequest, SubmitQuizResponse};
use crate::routes::{error::error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/quiz", web::get().to(get_quiz))
        .route("/participants", web::post().to(submit_quiz));
}

/// Question catalog
///
/// GET /api/v1/quiz
async fn get_quiz() -> impl Responder {
    HttpResponse::Ok().json(&QUESTIONS[..])
}

/// Submit a completed quiz
///
/// POST /api/v1/participants
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "answers": { "1": "analytical", "2": "chill", "...": "..." }
/// }
/// ```
async fn submit_quiz(state: web::Data<AppState>, req: web::Json<SubmitQuizRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let mut session = QuizSession::new();
    for (question_id, value) in &req.answers {
        if let Err(e) = session.answer(*question_id, value) {
            return error_response(StatusCode::BAD_REQUEST, "Invalid answer", e);
        }
    }

    let submission = match session.submit(&req.name) {
        Ok(submission) => submission,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Incomplete quiz", e),
    };

    let participant = Participant {
        id: Uuid::new_v4(),
        name: submission.name.clone(),
        created_at: Utc::now(),
    };
    let responses = submission.responses(participant.id);

    match state.store.add_participant(&participant, &responses).await {
        Ok(()) => {
            tracing::info!("New participant {} ({} answers)", participant.id, responses.len());
            HttpResponse::Created().json(SubmitQuizResponse {
                participant_id: participant.id,
            })
        }
        Err(e) => {
            tracing::error!("Failed to store quiz submission: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store submission",
                "Something went wrong. Please try again.",
            )
        }
    }
}
