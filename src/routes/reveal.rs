use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::models::RevealStepResponse;
use crate::routes::{error::error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/reveal", web::get().to(get_deck))
        .route("/reveal/{step}", web::get().to(get_step));
}

/// All reveal cards, highest score first
///
/// GET /api/v1/reveal
async fn get_deck(state: web::Data<AppState>) -> impl Responder {
    match state.reveal_cache.deck(state.store.as_ref()).await {
        Ok(deck) => HttpResponse::Ok().json(deck.cards()),
        Err(e) => {
            tracing::error!("Failed to load reveal deck: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load matches", e)
        }
    }
}

/// Cursor state after `step` operator advances
///
/// GET /api/v1/reveal/{step}
///
/// Step 0 is the intro screen; step n shows the n-th card. Steps past the
/// end stay on the last card.
async fn get_step(state: web::Data<AppState>, step: web::Path<usize>) -> impl Responder {
    let deck = match state.reveal_cache.deck(state.store.as_ref()).await {
        Ok(deck) => deck,
        Err(e) => {
            tracing::error!("Failed to load reveal deck: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load matches", e);
        }
    };

    let mut cursor = deck.cursor();
    cursor.advance_by(step.into_inner());

    HttpResponse::Ok().json(RevealStepResponse {
        position: cursor.position(),
        total: deck.len(),
        finished: cursor.is_finished(),
        card: cursor.current().cloned(),
    })
}
