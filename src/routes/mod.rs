// Route exports
pub mod admin;
pub mod error;
pub mod quiz;
pub mod reveal;

use actix_web::{web, HttpResponse, Responder};
use crate::core::Matcher;
use crate::models::HealthResponse;
use crate::services::{AdminAuth, MatchStore, RevealCache};
use std::sync::Arc;

pub use error::{handle_json_payload_error, handle_path_error, handle_query_payload_error, ApiError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub matcher: Matcher,
    pub auth: AdminAuth,
    pub reveal_cache: RevealCache,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(quiz::configure)
            .configure(reveal::configure)
            .configure(admin::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.store.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
