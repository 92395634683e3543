use actix_web::{
    dev::Payload, http::header, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, Responder,
};
use std::future::{ready, Ready};
use validator::Validate;
use crate::models::{
    AdminLoginRequest, AdminLoginResponse, ClearedResponse, MatchRunResponse, StatsResponse,
};
use crate::services::{matches_csv, run_matching, AdminClaims, MatchingError, CSV_FILENAME};
use crate::routes::{error::error_response, ApiError, AppState};

/// Extractor guarding admin endpoints with a bearer token
pub struct AdminSession(pub AdminClaims);

impl FromRequest for AdminSession {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "misconfigured",
                "Application state missing",
            )));
        };

        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let result = state.auth.verify_header(header_value).map(AdminSession).map_err(|e| {
            tracing::info!("Rejected admin request to {}: {}", req.path(), e);
            ApiError::unauthorized(e.to_string())
        });

        ready(result)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/participants", web::get().to(list_participants))
            .route("/participants", web::delete().to(reset_participants))
            .route("/matches", web::get().to(list_matches))
            .route("/matches", web::delete().to(clear_matches))
            .route("/matches/run", web::post().to(run_matches))
            .route("/stats", web::get().to(stats))
            .route("/export.csv", web::get().to(export_csv)),
    );
}

/// Exchange the admin password for a bearer token
///
/// POST /api/v1/admin/login
async fn login(state: web::Data<AppState>, req: web::Json<AdminLoginRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.auth.login(&req.password) {
        Ok((token, expires_at)) => {
            tracing::info!("Admin logged in");
            HttpResponse::Ok().json(AdminLoginResponse { token, expires_at })
        }
        Err(e) => {
            tracing::warn!("Admin login failed: {}", e);
            error_response(StatusCode::UNAUTHORIZED, "unauthorized", e)
        }
    }
}

/// GET /api/v1/admin/participants
async fn list_participants(state: web::Data<AppState>, _admin: AdminSession) -> impl Responder {
    match state.store.list_participants().await {
        Ok(participants) => HttpResponse::Ok().json(participants),
        Err(e) => {
            tracing::error!("Failed to list participants: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list participants", e)
        }
    }
}

/// GET /api/v1/admin/matches
async fn list_matches(state: web::Data<AppState>, _admin: AdminSession) -> impl Responder {
    match state.store.list_matches().await {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => {
            tracing::error!("Failed to list matches: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list matches", e)
        }
    }
}

/// GET /api/v1/admin/stats
async fn stats(state: web::Data<AppState>, _admin: AdminSession) -> impl Responder {
    let participants = state.store.list_participants().await;
    let matches = state.store.list_matches().await;

    match (participants, matches) {
        (Ok(participants), Ok(matches)) => HttpResponse::Ok().json(StatsResponse {
            participants: participants.len(),
            matches: matches.len(),
        }),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Failed to load stats: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load stats", e)
        }
    }
}

/// Run the matcher over every submitted quiz and replace all matches
///
/// POST /api/v1/admin/matches/run
async fn run_matches(state: web::Data<AppState>, _admin: AdminSession) -> impl Responder {
    let result = run_matching(state.store.as_ref(), &state.matcher).await;

    match result {
        Ok(run) => {
            state.reveal_cache.invalidate().await;
            HttpResponse::Ok().json(MatchRunResponse {
                participants: run.participants,
                pairs_scored: run.pairs_scored,
                created: run.matches.len(),
                matches: run.matches,
            })
        }
        Err(e @ MatchingError::Insufficient(_)) => {
            tracing::info!("Matching refused: {}", e);
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "Need at least 2 participants", e)
        }
        Err(e) => {
            tracing::error!("Matching failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Matching failed", e)
        }
    }
}

/// DELETE /api/v1/admin/matches
async fn clear_matches(state: web::Data<AppState>, _admin: AdminSession) -> impl Responder {
    match state.store.clear_matches().await {
        Ok(deleted) => {
            state.reveal_cache.invalidate().await;
            HttpResponse::Ok().json(ClearedResponse { deleted })
        }
        Err(e) => {
            tracing::error!("Failed to clear matches: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to clear matches", e)
        }
    }
}

/// Remove every participant, response and match
///
/// DELETE /api/v1/admin/participants
async fn reset_participants(state: web::Data<AppState>, _admin: AdminSession) -> impl Responder {
    match state.store.reset().await {
        Ok(deleted) => {
            state.reveal_cache.invalidate().await;
            HttpResponse::Ok().json(ClearedResponse { deleted })
        }
        Err(e) => {
            tracing::error!("Failed to reset participants: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to reset", e)
        }
    }
}

/// GET /api/v1/admin/export.csv
async fn export_csv(state: web::Data<AppState>, _admin: AdminSession) -> impl Responder {
    let loaded = async {
        let matches = state.store.list_matches().await?;
        let participants = state.store.list_participants().await?;
        Ok::<_, crate::services::StoreError>((matches, participants))
    }
    .await;

    let (matches, participants) = match loaded {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Failed to load matches for export: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export", e);
        }
    };

    match matches_csv(&matches, &participants) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ))
            .body(csv),
        Err(e) => {
            tracing::error!("Failed to render CSV export: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export", e)
        }
    }
}
