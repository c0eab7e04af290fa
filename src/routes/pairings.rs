use crate::core::PairingEngine;
use crate::models::{
    ErrorResponse, HealthResponse, Rule, RulesResponse, RunCycleRequest, RunCycleResponse,
};
use crate::services::{CacheKey, CacheManager, DirectoryClient, PostgresClient};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub engine: PairingEngine,
}

/// Configure all pairing-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/pairings/run", web::post().to(run_cycle))
        .route("/pairings/preview", web::post().to(preview_cycle))
        .route("/pairings/rules", web::get().to(list_rules));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Run a pairing cycle and persist the accepted pairs
///
/// POST /api/v1/pairings/run
///
/// Request body:
/// ```json
/// {
///   "maxSuggestions": 25,
///   "asOf": "2025-07-01T12:00:00Z"
/// }
/// ```
async fn run_cycle(
    state: web::Data<AppState>,
    req: web::Json<RunCycleRequest>,
) -> impl Responder {
    execute_cycle(state, req.into_inner(), false).await
}

/// Score and select without persisting anything
///
/// POST /api/v1/pairings/preview
///
/// Same body as /pairings/run. Used by operators to audit what the current
/// rule weights would produce before committing a batch.
async fn preview_cycle(
    state: web::Data<AppState>,
    req: web::Json<RunCycleRequest>,
) -> impl Responder {
    execute_cycle(state, req.into_inner(), true).await
}

async fn execute_cycle(
    state: web::Data<AppState>,
    req: RunCycleRequest,
    dry_run: bool,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for run_cycle request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let now = req.as_of.unwrap_or_else(chrono::Utc::now);
    let max_suggestions = req.max_suggestions as usize;

    tracing::info!(
        "Running pairing cycle (dry_run: {}, max_suggestions: {}, as_of: {})",
        dry_run,
        max_suggestions,
        now
    );

    // Pull the cycle's input snapshot from the collaborators
    let members = match state.directory.get_pairing_pool().await {
        Ok(members) => members,
        Err(e) => {
            tracing::error!("Failed to fetch pairing pool: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch pairing pool".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let meetings = match state.postgres.fetch_meeting_history().await {
        Ok(meetings) => meetings,
        Err(e) => {
            tracing::error!("Failed to fetch meeting history: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch meeting history".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let responses = match state.postgres.fetch_response_history().await {
        Ok(responses) => responses,
        Err(e) => {
            tracing::error!("Failed to fetch response history: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch response history".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let rules = match fetch_rules(&state).await {
        Ok(rules) => rules,
        Err(response) => return response,
    };

    tracing::debug!(
        "Cycle input: {} members, {} meetings, {} responses, {} rules",
        members.len(),
        meetings.len(),
        responses.len(),
        rules.len()
    );

    let result = state
        .engine
        .run_cycle(&members, &meetings, &responses, &rules, now, max_suggestions);

    let cycle_id = uuid::Uuid::new_v4().to_string();

    if !dry_run && !result.pairs.is_empty() {
        if let Err(e) = state.postgres.record_suggestions(&cycle_id, &result.pairs).await {
            tracing::error!("Failed to record suggestions for cycle {}: {}", cycle_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record suggestions".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }

        if let Err(e) = state.cache.invalidate_cycle_state().await {
            tracing::warn!("Failed to invalidate cache after cycle {}: {}", cycle_id, e);
        }
    }

    let response = RunCycleResponse {
        pairs: result.pairs,
        eligible_members: result.eligible_members,
        scored_pairs: result.scored_pairs,
        cycle_id,
        dry_run,
        generated_at: now,
    };

    if !dry_run {
        if let Err(e) = state.cache.set(&CacheKey::last_cycle(), &response).await {
            tracing::warn!("Failed to cache cycle result: {}", e);
        }
    }

    tracing::info!(
        "Cycle {} produced {} pairs from {} eligible members ({} scored)",
        response.cycle_id,
        response.pairs.len(),
        response.eligible_members,
        response.scored_pairs
    );

    HttpResponse::Ok().json(response)
}

/// List the active rule set
///
/// GET /api/v1/pairings/rules
async fn list_rules(state: web::Data<AppState>) -> impl Responder {
    match fetch_rules(&state).await {
        Ok(rules) => {
            let count = rules.len();
            HttpResponse::Ok().json(RulesResponse { rules, count })
        }
        Err(response) => response,
    }
}

/// Rule fetch with cache in front of the store
async fn fetch_rules(state: &web::Data<AppState>) -> Result<Vec<Rule>, HttpResponse> {
    let cache_key = CacheKey::rules();

    if let Ok(rules) = state.cache.get::<Vec<Rule>>(&cache_key).await {
        tracing::debug!("Using cached rule set ({} rules)", rules.len());
        return Ok(rules);
    }

    match state.postgres.fetch_active_rules().await {
        Ok(rules) => {
            if let Err(e) = state.cache.set(&cache_key, &rules).await {
                tracing::warn!("Failed to cache rule set: {}", e);
            }
            Ok(rules)
        }
        Err(e) => {
            tracing::error!("Failed to fetch rules: {}", e);
            Err(HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch rules".to_string(),
                message: e.to_string(),
                status_code: 500,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
