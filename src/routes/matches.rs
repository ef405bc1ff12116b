use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::CandidateFilter;
use crate::models::{
    CandidatesResponse, ErrorResponse, HealthResponse, LoadCandidates, MatchRequest, MatchResponse,
};
use crate::services::OpenAiClient;

/// Hard cap on per-load candidates to keep the LLM payload bounded
const MAX_PER_LOAD: usize = 20;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<OpenAiClient>,
    pub filter: CandidateFilter,
    /// Per-load candidate count from [matching] config, used when the
    /// request omits perLoad
    pub default_per_load: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/candidates", web::post().to(find_candidates))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Deterministic candidate-filtering endpoint
///
/// POST /api/v1/matches/candidates
///
/// Runs the eligibility filter and composite scorer over every
/// (load, vehicle) pair and returns the per-load rankings plus the
/// deduplicated union. Makes no network calls.
async fn find_candidates(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for candidates request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let per_load = req.per_load.unwrap_or(state.default_per_load).min(MAX_PER_LOAD);

    tracing::info!(
        "Filtering candidates: {} loads, {} vehicles, top {} per load",
        req.loads.len(),
        req.vehicles.len(),
        per_load
    );

    let rankings: Vec<LoadCandidates> = req
        .loads
        .iter()
        .map(|load| LoadCandidates {
            load_id: load.id.clone(),
            candidates: state
                .filter
                .rank_for_load(load, &req.vehicles)
                .into_iter()
                .take(per_load)
                .collect(),
        })
        .collect();

    let union = state
        .filter
        .filter_for_fleet(&req.loads, &req.vehicles, per_load);

    HttpResponse::Ok().json(CandidatesResponse {
        per_load: rankings,
        candidate_vehicles: union,
        total_vehicles: req.vehicles.len(),
    })
}

/// LLM-backed match endpoint
///
/// POST /api/v1/matches/find
///
/// Shrinks the fleet with the candidate filter, forwards the reduced set
/// plus the loads to the chat-completions call, and returns the parsed
/// proposals.
async fn find_matches(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let per_load = req.per_load.unwrap_or(state.default_per_load).min(MAX_PER_LOAD);

    let candidates = state
        .filter
        .filter_for_fleet(&req.loads, &req.vehicles, per_load);

    tracing::info!(
        "Reduced {} vehicles to {} candidates for {} loads",
        req.vehicles.len(),
        candidates.len(),
        req.loads.len()
    );

    if candidates.is_empty() {
        // No placeable vehicle for any load: valid output, skip the LLM call
        return HttpResponse::Ok().json(MatchResponse {
            matches: vec![],
            candidates_considered: 0,
            total_vehicles: req.vehicles.len(),
        });
    }

    match state.llm.propose_matches(&req.loads, &candidates).await {
        Ok(matches) => {
            tracing::info!("LLM proposed {} matches", matches.len());
            HttpResponse::Ok().json(MatchResponse {
                matches,
                candidates_considered: candidates.len(),
                total_vehicles: req.vehicles.len(),
            })
        }
        Err(e) => {
            tracing::error!("Match proposal call failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Match proposal failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CandidateScorer, GeoTable};
    use crate::models::{EquipmentType, Load, LoadPriority, Vehicle, VehicleType};
    use actix_web::{test as actix_test, App};

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    fn test_state(default_per_load: usize) -> AppState {
        AppState {
            llm: Arc::new(OpenAiClient::new(
                "http://localhost:1".to_string(),
                "test-key".to_string(),
                "gpt-4o-mini".to_string(),
                1,
            )),
            filter: CandidateFilter::new(CandidateScorer::with_default_weights(
                GeoTable::default(),
            )),
            default_per_load,
        }
    }

    fn dry_van_truck(id: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            location: "Dallas, TX".to_string(),
            equipment: EquipmentType::DryVan,
            available_date: None,
            vehicle_type: VehicleType::Truck,
            capacity_lbs: Some(45000.0),
        }
    }

    #[actix_web::test]
    async fn test_candidates_fall_back_to_configured_per_load() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(2)))
                .configure(configure),
        )
        .await;

        let load = Load {
            id: "l1".to_string(),
            origin: "Dallas, TX".to_string(),
            destination: "Chicago, IL".to_string(),
            equipment: EquipmentType::DryVan,
            weight_lbs: 30000.0,
            pickup_date: None,
            priority: LoadPriority::Standard,
        };
        let vehicles: Vec<Vehicle> = (0..4).map(|i| dry_van_truck(&format!("v{}", i))).collect();

        // No perLoad in the body: the configured default of 2 must apply
        let req = actix_test::TestRequest::post()
            .uri("/matches/candidates")
            .set_json(serde_json::json!({ "loads": [load], "vehicles": vehicles }))
            .to_request();

        let resp: CandidatesResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.per_load.len(), 1);
        assert_eq!(resp.per_load[0].candidates.len(), 2);
        assert_eq!(resp.candidate_vehicles.len(), 2);

        // An explicit perLoad still wins over the default
        let load2 = Load {
            id: "l1".to_string(),
            origin: "Dallas, TX".to_string(),
            destination: "Chicago, IL".to_string(),
            equipment: EquipmentType::DryVan,
            weight_lbs: 30000.0,
            pickup_date: None,
            priority: LoadPriority::Standard,
        };
        let vehicles2: Vec<Vehicle> = (0..4).map(|i| dry_van_truck(&format!("v{}", i))).collect();
        let req = actix_test::TestRequest::post()
            .uri("/matches/candidates")
            .set_json(
                serde_json::json!({ "loads": [load2], "vehicles": vehicles2, "perLoad": 3 }),
            )
            .to_request();

        let resp: CandidatesResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.per_load[0].candidates.len(), 3);
    }
}
