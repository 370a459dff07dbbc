//! Server library module.
//!
//! Exposes the two routers so the binary and the integration tests build
//! exactly the same application.

pub mod rest;
pub mod soap;

use axum::Router;
use axum::routing::{get, post};
use cityhub::air_quality::AirQualityService;
use cityhub::repositories::{SeaOrmLineRepository, SeaOrmScheduleRepository, SeaOrmZoneRepository};
use cityhub::transport::{ScheduleService, TransportLineService};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub lines: TransportLineService,
    pub schedules: ScheduleService,
    pub air_quality: AirQualityService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let line_repo = Arc::new(SeaOrmLineRepository::new(db.clone()));
        let schedule_repo = Arc::new(SeaOrmScheduleRepository::new(db.clone()));
        let zone_repo = Arc::new(SeaOrmZoneRepository::new(db));

        Self {
            lines: TransportLineService::new(line_repo.clone(), schedule_repo.clone()),
            schedules: ScheduleService::new(schedule_repo, line_repo),
            air_quality: AirQualityService::new(zone_repo),
        }
    }
}

/// JSON API for transport lines and schedules.
pub fn rest_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(rest::health))
        .route("/lines", get(rest::list_lines).post(rest::create_line))
        .route("/lines/search", get(rest::search_lines))
        .route("/lines/type/{line_type}", get(rest::lines_by_type))
        .route(
            "/lines/{id}",
            get(rest::get_line)
                .put(rest::update_line)
                .delete(rest::delete_line),
        )
        .route("/lines/{id}/availability", get(rest::line_availability))
        .route(
            "/schedules",
            get(rest::list_schedules).post(rest::create_schedule),
        )
        .route(
            "/schedules/{id}",
            get(rest::get_schedule).delete(rest::delete_schedule),
        )
        .route("/schedules/line/{line_id}", get(rest::schedules_for_line))
        .route(
            "/schedules/station/{station}",
            get(rest::schedules_for_station),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// SOAP endpoint for air-quality lookups plus its WSDL.
pub fn soap_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", post(soap::handle_envelope))
        .route("/ws/airQuality.wsdl", get(soap::wsdl))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
