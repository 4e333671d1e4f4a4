use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::AppError,
    models::{FlightState, ThreatAlert, mock_threats},
    opensky,
    state::AppState,
};

pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "OpenSky AI Cybersecurity Platform API" }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "opensky-ai-cybersec" }))
}

#[derive(Deserialize)]
pub struct FlightsParams {
    bbox: Option<String>,
}

pub async fn flights_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlightsParams>,
) -> Result<Json<Vec<FlightState>>, AppError> {
    let flights = opensky::fetch_flights(
        &state.http,
        &state.config.opensky_url,
        params.bbox.as_deref(),
    )
    .await?;

    Ok(Json(flights))
}

pub async fn threats_handler() -> Json<Vec<ThreatAlert>> {
    Json(mock_threats())
}

pub async fn analyze_handler() -> Json<Value> {
    Json(json!({
        "status": "analysis_started",
        "message": "AI analysis of flight data initiated",
        "analysis_id": "analysis-001"
    }))
}
