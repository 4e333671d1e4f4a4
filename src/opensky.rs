//! OpenSky `states/all` client.
//!
//! The upstream returns each aircraft as a positional array of 17+
//! heterogeneous slots. This module issues the single outbound call
//! and maps slots 0-16 into [`FlightState`] records, tolerating short
//! arrays (skipped) and a missing `states` key (empty list).
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    error::AppError,
    models::{FlightState, StatesResponse},
};

pub const STATES_PATH: &str = "/states/all";

/// Minimum slot count for a usable state vector.
const STATE_VECTOR_LEN: usize = 17;

/// Fetches the current flight states, optionally constrained to a
/// bounding box of the form `"lamin,lomin,lamax,lomax"`.
///
/// A bbox that does not split into exactly 4 tokens is ignored and the
/// query proceeds unfiltered; that leniency is part of the contract.
pub async fn fetch_flights(
    client: &Client,
    base_url: &str,
    bbox: Option<&str>,
) -> Result<Vec<FlightState>, AppError> {
    let url = format!("{base_url}{STATES_PATH}");

    let mut request = client.get(&url);
    if let Some(params) = bbox.and_then(bbox_params) {
        request = request.query(&params);
    }

    let body = request
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(log_upstream_error)?
        .text()
        .await
        .map_err(log_upstream_error)?;

    let flights = records_from_body(&body).map_err(|e| {
        error!("Error decoding flight states: {e}");
        e
    })?;

    info!("Retrieved {} flights", flights.len());
    Ok(flights)
}

fn log_upstream_error(e: reqwest::Error) -> AppError {
    error!("HTTP error fetching flights: {e}");
    AppError::Upstream(e)
}

/// Splits a raw bbox string into the four upstream query parameters.
/// Any token count other than 4 yields `None`.
fn bbox_params(raw: &str) -> Option<[(&'static str, String); 4]> {
    let coords: Vec<&str> = raw.split(',').collect();
    if coords.len() != 4 {
        return None;
    }

    Some([
        ("lamin", coords[0].to_string()),
        ("lomin", coords[1].to_string()),
        ("lamax", coords[2].to_string()),
        ("lomax", coords[3].to_string()),
    ])
}

/// Decodes a `states/all` response body into records, preserving
/// upstream order. Missing, null, or empty `states` is a success with
/// an empty list.
fn records_from_body(body: &str) -> Result<Vec<FlightState>, AppError> {
    let response: StatesResponse =
        serde_json::from_str(body).map_err(|e| AppError::Internal(Box::new(e)))?;

    let states = response.states.unwrap_or_default();

    Ok(states
        .iter()
        .filter_map(|slots| state_to_record(slots))
        .collect())
}

/// Maps one positional state vector to a record. Arrays shorter than
/// 17 slots carry no usable vector and are dropped without error.
fn state_to_record(slots: &[Value]) -> Option<FlightState> {
    if slots.len() < STATE_VECTOR_LEN {
        return None;
    }

    Some(FlightState {
        icao24: str_or_empty(&slots[0]),
        callsign: trimmed_str(&slots[1]),
        origin_country: str_or_empty(&slots[2]),
        time_position: slots[3].as_i64(),
        last_contact: slots[4].as_i64().unwrap_or(0),
        longitude: slots[5].as_f64(),
        latitude: slots[6].as_f64(),
        baro_altitude: slots[7].as_f64(),
        on_ground: slots[8].as_bool().unwrap_or(false),
        velocity: slots[9].as_f64(),
        true_track: slots[10].as_f64(),
        vertical_rate: slots[11].as_f64(),
        sensors: sensor_ids(&slots[12]),
        geo_altitude: slots[13].as_f64(),
        squawk: slots[14].as_str().map(String::from),
        spi: slots[15].as_bool().unwrap_or(false),
        position_source: slots[16].as_i64().unwrap_or(0),
    })
}

fn str_or_empty(slot: &Value) -> String {
    slot.as_str().unwrap_or("").to_string()
}

/// Callsigns come back padded to 8 characters; a blank one means the
/// aircraft broadcast none, so it maps to `None` rather than "".
fn trimmed_str(slot: &Value) -> Option<String> {
    slot.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn sensor_ids(slot: &Value) -> Option<Vec<i64>> {
    slot.as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{bbox_params, records_from_body, state_to_record};

    fn full_state() -> Vec<Value> {
        json!([
            "abc123",
            "UAL123  ",
            "United States",
            1693920000,
            1693920005,
            -74.0,
            40.7,
            10000.0,
            false,
            250.5,
            180.0,
            0.0,
            null,
            10500.0,
            "1200",
            false,
            0
        ])
        .as_array()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_full_state_mapping() {
        let record = state_to_record(&full_state()).unwrap();

        assert_eq!(record.icao24, "abc123");
        assert_eq!(record.callsign.as_deref(), Some("UAL123"));
        assert_eq!(record.origin_country, "United States");
        assert_eq!(record.time_position, Some(1693920000));
        assert_eq!(record.last_contact, 1693920005);
        assert_eq!(record.longitude, Some(-74.0));
        assert_eq!(record.latitude, Some(40.7));
        assert_eq!(record.baro_altitude, Some(10000.0));
        assert!(!record.on_ground);
        assert_eq!(record.velocity, Some(250.5));
        assert_eq!(record.true_track, Some(180.0));
        assert_eq!(record.vertical_rate, Some(0.0));
        assert_eq!(record.sensors, None);
        assert_eq!(record.geo_altitude, Some(10500.0));
        assert_eq!(record.squawk.as_deref(), Some("1200"));
        assert!(!record.spi);
        assert_eq!(record.position_source, 0);
    }

    #[test]
    fn test_nulls_map_to_defaults() {
        let slots: Vec<Value> = vec![Value::Null; 17];
        let record = state_to_record(&slots).unwrap();

        assert_eq!(record.icao24, "");
        assert_eq!(record.callsign, None);
        assert_eq!(record.origin_country, "");
        assert_eq!(record.time_position, None);
        assert_eq!(record.last_contact, 0);
        assert_eq!(record.longitude, None);
        assert!(!record.on_ground);
        assert_eq!(record.sensors, None);
        assert_eq!(record.squawk, None);
        assert!(!record.spi);
        assert_eq!(record.position_source, 0);
    }

    #[test]
    fn test_zero_and_false_are_not_absent() {
        let mut slots = full_state();
        slots[4] = json!(0);
        slots[11] = json!(0.0);

        let record = state_to_record(&slots).unwrap();
        assert_eq!(record.last_contact, 0);
        assert_eq!(record.vertical_rate, Some(0.0));
    }

    #[test]
    fn test_blank_callsign_maps_to_none() {
        let mut slots = full_state();
        slots[1] = json!("        ");

        let record = state_to_record(&slots).unwrap();
        assert_eq!(record.callsign, None);
    }

    #[test]
    fn test_sensors_array() {
        let mut slots = full_state();
        slots[12] = json!([101, 205]);

        let record = state_to_record(&slots).unwrap();
        assert_eq!(record.sensors, Some(vec![101, 205]));
    }

    #[test]
    fn test_short_array_skipped() {
        let slots = json!(["abc123", "UAL123"]).as_array().unwrap().clone();
        assert!(state_to_record(&slots).is_none());
    }

    #[test]
    fn test_body_preserves_order_and_drops_short() {
        let mut second = full_state();
        second[0] = json!("def456");

        let body = json!({
            "states": [full_state(), ["too", "short"], second]
        })
        .to_string();

        let flights = records_from_body(&body).unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].icao24, "abc123");
        assert_eq!(flights[1].icao24, "def456");
    }

    #[test]
    fn test_missing_states_is_empty_success() {
        assert!(records_from_body("{}").unwrap().is_empty());
        assert!(records_from_body(r#"{"states": null}"#).unwrap().is_empty());
        assert!(records_from_body(r#"{"states": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_body_is_internal_error() {
        assert!(records_from_body("not json").is_err());
        assert!(records_from_body(r#"{"states": "oops"}"#).is_err());
    }

    #[test]
    fn test_bbox_four_tokens_forwarded() {
        let params = bbox_params("45.8,5.9,47.8,10.5").unwrap();
        assert_eq!(params[0], ("lamin", "45.8".to_string()));
        assert_eq!(params[1], ("lomin", "5.9".to_string()));
        assert_eq!(params[2], ("lamax", "47.8".to_string()));
        assert_eq!(params[3], ("lomax", "10.5".to_string()));
    }

    #[test]
    fn test_bbox_wrong_token_count_ignored() {
        assert!(bbox_params("").is_none());
        assert!(bbox_params("45.8,5.9,47.8").is_none());
        assert!(bbox_params("45.8,5.9,47.8,10.5,99").is_none());
    }
}
