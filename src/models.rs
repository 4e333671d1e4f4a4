use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One aircraft state vector, normalized from OpenSky's positional
/// array format. Field order matches the upstream positions 0-16.
///
/// Optional fields are `None` when the upstream slot is null or
/// missing; zero and `false` are real values, never stand-ins for
/// "absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: String,
    pub time_position: Option<i64>,
    pub last_contact: i64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub sensors: Option<Vec<i64>>,
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    pub spi: bool,
    pub position_source: i64,
}

/// Shell of the `states/all` response. `states` may be missing or null
/// on quiet regions; both read back as `None`. Each element stays a
/// raw JSON array here because the slots are heterogeneous.
#[derive(Deserialize)]
pub struct StatesResponse {
    #[serde(default)]
    pub states: Option<Vec<Vec<Value>>>,
}

/// Fixture shape for `/threats`. No detection logic produces these
/// yet; the record below is the placeholder the frontend renders
/// against.
#[derive(Debug, Clone, Serialize)]
pub struct ThreatAlert {
    pub id: String,
    pub aircraft_id: String,
    pub threat_type: String,
    pub severity: String,
    pub description: String,
    pub timestamp: i64,
    pub location: Location,
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

pub fn mock_threats() -> Vec<ThreatAlert> {
    vec![ThreatAlert {
        id: "threat-001".to_string(),
        aircraft_id: "ABC123".to_string(),
        threat_type: "unusual_pattern".to_string(),
        severity: "medium".to_string(),
        description: "Aircraft showing unusual flight pattern".to_string(),
        timestamp: 1_693_920_000,
        location: Location {
            latitude: 40.7128,
            longitude: -74.0060,
        },
    }]
}
