use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

pub const CONFIRMED: &str = "confirmed";

/// Threat incident. The backend may send the position nested (`location`)
/// or flattened (`lat`/`lon`); `position()` resolves either.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    #[serde(default)]
    pub id: Option<i64>,
    pub classification: String,
    pub verified_status: String,
    pub source_type: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Threat {
    pub fn position(&self) -> Option<GeoPoint> {
        self.location.or(match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        })
    }

    pub fn is_confirmed(&self) -> bool {
        self.verified_status == CONFIRMED
    }
}

/// Optional query filters for `GET /threats`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThreatFilter {
    pub status: Option<String>,
    pub classification: Option<String>,
}

impl ThreatFilter {
    /// Query parameters for the set filters, in a stable order
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.as_str()));
        }
        if let Some(classification) = &self.classification {
            pairs.push(("classification", classification.as_str()));
        }
        pairs
    }
}
