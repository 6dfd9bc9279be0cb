use serde::{Deserialize, Serialize};

/// Completed mission (historical record)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default)]
    pub id: Option<i64>,
    pub call_sign: String,
    pub final_status: String,
    pub end_time: String,
    #[serde(default)]
    pub total_distance_km: Option<f64>,
}
