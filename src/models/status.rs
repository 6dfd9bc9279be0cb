use serde::{Deserialize, Serialize};

/// `GET /system_status`. Weather is optional; older backends only send `status`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub weather: Option<Weather>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default)]
    pub temperature_celsius: Option<f64>,
}

impl SystemStatus {
    pub fn temperature_celsius(&self) -> Option<f64> {
        self.weather.as_ref().and_then(|w| w.temperature_celsius)
    }
}
