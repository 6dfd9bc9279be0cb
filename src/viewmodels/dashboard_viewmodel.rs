// ============================================================================
// DASHBOARD VIEWMODEL - Stats and list cards
// ============================================================================

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Alert, Convoy, Mission, Role, SystemStatus, Threat};
use crate::utils::constants::MISSING_VALUE;
use crate::utils::format::{format_date, format_time};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub active_convoys: usize,
    pub active_alerts: usize,
    pub system_status: String,
    pub temperature_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvoyCard {
    pub id: Uuid,
    pub call_sign: String,
    pub status: String,
    pub speed_label: String,
    pub eta_label: String,
    /// Stop button only for roles allowed to halt convoys
    pub can_stop: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertCard {
    pub id: i64,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatCard {
    pub title: String,
    pub status: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionCard {
    pub call_sign: String,
    pub status: String,
    pub ended: String,
}

pub struct DashboardViewModel;

impl DashboardViewModel {
    pub fn stats(status: &SystemStatus, convoys: &[Convoy], alerts: &[Alert]) -> DashboardStats {
        DashboardStats {
            active_convoys: convoys.len(),
            active_alerts: alerts.len(),
            system_status: status.status.clone(),
            temperature_label: status
                .temperature_celsius()
                .map(|t| format!("{}°C", t))
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
        }
    }

    pub fn convoy_cards(convoys: &[Convoy], role: &Role) -> Vec<ConvoyCard> {
        convoys
            .iter()
            .map(|convoy| ConvoyCard {
                id: convoy.id,
                call_sign: convoy.call_sign.clone(),
                status: convoy.status.clone(),
                speed_label: format!("{} km/h", convoy.speed_kmph),
                eta_label: format_time(convoy.eta.as_deref()),
                can_stop: role.is_commander(),
            })
            .collect()
    }

    pub fn alert_cards(alerts: &[Alert]) -> Vec<AlertCard> {
        alerts
            .iter()
            .map(|alert| AlertCard {
                id: alert.id,
                title: format!("{} Alert", alert.severity),
                message: alert.message.clone(),
            })
            .collect()
    }

    pub fn threat_cards(threats: &[Threat]) -> Vec<ThreatCard> {
        threats
            .iter()
            .map(|threat| ThreatCard {
                title: threat.classification.to_uppercase(),
                status: threat.verified_status.clone(),
                source: threat.source_type.clone(),
            })
            .collect()
    }

    pub fn mission_cards(missions: &[Mission]) -> Vec<MissionCard> {
        missions
            .iter()
            .map(|mission| MissionCard {
                call_sign: mission.call_sign.clone(),
                status: mission.final_status.clone(),
                ended: format_date(&mission.end_time),
            })
            .collect()
    }
}
