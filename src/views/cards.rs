// ============================================================================
// CARDS - HTML for the stats grid, list cards and route results
// ============================================================================
// Pure string builders; every server-provided value goes through escape_html
// ============================================================================

use crate::utils::format::escape_html;
use crate::viewmodels::{AlertCard, ConvoyCard, DashboardStats, MissionCard, RouteSummary, ThreatCard};

fn stat_card(title: &str, value: &str) -> String {
    format!(r#"<div class="card"><h3>{}</h3><p>{}</p></div>"#, title, escape_html(value))
}

pub fn render_stats_html(stats: &DashboardStats) -> String {
    [
        stat_card("Active Convoys", &stats.active_convoys.to_string()),
        stat_card("Active Alerts", &stats.active_alerts.to_string()),
        stat_card("System Status", &stats.system_status),
        stat_card("Area Temp", &stats.temperature_label),
    ]
    .concat()
}

pub fn render_convoy_card(card: &ConvoyCard) -> String {
    let stop_button = if card.can_stop {
        format!(
            r#"<button class="danger" data-convoy-id="{}" data-action="stop">Stop</button>"#,
            card.id
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="card"><h3>{}</h3><p>Status: {}</p><p>Speed: {}</p><p>ETA: {}</p>{}</div>"#,
        escape_html(&card.call_sign),
        escape_html(&card.status),
        escape_html(&card.speed_label),
        escape_html(&card.eta_label),
        stop_button
    )
}

pub fn render_alert_card(card: &AlertCard) -> String {
    format!(
        r#"<div class="card"><h3>{}</h3><p>{}</p><button data-alert-id="{}" data-action="acknowledge">Acknowledge</button></div>"#,
        escape_html(&card.title),
        escape_html(&card.message),
        card.id
    )
}

pub fn render_threat_card(card: &ThreatCard) -> String {
    format!(
        r#"<div class="card"><h3>{}</h3><p>Status: {}</p><p>Source: {}</p></div>"#,
        escape_html(&card.title),
        escape_html(&card.status),
        escape_html(&card.source)
    )
}

pub fn render_mission_card(card: &MissionCard) -> String {
    format!(
        r#"<div class="card"><h3>{}</h3><p>Status: {}</p><p>Ended: {}</p></div>"#,
        escape_html(&card.call_sign),
        escape_html(&card.status),
        escape_html(&card.ended)
    )
}

pub fn render_list<T>(cards: &[T], render: fn(&T) -> String) -> String {
    cards.iter().map(render).collect()
}

pub fn render_route_summary_html(summary: &RouteSummary) -> String {
    let mut html = format!(
        r#"<div class="card"><h3>Route Calculated</h3><p>Distance: {}</p><p>Est. Fuel: {}</p>"#,
        summary.distance_label, summary.fuel_label
    );
    if summary.segment_count > 0 {
        html.push_str(&format!("<p>Segments: {}</p>", summary.segment_count));
    }
    if let Some(risk) = &summary.peak_risk {
        html.push_str(&format!("<p>Peak Risk: {}</p>", risk));
    }
    html.push_str("</div>");
    html
}

pub fn render_route_error_html(message: &str) -> String {
    format!(
        r#"<div class="card error"><h3>Route Failed</h3><p>{}</p></div>"#,
        escape_html(message)
    )
}
