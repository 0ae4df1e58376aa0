//! Rendering of alerts into Telegram HTML messages.

use crate::models::{Alert, AlertStatus};

/// Glyph used when a status or severity has no dedicated icon.
const FALLBACK_ICON: &str = "📢";

fn status_icon(status: AlertStatus) -> &'static str {
    match status {
        AlertStatus::Firing => "🔴",
        AlertStatus::Resolved => "✅",
        AlertStatus::Pending => "⚠️",
        AlertStatus::Unknown => FALLBACK_ICON,
    }
}

fn severity_icon(severity: &str) -> &'static str {
    match severity {
        "critical" => "🔴",
        "warning" => "⚠️",
        "info" => "ℹ️",
        _ => FALLBACK_ICON,
    }
}

/// Escapes the characters Telegram's HTML parse mode treats as markup.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a single alert. Never fails; missing fields render as defaults.
pub fn format_alert(alert: &Alert) -> String {
    let severity = alert.severity_label().unwrap_or("unknown");

    let mut message = format!(
        "{status_icon} <b>{name}</b>\n\n\
         {severity_icon} <b>Severity:</b> {severity}\n\
         📊 <b>Status:</b> {status}\n\n\
         <b>Summary:</b> {summary}\n\
         <b>Description:</b> {description}\n\n\
         <b>Instance:</b> {instance}\n\
         <b>Service:</b> {service}",
        status_icon = status_icon(alert.status),
        name = escape_html(alert.name()),
        severity_icon = severity_icon(severity),
        severity = escape_html(&severity.to_uppercase()),
        status = alert.status.as_str().to_uppercase(),
        summary = escape_html(alert.summary()),
        description = escape_html(alert.description()),
        instance = escape_html(alert.instance()),
        service = escape_html(alert.job()),
    );

    if let Some(starts_at) = &alert.starts_at {
        message.push_str(&format!("\n<b>Started:</b> {}", escape_html(starts_at)));
    }
    if let Some(ends_at) = alert.ends_at.as_deref().filter(|e| !e.is_empty()) {
        message.push_str(&format!("\n<b>Ended:</b> {}", escape_html(ends_at)));
    }

    message
}

/// Renders up to `limit` alerts under a `title` header, noting how many were left out.
pub fn format_group(title: &str, alerts: &[&Alert], limit: usize) -> String {
    let mut message = format!("{title}\n\n");

    let rendered: Vec<String> = alerts.iter().take(limit).map(|alert| format_alert(alert)).collect();
    message.push_str(&rendered.join("\n\n"));

    if alerts.len() > limit {
        message.push_str(&format!("\n\n... and {} more alerts", alerts.len() - limit));
    }

    message
}
