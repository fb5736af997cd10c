//! Terminal rendering of a check.

use std::fmt::Write;

use namecheck_core::{CheckReport, LookupStatus, Platform};

/// Badge text for a status.
pub fn status_label(status: LookupStatus) -> &'static str {
    match status {
        LookupStatus::Idle => "-",
        LookupStatus::Loading => "Checking...",
        LookupStatus::Available => "Available",
        LookupStatus::Taken => "Taken",
        LookupStatus::Error => "Error",
    }
}

/// Line shown while lookups are in flight.
pub fn render_loading(username: &str, platforms: &[Platform]) -> String {
    let names: Vec<_> = platforms.iter().map(|p| p.display_name()).collect();
    format!("Checking @{username} on {}...", names.join(", "))
}

pub fn render_table(report: &CheckReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Results for @{}", report.username);

    for result in &report.results {
        let platform = result.platform;
        let _ = write!(
            out,
            "  {} {:<12} {:<10} {:>6}ms",
            platform.icon(),
            platform.display_name(),
            status_label(result.status),
            result.response_time_ms
        );
        if let Some(error) = &result.error {
            let _ = write!(out, "  ({error})");
        }
        out.push('\n');
    }

    let count = |status: LookupStatus| report.results.iter().filter(|r| r.status == status).count();
    let _ = write!(
        out,
        "{} available, {} taken, {} error(s) in {}ms",
        count(LookupStatus::Available),
        count(LookupStatus::Taken),
        count(LookupStatus::Error),
        report.total_time_ms
    );
    out
}

pub fn render_json(report: &CheckReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
