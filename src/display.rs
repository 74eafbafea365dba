//! Display and formatting utilities for ogcalc.
//!
//! This module provides functions for formatting amounts and durations and
//! printing calculation reports for the command-line tool.

use crate::models::{EpisodeSummary, ProductionBreakdown, Resources, TechKind};

/// Formats a duration in seconds to a human-readable string.
///
/// Fractions of a second are dropped. Negative durations (the Research Lab
/// sentinel) are shown as `"-"`.
///
/// # Example
///
/// ```
/// use ogcalc::display::format_duration;
///
/// assert_eq!(format_duration(3665.0), "1h 1m 5s");
/// assert_eq!(format_duration(90061.0), "1d 1h 1m 1s");
/// assert_eq!(format_duration(45.9), "45s");
/// assert_eq!(format_duration(-1.0), "-");
/// ```
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "-".to_string();
    }
    let total = seconds.floor() as u64;
    let units = [
        (total / 604_800, "w"),
        ((total % 604_800) / 86_400, "d"),
        ((total % 86_400) / 3600, "h"),
        ((total % 3600) / 60, "m"),
        (total % 60, "s"),
    ];

    let parts: Vec<String> = units
        .iter()
        .skip_while(|(value, _)| *value == 0)
        .map(|(value, suffix)| format!("{}{}", value, suffix))
        .collect();
    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// Formats an amount as a thousands-separated integer.
///
/// # Example
///
/// ```
/// use ogcalc::display::format_amount;
///
/// assert_eq!(format_amount(1234567.0), "1,234,567");
/// assert_eq!(format_amount(999.9), "999");
/// assert_eq!(format_amount(-4500.0), "-4,500");
/// ```
pub fn format_amount(value: f64) -> String {
    let digits = (value.trunc().abs() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value <= -1.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Label for the `level` argument of a technology kind.
pub fn level_label(kind: TechKind) -> &'static str {
    match kind {
        TechKind::Unit => "quantity",
        TechKind::Building | TechKind::Research => "level",
    }
}

/// Prints a resource cost block.
pub fn display_cost(title: &str, cost: &Resources, energy: Option<f64>) {
    println!();
    println!("[{}]", title);
    println!("----------------------------------------------------------------");
    println!("  Metal:            {:>16}", format_amount(cost.metal));
    println!("  Crystal:          {:>16}", format_amount(cost.crystal));
    println!("  Deuterium:        {:>16}", format_amount(cost.deuterium));
    if let Some(energy) = energy {
        println!("  Energy:           {:>16}", format_amount(energy));
    }
    println!("  Total:            {:>16}", format_amount(cost.total()));
}

/// Prints the per-source production of one producer.
pub fn display_production(title: &str, rows: &ProductionBreakdown, total: f64) {
    let labels = [
        "Natural",
        "Base",
        "Plasma",
        "Booster",
        "Geologist",
        "Engineer",
        "All officers",
        "Class",
        "Alliance class",
    ];

    println!();
    println!("[{}]", title);
    println!("----------------------------------------------------------------");
    for (label, value) in labels.iter().zip(rows.slots()) {
        if value != 0.0 {
            println!("  {:<16}  {:>16}/h", label, format_amount(value));
        }
    }
    println!("  {:<16}  {:>16}/h", "Total", format_amount(total));
}

/// Prints a build duration together with its halving price.
pub fn display_build_time(title: &str, seconds: f64, halving: f64) {
    println!();
    println!("[{}]", title);
    println!("----------------------------------------------------------------");
    if seconds < 0.0 {
        println!("  Research Lab level too low for this research.");
        return;
    }
    println!("  Duration:         {:>16}", format_duration(seconds));
    println!("  Seconds:          {:>16}", format_amount(seconds));
    println!("  Halving cost:     {:>16} DM", format_amount(halving));
}

/// Prints the outcome of a factory simulation episode.
pub fn display_simulation(summary: &EpisodeSummary) {
    println!();
    println!("[Factory simulation over {}]", format_duration(summary.time_elapsed));
    println!("----------------------------------------------------------------");
    println!("  Steps:            {:>16}", summary.steps);
    println!("  Purchases:        {:>16}", summary.purchases);
    println!("  Steel works:      {:>16}", summary.steel_factories);
    println!("  Crystal works:    {:>16}", summary.crystal_factories);
    println!("  Power plants:     {:>16}", summary.electricity_factories);
    println!("  Net worth:        {:>16}", format_amount(summary.net_worth));
}
