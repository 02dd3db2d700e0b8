use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use super::common::{format_time_ago, format_tokens};
use crate::agents::AgentDirectory;
use crate::config::Settings;
use crate::liveness::{now_millis, LivenessAggregator};
use crate::types::{LivenessStatus, LivenessSummary};

/// Print a one-shot fleet summary, as a table or as JSON.
pub fn run(json: bool) -> Result<()> {
    let settings = Settings::load()?;
    let directory = Arc::new(AgentDirectory::with_overrides(&settings.display_names));
    let aggregator = LivenessAggregator::new(settings.data_root.clone(), directory)
        .with_deadline(settings.fleet_timeout);

    let rt = tokio::runtime::Runtime::new()?;
    let mut fleet = rt.block_on(aggregator.read_fleet()).with_context(|| {
        format!(
            "Failed to read agent data root {}",
            settings.data_root.display()
        )
    })?;
    sort_by_display_name(&mut fleet);

    if json {
        println!("{}", serde_json::to_string_pretty(&fleet)?);
        return Ok(());
    }

    if fleet.is_empty() {
        println!("{}", "No agents found".yellow());
        println!("\nData root: {}", settings.data_root.display());
        return Ok(());
    }

    println!("{}", "ClawPulse Fleet".cyan().bold());
    println!();
    println!(
        "{:<20} {:<10} {:<10} {:<10} {:<12}",
        "NAME".bright_black(),
        "STATUS".bright_black(),
        "SESSIONS".bright_black(),
        "TOKENS".bright_black(),
        "LAST ACTIVE".bright_black(),
    );
    println!("{}", "─".repeat(66).bright_black());

    let now = now_millis();
    for summary in &fleet {
        print_agent_row(summary, now);
    }

    Ok(())
}

fn print_agent_row(summary: &LivenessSummary, now_ms: i64) {
    let status = match summary.status {
        LivenessStatus::Working => "working".green().bold(),
        LivenessStatus::Idle => "idle".yellow(),
        LivenessStatus::Offline => "offline".bright_black(),
    };

    let last_active = summary
        .last_active
        .map(|ts| format_time_ago(ts, now_ms))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "{:<20} {:<10} {:<10} {:<10} {:<12}",
        summary.display_name.bold(),
        status,
        summary.session_count,
        format_tokens(summary.total_tokens),
        last_active.bright_black(),
    );
}

/// Order by display name, then directory so duplicates stay stable.
pub fn sort_by_display_name(fleet: &mut [LivenessSummary]) {
    fleet.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.directory.cmp(&b.directory))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(directory: &str, display_name: &str) -> LivenessSummary {
        LivenessSummary::empty(directory, display_name)
    }

    #[test]
    fn test_sort_by_display_name_ignores_case() {
        let mut fleet = vec![
            summary("writer", "Writer"),
            summary("alpha", "alpha"),
            summary("main", "Main"),
        ];
        sort_by_display_name(&mut fleet);
        let names: Vec<&str> = fleet.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Main", "Writer"]);
    }

    #[test]
    fn test_sort_ties_fall_back_to_directory() {
        let mut fleet = vec![summary("b", "Same"), summary("a", "Same")];
        sort_by_display_name(&mut fleet);
        assert_eq!(fleet[0].directory, "a");
        assert_eq!(fleet[1].directory, "b");
    }
}
