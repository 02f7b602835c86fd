//! Terminal rendering of recommendations and estimates

use crate::models::{ArtifactRecommendation, EstimationResult, RadarProfile, RoleLoading};
use crate::validator::ValidationError;
use colored::Colorize;

const BAR_WIDTH: usize = 20;

pub fn print_artifacts(artifacts: &ArtifactRecommendation) {
    for (phase, list) in artifacts.phases() {
        println!(
            "\n{} {}",
            phase.title().green().bold(),
            format!("({})", list.len()).bright_black()
        );
        for artifact in list {
            let mark = if artifact.checked { "[x]" } else { "[ ]" };
            let badge = if artifact.recommended {
                " rec.".cyan().to_string()
            } else {
                String::new()
            };
            println!(
                "   {} {} {}{}",
                mark,
                artifact.name,
                format!("<{}>", artifact.id).bright_black(),
                badge
            );
        }
    }
    println!(
        "\n{} {} / {}",
        "Selected:".bold(),
        artifacts.selected_count(),
        artifacts.total_count()
    );
}

pub fn print_result(result: &EstimationResult) {
    println!("{}", "📊 Estimate".cyan().bold());
    println!(
        "   Duration:  {} — {} days",
        result.optimistic.to_string().green(),
        result.pessimistic.to_string().red()
    );
    println!(
        "   Effort:    ~{} — {} hours",
        result.effort, result.total_effort
    );
    println!();
    println!("   Optimistic:  {} days", result.optimistic);
    println!("   Base:        {} days", result.base.to_string().bold());
    println!("   Pessimistic: {} days", result.pessimistic);
}

pub fn print_radar(radar: &RadarProfile) {
    println!("\n{}", "🎯 Constraint radar".cyan().bold());
    for (label, value) in radar.axes() {
        println!("   {:<12} {} {:>3}%", label, bar(u32::from(value)), value);
    }
}

pub fn print_role_loading(loading: &[RoleLoading]) {
    if loading.is_empty() {
        return;
    }
    println!("\n{}", "👥 Team loading".cyan().bold());
    for role in loading {
        let extra: String = [&role.domain, &role.spec]
            .into_iter()
            .flatten()
            .map(|d| format!(" · {}", d))
            .collect();
        println!(
            "   {}{} {}",
            role.label,
            extra,
            format!("({})", role.grade).bright_black()
        );
        println!(
            "      {} {} people / {}%",
            bar(role.percent),
            role.count,
            role.percent
        );
    }
}

pub fn print_validation(errors: &[ValidationError]) {
    for error in errors {
        let line = error.format();
        if error.is_blocking() {
            eprintln!("{}", line.red());
        } else {
            eprintln!("{}", line.yellow());
        }
    }
}

fn bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_is_constant() {
        for percent in [0, 1, 49, 50, 100, 250] {
            assert_eq!(bar(percent).chars().count(), BAR_WIDTH);
        }
        assert_eq!(bar(50).chars().filter(|c| *c == '█').count(), 10);
    }
}
