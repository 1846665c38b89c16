//! Output formatting for the CLI

use crate::{
    gridworld::{Glyphs, render_board},
    pipeline::{
        EvaluationReport, Frame, MetricsSummary, ReplayOutcome, ReplayResult, TrainingResult,
    },
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print one replay frame
pub fn print_frame(frame: &Frame<'_>, glyphs: &Glyphs) {
    println!("\n");
    match frame.action {
        Some(action) => println!("step {} ({action})", frame.step),
        None => println!("start"),
    }
    print!("{}", render_board(frame.board, frame.agent, frame.goal, glyphs));
}

pub fn print_training_result(result: &TrainingResult) {
    print_section("Training");
    print_kv("Episodes", &format_number(result.episodes));
    print_kv(
        "Found cheese",
        &format!("{} ({:.1}%)", format_number(result.goals_reached), result.goal_rate * 100.0),
    );
    print_kv("Hit traps", &format_number(result.hazards_hit));
    print_kv("Mean steps", &format!("{:.2}", result.mean_steps));
    print_kv("Mean reward", &format!("{:.2}", result.mean_reward));
}

/// Print the trap rate and the goal rate of the final window of episodes
pub fn print_metrics(metrics: &MetricsSummary) {
    print_kv("Trap rate", &format!("{:.1}%", metrics.hazard_rate * 100.0));
    print_kv(
        &format!("Last {} episodes", format_number(metrics.window.min(metrics.episodes))),
        &format!("{:.1}% found cheese", metrics.recent_goal_rate * 100.0),
    );
}

pub fn print_evaluation(report: &EvaluationReport) {
    print_section("Greedy policy, every cheese position");
    print_kv(
        "Reached cheese",
        &format!("{}/{} ({:.1}%)", report.reached, report.goals, report.success_rate() * 100.0),
    );
    print_kv("Hit traps", &report.hazards.to_string());
    print_kv("Gave up", &report.gave_up.to_string());
    print_kv("Mean steps to goal", &format!("{:.2}", report.mean_steps_to_goal));
}

pub fn print_replay_outcome(result: &ReplayResult) {
    match result.outcome {
        ReplayOutcome::ReachedGoal => {
            println!("🎯 Found the cheese in {} steps! Stopping.", result.steps)
        }
        ReplayOutcome::HitHazard => println!("💥 Walked into a trap after {} steps.", result.steps),
        ReplayOutcome::GaveUp => println!(
            "🌀 Gave up after {} steps without reaching the cheese.",
            result.steps
        ),
    }
}
