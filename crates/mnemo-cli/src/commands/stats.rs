//! The `mnemo stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mnemo_core::report::SessionReport;
use mnemo_service::config::load_config_from;

pub fn execute(session: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = session.unwrap_or(config.session_dir);

    let report = if path.is_dir() {
        SessionReport::load_directory(&path)?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("no session reports in {}", path.display()))?
    } else {
        SessionReport::load_json(&path)?
    };

    println!(
        "Session {} ({}, bank: {})",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M"),
        report.bank.name
    );
    println!(
        "Mastery: {} ({:.0}%), accuracy {:.0}%, avg quality {:.1}/5 over {} answer(s)",
        report.mastery.category,
        report.mastery.level * 100.0,
        report.mastery.accuracy * 100.0,
        report.mastery.average_quality,
        report.mastery.assessed
    );
    for recommendation in &report.mastery.recommendations {
        println!("  - {recommendation}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Type",
        "Answered",
        "Correct",
        "Accuracy",
        "Avg confidence",
        "Avg time",
    ]);
    for (question_type, stats) in &report.aggregate.per_type {
        table.add_row(vec![
            Cell::new(question_type),
            Cell::new(stats.answered),
            Cell::new(stats.correct),
            Cell::new(format!("{:.0}%", stats.accuracy * 100.0)),
            Cell::new(format!("{:.2}", stats.avg_confidence)),
            Cell::new(format!("{:.0}s", stats.avg_elapsed_secs)),
        ]);
    }
    println!("\n{table}");

    if !report.aggregate.topic_proficiency.is_empty() {
        println!("\nTopic proficiency:");
        let mut topics: Vec<_> = report.aggregate.topic_proficiency.iter().collect();
        topics.sort_by(|a, b| b.1.total_cmp(a.1));
        for (topic, level) in topics {
            println!("  {topic}: {:.0}%", level * 100.0);
        }
    }

    Ok(())
}
