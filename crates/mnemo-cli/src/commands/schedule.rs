//! The `mnemo schedule` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use comfy_table::{Cell, Table};

use mnemo_core::report::SessionReport;
use mnemo_core::schedule::{ReviewItem, Sm2Scheduler};
use mnemo_service::config::load_config_from;

pub fn execute(sessions: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let dir = sessions.unwrap_or(config.session_dir);

    let reports = SessionReport::load_directory(&dir)?;
    if reports.is_empty() {
        println!("No session reports in {}.", dir.display());
        return Ok(());
    }

    let scheduler = Sm2Scheduler::default();
    let now = Utc::now();

    // Reports are newest first; keep the most recent state per question.
    let mut items: HashMap<String, ReviewItem> = HashMap::new();
    for report in &reports {
        for record in &report.records {
            items.entry(record.question_id.clone()).or_insert_with(|| {
                let feedback = &record.feedback;
                let mut item = ReviewItem::new(
                    &record.question_id,
                    1.0 - f64::from(feedback.quality.grade()) / 5.0,
                    now,
                    scheduler.config(),
                );
                item.next_review = feedback.next_review;
                item.interval_days = feedback.interval_days as f64;
                item.review_count = 1;
                item
            });
        }
    }

    let items: Vec<ReviewItem> = items.into_values().collect();
    let schedule = scheduler.build_schedule(&items, now);

    let mut table = Table::new();
    table.set_header(vec!["Date", "Items", "Est. time"]);
    for day in schedule.days.values() {
        table.add_row(vec![
            Cell::new(day.date),
            Cell::new(day.items.len()),
            Cell::new(format!("{} min", day.estimated_minutes)),
        ]);
    }
    println!("{table}");

    println!(
        "\n{} item(s) total, {} overdue, {} due within a week.",
        schedule.total_items, schedule.overdue_items, schedule.upcoming_items
    );

    Ok(())
}
