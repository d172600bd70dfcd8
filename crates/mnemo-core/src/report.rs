//! Session reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Feedback, QuestionType};
use crate::statistics::{AggregateStats, MasteryAssessment};

/// One answered question within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The question that was answered.
    pub question_id: String,
    /// Type of the question.
    pub question_type: QuestionType,
    /// Topic tags of the question.
    #[serde(default)]
    pub topics: Vec<String>,
    /// The question prompt.
    pub prompt: String,
    /// The submitted answer.
    pub answer: String,
    /// Time taken to answer, in seconds.
    #[serde(default)]
    pub elapsed_secs: u64,
    /// Feedback produced for the answer.
    pub feedback: Feedback,
}

/// Summary of the bank a session was drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// A complete drill-session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the session finished.
    pub created_at: DateTime<Utc>,
    /// The bank the questions came from.
    pub bank: BankSummary,
    /// Per-question answer records.
    pub records: Vec<AnswerRecord>,
    /// Mastery assessment over this session.
    pub mastery: MasteryAssessment,
    /// Aggregate statistics for this session.
    pub aggregate: AggregateStats,
    /// Wall-clock session duration in milliseconds.
    pub duration_ms: u64,
}

impl SessionReport {
    /// Save the report as JSON to a file, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Load all `.json` session reports from a directory, newest first.
    pub fn load_directory(dir: &Path) -> Result<Vec<Self>> {
        let mut reports = Vec::new();

        if !dir.is_dir() {
            anyhow::bail!("not a directory: {}", dir.display());
        }

        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match Self::load_json(&path) {
                    Ok(report) => reports.push(report),
                    Err(e) => {
                        tracing::warn!("skipping {}: {}", path.display(), e);
                    }
                }
            }
        }

        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResponseQuality;
    use crate::statistics::{assess_mastery, compute_aggregate_stats};

    fn make_report(created_at: DateTime<Utc>) -> SessionReport {
        let records = vec![AnswerRecord {
            question_id: "q1".into(),
            question_type: QuestionType::MultipleChoice,
            topics: vec!["cpu".into()],
            prompt: "prompt".into(),
            answer: "a".into(),
            elapsed_secs: 5,
            feedback: Feedback {
                question_id: "q1".into(),
                is_correct: true,
                confidence_score: 0.9,
                quality: ResponseQuality::Correct,
                explanation: String::new(),
                correct_answer: "a".into(),
                interval_days: 2,
                next_review: created_at + chrono::Duration::days(2),
            },
        }];
        let mastery = assess_mastery(records.iter().map(|r| &r.feedback));
        let aggregate = compute_aggregate_stats(&records);

        SessionReport {
            id: Uuid::nil(),
            created_at,
            bank: BankSummary {
                id: "bank".into(),
                name: "Bank".into(),
                question_count: 1,
            },
            records,
            mastery,
            aggregate,
            duration_ms: 1000,
        }
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(Utc::now());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.bank.id, "bank");
        assert_eq!(loaded.records.len(), 1);
        assert!(loaded.records[0].feedback.is_correct);
    }

    #[test]
    fn load_directory_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let old = make_report(Utc::now() - chrono::Duration::days(2));
        let new = make_report(Utc::now());

        old.save_json(&dir.path().join("old.json")).unwrap();
        new.save_json(&dir.path().join("new.json")).unwrap();
        // Non-report files are skipped, not fatal.
        std::fs::write(dir.path().join("notes.txt"), "not a report").unwrap();
        std::fs::write(dir.path().join("bad.json"), "{").unwrap();

        let reports = SessionReport::load_directory(dir.path()).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].created_at > reports[1].created_at);
    }

    #[test]
    fn load_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.json");
        std::fs::write(&file, "{}").unwrap();
        assert!(SessionReport::load_directory(&file).is_err());
    }
}
