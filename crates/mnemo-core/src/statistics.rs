//! Mastery assessment and aggregate session statistics.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Feedback, QuestionType};
use crate::report::AnswerRecord;

/// Mastery categories, coarsest view of the mastery level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MasteryCategory {
    Novice,
    Beginner,
    Competent,
    Proficient,
    Expert,
}

impl MasteryCategory {
    /// Bucket a mastery level in [0, 1] into a category.
    pub fn from_level(level: f64) -> Self {
        if level >= 0.9 {
            MasteryCategory::Expert
        } else if level >= 0.75 {
            MasteryCategory::Proficient
        } else if level >= 0.5 {
            MasteryCategory::Competent
        } else if level >= 0.25 {
            MasteryCategory::Beginner
        } else {
            MasteryCategory::Novice
        }
    }
}

impl fmt::Display for MasteryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MasteryCategory::Novice => "Novice",
            MasteryCategory::Beginner => "Beginner",
            MasteryCategory::Competent => "Competent",
            MasteryCategory::Proficient => "Proficient",
            MasteryCategory::Expert => "Expert",
        };
        write!(f, "{name}")
    }
}

/// A mastery assessment over a feedback history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryAssessment {
    /// Mastery level in [0, 1].
    pub level: f64,
    /// Category bucket for the level.
    pub category: MasteryCategory,
    /// Fraction of correct answers.
    pub accuracy: f64,
    /// Average SM-2 quality grade (0-5).
    pub average_quality: f64,
    /// Number of answers assessed.
    pub assessed: usize,
    /// Study recommendations for this level.
    pub recommendations: Vec<String>,
}

/// Assess mastery from a feedback history.
///
/// Level blends accuracy and response quality:
/// `min(1, 0.6 * accuracy + 0.4 * (avg_quality / 5))`.
pub fn assess_mastery<'a>(history: impl IntoIterator<Item = &'a Feedback>) -> MasteryAssessment {
    let mut assessed = 0usize;
    let mut correct = 0usize;
    let mut quality_sum = 0u32;

    for feedback in history {
        assessed += 1;
        if feedback.is_correct {
            correct += 1;
        }
        quality_sum += u32::from(feedback.quality.grade());
    }

    let total = assessed.max(1) as f64;
    let accuracy = correct as f64 / total;
    let average_quality = f64::from(quality_sum) / total;
    let level = (0.6 * accuracy + 0.4 * (average_quality / 5.0)).min(1.0);

    let mut recommendations = Vec::new();
    if level < 0.5 {
        recommendations.push("Review fundamental concepts".to_string());
    }
    if (0.4..=0.7).contains(&level) {
        recommendations.push("Practice with more challenging questions".to_string());
    }
    if level >= 0.8 {
        recommendations.push("Explore advanced topics".to_string());
    }

    MasteryAssessment {
        level,
        category: MasteryCategory::from_level(level),
        accuracy,
        average_quality,
        assessed,
        recommendations,
    }
}

/// Per-question-type statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeStats {
    /// Answers of this type.
    pub answered: usize,
    /// Correct answers of this type.
    pub correct: usize,
    /// Fraction correct.
    pub accuracy: f64,
    /// Average adjusted confidence score.
    pub avg_confidence: f64,
    /// Average time to answer, in seconds.
    pub avg_elapsed_secs: f64,
}

/// Aggregate statistics across a set of answer records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Statistics per question type.
    pub per_type: HashMap<QuestionType, TypeStats>,
    /// Proficiency per topic, same blend as the mastery level.
    pub topic_proficiency: HashMap<String, f64>,
}

/// Compute aggregate statistics from answer records.
pub fn compute_aggregate_stats(records: &[AnswerRecord]) -> AggregateStats {
    let mut by_type: HashMap<QuestionType, Vec<&AnswerRecord>> = HashMap::new();
    for record in records {
        by_type.entry(record.question_type).or_default().push(record);
    }

    let mut per_type = HashMap::new();
    for (question_type, group) in &by_type {
        let n = group.len() as f64;
        let correct = group.iter().filter(|r| r.feedback.is_correct).count();
        let avg_confidence =
            group.iter().map(|r| r.feedback.confidence_score).sum::<f64>() / n;
        let avg_elapsed_secs = group.iter().map(|r| r.elapsed_secs as f64).sum::<f64>() / n;

        per_type.insert(
            *question_type,
            TypeStats {
                answered: group.len(),
                correct,
                accuracy: correct as f64 / n,
                avg_confidence,
                avg_elapsed_secs,
            },
        );
    }

    let mut by_topic: HashMap<String, Vec<&Feedback>> = HashMap::new();
    for record in records {
        for topic in &record.topics {
            by_topic
                .entry(topic.clone())
                .or_default()
                .push(&record.feedback);
        }
    }

    let topic_proficiency = by_topic
        .into_iter()
        .map(|(topic, feedbacks)| {
            let level = assess_mastery(feedbacks.iter().copied()).level;
            (topic, level)
        })
        .collect();

    AggregateStats {
        per_type,
        topic_proficiency,
    }
}
