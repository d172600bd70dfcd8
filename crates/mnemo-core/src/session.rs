//! Drill session engine.
//!
//! Walks a list of questions, obtains a response per question from an
//! `AnswerSource`, grades each one, and assembles a `SessionReport`. The
//! CLI provides a stdin-backed source; tests use scripted ones.

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::evaluate::grade_response;
use crate::model::{Feedback, Question, QuestionBank, Response};
use crate::report::{AnswerRecord, BankSummary, SessionReport};
use crate::statistics::{assess_mastery, compute_aggregate_stats};

/// Supplies a response for each question in a session.
pub trait AnswerSource {
    fn answer(&mut self, question: &Question) -> Result<Response>;
}

/// Observes session progress.
pub trait SessionObserver {
    fn on_question(&self, index: usize, total: usize, question: &Question);
    fn on_feedback(&self, question: &Question, feedback: &Feedback);
    fn on_session_complete(&self, report: &SessionReport);
}

/// No-op observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_question(&self, _: usize, _: usize, _: &Question) {}
    fn on_feedback(&self, _: &Question, _: &Feedback) {}
    fn on_session_complete(&self, _: &SessionReport) {}
}

/// The drill session engine.
#[derive(Debug, Clone, Default)]
pub struct SessionEngine;

impl SessionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run a session over the given questions.
    ///
    /// Questions are asked in bank order; each call to the answer source
    /// blocks until the user (or script) responds.
    pub fn run(
        &self,
        bank: &QuestionBank,
        questions: &[Question],
        source: &mut dyn AnswerSource,
        observer: &dyn SessionObserver,
    ) -> Result<SessionReport> {
        let start = Instant::now();
        let total = questions.len();
        let mut records = Vec::with_capacity(total);

        for (index, question) in questions.iter().enumerate() {
            observer.on_question(index, total, question);

            let response = source.answer(question)?;
            let feedback = grade_response(question, &response, Utc::now());

            tracing::debug!(
                question = %question.id,
                correct = feedback.is_correct,
                quality = %feedback.quality,
                "answer graded"
            );
            observer.on_feedback(question, &feedback);

            records.push(AnswerRecord {
                question_id: question.id.clone(),
                question_type: question.question_type,
                topics: question.topics.clone(),
                prompt: question.prompt.clone(),
                answer: response.answer,
                elapsed_secs: response.elapsed_secs,
                feedback,
            });
        }

        let mastery = assess_mastery(records.iter().map(|r| &r.feedback));
        let aggregate = compute_aggregate_stats(&records);

        let report = SessionReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary {
                id: bank.id.clone(),
                name: bank.name.clone(),
                question_count: questions.len(),
            },
            records,
            mastery,
            aggregate,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        observer.on_session_complete(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, QuestionType};

    /// Answers every question with a fixed string and confidence.
    struct ScriptedSource {
        answers: Vec<(String, u8)>,
        next: usize,
    }

    impl ScriptedSource {
        fn new(answers: &[(&str, u8)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(a, c)| (a.to_string(), *c))
                    .collect(),
                next: 0,
            }
        }
    }

    impl AnswerSource for ScriptedSource {
        fn answer(&mut self, _question: &Question) -> Result<Response> {
            let (answer, confidence) = self.answers[self.next].clone();
            self.next += 1;
            Ok(Response {
                answer,
                confidence,
                elapsed_secs: 3,
            })
        }
    }

    fn bank() -> QuestionBank {
        let questions = vec![
            Question {
                id: "q1".into(),
                material_id: "m1".into(),
                question_type: QuestionType::TrueFalse,
                difficulty: Difficulty::Easy,
                prompt: "The stack grows downward on most platforms.".into(),
                options: vec![],
                correct_answer: "true".into(),
                explanation: String::new(),
                context: String::new(),
                topics: vec!["memory".into()],
            },
            Question {
                id: "q2".into(),
                material_id: "m1".into(),
                question_type: QuestionType::FillInBlank,
                difficulty: Difficulty::Medium,
                prompt: "Dynamic allocations live on the _____.".into(),
                options: vec![],
                correct_answer: "heap".into(),
                explanation: String::new(),
                context: String::new(),
                topics: vec!["memory".into()],
            },
        ];
        QuestionBank {
            id: "memory".into(),
            name: "Memory".into(),
            description: String::new(),
            questions,
            default_difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn session_produces_a_record_per_question() {
        let bank = bank();
        let mut source = ScriptedSource::new(&[("true", 5), ("stack", 2)]);
        let engine = SessionEngine::new();

        let report = engine
            .run(&bank, &bank.questions, &mut source, &NoopObserver)
            .unwrap();

        assert_eq!(report.records.len(), 2);
        assert!(report.records[0].feedback.is_correct);
        assert!(!report.records[1].feedback.is_correct);
        assert_eq!(report.bank.id, "memory");
        assert_eq!(report.mastery.assessed, 2);
        assert!((report.mastery.accuracy - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn session_aggregates_topics() {
        let bank = bank();
        let mut source = ScriptedSource::new(&[("true", 4), ("heap", 4)]);
        let engine = SessionEngine::new();

        let report = engine
            .run(&bank, &bank.questions, &mut source, &NoopObserver)
            .unwrap();

        assert!(report.aggregate.topic_proficiency.contains_key("memory"));
        assert!(report.aggregate.topic_proficiency["memory"] > 0.9);
    }
}
