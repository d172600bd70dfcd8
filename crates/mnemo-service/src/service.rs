//! The learning-service trait and its in-memory mock implementation.
//!
//! The mock stands in for a real backend: it holds materials and questions
//! in memory, grades submissions synchronously, and keeps per-question
//! spaced-repetition state so a review snapshot can be produced at any
//! point. An artificial latency is applied to every operation so callers
//! exercise their loading paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mnemo_core::error::ServiceError;
use mnemo_core::evaluate::grade_response;
use mnemo_core::generate::{GenerationRequest, QuestionGenerator};
use mnemo_core::model::{Feedback, Material, Question, Response};
use mnemo_core::report::AnswerRecord;
use mnemo_core::schedule::{ReviewItem, Schedule, Sm2Config, Sm2Scheduler};
use mnemo_core::statistics::{assess_mastery, compute_aggregate_stats, MasteryAssessment};

use crate::config::ServiceConfig;
use crate::fixtures;

/// A point-in-time view of the review state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSnapshot {
    /// Who the snapshot is for. The mock is single-user, so this is a
    /// label, not a partition key.
    pub user: String,
    /// When the snapshot was produced.
    pub generated_at: DateTime<Utc>,
    /// The packed review schedule.
    pub schedule: Schedule,
    /// Mastery over the full answer history.
    pub mastery: MasteryAssessment,
    /// Proficiency per topic.
    pub topic_proficiency: HashMap<String, f64>,
}

/// The seam between the UI layers and the learning backend.
#[async_trait]
pub trait LearningService: Send + Sync {
    /// Generate questions from a material.
    async fn generate_questions(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<Question>, ServiceError>;

    /// Look up a single question by id.
    async fn question(&self, question_id: &str) -> Result<Question, ServiceError>;

    /// Grade a submitted response and update review state.
    async fn submit_response(
        &self,
        question_id: &str,
        response: &Response,
    ) -> Result<Feedback, ServiceError>;

    /// Produce a snapshot of the current review schedule and mastery.
    async fn review_snapshot(&self, user: &str) -> Result<ReviewSnapshot, ServiceError>;
}

/// In-memory learning service backed by the demo fixtures.
pub struct MockLearningService {
    materials: HashMap<String, Material>,
    questions: Mutex<HashMap<String, Question>>,
    history: Mutex<Vec<AnswerRecord>>,
    review_items: Mutex<HashMap<String, ReviewItem>>,
    generator: QuestionGenerator,
    scheduler: Sm2Scheduler,
    latency: Duration,
    call_count: AtomicU32,
}

impl MockLearningService {
    /// A service seeded with the demo materials and questions.
    pub fn new(config: &ServiceConfig) -> Self {
        let materials = fixtures::demo_materials()
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect();

        let scheduler = Sm2Scheduler::new(Sm2Config {
            max_items_per_day: config.max_items_per_day,
            ..Sm2Config::default()
        });

        let service = Self {
            materials,
            questions: Mutex::new(HashMap::new()),
            history: Mutex::new(Vec::new()),
            review_items: Mutex::new(HashMap::new()),
            generator: QuestionGenerator::with_max_questions(config.max_questions_per_request),
            scheduler,
            latency: Duration::from_millis(config.simulated_latency_ms),
            call_count: AtomicU32::new(0),
        };
        service.track(fixtures::demo_questions());
        service
    }

    /// Register questions so lookups and submissions can find them.
    ///
    /// Each question also gets fresh review state seeded from its
    /// difficulty label.
    pub fn track(&self, questions: Vec<Question>) {
        let now = Utc::now();
        let mut tracked = self.questions.lock().unwrap();
        let mut items = self.review_items.lock().unwrap();
        for question in questions {
            items.entry(question.id.clone()).or_insert_with(|| {
                ReviewItem::new(
                    &question.id,
                    question.difficulty.weight(),
                    now,
                    self.scheduler.config(),
                )
            });
            tracked.insert(question.id.clone(), question);
        }
    }

    /// Number of service calls made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl LearningService for MockLearningService {
    async fn generate_questions(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<Question>, ServiceError> {
        self.simulate_latency().await;

        let material = self
            .materials
            .get(&request.material_id)
            .ok_or_else(|| ServiceError::MaterialNotFound(request.material_id.clone()))?;

        let questions = self.generator.generate(material, request)?;
        self.track(questions.clone());
        Ok(questions)
    }

    async fn question(&self, question_id: &str) -> Result<Question, ServiceError> {
        self.simulate_latency().await;

        self.questions
            .lock()
            .unwrap()
            .get(question_id)
            .cloned()
            .ok_or_else(|| ServiceError::QuestionNotFound(question_id.to_string()))
    }

    async fn submit_response(
        &self,
        question_id: &str,
        response: &Response,
    ) -> Result<Feedback, ServiceError> {
        self.simulate_latency().await;

        let question = self
            .questions
            .lock()
            .unwrap()
            .get(question_id)
            .cloned()
            .ok_or_else(|| ServiceError::QuestionNotFound(question_id.to_string()))?;

        let now = Utc::now();
        let feedback = grade_response(&question, response, now);

        {
            let mut items = self.review_items.lock().unwrap();
            let item = items.entry(question.id.clone()).or_insert_with(|| {
                ReviewItem::new(
                    &question.id,
                    question.difficulty.weight(),
                    now,
                    self.scheduler.config(),
                )
            });
            self.scheduler.update_after_review(item, feedback.quality, now);
        }

        self.history.lock().unwrap().push(AnswerRecord {
            question_id: question.id.clone(),
            question_type: question.question_type,
            topics: question.topics.clone(),
            prompt: question.prompt.clone(),
            answer: response.answer.clone(),
            elapsed_secs: response.elapsed_secs,
            feedback: feedback.clone(),
        });

        tracing::debug!(
            question = %question.id,
            correct = feedback.is_correct,
            quality = %feedback.quality,
            "graded response"
        );

        Ok(feedback)
    }

    async fn review_snapshot(&self, user: &str) -> Result<ReviewSnapshot, ServiceError> {
        self.simulate_latency().await;

        let now = Utc::now();
        let items: Vec<ReviewItem> = self
            .review_items
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect();
        let schedule = self.scheduler.build_schedule(&items, now);

        let history = self.history.lock().unwrap();
        let mastery = assess_mastery(history.iter().map(|r| &r.feedback));
        let topic_proficiency = compute_aggregate_stats(&history).topic_proficiency;

        Ok(ReviewSnapshot {
            user: user.to_string(),
            generated_at: now,
            schedule,
            mastery,
            topic_proficiency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo_core::model::ResponseQuality;

    fn service() -> MockLearningService {
        let config = ServiceConfig {
            simulated_latency_ms: 0,
            ..ServiceConfig::default()
        };
        MockLearningService::new(&config)
    }

    fn response(answer: &str, confidence: u8) -> Response {
        Response {
            answer: answer.to_string(),
            confidence,
            elapsed_secs: 10,
        }
    }

    #[tokio::test]
    async fn generates_and_tracks_questions() {
        let svc = service();
        let request = GenerationRequest::new("cpu-architecture");

        let questions = svc.generate_questions(&request).await.unwrap();
        assert_eq!(questions.len(), 5);

        // Generated questions are immediately retrievable.
        let fetched = svc.question(&questions[0].id).await.unwrap();
        assert_eq!(fetched.prompt, questions[0].prompt);
    }

    #[tokio::test]
    async fn configured_question_cap_is_enforced() {
        let config = ServiceConfig {
            simulated_latency_ms: 0,
            max_questions_per_request: 2,
            ..ServiceConfig::default()
        };
        let svc = MockLearningService::new(&config);

        let mut request = GenerationRequest::new("cpu-architecture");
        request.count = 3;
        let err = svc.generate_questions(&request).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCount { max: 2, .. }));
    }

    #[tokio::test]
    async fn unknown_material_is_rejected() {
        let svc = service();
        let request = GenerationRequest::new("quantum-basket-weaving");

        let err = svc.generate_questions(&request).await.unwrap_err();
        assert!(matches!(err, ServiceError::MaterialNotFound(_)));
        assert!(err.to_string().contains("material not found"));
    }

    #[tokio::test]
    async fn unknown_question_is_rejected() {
        let svc = service();
        let err = svc.question("no-such-question").await.unwrap_err();
        assert!(err.is_not_found());

        let err = svc
            .submit_response("no-such-question", &response("x", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::QuestionNotFound(_)));
    }

    #[tokio::test]
    async fn correct_submission_produces_positive_feedback() {
        let svc = service();
        let feedback = svc
            .submit_response("cpu-1", &response("Assembly-based", 5))
            .await
            .unwrap();

        assert!(feedback.is_correct);
        assert_eq!(feedback.quality, ResponseQuality::Perfect);
        assert_eq!(feedback.correct_answer, "Assembly-based");
        assert!(feedback.interval_days >= 1);
        assert!(feedback.next_review > Utc::now());
    }

    #[tokio::test]
    async fn incorrect_submission_lowers_confidence() {
        let svc = service();
        let feedback = svc
            .submit_response("cpu-1", &response("Declarative", 5))
            .await
            .unwrap();

        assert!(!feedback.is_correct);
        // 5/5 normalized to 1.0, minus the 0.2 incorrect penalty.
        assert!((feedback.confidence_score - 0.8).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn snapshot_reflects_history() {
        let svc = service();

        svc.submit_response("cpu-1", &response("Assembly-based", 5))
            .await
            .unwrap();
        svc.submit_response("cpu-2", &response("true", 2))
            .await
            .unwrap();

        let snapshot = svc.review_snapshot("demo").await.unwrap();
        assert_eq!(snapshot.user, "demo");
        assert_eq!(snapshot.mastery.assessed, 2);
        assert!(snapshot.topic_proficiency.contains_key("cpu"));
        // All seeded questions have review state.
        assert_eq!(snapshot.schedule.total_items, 5);
    }

    #[tokio::test]
    async fn snapshot_of_fresh_service_is_empty_history() {
        let svc = service();
        let snapshot = svc.review_snapshot("demo").await.unwrap();

        assert_eq!(snapshot.mastery.assessed, 0);
        assert!(snapshot.topic_proficiency.is_empty());
        assert!(snapshot.schedule.total_items > 0);
    }

    #[tokio::test]
    async fn call_count_tracks_operations() {
        let svc = service();
        assert_eq!(svc.call_count(), 0);

        svc.question("cpu-1").await.unwrap();
        let _ = svc.question("missing").await;
        assert_eq!(svc.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_simulated() {
        let config = ServiceConfig {
            simulated_latency_ms: 300,
            ..ServiceConfig::default()
        };
        let svc = MockLearningService::new(&config);

        let start = tokio::time::Instant::now();
        svc.question("cpu-1").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
