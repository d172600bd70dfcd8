//! Review scheduling.
//!
//! Two layers live here: the lightweight confidence/interval estimator used
//! to attach a next-review date to every graded answer, and the SM-2
//! scheduler that maintains long-lived per-question review state and packs
//! reviews into a daily schedule.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ResponseQuality;

/// Normalize a self-reported 1-5 confidence into [0, 1].
///
/// Out-of-range input is clamped rather than rejected.
pub fn normalized_confidence(confidence: u8) -> f64 {
    f64::from(confidence.clamp(1, 5)) / 5.0
}

/// Normalize and adjust confidence by correctness: +0.1 (capped at 1.0)
/// when correct, -0.2 (floored at 0.0) when incorrect.
pub fn adjusted_confidence(confidence: u8, is_correct: bool) -> f64 {
    let normalized = normalized_confidence(confidence);
    if is_correct {
        (normalized + 0.1).min(1.0)
    } else {
        (normalized - 0.2).max(0.0)
    }
}

/// A next-review estimate from the placeholder heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEstimate {
    /// Interval in whole days, never less than 1.
    pub interval_days: i64,
    /// When the question should next be reviewed.
    pub next_review: DateTime<Utc>,
}

/// Estimate the next review time from correctness and the adjusted
/// confidence score.
///
/// Base interval is 2 days when correct, 1 day when incorrect, multiplied
/// by (confidence x 2) and rounded to the nearest whole day. The result is
/// clamped to at least one day so the next review is always strictly in
/// the future. Deterministic given its inputs; this is a placeholder
/// heuristic, not SM-2.
pub fn estimate_next_review(
    now: DateTime<Utc>,
    is_correct: bool,
    confidence_score: f64,
) -> ReviewEstimate {
    let base_days = if is_correct { 2.0 } else { 1.0 };
    let interval_days = ((base_days * confidence_score * 2.0).round() as i64).max(1);
    ReviewEstimate {
        interval_days,
        next_review: now + Duration::days(interval_days),
    }
}

/// SM-2 scheduler parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sm2Config {
    /// Starting ease factor for new items.
    pub initial_ease_factor: f64,
    /// The ease factor never drops below this.
    pub min_ease_factor: f64,
    /// Interval after the first successful review, in days.
    pub first_interval_days: f64,
    /// Interval after the second successful review, in days.
    pub second_interval_days: f64,
    /// Maximum reviews packed into a single day.
    pub max_items_per_day: usize,
}

impl Default for Sm2Config {
    fn default() -> Self {
        Self {
            initial_ease_factor: 2.5,
            min_ease_factor: 1.3,
            first_interval_days: 1.0,
            second_interval_days: 6.0,
            max_items_per_day: 20,
        }
    }
}

/// Per-question spaced-repetition state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    /// The question this state belongs to.
    pub question_id: String,
    /// Current difficulty rating in [0, 1].
    pub difficulty: f64,
    /// When this item is next due.
    pub next_review: DateTime<Utc>,
    /// Number of completed reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Current ease factor.
    pub ease_factor: f64,
    /// Current interval in days.
    pub interval_days: f64,
    /// When this item was last reviewed.
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl ReviewItem {
    /// A fresh item due immediately.
    pub fn new(question_id: &str, difficulty: f64, now: DateTime<Utc>, config: &Sm2Config) -> Self {
        Self {
            question_id: question_id.to_string(),
            difficulty: difficulty.clamp(0.0, 1.0),
            next_review: now,
            review_count: 0,
            ease_factor: config.initial_ease_factor,
            interval_days: 0.0,
            last_reviewed: None,
        }
    }
}

/// An item placed on the review schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// The question due for review.
    pub question_id: String,
    /// When the item is due.
    pub due: DateTime<Utc>,
    /// Priority score; higher means review sooner.
    pub priority: f64,
    /// Estimated review time in seconds.
    pub estimated_secs: u32,
}

/// Reviews scheduled for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySchedule {
    /// The date this schedule is for.
    pub date: NaiveDate,
    /// Items scheduled for this day.
    pub items: Vec<ScheduleItem>,
    /// Estimated total review time in minutes.
    pub estimated_minutes: u32,
}

/// A full review schedule, bucketed by day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Daily buckets, ordered by date.
    pub days: BTreeMap<NaiveDate, DailySchedule>,
    /// Total items across all days.
    pub total_items: usize,
    /// Items already past due.
    pub overdue_items: usize,
    /// Items due within the next 7 days.
    pub upcoming_items: usize,
}

/// The SM-2 spaced-repetition scheduler.
///
/// Intervals follow the classic algorithm: 1 day, then 6 days, then the
/// previous interval times the ease factor. No jitter is applied, so
/// scheduling is deterministic given its inputs.
#[derive(Debug, Clone, Default)]
pub struct Sm2Scheduler {
    config: Sm2Config,
}

/// Outcome of an SM-2 review calculation.
#[derive(Debug, Clone, Copy)]
pub struct Sm2Outcome {
    pub next_review: DateTime<Utc>,
    pub ease_factor: f64,
    pub interval_days: f64,
}

impl Sm2Scheduler {
    pub fn new(config: Sm2Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Sm2Config {
        &self.config
    }

    /// Calculate the next review for an item given the response quality.
    ///
    /// Quality below `Difficult` reschedules within the day (an hour if the
    /// answer was at least remembered, half an hour otherwise) and leaves
    /// the ease factor untouched.
    pub fn next_review(
        &self,
        item: &ReviewItem,
        quality: ResponseQuality,
        now: DateTime<Utc>,
    ) -> Sm2Outcome {
        if quality < ResponseQuality::Difficult {
            let minutes = if quality == ResponseQuality::IncorrectRemembered {
                60
            } else {
                30
            };
            return Sm2Outcome {
                next_review: now + Duration::minutes(minutes),
                ease_factor: item.ease_factor,
                interval_days: minutes as f64 / (24.0 * 60.0),
            };
        }

        // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
        let q = f64::from(quality.grade());
        let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        let ease_factor = (item.ease_factor + ease_delta).max(self.config.min_ease_factor);

        let interval_days = match item.review_count {
            0 => self.config.first_interval_days,
            1 => self.config.second_interval_days,
            _ => item.interval_days * ease_factor,
        };

        Sm2Outcome {
            next_review: now + duration_from_days(interval_days),
            ease_factor,
            interval_days,
        }
    }

    /// Apply a review outcome to an item, drifting its difficulty with the
    /// response quality.
    pub fn update_after_review(
        &self,
        item: &mut ReviewItem,
        quality: ResponseQuality,
        now: DateTime<Utc>,
    ) {
        let outcome = self.next_review(item, quality, now);

        item.last_reviewed = Some(now);
        item.next_review = outcome.next_review;
        item.ease_factor = outcome.ease_factor;
        item.interval_days = outcome.interval_days;
        item.review_count += 1;

        if quality >= ResponseQuality::Correct {
            item.difficulty = (item.difficulty - 0.05).max(0.1);
        } else if quality <= ResponseQuality::IncorrectRemembered {
            item.difficulty = (item.difficulty + 0.1).min(1.0);
        }
    }

    /// Pack review items into daily buckets.
    ///
    /// Items are taken in (due date, hardest first) order; a day that hits
    /// `max_items_per_day` spills its overflow to the next day with room.
    pub fn build_schedule(&self, items: &[ReviewItem], now: DateTime<Utc>) -> Schedule {
        let mut sorted: Vec<&ReviewItem> = items.iter().collect();
        sorted.sort_by(|a, b| {
            a.next_review
                .cmp(&b.next_review)
                .then(b.difficulty.total_cmp(&a.difficulty))
        });

        let mut days: BTreeMap<NaiveDate, DailySchedule> = BTreeMap::new();
        let mut overdue_items = 0usize;
        let mut upcoming_items = 0usize;
        let horizon = now + Duration::days(7);

        for item in &sorted {
            if item.next_review < now {
                overdue_items += 1;
            }
            if item.next_review <= horizon {
                upcoming_items += 1;
            }

            let mut date = item.next_review.date_naive();
            while days
                .get(&date)
                .is_some_and(|d| d.items.len() >= self.config.max_items_per_day)
            {
                date = date.succ_opt().unwrap_or(date);
            }

            let days_overdue = (now - item.next_review).num_days().max(0) as f64;
            let priority = 0.5 * item.difficulty + 0.5 * (days_overdue / 7.0).min(1.0);
            let estimated_secs = 30 + (item.difficulty * 60.0) as u32;

            let day = days.entry(date).or_insert_with(|| DailySchedule {
                date,
                items: Vec::new(),
                estimated_minutes: 0,
            });
            day.items.push(ScheduleItem {
                question_id: item.question_id.clone(),
                due: item.next_review,
                priority,
                estimated_secs,
            });
        }

        for day in days.values_mut() {
            let total_secs: u32 = day.items.iter().map(|i| i.estimated_secs).sum();
            day.estimated_minutes = total_secs.div_ceil(60);
        }

        Schedule {
            days,
            total_items: items.len(),
            overdue_items,
            upcoming_items,
        }
    }
}

/// Convert a fractional day count into a chrono duration.
fn duration_from_days(days: f64) -> Duration {
    Duration::seconds((days * 86_400.0) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_normalization_for_all_inputs() {
        for c in 1..=5u8 {
            let normalized = normalized_confidence(c);
            assert!((normalized - f64::from(c) / 5.0).abs() < f64::EPSILON);

            let up = adjusted_confidence(c, true);
            assert!((0.0..=1.0).contains(&up));
            assert!((up - (normalized + 0.1).min(1.0)).abs() < f64::EPSILON);

            let down = adjusted_confidence(c, false);
            assert!((0.0..=1.0).contains(&down));
            assert!((down - (normalized - 0.2).max(0.0)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn confidence_out_of_range_is_clamped() {
        assert_eq!(normalized_confidence(0), 0.2);
        assert_eq!(normalized_confidence(9), 1.0);
        assert_eq!(adjusted_confidence(9, true), 1.0);
    }

    #[test]
    fn estimate_is_at_least_one_day_out() {
        let now = Utc::now();
        // Worst case: incorrect with the score floored at zero.
        let estimate = estimate_next_review(now, false, 0.0);
        assert_eq!(estimate.interval_days, 1);
        assert_eq!(estimate.next_review, now + Duration::days(1));
    }

    #[test]
    fn estimate_scales_with_confidence() {
        let now = Utc::now();
        // Correct at full confidence: 2 * 1.0 * 2 = 4 days.
        assert_eq!(estimate_next_review(now, true, 1.0).interval_days, 4);
        // Correct at 0.5: 2 * 0.5 * 2 = 2 days.
        assert_eq!(estimate_next_review(now, true, 0.5).interval_days, 2);
        // Incorrect at 0.4: 1 * 0.4 * 2 = 0.8, rounds to 1 day.
        assert_eq!(estimate_next_review(now, false, 0.4).interval_days, 1);
    }

    #[test]
    fn estimate_is_deterministic() {
        let now = Utc::now();
        let a = estimate_next_review(now, true, 0.9);
        let b = estimate_next_review(now, true, 0.9);
        assert_eq!(a, b);
    }

    #[test]
    fn sm2_first_and_second_intervals() {
        let scheduler = Sm2Scheduler::default();
        let now = Utc::now();
        let mut item = ReviewItem::new("q1", 0.5, now, scheduler.config());

        scheduler.update_after_review(&mut item, ResponseQuality::Correct, now);
        assert_eq!(item.interval_days, 1.0);
        assert_eq!(item.review_count, 1);

        scheduler.update_after_review(&mut item, ResponseQuality::Correct, now);
        assert_eq!(item.interval_days, 6.0);

        // Third review multiplies by the ease factor.
        scheduler.update_after_review(&mut item, ResponseQuality::Correct, now);
        assert!(item.interval_days > 6.0);
    }

    #[test]
    fn sm2_ease_factor_never_below_minimum() {
        let scheduler = Sm2Scheduler::default();
        let now = Utc::now();
        let mut item = ReviewItem::new("q1", 0.5, now, scheduler.config());

        for _ in 0..20 {
            scheduler.update_after_review(&mut item, ResponseQuality::Difficult, now);
        }
        assert!(item.ease_factor >= scheduler.config().min_ease_factor);
    }

    #[test]
    fn sm2_poor_quality_reschedules_within_a_day() {
        let scheduler = Sm2Scheduler::default();
        let now = Utc::now();
        let item = ReviewItem::new("q1", 0.5, now, scheduler.config());

        let remembered = scheduler.next_review(&item, ResponseQuality::IncorrectRemembered, now);
        assert_eq!(remembered.next_review, now + Duration::minutes(60));
        assert_eq!(remembered.ease_factor, item.ease_factor);

        let blackout = scheduler.next_review(&item, ResponseQuality::Incorrect, now);
        assert_eq!(blackout.next_review, now + Duration::minutes(30));
    }

    #[test]
    fn sm2_difficulty_drifts_with_quality() {
        let scheduler = Sm2Scheduler::default();
        let now = Utc::now();
        let mut item = ReviewItem::new("q1", 0.5, now, scheduler.config());

        scheduler.update_after_review(&mut item, ResponseQuality::Perfect, now);
        assert!((item.difficulty - 0.45).abs() < 1e-9);

        scheduler.update_after_review(&mut item, ResponseQuality::Incorrect, now);
        assert!((item.difficulty - 0.55).abs() < 1e-9);
    }

    #[test]
    fn schedule_respects_daily_cap() {
        let config = Sm2Config {
            max_items_per_day: 2,
            ..Sm2Config::default()
        };
        let scheduler = Sm2Scheduler::new(config);
        let now = Utc::now();

        let items: Vec<ReviewItem> = (0..5)
            .map(|i| ReviewItem::new(&format!("q{i}"), 0.5, now, scheduler.config()))
            .collect();

        let schedule = scheduler.build_schedule(&items, now);
        assert_eq!(schedule.total_items, 5);
        for day in schedule.days.values() {
            assert!(day.items.len() <= 2, "day {} over cap", day.date);
        }
        // 5 items at 2 per day spread over 3 days.
        assert_eq!(schedule.days.len(), 3);
    }

    #[test]
    fn schedule_counts_overdue_and_upcoming() {
        let scheduler = Sm2Scheduler::default();
        let now = Utc::now();

        let mut overdue = ReviewItem::new("q-overdue", 0.8, now, scheduler.config());
        overdue.next_review = now - Duration::days(3);
        let mut far = ReviewItem::new("q-far", 0.2, now, scheduler.config());
        far.next_review = now + Duration::days(30);

        let schedule = scheduler.build_schedule(&[overdue, far], now);
        assert_eq!(schedule.overdue_items, 1);
        assert_eq!(schedule.upcoming_items, 1);

        // Overdue for 3 of 7 days contributes to priority.
        let first_day = schedule.days.values().next().unwrap();
        let item = &first_day.items[0];
        assert!((item.priority - (0.5 * 0.8 + 0.5 * (3.0 / 7.0))).abs() < 0.01);
    }
}
