//! Answer evaluation.
//!
//! Correctness is determined by a per-question-type rule; malformed input
//! never raises an error, it simply evaluates as incorrect.

use chrono::{DateTime, Utc};

use crate::model::{Feedback, Question, QuestionType, Response, ResponseQuality};
use crate::schedule::{adjusted_confidence, estimate_next_review};

/// Fraction of correct-answer keywords a short answer must hit.
const KEYWORD_MATCH_THRESHOLD: f64 = 0.6;

/// Minimum keyword length; shorter words carry too little signal.
const MIN_KEYWORD_LEN: usize = 4;

/// Evaluate a submitted answer against a question.
///
/// Rules per type:
/// - `MultipleChoice` / `TrueFalse`: case-insensitive, trimmed exact match.
/// - `FillInBlank`: correct if either string contains the other after
///   trim/lowercase.
/// - `ShortAnswer`: at least 60% of the correct answer's keywords (words
///   longer than 3 characters) must match a token of the user's answer,
///   where "match" means either one contains the other.
pub fn evaluate_answer(question: &Question, answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return false;
    }
    let expected = question.correct_answer.trim().to_lowercase();

    match question.question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => answer == expected,
        QuestionType::FillInBlank => contains_either(&answer, &expected),
        QuestionType::ShortAnswer => {
            let needed = keywords(&expected);
            if needed.is_empty() {
                // No scorable keywords (e.g. a one-word answer like "heap");
                // fall back to the containment rule.
                return contains_either(&answer, &expected);
            }
            let given = tokens(&answer);
            let hits = needed
                .iter()
                .filter(|kw| given.iter().any(|t| t.contains(*kw) || kw.contains(t)))
                .count();
            hits as f64 / needed.len() as f64 >= KEYWORD_MATCH_THRESHOLD
        }
    }
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Lowercased tokens of a string, stripped of surrounding punctuation.
fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Tokens of the correct answer that are long enough to score against.
fn keywords(text: &str) -> Vec<String> {
    tokens(text)
        .into_iter()
        .filter(|w| w.len() >= MIN_KEYWORD_LEN)
        .collect()
}

/// Map correctness plus the adjusted confidence score onto an SM-2 quality
/// grade.
pub fn classify_quality(is_correct: bool, score: f64) -> ResponseQuality {
    if is_correct {
        if score > 0.9 {
            ResponseQuality::Perfect
        } else if score > 0.7 {
            ResponseQuality::Correct
        } else {
            ResponseQuality::CorrectHesitant
        }
    } else if score > 0.5 {
        ResponseQuality::Difficult
    } else if score > 0.2 {
        ResponseQuality::IncorrectRemembered
    } else {
        ResponseQuality::Incorrect
    }
}

/// Grade a response: evaluate correctness, adjust the self-reported
/// confidence, and estimate the next review.
///
/// Pure given `(question, response, now)`, which keeps grading
/// deterministic and testable.
pub fn grade_response(question: &Question, response: &Response, now: DateTime<Utc>) -> Feedback {
    let is_correct = evaluate_answer(question, &response.answer);
    let score = adjusted_confidence(response.confidence, is_correct);
    let estimate = estimate_next_review(now, is_correct, score);

    Feedback {
        question_id: question.id.clone(),
        is_correct,
        confidence_score: score,
        quality: classify_quality(is_correct, score),
        explanation: question.explanation.clone(),
        correct_answer: question.correct_answer.clone(),
        interval_days: estimate.interval_days,
        next_review: estimate.next_review,
    }
}
