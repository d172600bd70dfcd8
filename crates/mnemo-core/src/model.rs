//! Core data model types for mnemo.
//!
//! These are the fundamental types the entire mnemo system uses to
//! represent learning materials, practice questions, submitted responses,
//! and the feedback produced for them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A practice question for active recall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// Identifier of the material this question was drawn from.
    pub material_id: String,
    /// How the answer is evaluated.
    pub question_type: QuestionType,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// The question text shown to the user.
    pub prompt: String,
    /// Options for multiple-choice questions (empty otherwise).
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    /// The correct answer.
    pub correct_answer: String,
    /// Explanation shown after answering.
    #[serde(default)]
    pub explanation: String,
    /// Surrounding context from the source material.
    #[serde(default)]
    pub context: String,
    /// Topic tags for filtering and analytics.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// An option of a multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Option identifier (e.g. "A").
    pub id: String,
    /// Option text.
    pub text: String,
    /// Whether this option is the correct one.
    #[serde(default)]
    pub is_correct: bool,
}

/// Supported question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillInBlank,
    ShortAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::FillInBlank => write!(f, "fill_in_blank"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple_choice" | "mc" => Ok(QuestionType::MultipleChoice),
            "true_false" | "tf" => Ok(QuestionType::TrueFalse),
            "fill_in_blank" | "fib" => Ok(QuestionType::FillInBlank),
            "short_answer" | "sa" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

impl QuestionType {
    /// All question types, in display order.
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::FillInBlank,
        QuestionType::ShortAnswer,
    ];
}

/// Question difficulty labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl Difficulty {
    /// Numeric weight in [0, 1] used to seed review-state difficulty.
    pub fn weight(self) -> f64 {
        match self {
            Difficulty::Easy => 0.25,
            Difficulty::Medium => 0.5,
            Difficulty::Hard => 0.75,
        }
    }
}

/// A learning material questions are generated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Brief description.
    #[serde(default)]
    pub description: String,
    /// Topic tags.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Free-text content used for concept extraction.
    pub content: String,
    /// Difficulty from 0.0 (easiest) to 1.0 (hardest).
    #[serde(default = "default_material_difficulty")]
    pub difficulty: f64,
}

fn default_material_difficulty() -> f64 {
    0.5
}

/// An authored collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this bank covers.
    #[serde(default)]
    pub description: String,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Default difficulty for questions that don't specify one.
    #[serde(default)]
    pub default_difficulty: Difficulty,
}

/// A user's submitted answer to a question. Ephemeral, created per
/// submission and discarded after feedback is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The answer text.
    pub answer: String,
    /// Self-reported confidence on a 1-5 scale.
    pub confidence: u8,
    /// Time taken to answer, in seconds.
    #[serde(default)]
    pub elapsed_secs: u64,
}

/// SM-2 response quality grade.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResponseQuality {
    /// Complete blackout.
    Incorrect,
    /// Wrong answer, but remembered when shown.
    IncorrectRemembered,
    /// Correct answer, with serious difficulty.
    Difficult,
    /// Correct answer, with hesitation.
    CorrectHesitant,
    /// Correct answer with good recall.
    Correct,
    /// Perfect recall.
    Perfect,
}

impl ResponseQuality {
    /// The numeric SM-2 grade (0-5).
    pub fn grade(self) -> u8 {
        match self {
            ResponseQuality::Incorrect => 0,
            ResponseQuality::IncorrectRemembered => 1,
            ResponseQuality::Difficult => 2,
            ResponseQuality::CorrectHesitant => 3,
            ResponseQuality::Correct => 4,
            ResponseQuality::Perfect => 5,
        }
    }
}

impl fmt::Display for ResponseQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseQuality::Incorrect => "incorrect",
            ResponseQuality::IncorrectRemembered => "incorrect_remembered",
            ResponseQuality::Difficult => "difficult",
            ResponseQuality::CorrectHesitant => "correct_hesitant",
            ResponseQuality::Correct => "correct",
            ResponseQuality::Perfect => "perfect",
        };
        write!(f, "{name}")
    }
}

/// Feedback derived from a question and a submitted response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// The question this feedback is for.
    pub question_id: String,
    /// Whether the answer was correct.
    pub is_correct: bool,
    /// Confidence score in [0, 1] after correctness adjustment.
    pub confidence_score: f64,
    /// SM-2 quality grade derived from correctness and confidence.
    pub quality: ResponseQuality,
    /// Explanation of the correct answer.
    pub explanation: String,
    /// The correct answer.
    pub correct_answer: String,
    /// Review interval in whole days.
    pub interval_days: i64,
    /// When this question should next be reviewed.
    pub next_review: DateTime<Utc>,
}
