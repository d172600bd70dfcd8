//! TOML question-bank parser.
//!
//! Loads question banks from TOML files and directories, and validates
//! them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, Question, QuestionBank, QuestionOption, QuestionType};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_difficulty_str")]
    default_difficulty: String,
}

fn default_difficulty_str() -> String {
    "medium".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    material_id: Option<String>,
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default)]
    difficulty: Option<String>,
    prompt: String,
    #[serde(default)]
    options: Vec<TomlOption>,
    correct_answer: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    context: String,
    #[serde(default)]
    topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    id: String,
    text: String,
    #[serde(default)]
    is_correct: bool,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_difficulty: Difficulty = parsed
        .bank
        .default_difficulty
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let bank_id = parsed.bank.id.clone();
    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let question_type: QuestionType = q
                .question_type
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question '{}': {}", q.id, e))?;

            let difficulty = match q.difficulty {
                Some(d) => d
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!("question '{}': {}", q.id, e))?,
                None => default_difficulty,
            };

            let options = q
                .options
                .into_iter()
                .map(|o| QuestionOption {
                    id: o.id,
                    text: o.text,
                    is_correct: o.is_correct,
                })
                .collect();

            Ok(Question {
                id: q.id,
                material_id: q.material_id.unwrap_or_else(|| bank_id.clone()),
                question_type,
                difficulty,
                prompt: q.prompt,
                options,
                correct_answer: q.correct_answer,
                explanation: q.explanation,
                context: q.context,
                topics: q.topics,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
        default_difficulty,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    for question in &bank.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }

        match question.question_type {
            QuestionType::MultipleChoice => {
                if question.options.len() < 2 {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: "multiple-choice question has fewer than two options".into(),
                    });
                }
                if !question.options.iter().any(|o| o.is_correct) {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: "no option is marked correct".into(),
                    });
                }
                let answer = question.correct_answer.trim().to_lowercase();
                if !question
                    .options
                    .iter()
                    .any(|o| o.text.trim().to_lowercase() == answer)
                {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: "correct_answer does not match any option text".into(),
                    });
                }
            }
            QuestionType::TrueFalse => {
                let answer = question.correct_answer.trim().to_lowercase();
                if answer != "true" && answer != "false" {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: format!(
                            "true/false answer must be \"true\" or \"false\", got \"{}\"",
                            question.correct_answer
                        ),
                    });
                }
            }
            QuestionType::ShortAnswer => {
                // Short answers are graded by keyword overlap; warn when no
                // word of the answer is long enough to score against.
                if !question
                    .correct_answer
                    .split_whitespace()
                    .any(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).len() > 3)
                {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: "short-answer correct_answer has no scorable keywords".into(),
                    });
                }
            }
            QuestionType::FillInBlank => {}
        }
    }

    warnings
}
