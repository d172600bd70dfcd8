//! The `mnemo drill` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use mnemo_core::bank::{load_bank_directory, parse_bank};
use mnemo_core::model::{Difficulty, Feedback, Question, QuestionBank, QuestionType, Response};
use mnemo_core::report::SessionReport;
use mnemo_core::session::{AnswerSource, SessionEngine, SessionObserver};
use mnemo_service::config::load_config_from;

pub fn execute(
    bank_path: Option<PathBuf>,
    count: Option<usize>,
    types: Option<String>,
    difficulty: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank_path = bank_path.unwrap_or_else(|| config.bank_dir.clone());
    let bank = load_bank(&bank_path)?;

    let type_filter = match types {
        Some(t) => super::parse_types(&t)?,
        None => Vec::new(),
    };
    let difficulty_filter: Option<Difficulty> = match difficulty {
        Some(d) => Some(d.parse().map_err(|e: String| anyhow::anyhow!("{e}"))?),
        None => None,
    };

    let mut questions: Vec<Question> = bank
        .questions
        .iter()
        .filter(|q| type_filter.is_empty() || type_filter.contains(&q.question_type))
        .filter(|q| difficulty_filter.is_none_or(|d| q.difficulty == d))
        .cloned()
        .collect();
    if let Some(limit) = count {
        questions.truncate(limit);
    }

    if questions.is_empty() {
        anyhow::bail!("no questions to drill in {}", bank_path.display());
    }

    println!("Bank: {} ({} questions)\n", bank.name, questions.len());

    let mut source = StdinAnswerSource::new();
    let engine = SessionEngine::new();
    let report = engine.run(&bank, &questions, &mut source, &ConsoleObserver)?;

    let output_dir = output.unwrap_or(config.session_dir);
    let timestamp = report.created_at.format("%Y%m%d-%H%M%S");
    let path = output_dir.join(format!("session-{timestamp}.json"));
    report.save_json(&path)?;
    tracing::info!(
        records = report.records.len(),
        duration_ms = report.duration_ms,
        "session complete"
    );
    println!("Session report: {}", path.display());

    Ok(())
}

/// Load a single bank file, or merge every bank under a directory.
fn load_bank(path: &std::path::Path) -> Result<QuestionBank> {
    if !path.is_dir() {
        return parse_bank(path);
    }

    let banks = load_bank_directory(path)?;
    if banks.is_empty() {
        anyhow::bail!("no question banks in {}", path.display());
    }
    if banks.len() == 1 {
        return Ok(banks.into_iter().next().unwrap());
    }

    let count = banks.len();
    let questions = banks.into_iter().flat_map(|b| b.questions).collect();
    Ok(QuestionBank {
        id: "combined".into(),
        name: format!("Combined ({count} banks)"),
        description: format!("All banks under {}", path.display()),
        questions,
        default_difficulty: Difficulty::default(),
    })
}

/// Reads one answer and one confidence rating per question from stdin.
struct StdinAnswerSource {
    stdin: std::io::Stdin,
}

impl StdinAnswerSource {
    fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        Ok(line.trim().to_string())
    }
}

impl AnswerSource for StdinAnswerSource {
    fn answer(&mut self, _question: &Question) -> Result<Response> {
        let start = Instant::now();

        print!("Your answer: ");
        std::io::stdout().flush()?;
        let answer = self.read_line()?;

        print!("Confidence (1-5): ");
        std::io::stdout().flush()?;
        let confidence = self.read_line()?.parse().unwrap_or(3);

        Ok(Response {
            answer,
            confidence,
            elapsed_secs: start.elapsed().as_secs(),
        })
    }
}

/// Prints questions and feedback to the terminal.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_question(&self, index: usize, total: usize, question: &Question) {
        println!("[{}/{}] {}", index + 1, total, question.prompt);
        if question.question_type == QuestionType::MultipleChoice {
            for option in &question.options {
                println!("  {}. {}", option.id, option.text);
            }
        }
    }

    fn on_feedback(&self, _question: &Question, feedback: &Feedback) {
        if feedback.is_correct {
            println!("Correct! ({})", feedback.quality);
        } else {
            println!("Incorrect. The answer was: {}", feedback.correct_answer);
        }
        if !feedback.explanation.is_empty() {
            println!("  {}", feedback.explanation);
        }
        println!(
            "  Next review in {} day(s).\n",
            feedback.interval_days
        );
    }

    fn on_session_complete(&self, report: &SessionReport) {
        use comfy_table::{Cell, Table};

        let mut table = Table::new();
        table.set_header(vec!["Type", "Answered", "Correct", "Accuracy"]);
        for (question_type, stats) in &report.aggregate.per_type {
            table.add_row(vec![
                Cell::new(question_type),
                Cell::new(stats.answered),
                Cell::new(stats.correct),
                Cell::new(format!("{:.0}%", stats.accuracy * 100.0)),
            ]);
        }
        println!("{table}");

        println!(
            "\nMastery: {} ({:.0}%)",
            report.mastery.category,
            report.mastery.level * 100.0
        );
        for recommendation in &report.mastery.recommendations {
            println!("  - {recommendation}");
        }
    }
}
