//! The `mnemo generate` command.

use std::path::PathBuf;

use anyhow::Result;

use mnemo_core::generate::GenerationRequest;
use mnemo_core::model::QuestionType;
use mnemo_service::config::load_config_from;
use mnemo_service::{LearningService, MockLearningService};

pub async fn execute(
    material: String,
    count: Option<usize>,
    types: Option<String>,
    difficulty: Option<String>,
    topic: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = MockLearningService::new(&config);

    let mut request = GenerationRequest::new(&material);
    request.count = count.unwrap_or(config.default_question_count);
    if let Some(t) = types {
        request.question_types = super::parse_types(&t)?;
    }
    if let Some(d) = difficulty {
        request.difficulty = Some(d.parse().map_err(|e: String| anyhow::anyhow!("{e}"))?);
    }
    if let Some(t) = topic {
        request.topics = vec![t];
    }

    let questions = service.generate_questions(&request).await?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        _ => {
            println!("Generated {} question(s) from '{material}':\n", questions.len());
            for question in &questions {
                println!("[{}] {}", question.question_type, question.prompt);
                if question.question_type == QuestionType::MultipleChoice {
                    for option in &question.options {
                        println!("  {}. {}", option.id, option.text);
                    }
                }
            }
        }
    }

    Ok(())
}
