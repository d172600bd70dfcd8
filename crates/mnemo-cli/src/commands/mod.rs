pub mod drill;
pub mod generate;
pub mod init;
pub mod schedule;
pub mod stats;
pub mod validate;

use anyhow::Result;
use mnemo_core::model::QuestionType;

/// Parse a comma-separated question-type list like "mc,tf".
pub fn parse_types(types: &str) -> Result<Vec<QuestionType>> {
    types
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|e: String| anyhow::anyhow!("{e}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_type_lists() {
        assert_eq!(
            parse_types("mc,tf").unwrap(),
            vec![QuestionType::MultipleChoice, QuestionType::TrueFalse]
        );
        assert_eq!(
            parse_types("short_answer").unwrap(),
            vec![QuestionType::ShortAnswer]
        );
        assert!(parse_types("essay").is_err());
    }
}
