//! Template-based question generation from learning materials.
//!
//! Concepts are extracted from the material's free text and slotted into
//! per-type prompt templates. Selection cycles through types, concepts,
//! and templates deterministically so generation is reproducible.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::model::{Difficulty, Material, Question, QuestionOption, QuestionType};

/// Default cap on questions per generation request.
pub const MAX_QUESTIONS_PER_REQUEST: usize = 20;

/// Maximum concepts extracted from one material.
const MAX_CONCEPTS: usize = 10;

/// Words carrying no concept signal.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "that", "this", "these", "those", "from", "into", "about",
    "which", "their", "there", "where", "when", "what", "while",
];

/// Request for generating questions from a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The material to generate from.
    pub material_id: String,
    /// Number of questions to generate; out-of-range counts are rejected.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Restrict generation to these types (all types when empty).
    #[serde(default)]
    pub question_types: Vec<QuestionType>,
    /// Target difficulty for the generated questions.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Only generate from materials carrying one of these topics.
    #[serde(default)]
    pub topics: Vec<String>,
}

fn default_count() -> usize {
    5
}

impl GenerationRequest {
    pub fn new(material_id: &str) -> Self {
        Self {
            material_id: material_id.to_string(),
            count: default_count(),
            question_types: Vec::new(),
            difficulty: None,
            topics: Vec::new(),
        }
    }

    /// Validate the requested count against a cap.
    pub fn validated_count(&self, max: usize) -> Result<usize, ServiceError> {
        if self.count == 0 || self.count > max {
            return Err(ServiceError::InvalidCount {
                requested: self.count,
                max,
            });
        }
        Ok(self.count)
    }
}

/// Extract key concepts from material content.
///
/// Lowercased alphabetic words longer than 4 characters, minus stop words,
/// de-duplicated in first-seen order and capped at ten. Deliberately a
/// simple word heuristic, not NLP.
pub fn extract_concepts(content: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut concepts = Vec::new();

    for word in content.to_lowercase().split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        if word.len() > 4
            && word.chars().all(|c| c.is_alphabetic())
            && !STOP_WORDS.contains(&word)
            && seen.insert(word.to_string())
        {
            concepts.push(word.to_string());
            if concepts.len() == MAX_CONCEPTS {
                break;
            }
        }
    }

    concepts
}

const MULTIPLE_CHOICE_TEMPLATES: &[&str] = &[
    "What is {concept}?",
    "Which of the following best describes {concept}?",
    "What is the main purpose of {concept}?",
];

const FILL_IN_BLANK_TEMPLATES: &[&str] = &[
    "The concept discussed alongside this material is _____ ({concept}).",
    "The main advantage described here relates to _____ ({concept}).",
];

const SHORT_ANSWER_TEMPLATES: &[&str] = &[
    "Explain the concept of {concept}.",
    "Describe how {concept} works.",
    "What are the benefits of {concept}?",
];

const TRUE_FALSE_TEMPLATES: &[&str] = &[
    "{concept} is always better than its alternatives.",
    "{concept} can only be used in specific scenarios.",
];

fn templates_for(question_type: QuestionType) -> &'static [&'static str] {
    match question_type {
        QuestionType::MultipleChoice => MULTIPLE_CHOICE_TEMPLATES,
        QuestionType::FillInBlank => FILL_IN_BLANK_TEMPLATES,
        QuestionType::ShortAnswer => SHORT_ANSWER_TEMPLATES,
        QuestionType::TrueFalse => TRUE_FALSE_TEMPLATES,
    }
}

/// The template question generator.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    max_questions: usize,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self {
            max_questions: MAX_QUESTIONS_PER_REQUEST,
        }
    }
}

impl QuestionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator with a custom per-request question cap.
    pub fn with_max_questions(max_questions: usize) -> Self {
        Self { max_questions }
    }

    /// Generate questions for a material.
    ///
    /// The caller is responsible for resolving the material; unknown
    /// material ids are the service's concern.
    pub fn generate(
        &self,
        material: &Material,
        request: &GenerationRequest,
    ) -> Result<Vec<Question>, ServiceError> {
        let count = request.validated_count(self.max_questions)?;

        if !request.topics.is_empty()
            && !material
                .topics
                .iter()
                .any(|t| request.topics.iter().any(|f| f.eq_ignore_ascii_case(t)))
        {
            tracing::debug!(
                material = %material.id,
                "material matches none of the requested topics"
            );
            return Ok(Vec::new());
        }

        let concepts = extract_concepts(&material.content);
        if concepts.is_empty() {
            return Ok(Vec::new());
        }

        let types: &[QuestionType] = if request.question_types.is_empty() {
            &QuestionType::ALL
        } else {
            &request.question_types
        };
        let difficulty = request.difficulty.unwrap_or_default();

        let questions = (0..count)
            .map(|i| {
                let question_type = types[i % types.len()];
                let concept = &concepts[i % concepts.len()];
                let templates = templates_for(question_type);
                let template = templates[(i / types.len()) % templates.len()];
                let prompt = template.replace("{concept}", concept);

                match question_type {
                    QuestionType::MultipleChoice => {
                        self.multiple_choice(material, &prompt, concept, difficulty)
                    }
                    QuestionType::TrueFalse => {
                        // Alternate true and false statements.
                        self.true_false(material, &prompt, concept, difficulty, i % 2 == 0)
                    }
                    QuestionType::FillInBlank => {
                        self.fill_in_blank(material, &prompt, concept, difficulty)
                    }
                    QuestionType::ShortAnswer => {
                        self.short_answer(material, &prompt, concept, difficulty)
                    }
                }
            })
            .collect();

        tracing::info!(
            material = %material.id,
            count,
            "generated questions"
        );

        Ok(questions)
    }

    fn base_question(
        &self,
        material: &Material,
        question_type: QuestionType,
        difficulty: Difficulty,
        prompt: &str,
        concept: &str,
    ) -> Question {
        Question {
            id: Uuid::new_v4().to_string(),
            material_id: material.id.clone(),
            question_type,
            difficulty,
            prompt: prompt.to_string(),
            options: vec![],
            correct_answer: String::new(),
            explanation: String::new(),
            context: material.title.clone(),
            topics: vec![concept.to_string()],
        }
    }

    fn multiple_choice(
        &self,
        material: &Material,
        prompt: &str,
        concept: &str,
        difficulty: Difficulty,
    ) -> Question {
        let correct = format!("A concept related to {concept}");
        let mut question =
            self.base_question(material, QuestionType::MultipleChoice, difficulty, prompt, concept);
        question.options = vec![
            QuestionOption {
                id: "A".into(),
                text: correct.clone(),
                is_correct: true,
            },
            QuestionOption {
                id: "B".into(),
                text: format!("A concept unrelated to {concept}"),
                is_correct: false,
            },
            QuestionOption {
                id: "C".into(),
                text: format!("A different approach than {concept}"),
                is_correct: false,
            },
            QuestionOption {
                id: "D".into(),
                text: format!("The opposite of {concept}"),
                is_correct: false,
            },
        ];
        question.correct_answer = correct;
        question.explanation = format!("This question tests understanding of {concept}.");
        question
    }

    fn true_false(
        &self,
        material: &Material,
        prompt: &str,
        concept: &str,
        difficulty: Difficulty,
        is_true: bool,
    ) -> Question {
        let mut question =
            self.base_question(material, QuestionType::TrueFalse, difficulty, prompt, concept);
        question.correct_answer = if is_true { "true" } else { "false" }.to_string();
        question.explanation = format!(
            "This statement about {concept} is {}.",
            if is_true { "true" } else { "false" }
        );
        question
    }

    fn fill_in_blank(
        &self,
        material: &Material,
        prompt: &str,
        concept: &str,
        difficulty: Difficulty,
    ) -> Question {
        let mut question =
            self.base_question(material, QuestionType::FillInBlank, difficulty, prompt, concept);
        question.correct_answer = concept.to_string();
        question.explanation = format!("The answer relates to the concept of {concept}.");
        question
    }

    fn short_answer(
        &self,
        material: &Material,
        prompt: &str,
        concept: &str,
        difficulty: Difficulty,
    ) -> Question {
        let mut question =
            self.base_question(material, QuestionType::ShortAnswer, difficulty, prompt, concept);
        question.correct_answer =
            format!("A detailed explanation of {concept} and its applications");
        question.explanation =
            format!("This question requires a comprehensive understanding of {concept}.");
        question
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> Material {
        Material {
            id: "cpu-architecture".into(),
            title: "CPU Architecture".into(),
            description: String::new(),
            topics: vec!["cpu".into(), "hardware".into()],
            content: "Processors execute instructions through pipelines. Caches reduce \
                      memory latency. Branch prediction keeps pipelines full."
                .into(),
            difficulty: 0.5,
        }
    }

    #[test]
    fn concepts_skip_stop_words_and_short_words() {
        let concepts = extract_concepts("the quick brown fox jumps over a lazy dog");
        // Only words longer than 4 alphabetic chars, no stop words.
        assert_eq!(concepts, vec!["quick", "brown", "jumps"]);
    }

    #[test]
    fn concepts_are_unique_and_capped() {
        let content = "alpha alpha bravo bravo ".repeat(3)
            + "charl delta echoo fooox golfy hotel india julie kiloo limaa miked";
        let concepts = extract_concepts(&content);
        assert_eq!(concepts.len(), MAX_CONCEPTS);
        assert_eq!(concepts[0], "alpha");
        assert_eq!(concepts[1], "bravo");
    }

    #[test]
    fn generates_requested_count() {
        let generator = QuestionGenerator::new();
        let mut request = GenerationRequest::new("cpu-architecture");
        request.count = 8;

        let questions = generator.generate(&material(), &request).unwrap();
        assert_eq!(questions.len(), 8);
        // Cycles through all four types.
        for qt in QuestionType::ALL {
            assert!(questions.iter().any(|q| q.question_type == qt));
        }
        // Generated ids are unique.
        let ids: std::collections::HashSet<_> = questions.iter().map(|q| &q.id).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn generation_is_deterministic_apart_from_ids() {
        let generator = QuestionGenerator::new();
        let request = GenerationRequest::new("cpu-architecture");

        let a = generator.generate(&material(), &request).unwrap();
        let b = generator.generate(&material(), &request).unwrap();
        let prompts_a: Vec<_> = a.iter().map(|q| &q.prompt).collect();
        let prompts_b: Vec<_> = b.iter().map(|q| &q.prompt).collect();
        assert_eq!(prompts_a, prompts_b);
    }

    #[test]
    fn type_filter_is_honored() {
        let generator = QuestionGenerator::new();
        let mut request = GenerationRequest::new("cpu-architecture");
        request.question_types = vec![QuestionType::TrueFalse];
        request.count = 4;

        let questions = generator.generate(&material(), &request).unwrap();
        assert!(questions
            .iter()
            .all(|q| q.question_type == QuestionType::TrueFalse));
        // Statements alternate between true and false.
        assert!(questions.iter().any(|q| q.correct_answer == "true"));
        assert!(questions.iter().any(|q| q.correct_answer == "false"));
    }

    #[test]
    fn topic_filter_excludes_unrelated_material() {
        let generator = QuestionGenerator::new();
        let mut request = GenerationRequest::new("cpu-architecture");
        request.topics = vec!["botany".into()];

        let questions = generator.generate(&material(), &request).unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn count_out_of_range_is_rejected() {
        let generator = QuestionGenerator::new();
        let mut request = GenerationRequest::new("cpu-architecture");
        request.count = 0;
        assert!(generator.generate(&material(), &request).is_err());

        request.count = 21;
        let err = generator.generate(&material(), &request).unwrap_err();
        assert!(err.to_string().contains("between 1 and 20"));
    }

    #[test]
    fn configured_cap_is_enforced() {
        let generator = QuestionGenerator::with_max_questions(2);
        let mut request = GenerationRequest::new("cpu-architecture");
        request.count = 2;
        assert_eq!(generator.generate(&material(), &request).unwrap().len(), 2);

        request.count = 3;
        let err = generator.generate(&material(), &request).unwrap_err();
        assert!(err.to_string().contains("between 1 and 2"));
    }

    #[test]
    fn multiple_choice_marks_matching_option() {
        let generator = QuestionGenerator::new();
        let mut request = GenerationRequest::new("cpu-architecture");
        request.question_types = vec![QuestionType::MultipleChoice];
        request.count = 1;

        let questions = generator.generate(&material(), &request).unwrap();
        let q = &questions[0];
        let correct = q.options.iter().find(|o| o.is_correct).unwrap();
        assert_eq!(correct.text, q.correct_answer);
        assert_eq!(q.options.len(), 4);
    }
}
