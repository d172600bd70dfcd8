//! Built-in demo materials and questions.
//!
//! These seed the in-memory service so the CLI works out of the box
//! without authoring a bank first.

use mnemo_core::model::{Difficulty, Material, Question, QuestionOption, QuestionType};

/// The demo materials.
pub fn demo_materials() -> Vec<Material> {
    vec![
        Material {
            id: "cpu-architecture".into(),
            title: "CPU Architecture".into(),
            description: "How processors execute programs".into(),
            topics: vec!["cpu".into(), "hardware".into()],
            content: "Early microprocessors exposed an assembly-based programming model \
                      where every instruction mapped directly onto processor operations. \
                      Modern designs add pipelines, caches, and branch prediction to keep \
                      execution units busy while hiding memory latency."
                .into(),
            difficulty: 0.6,
        },
        Material {
            id: "rust-ownership".into(),
            title: "Rust Ownership".into(),
            description: "Memory safety without garbage collection".into(),
            topics: vec!["rust".into(), "memory".into()],
            content: "Ownership tracks which variable owns each value. When the owner \
                      goes out of scope the value is dropped and its memory freed \
                      deterministically. Borrowing grants temporary access without \
                      transferring ownership, checked at compile time."
                .into(),
            difficulty: 0.5,
        },
        Material {
            id: "spaced-repetition".into(),
            title: "Spaced Repetition".into(),
            description: "Scheduling reviews to fight forgetting".into(),
            topics: vec!["learning".into(), "memory".into()],
            content: "Spaced repetition schedules reviews at growing intervals, timed \
                      just before material would otherwise be forgotten. Each successful \
                      recall strengthens retention and pushes the next review further out."
                .into(),
            difficulty: 0.4,
        },
    ]
}

/// The seeded demo questions.
pub fn demo_questions() -> Vec<Question> {
    vec![
        Question {
            id: "cpu-1".into(),
            material_id: "cpu-architecture".into(),
            question_type: QuestionType::MultipleChoice,
            difficulty: Difficulty::Medium,
            prompt: "Which programming model did early microprocessors expose?".into(),
            options: vec![
                QuestionOption {
                    id: "A".into(),
                    text: "Assembly-based".into(),
                    is_correct: true,
                },
                QuestionOption {
                    id: "B".into(),
                    text: "Object-oriented".into(),
                    is_correct: false,
                },
                QuestionOption {
                    id: "C".into(),
                    text: "Declarative".into(),
                    is_correct: false,
                },
                QuestionOption {
                    id: "D".into(),
                    text: "Garbage-collected".into(),
                    is_correct: false,
                },
            ],
            correct_answer: "Assembly-based".into(),
            explanation: "Early CPUs were programmed directly against their instruction set."
                .into(),
            context: "CPU Architecture".into(),
            topics: vec!["cpu".into(), "history".into()],
        },
        Question {
            id: "cpu-2".into(),
            material_id: "cpu-architecture".into(),
            question_type: QuestionType::TrueFalse,
            difficulty: Difficulty::Easy,
            prompt: "A CPU cache is slower than main memory.".into(),
            options: vec![],
            correct_answer: "false".into(),
            explanation: "Caches exist precisely because they are faster than main memory."
                .into(),
            context: "CPU Architecture".into(),
            topics: vec!["cpu".into(), "memory".into()],
        },
        Question {
            id: "rust-1".into(),
            material_id: "rust-ownership".into(),
            question_type: QuestionType::FillInBlank,
            difficulty: Difficulty::Medium,
            prompt: "When a value's owner goes out of scope, the value is _____.".into(),
            options: vec![],
            correct_answer: "dropped".into(),
            explanation: "Drop runs deterministically at end of scope.".into(),
            context: "Rust Ownership".into(),
            topics: vec!["rust".into(), "memory".into()],
        },
        Question {
            id: "rust-2".into(),
            material_id: "rust-ownership".into(),
            question_type: QuestionType::ShortAnswer,
            difficulty: Difficulty::Hard,
            prompt: "Explain what ownership tracks and why it matters.".into(),
            options: vec![],
            correct_answer: "ownership tracks which variable owns each value so memory \
                             is freed deterministically without garbage collection"
                .into(),
            explanation: "One owner per value; dropping the owner frees the memory.".into(),
            context: "Rust Ownership".into(),
            topics: vec!["rust".into(), "memory".into()],
        },
        Question {
            id: "sr-1".into(),
            material_id: "spaced-repetition".into(),
            question_type: QuestionType::TrueFalse,
            difficulty: Difficulty::Easy,
            prompt: "Spaced repetition shortens the interval after every successful recall."
                .into(),
            options: vec![],
            correct_answer: "false".into(),
            explanation: "Successful recalls push the next review further out.".into(),
            context: "Spaced Repetition".into(),
            topics: vec!["learning".into()],
        },
    ]
}
