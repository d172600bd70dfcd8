use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::Utc;
use mnemo_core::evaluate::evaluate_answer;
use mnemo_core::model::{Difficulty, Question, QuestionType};
use mnemo_core::schedule::{adjusted_confidence, estimate_next_review};

fn make_question(question_type: QuestionType, correct_answer: &str) -> Question {
    Question {
        id: "bench".into(),
        material_id: "bench-material".into(),
        question_type,
        difficulty: Difficulty::Medium,
        prompt: "prompt".into(),
        options: vec![],
        correct_answer: correct_answer.into(),
        explanation: String::new(),
        context: String::new(),
        topics: vec![],
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_answer");

    let mc = make_question(QuestionType::MultipleChoice, "Assembly-based");
    group.bench_function("multiple_choice", |b| {
        b.iter(|| evaluate_answer(black_box(&mc), black_box("assembly-based")))
    });

    let sa = make_question(
        QuestionType::ShortAnswer,
        "ownership tracks which variable owns each value and frees memory \
         deterministically when the owner goes out of scope",
    );
    group.bench_function("short_answer", |b| {
        b.iter(|| {
            evaluate_answer(
                black_box(&sa),
                black_box("the owner of a value frees its memory when it leaves scope"),
            )
        })
    });

    group.finish();
}

fn bench_estimator(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator");
    let now = Utc::now();

    group.bench_function("adjusted_confidence", |b| {
        b.iter(|| adjusted_confidence(black_box(4), black_box(true)))
    });

    group.bench_function("next_review", |b| {
        b.iter(|| estimate_next_review(black_box(now), black_box(true), black_box(0.9)))
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_estimator);
criterion_main!(benches);
