//! The `mnemo init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mnemo.toml").exists() {
        println!("mnemo.toml already exists, skipping.");
    } else {
        std::fs::write("mnemo.toml", SAMPLE_CONFIG)?;
        println!("Created mnemo.toml");
    }

    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/example.toml or add your own banks");
    println!("  2. Run: mnemo validate --bank banks/example.toml");
    println!("  3. Run: mnemo drill --bank banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mnemo configuration

simulated_latency_ms = 300
default_question_count = 5
max_questions_per_request = 20
max_items_per_day = 20
bank_dir = "./banks"
session_dir = "./mnemo-sessions"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A small bank to get started"
default_difficulty = "medium"

[[questions]]
id = "example-1"
type = "multiple_choice"
prompt = "Which data structure gives O(1) average-case lookup by key?"
correct_answer = "Hash map"
explanation = "Hash maps bucket entries by a hash of the key."
topics = ["data-structures"]

[[questions.options]]
id = "A"
text = "Hash map"
is_correct = true

[[questions.options]]
id = "B"
text = "Linked list"

[[questions.options]]
id = "C"
text = "Binary heap"

[[questions]]
id = "example-2"
type = "true_false"
difficulty = "easy"
prompt = "Binary search requires a sorted input."
correct_answer = "true"
explanation = "Binary search halves the range by comparing against the midpoint."
topics = ["algorithms"]

[[questions]]
id = "example-3"
type = "fill_in_blank"
prompt = "A queue processes elements in _____ order."
correct_answer = "FIFO"
topics = ["data-structures"]

[[questions]]
id = "example-4"
type = "short_answer"
difficulty = "hard"
prompt = "Explain why quicksort degrades to quadratic time in the worst case."
correct_answer = "poor pivot choices split the array unevenly leaving nearly every element in one partition"
topics = ["algorithms", "sorting"]
"#;
