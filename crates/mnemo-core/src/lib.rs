//! mnemo-core — Data model, answer evaluation, and review scheduling.
//!
//! This crate defines the fundamental types, the per-question-type answer
//! evaluator, and the spaced-repetition scheduling logic that the rest of
//! the mnemo system builds on.

pub mod bank;
pub mod error;
pub mod evaluate;
pub mod generate;
pub mod model;
pub mod report;
pub mod schedule;
pub mod session;
pub mod statistics;
