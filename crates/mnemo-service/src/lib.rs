//! mnemo-service — The learning-service seam and its in-memory
//! implementation.

pub mod config;
pub mod fixtures;
pub mod service;

pub use service::{LearningService, MockLearningService, ReviewSnapshot};
