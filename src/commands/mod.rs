//! Command handlers.

pub mod summarize;
