// src/services/mod.rs

pub mod analytics;
pub mod attempt;
pub mod scorecard;
pub mod scoring;
