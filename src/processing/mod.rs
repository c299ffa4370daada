//! Lexical scoring engine: extraction, scoring, recommendations and profile copy

pub mod analyzer;
pub mod ats_matcher;
pub mod critical;
pub mod linkedin;
pub mod recommendations;
pub mod text_processor;
pub mod vocabulary;
