//! LLM integration for earnest
//!
//! Summarizes earnings reports section by section through the Gemini API.

mod client;
mod gemini;
mod prompts;
mod summarizer;

pub use client::{build_provider, LlmProvider};
pub use gemini::GeminiClient;
pub use summarizer::SectionSummarizer;
