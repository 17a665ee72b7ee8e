//! earnest - A CLI tool that finds, caches, and summarizes quarterly earnings call transcripts
//!
//! "earnest" is a playful take on "earnings"

pub mod cli;
pub mod config;
pub mod fetch;
pub mod llm;
pub mod storage;
pub mod transcript;
