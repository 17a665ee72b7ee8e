//! Section-by-section summarization of a full report

use anyhow::Result;

use crate::config::Settings;
use crate::llm::client::{build_provider, LlmProvider};
use crate::transcript::split_into_sections;

/// Drives per-section summaries and assembles the final report summary.
pub struct SectionSummarizer {
    provider: Box<dyn LlmProvider>,
    max_section_chars: usize,
}

impl SectionSummarizer {
    pub fn new(provider: Box<dyn LlmProvider>, max_section_chars: usize) -> Self {
        Self {
            provider,
            max_section_chars,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            build_provider(settings)?,
            settings.llm.max_section_chars,
        ))
    }

    /// Summarize every section of the report and join the results.
    ///
    /// A section that fails to summarize is reported inline; it never
    /// aborts the remaining sections.
    pub async fn summarize_report(&self, report_text: &str) -> Result<String> {
        let sections = split_into_sections(report_text);

        if sections.is_empty() || (sections.len() == 1 && sections[0].trim().is_empty()) {
            anyhow::bail!("Report text is too short or has no identifiable sections");
        }

        let mut blocks: Vec<String> = Vec::new();

        for (i, section) in sections.iter().enumerate() {
            let label = i + 1;

            if section.trim().is_empty() {
                blocks.push(format!("--- Section {} (empty) ---", label));
                continue;
            }

            let request_text = truncate_section(section, self.max_section_chars);

            tracing::info!("Requesting summary for section {}", label);
            match self.provider.summarize_section(&request_text).await {
                Ok(summary) => {
                    blocks.push(format!("--- Section {} Summary ---", label));
                    blocks.push(summary);
                }
                Err(e) => {
                    tracing::warn!("Failed to summarize section {}: {:#}", label, e);
                    blocks.push(format!("--- Section {} Error ---", label));
                    blocks.push(format!(
                        "Could not summarize section {}: {}...",
                        label,
                        section_preview(section)
                    ));
                }
            }
        }

        Ok(blocks.join("\n\n"))
    }
}

/// Cap section text at `max_chars` characters, marking the cut.
fn truncate_section(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            format!("{}\n[Section truncated due to length]", &text[..byte_idx])
        }
        None => text.to_string(),
    }
}

fn section_preview(text: &str) -> String {
    text.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Provider that records requests and fails on chosen calls.
    struct ScriptedProvider {
        fail_on: Option<usize>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedProvider {
        fn new(fail_on: Option<usize>) -> (Self, Arc<Mutex<Vec<String>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    fail_on,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn summarize_section(&self, section_text: &str) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(section_text.to_string());

            if self.fail_on == Some(index) {
                anyhow::bail!("model unavailable");
            }
            Ok(format!("summary of call {}", index + 1))
        }
    }

    fn summarizer(fail_on: Option<usize>, cap: usize) -> (SectionSummarizer, Arc<Mutex<Vec<String>>>) {
        let (provider, calls) = ScriptedProvider::new(fail_on);
        (SectionSummarizer::new(Box::new(provider), cap), calls)
    }

    const REPORT: &str = "Intro paragraph.\n\
Financial Results\nRevenue was $10M.\n\
Outlook\nWe expect growth.";

    #[test]
    fn summarizes_each_section_with_labels() {
        let (summarizer, _) = summarizer(None, 15000);

        let summary = tokio_test::block_on(summarizer.summarize_report(REPORT)).unwrap();

        assert!(summary.contains("--- Section 1 Summary ---"));
        assert!(summary.contains("--- Section 2 Summary ---"));
        assert!(summary.contains("--- Section 3 Summary ---"));
        assert!(summary.contains("summary of call 1"));
        assert!(summary.contains("summary of call 3"));
    }

    #[test]
    fn failed_section_is_reported_and_rest_continue() {
        let (summarizer, _) = summarizer(Some(1), 15000);

        let summary = tokio_test::block_on(summarizer.summarize_report(REPORT)).unwrap();

        assert!(summary.contains("--- Section 1 Summary ---"));
        assert!(summary.contains("--- Section 2 Error ---"));
        assert!(summary.contains("Could not summarize section 2: Financial Results"));
        assert!(summary.ends_with("summary of call 3"));
    }

    #[test]
    fn error_line_keeps_a_short_preview() {
        let long_line = format!("Financial Results {}", "x".repeat(200));
        let (summarizer, _) = summarizer(Some(0), 15000);

        let summary = tokio_test::block_on(summarizer.summarize_report(&long_line)).unwrap();

        let expected: String = long_line.chars().take(50).collect();
        assert!(summary.contains(&format!("Could not summarize section 1: {}...", expected)));
    }

    #[test]
    fn empty_report_is_rejected() {
        let (summarizer, calls) = summarizer(None, 15000);

        let err = tokio_test::block_on(summarizer.summarize_report("   \n  ")).unwrap_err();
        assert!(err.to_string().contains("no identifiable sections"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn long_sections_are_truncated_before_sending() {
        let report = format!("Financial Results\n{}", "y".repeat(120));
        let (summarizer, calls) = summarizer(None, 40);

        tokio_test::block_on(summarizer.summarize_report(&report)).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].ends_with("\n[Section truncated due to length]"));
        assert!(calls[0].starts_with("Financial Results\n"));
    }

    #[test]
    fn short_sections_are_sent_unchanged() {
        let (summarizer, calls) = summarizer(None, 15000);

        tokio_test::block_on(summarizer.summarize_report(REPORT)).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], "Financial Results\nRevenue was $10M.");
    }

    #[test]
    fn truncation_cuts_at_char_boundary() {
        let text = "héllo wörld, this goes on for a while";
        let truncated = truncate_section(text, 10);
        assert!(truncated.ends_with("\n[Section truncated due to length]"));
        assert!(truncated.starts_with("héllo wörl"));

        let untouched = truncate_section("short", 10);
        assert_eq!(untouched, "short");
    }
}
