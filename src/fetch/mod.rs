//! Locating and downloading earnings call transcripts
//!
//! Searches DuckDuckGo for a transcript page, downloads the first hit,
//! and extracts the readable article text.

mod extract;
mod search;

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::Settings;
use crate::storage::Quarter;

pub use search::{build_fallback_query, build_transcript_query};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Could not find any relevant links for {0}")]
    NoResults(String),

    #[error("No readable text found at {0}")]
    EmptyPage(String),
}

/// Finds and downloads transcript text for a reporting period.
pub struct ReportFetcher {
    http: Client,
    site_filter: String,
    max_results: usize,
}

impl ReportFetcher {
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(&settings.search.user_agent)
            .timeout(Duration::from_secs(settings.search.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            site_filter: settings.search.site_filter.clone(),
            max_results: settings.search.max_results,
        })
    }

    /// Search for the transcript and return its extracted text.
    pub async fn find_and_download(
        &self,
        company: &str,
        quarter: Quarter,
        year: i32,
    ) -> Result<String, FetchError> {
        let query = build_transcript_query(company, quarter, year, &self.site_filter);
        tracing::info!("Searching online with query: {}", query);

        let mut links = self.search(&query).await?;

        if links.is_empty() {
            tracing::info!("No search results found, trying a broader search");
            let fallback = build_fallback_query(company, quarter, year);
            links = self.search(&fallback).await?;
        }

        let report_url = links
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NoResults(format!("{} {} {}", company, quarter, year)))?;

        tracing::info!("Found potential report link: {}", report_url);

        let html = self.download(&report_url).await?;

        extract::extract_article_text(&html).ok_or(FetchError::EmptyPage(report_url))
    }

    async fn search(&self, query: &str) -> Result<Vec<String>, FetchError> {
        let url = search::results_url(query);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        Ok(search::parse_result_links(&body, self.max_results))
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        tracing::info!("Downloading report from: {}", url);

        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
