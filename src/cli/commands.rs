//! CLI command implementations

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::fetch::ReportFetcher;
use crate::llm::SectionSummarizer;
use crate::storage::{Database, Quarter};
use crate::transcript::split_into_sections;

/// Fetch (or reuse) a transcript and produce an AI summary
pub async fn summarize_report(
    settings: &Settings,
    company: &str,
    quarter: Quarter,
    year: i32,
    refresh: bool,
) -> Result<()> {
    let db = Database::open(settings)?;

    let cached = db.get_report(company, quarter, year)?;

    if let Some(report) = &cached {
        if !refresh {
            if let Some(summary) = db.get_summary(report.id)? {
                println!("Cached summary for {} {} {}:", company, quarter, year);
                println!();
                println!("{}", summary.text);
                println!();
                println!("(use --refresh to generate a new summary)");
                return Ok(());
            }
        }
    }

    let (report_id, report_text) = match cached {
        Some(report) => {
            println!(
                "Using cached transcript from {}",
                report.created_at.format("%Y-%m-%d")
            );
            (report.id, report.text)
        }
        None => {
            let fetcher = ReportFetcher::from_settings(settings)?;
            let text = fetcher.find_and_download(company, quarter, year).await?;
            println!(
                "Fetched transcript for {} {} {} ({} characters)",
                company,
                quarter,
                year,
                text.chars().count()
            );

            let id = db
                .insert_report(company, quarter, year, &text)?
                .context("A transcript for this period is already cached")?;
            (id, text)
        }
    };

    let summarizer = SectionSummarizer::from_settings(settings)?;
    let summary = summarizer.summarize_report(&report_text).await?;

    let model = settings.llm.model.trim();
    let model = if model.is_empty() { None } else { Some(model) };
    db.insert_summary(report_id, &summary, model)?;

    println!("Summary saved for {} {} {}:", company, quarter, year);
    println!();
    println!("{}", summary);

    Ok(())
}

/// Import a transcript into the cache from a local file
pub async fn import_report(
    settings: &Settings,
    company: &str,
    quarter: Quarter,
    year: i32,
    file: &Path,
    force: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read transcript file: {}", file.display()))?;

    if text.trim().is_empty() {
        anyhow::bail!("Transcript file is empty: {}", file.display());
    }

    let db = Database::open(settings)?;

    if force {
        db.delete_report(company, quarter, year)?;
    }

    match db.insert_report(company, quarter, year, &text)? {
        Some(_) => {
            println!(
                "Imported transcript for {} {} {} ({} characters)",
                company,
                quarter,
                year,
                text.chars().count()
            );
        }
        None => {
            anyhow::bail!(
                "A transcript for {} {} {} already exists. Use --force to replace it.",
                company,
                quarter,
                year
            );
        }
    }

    Ok(())
}

/// Split a local transcript into sections and print them
pub fn split_sections(file: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read transcript file: {}", file.display()))?;

    let sections = split_into_sections(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    if sections.is_empty() {
        println!("No sections found");
        return Ok(());
    }

    println!("Found {} sections", sections.len());

    for (i, section) in sections.iter().enumerate() {
        println!();
        println!("== Section {} ==", i + 1);
        println!("{}", section);
    }

    Ok(())
}

/// Show a cached report and its newest summary
pub async fn show_report(
    settings: &Settings,
    company: &str,
    quarter: Quarter,
    year: i32,
    transcript: bool,
) -> Result<()> {
    let db = Database::open(settings)?;

    let report = db
        .get_report(company, quarter, year)?
        .with_context(|| format!("No cached report for {} {} {}", company, quarter, year))?;

    println!("Company: {}", report.company);
    println!("Period: {} {}", report.quarter, report.year);
    println!("Fetched: {}", report.created_at.format("%Y-%m-%d %H:%M"));
    println!("Length: {} characters", report.text.chars().count());

    match db.get_summary(report.id)? {
        Some(summary) => {
            println!();
            if let Some(model) = summary.model.as_deref() {
                println!("Summary ({}):", model);
            } else {
                println!("Summary:");
            }
            println!("{}", summary.text);
        }
        None => {
            println!();
            println!("(No summary generated yet)");
        }
    }

    if transcript {
        println!();
        println!("Transcript:");
        println!("{}", report.text);
    }

    Ok(())
}

/// List cached reports
pub async fn list_reports(
    settings: &Settings,
    limit: usize,
    search: Option<String>,
) -> Result<()> {
    let db = Database::open(settings)?;

    let reports = if let Some(query) = search {
        db.search_reports(&query, limit)?
    } else {
        db.list_reports(limit)?
    };

    if reports.is_empty() {
        println!("No reports found");
        return Ok(());
    }

    println!(
        "{:<28} {:<8} {:<12} {:<8}",
        "Company", "Period", "Fetched", "Summary"
    );
    println!("{}", "-".repeat(58));

    for report in reports {
        let period = format!("{} {}", report.quarter, report.year);
        let date = report.created_at.format("%Y-%m-%d");
        println!(
            "{:<28} {:<8} {:<12} {:<8}",
            truncate(&report.company, 26),
            period,
            date,
            if report.has_summary { "yes" } else { "-" }
        );
    }

    Ok(())
}

/// Delete a cached report and its summaries
pub async fn delete_report(
    settings: &Settings,
    company: &str,
    quarter: Quarter,
    year: i32,
) -> Result<()> {
    let db = Database::open(settings)?;

    if db.delete_report(company, quarter, year)? {
        println!("Deleted report for {} {} {}", company, quarter, year);
    } else {
        anyhow::bail!("No cached report for {} {} {}", company, quarter, year);
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_names_alone() {
        assert_eq!(truncate("NVIDIA", 26), "NVIDIA");
    }

    #[test]
    fn truncate_marks_long_names() {
        let long = "International Business Machines Corporation";
        let out = truncate(long, 26);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 26);
    }
}
