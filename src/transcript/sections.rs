//! Section segmentation for earnings call transcripts.
//!
//! Transcripts published by financial news sites follow a loose convention
//! of headed sections ("Financial Results", "Outlook", "Q&A", ...). The
//! splitter partitions a raw transcript at those headers so each section
//! can be summarized independently, preserving the text of every section
//! byte-for-byte apart from the boundary trimming rules documented on
//! [`split_with_vocabulary`].

/// Section header phrases recognized in transcripts, in match order.
///
/// A line counts as a header when its whitespace-stripped content starts
/// with one of these phrases, compared case-insensitively. The comparison
/// is a prefix test, so "Financial Results for Q1 2023" is a header line.
pub const SECTION_HEADERS: [&str; 10] = [
    "Financial Results",
    "Management Discussion",
    "Outlook",
    "Key Highlights",
    "Q&A",
    "Conference Call",
    "Financial Statements",
    "Results of Operations",
    "Business Overview",
    "Risk Factors",
];

/// Split a transcript into sections at the standard header vocabulary.
///
/// See [`split_with_vocabulary`] for the exact boundary rules. Returns an
/// empty vector for empty or whitespace-only input, and a single section
/// holding the whole text when no header is found.
pub fn split_into_sections(report_text: &str) -> Vec<String> {
    split_with_vocabulary(report_text, &SECTION_HEADERS)
}

/// Split a transcript into sections at the given header vocabulary.
///
/// The text is scanned line by line (blank lines preserved as empty
/// entries). Every header line starts a new section that includes the
/// header line itself, verbatim. When a section is closed, the joined
/// block is trimmed: content before the first header loses whitespace at
/// both ends, while sections that start with a header lose only trailing
/// whitespace. Header indentation and trailing spaces inside a section
/// are deliberately kept; per-line trimming happens only for header
/// detection, never in the output. Sections that trim to nothing are
/// dropped, so the result never contains an empty string.
///
/// The function is total: any input, including pathological ones, maps to
/// a well-defined output without error.
pub fn split_with_vocabulary(report_text: &str, vocabulary: &[&str]) -> Vec<String> {
    let normalized: Vec<String> = vocabulary.iter().map(|h| h.to_lowercase()).collect();

    let mut sections: Vec<String> = Vec::new();
    let mut current_block: Vec<&str> = Vec::new();
    // False until the first header line has been taken into a block; the
    // flush rule for a block depends on the flag as it was when the block
    // was opened, so it is read before being set for the new header.
    let mut header_seen = false;

    for line in report_text.lines() {
        let stripped = line.trim();
        let is_header = !stripped.is_empty() && {
            let lowered = stripped.to_lowercase();
            normalized.iter().any(|h| lowered.starts_with(h.as_str()))
        };

        if is_header {
            if !current_block.is_empty() {
                flush_block(&mut sections, &current_block, header_seen);
                current_block.clear();
            }
            // The raw line, not the stripped one: indentation belongs to
            // the section.
            current_block.push(line);
            header_seen = true;
        } else {
            current_block.push(line);
        }
    }

    if !current_block.is_empty() {
        flush_block(&mut sections, &current_block, header_seen);
    }

    sections
}

/// Join a finished block and push it, applying the pre-header vs
/// post-header trimming asymmetry.
fn flush_block(sections: &mut Vec<String>, block: &[&str], header_seen: bool) {
    let joined = block.join("\n");
    let processed = if header_seen {
        joined.trim_end()
    } else {
        joined.trim()
    };
    if !processed.is_empty() {
        sections.push(processed.to_string());
    }
}
