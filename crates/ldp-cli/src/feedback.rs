//! Feedback text parsing.
//!
//! The feedback export is unstructured text; each rated entry has the form
//!
//! ```text
//! - <Branch name> Branch ~ <digit>⭐
//! ```
//!
//! Entries that do not match are skipped rather than failing the stage.

use std::collections::BTreeMap;

/// One parsed feedback rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub branch: String,
    pub rating: u8,
}

/// Count the `Feedback #` headers, one per submitted feedback.
pub fn count_feedback_headers(lines: &[String]) -> usize {
    lines.iter().filter(|line| line.contains("Feedback #")).count()
}

/// Parse the rated branch entries out of the feedback lines.
pub fn parse_feedback_lines(lines: &[String]) -> Vec<FeedbackEntry> {
    lines.iter().filter_map(|line| parse_entry(line)).collect()
}

fn parse_entry(line: &str) -> Option<FeedbackEntry> {
    let rest = line.trim().strip_prefix("- ")?;
    let (branch_part, rating_part) = rest.split_once(" ~ ")?;

    let branch = branch_part.trim();
    if !branch.ends_with("Branch")
        || !branch
            .chars()
            .all(|ch| ch.is_ascii_alphabetic() || ch.is_whitespace())
    {
        return None;
    }

    let mut chars = rating_part.trim().chars();
    let digit = chars.next()?.to_digit(10)?;
    if chars.next() != Some('⭐') {
        return None;
    }

    Some(FeedbackEntry {
        branch: branch.to_string(),
        rating: digit as u8,
    })
}

/// Aggregate entries into (branch, rating) -> count, ordered by key.
pub fn summarize_entries(entries: &[FeedbackEntry]) -> BTreeMap<(String, u8), usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts
            .entry((entry.branch.clone(), entry.rating))
            .or_insert(0) += 1;
    }
    counts
}
