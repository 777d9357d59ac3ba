use regex::Regex;
use std::collections::HashSet;

/// Words that never make useful free-text search terms: filler, the fixed
/// priority/category/status vocabulary (those drive structured conditions
/// instead), relative-date words, and count phrasing.
const STOP_WORDS: &[&str] = &[
    "show", "me", "all", "the", "tickets", "ticket", "with", "that", "are", "was", "is", "of",
    "for", "in", "and", "from", "how", "many", "count", "high", "medium", "low", "priority",
    "severity", "category", "status", "open", "closed", "resolved", "technical", "billing",
    "general", "today", "yesterday", "week", "month", "days", "this", "last",
];

/// Pulls lowercase search terms out of a question, dropping stop words.
/// Tokens are alphabetic runs of three or more characters; set semantics,
/// no ordering guarantee.
pub fn extract_text_keywords(question: &str) -> HashSet<String> {
    let word = Regex::new(r"[a-zA-Z]{3,}").unwrap();

    word.find_iter(question)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}
