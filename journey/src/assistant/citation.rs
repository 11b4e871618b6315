use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::corpus::ConversationCorpus;

fn source_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(Source:\s*([^)]*)\)").expect("valid source pattern"))
}

fn week_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bweeks?\s+(\d+)").expect("valid week pattern"))
}

/// Weeks named in `(Source: Week 8, Week 9)` markers, ascending and unique.
pub fn extract_cited_weeks(text: &str) -> Vec<u32> {
    let weeks: BTreeSet<u32> = source_pattern()
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .flat_map(|list| week_pattern().captures_iter(list.as_str()))
        .filter_map(|cap| cap.get(1)?.as_str().parse().ok())
        .collect();
    weeks.into_iter().collect()
}

/// Drop cited weeks that have no text in the corpus.
pub fn validate_citations(weeks: Vec<u32>, corpus: &ConversationCorpus) -> Vec<u32> {
    weeks
        .into_iter()
        .filter(|week| {
            let known = corpus.contains_week(*week);
            if !known {
                tracing::warn!(week, "Citation references a week without conversation text, removed");
            }
            known
        })
        .collect()
}

/// Whether `text` is the fixed refusal sentence (surrounding whitespace and a
/// trailing source marker are tolerated).
pub fn is_refusal(text: &str, refusal: &str) -> bool {
    let text = text.trim();
    text == refusal || text.starts_with(refusal)
}
