use std::collections::BTreeMap;

use crate::store::RecordStore;

/// The assistant's evidence: conversation text keyed by week.
///
/// The whole corpus is placed in every prompt. This holds only while the
/// record stays small; a larger record needs a retrieval step in front of
/// [`ConversationCorpus::flatten`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationCorpus {
    member_name: String,
    entries: BTreeMap<u32, String>,
}

impl ConversationCorpus {
    pub fn new(member_name: impl Into<String>) -> Self {
        Self {
            member_name: member_name.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn from_store(store: &RecordStore) -> Self {
        store
            .conversations()
            .fold(Self::new(&store.member().name), |corpus, conversation| {
                corpus.with_entry(conversation.week, &conversation.rationale)
            })
    }

    /// Add or replace the text for `week`. Blank text is ignored.
    pub fn with_entry(mut self, week: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.entries.insert(week, text.trim().to_string());
        }
        self
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_week(&self, week: u32) -> bool {
        self.entries.contains_key(&week)
    }

    pub fn weeks(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// All entries in week order as one context block.
    pub fn flatten(&self) -> String {
        self.entries
            .iter()
            .map(|(week, text)| format!("Week {week}: {text}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_orders_by_week() {
        let corpus = ConversationCorpus::new("Rohan")
            .with_entry(11, "Probiotics added.")
            .with_entry(9, "Appendectomy recovery.")
            .with_entry(10, "   ");

        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus.flatten(),
            "Week 9: Appendectomy recovery.\n\nWeek 11: Probiotics added."
        );
        assert!(!corpus.contains_week(10));
    }

    #[test]
    fn builds_from_demo_record() {
        let store = RecordStore::demo().unwrap();
        let corpus = ConversationCorpus::from_store(&store);

        assert_eq!(corpus.member_name(), "Rohan");
        assert_eq!(
            corpus.weeks().collect::<Vec<_>>(),
            vec![8, 9, 11, 15, 18, 24, 26, 32]
        );
        assert!(corpus.flatten().starts_with("Week 8: "));
    }
}
