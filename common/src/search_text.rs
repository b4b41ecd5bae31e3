//! Search text as typed (draft) and as sent (committed).

use serde::{Deserialize, Serialize};

use crate::archive_config::SearchDiscipline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A keystroke; `now_ms` is the caller's clock.
    Input { text: String, now_ms: u64 },
    Submit,
    Tick { now_ms: u64 },
    Clear,
    /// Both phases set at once, e.g. from the URL.
    Restore(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchText {
    draft: String,
    committed: String,
    deadline_ms: Option<u64>,
}

impl SearchText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { draft: text.clone(), committed: text, deadline_ms: None }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// When a debounced draft is due to commit.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }

    /// The committed text trimmed, or `None` when it is shorter than `min_len` characters.
    pub fn effective(&self, min_len: usize) -> Option<&str> {
        let trimmed = self.committed.trim();
        if trimmed.is_empty() || trimmed.chars().count() < min_len {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Pure transition. The committed text only ever changes here.
    pub fn apply(&self, event: SearchEvent, discipline: SearchDiscipline) -> SearchText {
        let mut next = self.clone();
        match event {
            SearchEvent::Input { text, now_ms } => {
                next.draft = text;
                next.deadline_ms = match discipline {
                    SearchDiscipline::Debounce { delay_ms } if next.draft != next.committed => {
                        Some(now_ms.saturating_add(delay_ms))
                    }
                    _ => None,
                };
            }
            SearchEvent::Submit => {
                next.committed = next.draft.clone();
                next.deadline_ms = None;
            }
            SearchEvent::Tick { now_ms } => {
                if let Some(deadline) = next.deadline_ms {
                    if now_ms >= deadline {
                        next.committed = next.draft.clone();
                        next.deadline_ms = None;
                    }
                }
            }
            SearchEvent::Clear => {
                next = SearchText::default();
            }
            SearchEvent::Restore(text) => {
                next = SearchText::new(text);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEBOUNCE: SearchDiscipline = SearchDiscipline::Debounce { delay_ms: 300 };

    fn input(text: &str, now_ms: u64) -> SearchEvent {
        SearchEvent::Input { text: text.to_string(), now_ms }
    }

    #[test]
    fn submit_discipline_waits_for_submit() {
        let s = SearchText::default().apply(input("metal", 0), SearchDiscipline::Submit);
        let s = s.apply(SearchEvent::Tick { now_ms: 10_000 }, SearchDiscipline::Submit);
        assert_eq!(s.committed(), "");
        assert!(s.is_dirty());
        let s = s.apply(SearchEvent::Submit, SearchDiscipline::Submit);
        assert_eq!(s.committed(), "metal");
    }

    #[test]
    fn debounce_commits_after_quiet_period() {
        let s = SearchText::default().apply(input("me", 0), DEBOUNCE);
        let s = s.apply(input("metal", 200), DEBOUNCE);
        // the first deadline (300) was pushed back by the second keystroke
        let s = s.apply(SearchEvent::Tick { now_ms: 300 }, DEBOUNCE);
        assert_eq!(s.committed(), "");
        let s = s.apply(SearchEvent::Tick { now_ms: 500 }, DEBOUNCE);
        assert_eq!(s.committed(), "metal");
        assert_eq!(s.deadline_ms(), None);
    }

    #[test]
    fn typing_back_to_the_committed_text_disarms() {
        let s = SearchText::new("tile").apply(input("til", 0), DEBOUNCE);
        let s = s.apply(input("tile", 50), DEBOUNCE);
        assert_eq!(s.deadline_ms(), None);
    }

    #[test]
    fn clear_empties_both_phases() {
        let s = SearchText::new("gutters").apply(input("gutter", 0), DEBOUNCE);
        let s = s.apply(SearchEvent::Clear, DEBOUNCE);
        assert_eq!(s, SearchText::default());
    }

    #[test]
    fn short_text_is_not_effective() {
        assert_eq!(SearchText::new("a").effective(2), None);
        assert_eq!(SearchText::new(" ab ").effective(2), Some("ab"));
        assert_eq!(SearchText::new("   ").effective(2), None);
        // counted in characters, not bytes
        assert_eq!(SearchText::new("é").effective(2), None);
    }
}
