//! Sentence segmentation and filtering.
//!
//! Boundary detection is behind `SentenceSplitter` so a full NLP annotator can
//! be plugged in. Two splitters ship with the crate:
//! - `RuleBasedSplitter`: punctuation rules that keep decimals, initials and
//!   common newswire abbreviations together.
//! - `PeriodSplitter`: breaks at every `.`; cheap and lower quality.

use std::ops::Range;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Sentence;

lazy_static! {
    static ref NEWLINE_RE: Regex = Regex::new(r"\s*\n\s*").unwrap();
}

/// Maps text to ordered, non-overlapping byte spans, one per sentence.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<Range<usize>>;
}

/// Which built-in splitter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationStrategy {
    #[default]
    RuleBased,
    Period,
}

impl SegmentationStrategy {
    pub fn splitter(&self) -> Box<dyn SentenceSplitter> {
        match self {
            SegmentationStrategy::RuleBased => Box::new(RuleBasedSplitter::default()),
            SegmentationStrategy::Period => Box::new(PeriodSplitter),
        }
    }
}

/// Titles and month names; a period after one never ends a sentence.
const TITLES: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "St", "Gen", "Gov", "Sen", "Rep", "Lt", "Col",
    "Sgt", "Capt", "Rev", "No", "vs", "Jan", "Feb", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Abbreviations that can also close a sentence.
const TERMINAL_ABBREVIATIONS: &[&str] = &[
    "Jr", "Sr", "Inc", "Co", "Corp", "Ltd", "U.S", "U.N", "a.m", "p.m",
];

/// Words that open a new sentence when they follow an initial or a terminal
/// abbreviation.
const SENTENCE_STARTERS: &[&str] = &[
    "A", "An", "The", "This", "That", "These", "Those", "There", "Then", "But",
    "And", "So", "Yet", "He", "She", "It", "They", "We", "I", "You", "His", "Her",
    "Its", "Their", "Our", "In", "On", "At", "After", "Before", "When", "While",
    "If", "As",
];

/// Punctuation-driven splitter tuned for newswire.
///
/// A single capital letter or a terminal abbreviation (`p.m.`, `Inc.`) keeps
/// its period inside the sentence unless the next word is a common sentence
/// opener, so `George W. Bush` stays whole while `Plan B. Then` splits.
/// A boundary followed by a proper noun (`Plan B. Smith left.`) is still
/// missed.
#[derive(Debug, Clone)]
pub struct RuleBasedSplitter {
    titles: Vec<String>,
    terminal_abbreviations: Vec<String>,
    sentence_starters: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for RuleBasedSplitter {
    fn default() -> Self {
        Self {
            titles: owned(TITLES),
            terminal_abbreviations: owned(TERMINAL_ABBREVIATIONS),
            sentence_starters: owned(SENTENCE_STARTERS),
        }
    }
}

impl RuleBasedSplitter {
    /// True when the period at byte `dot` belongs to an abbreviation or an
    /// initial inside the sentence.
    fn is_inner_period(&self, text: &str, dot: usize) -> bool {
        let word = text[..dot]
            .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
            .next()
            .unwrap_or("");
        if self.titles.iter().any(|t| t == word) {
            return true;
        }

        let mut chars = word.chars();
        let single_initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase());
        let terminal_abbreviation = self.terminal_abbreviations.iter().any(|a| a == word);
        (single_initial || terminal_abbreviation) && !self.opens_sentence(&text[dot + 1..])
    }

    fn opens_sentence(&self, rest: &str) -> bool {
        let next = rest
            .trim_start_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
            .split(|c: char| !c.is_alphabetic())
            .next()
            .unwrap_or("");
        self.sentence_starters.iter().any(|s| s == next)
    }
}

impl SentenceSplitter for RuleBasedSplitter {
    fn split(&self, text: &str) -> Vec<Range<usize>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut spans = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, ch) = chars[i];
            if !matches!(ch, '.' | '!' | '?') {
                i += 1;
                continue;
            }

            if ch == '.' {
                let prev_digit = i > 0 && chars[i - 1].1.is_ascii_digit();
                let next_digit = chars.get(i + 1).is_some_and(|(_, c)| c.is_ascii_digit());
                if (prev_digit && next_digit) || self.is_inner_period(text, pos) {
                    i += 1;
                    continue;
                }
            }

            // Terminal punctuation run plus closing quotes/brackets
            let mut j = i + 1;
            while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?' | '"' | '\'' | ')' | ']') {
                j += 1;
            }

            if j == chars.len() || chars[j].1.is_whitespace() {
                let end = chars.get(j).map(|(p, _)| *p).unwrap_or(text.len());
                push_trimmed(&mut spans, text, start..end);
                start = end;
            }
            i = j;
        }

        push_trimmed(&mut spans, text, start..text.len());
        spans
    }
}

/// Splits on every literal `.`; the period stays with its sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodSplitter;

impl SentenceSplitter for PeriodSplitter {
    fn split(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut start = 0;
        for (pos, _) in text.match_indices('.') {
            push_trimmed(&mut spans, text, start..pos + 1);
            start = pos + 1;
        }
        push_trimmed(&mut spans, text, start..text.len());
        spans
    }
}

fn push_trimmed(spans: &mut Vec<Range<usize>>, text: &str, range: Range<usize>) {
    let slice = &text[range.clone()];
    let lead = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        let start = range.start + lead;
        spans.push(start..start + trimmed.len());
    }
}

/// Split `text` into sentences carrying the document's headline and date.
pub fn segment(
    text: &str,
    headline: &str,
    date: NaiveDate,
    splitter: &dyn SentenceSplitter,
) -> Vec<Sentence> {
    splitter
        .split(text)
        .into_iter()
        .filter_map(|span| text.get(span))
        .map(|raw| NEWLINE_RE.replace_all(raw, " ").trim().to_string())
        .filter(|s| !s.is_empty())
        .map(|s| Sentence::new(s, headline, date))
        .collect()
}

/// Drop short sentences, a leading byline and questions.
///
/// - fewer than `min_words` whitespace-separated words: dropped
/// - the first sentence long enough to keep: dropped if it ends in `-` or `_`
/// - any sentence ending in `?`: dropped
pub fn filter_sentences(sentences: &[Sentence], min_words: usize) -> Vec<&Sentence> {
    let mut kept = Vec::new();
    let mut first = true;

    for sentence in sentences {
        if sentence.word_count() < min_words {
            continue;
        }

        if first {
            first = false;
            if sentence.text.ends_with(['-', '_']) {
                continue;
            }
        }

        if sentence.text.ends_with('?') {
            continue;
        }

        kept.push(sentence);
    }

    kept
}
