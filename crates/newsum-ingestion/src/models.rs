//! Topic / document / sentence model produced by ingestion.

use chrono::NaiveDate;

use crate::segment::{filter_sentences, segment, SentenceSplitter};

/// Syntactic annotation attached by a downstream NLP step.
/// Never checkpointed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    /// Penn-style bracketed tree, e.g. `(S (NP ...) (VP ...))`.
    pub bracketed: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub doc_headline: String,
    pub doc_date: NaiveDate,
    text_parse: Option<ParseTree>,
    headline_parse: Option<ParseTree>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, doc_headline: impl Into<String>, doc_date: NaiveDate) -> Self {
        Self {
            text: text.into().trim().to_string(),
            doc_headline: doc_headline.into(),
            doc_date,
            text_parse: None,
            headline_parse: None,
        }
    }

    pub fn set_text_parse(&mut self, parse: ParseTree) {
        self.text_parse = Some(parse);
    }

    pub fn set_headline_parse(&mut self, parse: ParseTree) {
        self.headline_parse = Some(parse);
    }

    pub fn text_parse(&self) -> Option<&ParseTree> {
        self.text_parse.as_ref()
    }

    pub fn headline_parse(&self) -> Option<&ParseTree> {
        self.headline_parse.as_ref()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// One newswire story. Text and sentences are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    headline: String,
    date: NaiveDate,
    text: String,
    sentences: Vec<Sentence>,
}

impl Document {
    /// Build a document from cleaned body text, segmenting it with `splitter`.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        headline: impl Into<String>,
        text: impl Into<String>,
        splitter: &dyn SentenceSplitter,
    ) -> Self {
        let headline = headline.into();
        let text = text.into();
        let sentences = segment(&text, &headline, date, splitter);
        Self {
            id: id.into(),
            headline,
            date,
            text,
            sentences,
        }
    }

    /// Rebuild a document whose sentences were segmented earlier.
    pub fn from_parts(
        id: String,
        headline: String,
        date: NaiveDate,
        text: String,
        sentences: Vec<Sentence>,
    ) -> Self {
        Self { id, headline, date, text, sentences }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Annotation is the only mutation allowed after construction.
    pub fn sentences_mut(&mut self) -> impl Iterator<Item = &mut Sentence> {
        self.sentences.iter_mut()
    }

    /// See `segment::filter_sentences`.
    pub fn filtered_sentences(&self, min_words: usize) -> Vec<&Sentence> {
        filter_sentences(&self.sentences, min_words)
    }
}

/// A topic and the documents loaded for it, in reference order.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id_1: String,
    pub id_2: String,
    pub title: String,
    pub documents: Vec<Document>,
}

impl Topic {
    pub fn new(id_1: impl Into<String>, id_2: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id_1: id_1.into(),
            id_2: id_2.into(),
            title: title.into(),
            documents: Vec::new(),
        }
    }

    /// External topic id: both parts concatenated.
    pub fn id(&self) -> String {
        format!("{}{}", self.id_1, self.id_2)
    }

    pub fn sentence_count(&self) -> usize {
        self.documents.iter().map(|d| d.sentences().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::RuleBasedSplitter;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2005, 1, 10).unwrap()
    }

    #[test]
    fn test_document_segments_on_construction() {
        let doc = Document::new(
            "APW_ENG_20050110.0001",
            date(),
            "Storm hits coast",
            "The storm hit at dawn. Power is out across the region.",
            &RuleBasedSplitter::default(),
        );
        assert_eq!(doc.sentences().len(), 2);
        assert_eq!(doc.sentences()[0].doc_headline, "Storm hits coast");
        assert_eq!(doc.sentences()[1].doc_date, date());
    }

    #[test]
    fn test_empty_document_has_no_sentences() {
        let doc = Document::new("D", date(), "", "", &RuleBasedSplitter::default());
        assert!(doc.sentences().is_empty());
        assert!(doc.filtered_sentences(0).is_empty());
    }

    #[test]
    fn test_annotation_is_attachable() {
        let mut doc = Document::new("D", date(), "H", "One sentence here.", &RuleBasedSplitter::default());
        for s in doc.sentences_mut() {
            s.set_text_parse(ParseTree { bracketed: "(S (NP One) ...)".to_string() });
        }
        assert!(doc.sentences()[0].text_parse().is_some());
        assert!(doc.sentences()[0].headline_parse().is_none());
    }

    #[test]
    fn test_sentence_text_is_trimmed() {
        let s = Sentence::new("  padded text \n", "H", date());
        assert_eq!(s.text, "padded text");
        assert_eq!(s.word_count(), 2);
        assert_eq!(s.to_string(), "padded text");
    }

    #[test]
    fn test_topic_id_concatenates_parts() {
        let topic = Topic::new("D1001", "A", "Columbine Massacre");
        assert_eq!(topic.id(), "D1001A");
        assert_eq!(topic.sentence_count(), 0);
    }
}
