//! Sentence segmentation
//!
//! Boundaries come from the Unicode sentence-boundary rules (UAX #29), which
//! already keep `e.g. the` or `3.14` together. Titles and initials such as
//! `Dr. Smith` or `J. Doe` are split by those rules, so a second pass joins a
//! segment ending in a known title to the segment that follows it. A segment
//! ending in a single capital initial is joined only when the next segment does
//! not open with a common sentence starter, so `Plan B. It worked` still splits.
//! Joining never drops text: the unfiltered spans always tile the input.

use std::iter::Peekable;
use unicode_segmentation::{USentenceBoundIndices, UnicodeSegmentation};

/// Sentences shorter than this many characters are dropped
pub const DEFAULT_MIN_LENGTH: usize = 15;

const ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Mx.", "Dr.", "Prof.", "Sr.", "Jr.", "St.", "Mt.", "Ft.", "Gen.",
    "Gov.", "Sen.", "Rep.", "Lt.", "Col.", "Capt.", "Sgt.", "Rev.", "No.", "Fig.", "vs.",
    "Jan.", "Feb.", "Aug.", "Sept.", "Oct.", "Nov.", "Dec.",
];

const SENTENCE_OPENERS: &[&str] = &[
    "A", "An", "The", "It", "Its", "This", "That", "These", "Those", "He", "She", "They", "We",
    "I", "You", "There", "Then", "But", "And", "Or", "So", "Yet", "In", "On", "At", "As", "If",
    "When", "While", "After", "Before", "Now", "Our", "His", "Her", "Their", "My", "What", "Why",
    "How", "Who", "Where", "Still", "However",
];

/// Byte offsets of one sentence within its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Returns the slice of `text` covered by this span
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Length of the span in characters
    pub fn char_len(&self, text: &str) -> usize {
        self.slice(text).chars().count()
    }
}

/// A sentence that passed the length filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub span: Span,
    pub text: &'a str,
}

/// Splits text into sentences with a fixed minimum length
#[derive(Debug, Clone, Copy)]
pub struct SentenceSegmenter {
    min_length: usize,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl SentenceSegmenter {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Returns every sentence span in order, before length filtering
    ///
    /// Concatenating the slices of all spans reproduces `text` exactly.
    pub fn spans<'a>(&self, text: &'a str) -> Spans<'a> {
        Spans {
            inner: text.split_sentence_bound_indices().peekable(),
        }
    }

    /// Returns the sentences at least `min_length` characters long
    ///
    /// The iterator is lazy and can be re-created from the same input any number
    /// of times with identical results.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_corpus::text::SentenceSegmenter;
    ///
    /// let segmenter = SentenceSegmenter::default();
    /// let text = "The first sentence is long enough. Too short. Another long sentence here.";
    /// let kept: Vec<&str> = segmenter.segment(text).map(|s| s.text).collect();
    /// assert_eq!(
    ///     kept,
    ///     vec!["The first sentence is long enough. ", "Another long sentence here."]
    /// );
    /// ```
    pub fn segment<'a>(&self, text: &'a str) -> Segments<'a> {
        Segments {
            text,
            spans: self.spans(text),
            min_length: self.min_length,
        }
    }
}

/// Iterator over all sentence spans of a text
pub struct Spans<'a> {
    inner: Peekable<USentenceBoundIndices<'a>>,
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let (start, first) = self.inner.next()?;
        let mut end = start + first.len();
        let mut last = first;

        while let Some(&(offset, segment)) = self.inner.peek() {
            if !joins_next(last, segment) {
                break;
            }
            self.inner.next();
            end = offset + segment.len();
            last = segment;
        }

        Some(Span { start, end })
    }
}

/// Iterator over sentences that pass the length filter
pub struct Segments<'a> {
    text: &'a str,
    spans: Spans<'a>,
    min_length: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Sentence<'a>;

    fn next(&mut self) -> Option<Sentence<'a>> {
        for span in self.spans.by_ref() {
            if span.char_len(self.text) < self.min_length {
                tracing::trace!(start = span.start, end = span.end, "Dropping short sentence");
                continue;
            }
            return Some(Sentence {
                span,
                text: span.slice(self.text),
            });
        }
        None
    }
}

/// Returns true if `segment` ends mid-sentence and should absorb `next`
///
/// Titles always join. A single capital initial joins unless `next` opens
/// with a common sentence starter.
fn joins_next(segment: &str, next: &str) -> bool {
    let word = match segment.trim_end().rsplit(char::is_whitespace).next() {
        Some(word) => word.trim_start_matches(|c: char| !c.is_alphanumeric()),
        None => return false,
    };

    if ABBREVIATIONS.contains(&word) {
        return true;
    }

    let mut chars = word.chars();
    let is_initial = matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(initial), Some('.'), None) if initial.is_uppercase()
    );

    is_initial && !starts_with_opener(next)
}

fn starts_with_opener(segment: &str) -> bool {
    segment
        .split_whitespace()
        .next()
        .map(|word| word.trim_end_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|word| SENTENCE_OPENERS.contains(&word))
}
