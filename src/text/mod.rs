//! Text processing for Tagged-Corpus
//!
//! This module turns extracted article text into sentence units:
//! - Sentence boundary detection (UAX #29 plus an abbreviation pass)
//! - Short-sentence filtering

mod segmenter;

pub use segmenter::{Segments, Sentence, SentenceSegmenter, Span, Spans, DEFAULT_MIN_LENGTH};
