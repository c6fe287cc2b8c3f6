//! Locating slide data inside free-form LLM replies.
//!
//! Models are asked for a bare `{"slides": [...]}` object but routinely wrap
//! it in a fenced block, surround it with prose, or both. Extraction runs an
//! ordered chain of [`ExtractionStrategy`]s; the first one that finds a
//! `"slides"` array wins, even an empty one. Nothing here returns an error:
//! a reply with no usable JSON simply produces an empty list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// One raw slide record as emitted by the model (normally an object with
/// `title` and `svg` keys, but not guaranteed).
pub type RawSlide = Value;

static RE_JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid fence regex"));

static RE_SLIDES_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\{\s*"slides"\s*:\s*\["#).expect("valid slides regex"));

pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Some` as soon as a `"slides"` array is found.
    fn extract(&self, text: &str) -> Option<Vec<RawSlide>>;
}

/// Every ```` ```json ```` fenced block, in order of appearance.
pub struct FencedJsonBlock;

impl ExtractionStrategy for FencedJsonBlock {
    fn name(&self) -> &'static str {
        "fenced_json_block"
    }

    fn extract(&self, text: &str) -> Option<Vec<RawSlide>> {
        RE_JSON_FENCE
            .captures_iter(text)
            .filter_map(|caps| serde_json::from_str::<Value>(&caps[1]).ok())
            .find_map(slides_of)
    }
}

/// A `{"slides": [...]}` object embedded directly in prose. Each candidate
/// opening is parsed as exactly one JSON value; whatever follows it is ignored.
pub struct InlineSlidesObject;

impl ExtractionStrategy for InlineSlidesObject {
    fn name(&self) -> &'static str {
        "inline_slides_object"
    }

    fn extract(&self, text: &str) -> Option<Vec<RawSlide>> {
        RE_SLIDES_OPEN
            .find_iter(text)
            .filter_map(|m| parse_leading_value(&text[m.start()..]))
            .find_map(slides_of)
    }
}

fn parse_leading_value(s: &str) -> Option<Value> {
    serde_json::Deserializer::from_str(s)
        .into_iter::<Value>()
        .next()
        .and_then(Result::ok)
}

fn slides_of(value: Value) -> Option<Vec<RawSlide>> {
    match value {
        Value::Object(mut map) => match map.remove("slides") {
            Some(Value::Array(slides)) => Some(slides),
            _ => None,
        },
        _ => None,
    }
}

pub struct SlideExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for SlideExtractor {
    fn default() -> Self {
        Self::new(vec![Box::new(FencedJsonBlock), Box::new(InlineSlidesObject)])
    }
}

impl SlideExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, text: &str) -> Vec<RawSlide> {
        for strategy in &self.strategies {
            if let Some(slides) = strategy.extract(text) {
                debug!(strategy = strategy.name(), count = slides.len(), "slides extracted");
                return slides;
            }
        }
        Vec::new()
    }
}
