//! Report text → slide deck.
//!
//! A single provider call produces the whole deck; the reply is scraped by
//! [`SlideExtractor`] and every slide's SVG goes through [`sanitize_svg`].
//! There is no retry: one failed call fails the request.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::extractor::{RawSlide, SlideExtractor};
use super::llm_client::{CompletionRequest, LlmClient, LlmError};
use super::sanitizer::sanitize_svg;
use super::session_manager::Message;
use crate::message::Slide;

pub const DEFAULT_MAX_TOKENS: u32 = 15_000;

pub const SLIDE_SYSTEM_PROMPT: &str = r#"# Role
You are a data visualization and graphic design expert with 15 years of experience. You build presentation decks for executive audiences.

# Goal
Review the submitted document and identify the cover slide content and the key data that can be turned into charts and graphs. Choose the best visualization for each (line chart, bar chart, pie chart, and so on) and implement it.

# Format
Produce 16:9 presentation slides as SVG. Check every SVG for correctness yourself and fix any problem before answering.

# Guidelines
- Keep the overall tone minimal and refined.
- Visualizing the data is the priority. Put a chart, graph or infographic on every slide and design it so each figure or metric can be read at a glance.
- Use light green, emerald, black, grey and white tastefully. Use a clean typeface such as NanumGothic.
- Inside the SVG set font-family="NanumGothic, Arial, sans-serif".
- Render all text directly in the SVG with <text> elements.
- Always write complete SVG documents and do not escape special characters.
- Use width="1920" height="1080" so every slide is 16:9.

Structure the whole output as JSON, exactly like this:
```json
{
    "slides": [
        {"title": "Slide title", "svg": "Complete SVG code"}
    ]
}
```"#;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("LLM credential is not configured")]
    MissingCredential,
    #[error("generation failed: {0}")]
    Generation(#[source] LlmError),
    #[error("no slides extracted")]
    NoSlides,
}

/// Slides produced for one request plus a human-readable summary.
#[derive(Clone, Debug)]
pub struct SlideSet {
    pub slides: Vec<Slide>,
    pub message: String,
}

pub struct SlideConverter {
    llm: Arc<dyn LlmClient>,
    extractor: SlideExtractor,
    system_prompt: String,
    max_tokens: u32,
}

impl SlideConverter {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            extractor: SlideExtractor::default(),
            system_prompt: SLIDE_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub async fn convert(&self, report: &str) -> Result<SlideSet, ConvertError> {
        if !self.llm.is_configured() {
            return Err(ConvertError::MissingCredential);
        }

        let request = CompletionRequest {
            system: Some(self.system_prompt.clone()),
            messages: vec![Message::user(report)],
            max_tokens: self.max_tokens,
            temperature: None,
        };

        let reply = self.llm.complete(request).await.map_err(|e| match e {
            LlmError::MissingApiKey => ConvertError::MissingCredential,
            other => {
                warn!(error = %other, "slide generation call failed");
                ConvertError::Generation(other)
            }
        })?;

        let raw = self.extractor.extract(&reply);
        if raw.is_empty() {
            warn!(reply_len = reply.len(), "no slide data found in model reply");
            return Err(ConvertError::NoSlides);
        }

        let slides: Vec<Slide> = raw.iter().filter_map(build_slide).collect();
        if slides.is_empty() {
            warn!(records = raw.len(), "model reply held no slide objects");
            return Err(ConvertError::NoSlides);
        }

        info!(count = slides.len(), "slides generated");
        let message = format!(
            "A total of {} high-quality slides were generated.",
            slides.len()
        );
        Ok(SlideSet { slides, message })
    }
}

fn build_slide(record: &RawSlide) -> Option<Slide> {
    let Value::Object(map) = record else {
        warn!("skipping non-object slide record");
        return None;
    };
    let text = |key: &str| map.get(key).and_then(Value::as_str);
    Some(Slide {
        title: text("title").unwrap_or_default().to_string(),
        content: text("content").map(str::to_string),
        svg: sanitize_svg(text("svg").unwrap_or_default()),
    })
}
