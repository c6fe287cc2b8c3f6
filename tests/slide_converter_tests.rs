mod common;

use common::{Q4_REPLY, ScriptedClient};
use slidegen_backend::services::extractor::SlideExtractor;
use slidegen_backend::services::sanitizer::{SVG_NAMESPACE, XML_DECLARATION, sanitize_svg};
use slidegen_backend::services::slide_converter::{ConvertError, SLIDE_SYSTEM_PROMPT, SlideConverter};

#[test]
fn test_single_fenced_block_order_preserved() {
    let text = "Sure!\n```json\n{\"slides\": [{\"title\": \"1\", \"svg\": \"\"}, {\"title\": \"2\", \"svg\": \"\"}, {\"title\": \"3\", \"svg\": \"\"}]}\n```";
    let titles: Vec<String> = SlideExtractor::default()
        .extract(text)
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["1", "2", "3"]);
}

#[test]
fn test_malformed_fence_falls_back_to_inline_object() {
    let text = "```json\n{\"slides\": [{\"title\": \"broken\",]\n```\nRetrying without the fence:\n{\"slides\": [{\"title\": \"ok\", \"svg\": \"<svg></svg>\"}]}\nThanks.";
    let slides = SlideExtractor::default().extract(text);
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0]["title"], "ok");
}

#[test]
fn test_no_json_returns_empty() {
    let slides = SlideExtractor::default().extract("The quarterly numbers look great { but no json }");
    assert!(slides.is_empty());
}

#[test]
fn test_sanitizer_contract() {
    let out = sanitize_svg(r#"<svg width="10"><text>hi</text></svg>"#);
    assert!(out.starts_with(XML_DECLARATION));
    let start = out.find("<svg").unwrap();
    let end = start + out[start..].find('>').unwrap();
    let open_tag = &out[start..=end];
    assert!(open_tag.contains(&format!("xmlns=\"{SVG_NAMESPACE}\"")));
    assert_eq!(sanitize_svg(&out), out);
    assert_eq!(sanitize_svg(""), "");
}

#[tokio::test]
async fn test_end_to_end_q4_report() {
    let llm = ScriptedClient::new(vec![Q4_REPLY]);
    let converter = SlideConverter::new(llm.clone());

    let set = converter.convert("Q4 revenue up 15%").await.unwrap();

    assert_eq!(set.slides.len(), 1);
    assert_eq!(set.slides[0].title, "Q4");
    assert!(set.slides[0].svg.starts_with(XML_DECLARATION));
    assert!(set.slides[0].svg.contains(&format!("<svg xmlns=\"{SVG_NAMESPACE}\" width=\"1920\"")));
    assert!(set.message.contains('1'));

    let req = llm.last_request().unwrap();
    assert_eq!(req.system.as_deref(), Some(SLIDE_SYSTEM_PROMPT));
    assert_eq!(req.max_tokens, 15_000);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].content, "Q4 revenue up 15%");
}

#[tokio::test]
async fn test_missing_credential_never_calls_provider() {
    let llm = ScriptedClient::unconfigured();
    let converter = SlideConverter::new(llm.clone());

    let err = converter.convert("Q4 revenue up 15%").await.unwrap_err();
    assert!(matches!(err, ConvertError::MissingCredential));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_upstream_and_extraction_faults_are_distinct() {
    let failing = SlideConverter::new(ScriptedClient::failing("overloaded"));
    let err = failing.convert("report").await.unwrap_err();
    assert!(matches!(err, ConvertError::Generation(_)));
    assert!(err.to_string().contains("overloaded"));

    let chatty = SlideConverter::new(ScriptedClient::new(vec!["I'd rather not make slides."]));
    let err = chatty.convert("report").await.unwrap_err();
    assert!(matches!(err, ConvertError::NoSlides));
}

#[tokio::test]
async fn test_empty_slides_array_is_an_extraction_fault() {
    let reply = "```json\n{\"slides\": []}\n```\n```json\n{\"slides\": [{\"title\": \"later\", \"svg\": \"\"}]}\n```";
    let converter = SlideConverter::new(ScriptedClient::new(vec![reply]));
    let err = converter.convert("report").await.unwrap_err();
    assert!(matches!(err, ConvertError::NoSlides));
}

#[tokio::test]
async fn test_single_call_no_retry() {
    let llm = ScriptedClient::failing("boom");
    let converter = SlideConverter::new(llm.clone());
    let _ = converter.convert("report").await;
    assert_eq!(llm.calls(), 1);
}
