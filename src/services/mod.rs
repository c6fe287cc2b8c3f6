pub mod chatbot;
pub mod extractor;
pub mod llm_client;
pub mod sanitizer;
pub mod session_manager;
pub mod slide_converter;
