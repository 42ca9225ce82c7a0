//! Analysis Adapters
//!
//! - `GeminiClient`: generative research summaries per project

mod gemini;

pub use gemini::{
    parse_generated_text, research_prompt, GeminiClient, GeminiConfig, DEFAULT_BASE_URL as GEMINI_BASE_URL,
    DEFAULT_MODEL as GEMINI_MODEL,
};
