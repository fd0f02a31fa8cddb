//! LLM service adapters
//!
//! Implementations of the CompletionPort trait:
//! - OpenAI (GPT-4o and any OpenAI-compatible endpoint)

pub mod openai;

pub use openai::OpenAIService;
