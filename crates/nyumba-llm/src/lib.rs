//! Chat-completions client for Groq's OpenAI-compatible API.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::GroqClient;
pub use error::LlmError;
pub use types::{ChatRequest, ChatResponse, Message};
