pub mod gemini;
pub mod http;
pub mod ollama;
