pub mod gemini;
pub mod noop;
pub mod openai;
