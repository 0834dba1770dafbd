//! Remote vision analysis
//!
//! [`VisionAnalyzer`] abstracts the AI service; [`GeminiAnalyzer`] talks to the
//! Gemini REST API using structured JSON output.

pub mod gemini;
pub mod models;
pub mod traits;

pub use gemini::GeminiAnalyzer;
pub use traits::VisionAnalyzer;
