// AI improvement suggestions per competency.
// All endpoint calls go through llm_client; nothing here talks HTTP directly.

pub mod generator;
pub mod handlers;
pub mod prompts;

pub use generator::SuggestionGenerator;
