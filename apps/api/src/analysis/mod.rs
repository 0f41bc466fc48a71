// Resume analysis: PDF text extraction and a JSON-mode LLM review
// against a target role.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
