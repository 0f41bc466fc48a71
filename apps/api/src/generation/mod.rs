// Resume generation: prompt building, LLM call with template fallback,
// and the generate / sanitize routes.
// All LLM calls go through llm_client::Generator.

pub mod generator;
pub mod handlers;
pub mod prompts;
