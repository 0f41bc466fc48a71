// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the instructions they have in common.

/// Appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY raw JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Guards against the model padding output with template filler.
pub const REAL_DATA_INSTRUCTION: &str = "USE ONLY REAL DATA FROM ABOVE. NO PLACEHOLDERS.";
