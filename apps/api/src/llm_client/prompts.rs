// Shared prompt constants used by more than one feature.
// Feature-specific prompts live in a prompts.rs alongside each feature module.

/// System prompt for plain-text rewriting: no preamble, no quotes, no markdown.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert resume writer and career coach. \
    Respond with the requested text only. \
    Do NOT add explanations, labels, quotation marks or markdown. \
    Do NOT invent employers, titles or credentials that were not provided.";

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Prompt used by health probes; kept tiny to limit cost.
pub const PROBE_PROMPT: &str = "Reply with the single word OK.";
