// Resume text enhancement: rule-based rewriting, keyword bank, backend
// enhancement and the orchestrating engine.
// All backend calls go through AiServiceManager — never a provider client directly.

pub mod ai_manager;
pub mod context;
pub mod engine;
pub mod handlers;
pub mod keyword_bank;
pub mod prompts;
pub mod quantify;
pub mod rule_based;
pub mod templates;
