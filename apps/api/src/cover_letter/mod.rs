// Cover letters: prompt assembly from resume data, backend generation through
// AiServiceManager, and a fixed-template fallback.

pub mod generator;
pub mod handlers;
pub mod prompts;
