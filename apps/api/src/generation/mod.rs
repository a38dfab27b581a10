// Copilot generation flow: variant → prompt → completion → rendered result.
// All completion calls go through llm_client; nothing here talks HTTP directly.

pub mod builder;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod session;
pub mod template;
pub mod variant;
