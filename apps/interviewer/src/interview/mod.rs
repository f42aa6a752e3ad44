// Interview core: staged dialogue state machine over an injected generation service.
// All model calls go through llm_client::GenerationService.

pub mod controller;
pub mod decision;
pub mod prompts;
pub mod session;
pub mod stage;
