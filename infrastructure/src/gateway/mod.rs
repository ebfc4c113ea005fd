//! LLM gateway adapters

mod openai_compatible;

pub use openai_compatible::OpenAiCompatibleGateway;
