//! Model invocation, prompt construction, and reply validation

pub mod client;
pub mod prompt_builder;
pub mod response;

pub use client::{BedrockModelClient, HttpModelClient, ModelClient};
pub use response::{ModelOutput, validate_model_output};
