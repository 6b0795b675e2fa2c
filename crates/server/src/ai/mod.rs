//! LLM features backed by a hosted chat-completion API

pub mod client;
pub mod explain;
pub mod predict;

pub use client::{ChatCompletion, HuggingFaceClient};
