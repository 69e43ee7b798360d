//! OpenAI-compatible provider implementation used for local inference servers.

pub mod client;

pub use client::OpenAiCompatibleClient;
