//! Backend client gateway.
//!
//! Single point of contact with the remote text-generation API, and the
//! single point of failure detection for the AI path: no credential, network
//! faults, auth/rate-limit rejections, and timeouts all surface here as
//! `BackendError` variants that orchestrators translate into a fallback.

mod client;
mod types;

pub use client::{AnthropicClient, TextBackend};
pub use types::{ChatMessage, ChatRole, ContentBlock, MessagesRequest, MessagesResponse, Usage};
