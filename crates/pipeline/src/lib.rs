//! The message-driven download-and-repost pipeline.
//!
//! One inbound message feeds the classifier; each accepted link runs the
//! announce → download → deliver → cleanup sequence independently and
//! sequentially. The chat platform is reached only through the injected
//! [`ChatTransport`], and the extractor only through
//! [`reelay_extract::Extractor`], so the core carries no SDK types.

mod pipeline;
mod transport;

pub use {pipeline::Pipeline, transport::ChatTransport};
