//! Discord collaborator: gateway event handling and the send/delete
//! primitives behind the pipeline's transport seam. Everything here is a
//! thin adapter; decision logic lives in `reelay-pipeline`.

pub mod bot;
pub mod handler;
pub mod transport;

pub use {bot::run, handler::ReelayHandler, transport::DiscordTransport};
