//! # media-handlers
//!
//! Handlers for the link relay: [`LoggingHandler`], [`StartCommandHandler`] and
//! [`MediaRelayHandler`], plus the [`MediaDispatcher`] that applies the per-type size limits.

mod dispatcher;
mod logging_handler;
pub mod messages;
mod relay_handler;
mod start_handler;

pub use dispatcher::{
    decide, size_limit, BatchOutcome, Decision, DispatchOutcome, MediaDispatcher,
    UnknownSizePolicy, MAX_PHOTO_SIZE, MAX_VIDEO_SIZE,
};
pub use logging_handler::LoggingHandler;
pub use relay_handler::MediaRelayHandler;
pub use start_handler::{is_start_command, StartCommandHandler};
